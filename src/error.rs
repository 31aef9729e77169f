use std::result;

use thiserror::Error;

/// Error types for PubMed lookup operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// The query is neither a PubMed ID nor a PubMed URL
    #[error("Query ({query}) doesn't appear to be a PubMed ID or PubMed URL")]
    InvalidQuery { query: String },

    /// The abstract region of the EFetch document has a shape we don't understand
    #[error("Error parsing abstract: {message}")]
    AbstractParseError { message: String },

    /// The summary record lacks a field every publication needs
    #[error("Malformed PubMed record: {message}")]
    MalformedRecord { message: String },

    /// Article not found
    #[error("Article not found: PMID {pmid}")]
    ArticleNotFound { pmid: String },

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
}

pub type Result<T> = result::Result<T, PubMedError>;
