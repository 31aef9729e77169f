//! # PubMed Lookup
//!
//! Look up PubMed articles by ID or URL and turn them into citations.
//!
//! ## Features
//!
//! - **Query resolution**: accept a bare PubMed ID or a PubMed article URL
//! - **Normalization**: merge the ESummary record and the EFetch XML document
//!   into one [`Publication`] whose fields are always present
//! - **Citations**: full and compact citation strings
//! - **DOI links**: the DOI resolver link, optionally followed to the publisher
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_lookup::{PubMedClient, PubMedLookup, Publication};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let lookup = PubMedLookup::new("http://www.ncbi.nlm.nih.gov/pubmed/22331878", &client).await?;
//!     let publication = Publication::new(&lookup, &client, true).await?;
//!
//!     println!("{}", publication.cite());
//!     println!("{}", publication.cite_mini());
//!     println!("{}", publication.article_url());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Offline normalization
//!
//! [`Publication::normalize`] makes no requests, so records and documents
//! obtained elsewhere can be formatted directly:
//!
//! ```
//! use pubmed_lookup::{ClientConfig, Publication, SummaryRecord};
//!
//! let record = SummaryRecord {
//!     id: "1".to_string(),
//!     title: "A title.".to_string(),
//!     author_list: vec!["Smith J".to_string(), "Doe A".to_string()],
//!     source: "J Test".to_string(),
//!     pub_date: String::new(),
//!     volume: "3".to_string(),
//!     issue: String::new(),
//!     pages: "10-2".to_string(),
//!     has_abstract: false,
//!     doi: None,
//! };
//!
//! let publication = Publication::normalize(record, None, &ClientConfig::new()).unwrap();
//! assert_eq!(publication.cite(), "Smith J, Doe A (). A title. J Test 3: 10-2.");
//! assert_eq!(publication.cite_mini(), "Smith J - Doe A -  - J Test");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pubmed;
pub mod query;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use pubmed::{
    AbstractNode, AbstractSection, MetadataDocument, PubDate, PubMedClient, PubMedLookup, Publication,
    SummaryRecord, parse_abstract, parse_pub_date,
};
pub use query::{PubMedId, parse_pubmed_url, resolve_query};
