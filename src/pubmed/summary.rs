//! ESummary records: the compact, pre-fielded view of a PubMed article

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PubMedError, Result};
use crate::pubmed::responses::{ESummaryDocSum, ESummaryResponse};

/// ESummary attribute flag set on records that carry an abstract
const HAS_ABSTRACT: &str = "Has Abstract";

/// Summary record for one article, as returned by ESummary
///
/// Optional ESummary fields default to the empty string. `doi` stays an
/// `Option` because its presence decides whether an article URL exists at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// PubMed ID
    pub id: String,
    /// Article title
    pub title: String,
    /// Author names in citation form ("Goodspeed D")
    pub author_list: Vec<String>,
    /// Journal abbreviation
    pub source: String,
    /// Publication date as printed by ESummary ("2012 Mar 20")
    pub pub_date: String,
    pub volume: String,
    pub issue: String,
    pub pages: String,
    /// Whether PubMed holds an abstract for this record
    pub has_abstract: bool,
    /// DOI, if the record lists one
    pub doi: Option<String>,
}

impl From<ESummaryDocSum> for SummaryRecord {
    fn from(doc: ESummaryDocSum) -> Self {
        let doi = doc
            .articleids
            .iter()
            .find(|aid| aid.idtype == "doi" && !aid.value.is_empty())
            .map(|aid| aid.value.clone());

        let has_abstract = doc.attributes.iter().any(|attr| attr == HAS_ABSTRACT);

        Self {
            id: doc.uid,
            title: doc.title,
            author_list: doc.authors.into_iter().map(|a| a.name).collect(),
            source: doc.source,
            pub_date: doc.pubdate,
            volume: doc.volume,
            issue: doc.issue,
            pages: doc.pages,
            has_abstract,
            doi,
        }
    }
}

/// Parse an ESummary JSON response and take its first (and only) record
///
/// # Errors
///
/// * `PubMedError::JsonError` - If the body is not ESummary JSON
/// * `PubMedError::ArticleNotFound` - If the response lists no record, or
///   ESummary reported an error for it
/// * `PubMedError::MalformedRecord` - If the record lacks a title, source or
///   author list
pub(crate) fn parse_esummary_response(json_text: &str, pmid: &str) -> Result<SummaryRecord> {
    let response: ESummaryResponse = serde_json::from_str(json_text)?;
    let result = &response.result;

    let not_found = || PubMedError::ArticleNotFound {
        pmid: pmid.to_string(),
    };

    let uid = result
        .get("uids")
        .and_then(|v| v.as_array())
        .and_then(|uids| uids.first())
        .and_then(|v| v.as_str())
        .ok_or_else(not_found)?;

    let doc_value = result.get(uid).ok_or_else(not_found)?;

    if let Some(error) = doc_value.get("error") {
        warn!(uid = %uid, error = %error, "ESummary returned error for UID");
        return Err(not_found());
    }

    let doc: ESummaryDocSum =
        serde_json::from_value(doc_value.clone()).map_err(|e| PubMedError::MalformedRecord {
            message: format!("ESummary record {} is incomplete: {}", uid, e),
        })?;

    debug!(uid = %doc.uid, authors = doc.authors.len(), "Parsed ESummary record");

    Ok(doc.into())
}
