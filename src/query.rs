//! Query resolution: turn user input into a PubMed ID
//!
//! A query is either a bare PubMed ID (`22331878`) or a PubMed article URL
//! (`http://www.ncbi.nlm.nih.gov/pubmed/22331878`). Anything else is rejected
//! with [`PubMedError::InvalidQuery`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PubMedError, Result};

fn pmid_regex() -> &'static Regex {
    static PMID_REGEX: OnceLock<Regex> = OnceLock::new();
    PMID_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Failed to compile PMID regex"))
}

fn pubmed_url_regex() -> &'static Regex {
    static PUBMED_URL_REGEX: OnceLock<Regex> = OnceLock::new();
    PUBMED_URL_REGEX.get_or_init(|| {
        Regex::new(r"^https?://www\.ncbi\.nlm\.nih\.gov(?P<path>/pubmed/[0-9]+)$")
            .expect("Failed to compile PubMed URL regex")
    })
}

fn pubmed_path_regex() -> &'static Regex {
    static PUBMED_PATH_REGEX: OnceLock<Regex> = OnceLock::new();
    PUBMED_PATH_REGEX.get_or_init(|| {
        Regex::new(r"^/pubmed/(?P<pmid>[0-9]+)$").expect("Failed to compile PubMed path regex")
    })
}

/// A PubMed ID (PMID) as it is sent to E-utilities
///
/// The value is kept as the exact digit string the user supplied, so
/// `PubMedId::parse("0022331878")` round-trips without losing leading zeros.
///
/// # Examples
///
/// ```
/// use pubmed_lookup::PubMedId;
///
/// let pmid = PubMedId::parse("22331878").unwrap();
/// assert_eq!(pmid.as_str(), "22331878");
///
/// assert!(PubMedId::parse("abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PubMedId(String);

impl PubMedId {
    /// Parse a bare PMID; the whole string must be ASCII digits
    pub fn parse(s: &str) -> Result<Self> {
        if pmid_regex().is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(PubMedError::InvalidQuery {
                query: s.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PubMedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PubMedId {
    type Err = PubMedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<u32> for PubMedId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for PubMedId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for PubMedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve a PubMed ID or PubMed URL into a [`PubMedId`]
///
/// Accepts anything printable, so both `"22331878"` and `22331878_u32`
/// resolve to the same ID.
///
/// # Errors
///
/// Returns [`PubMedError::InvalidQuery`] when the input is neither a bare
/// PMID nor a `http(s)://www.ncbi.nlm.nih.gov/pubmed/<digits>` URL.
///
/// # Example
///
/// ```
/// use pubmed_lookup::resolve_query;
///
/// let from_id = resolve_query("22331878").unwrap();
/// let from_url = resolve_query("http://www.ncbi.nlm.nih.gov/pubmed/22331878").unwrap();
/// let from_int = resolve_query(22331878).unwrap();
///
/// assert_eq!(from_id, from_url);
/// assert_eq!(from_id, from_int);
/// ```
pub fn resolve_query<Q: fmt::Display>(query: Q) -> Result<PubMedId> {
    let query = query.to_string();

    if pmid_regex().is_match(&query) {
        debug!(query = %query, "Query is a PubMed ID");
        return Ok(PubMedId(query));
    }

    if pubmed_url_regex().is_match(&query) {
        debug!(query = %query, "Query is a PubMed URL");
        return parse_pubmed_url(&query);
    }

    Err(PubMedError::InvalidQuery { query })
}

/// Extract the PMID from a PubMed article URL
///
/// Only the path is inspected; it must be exactly `/pubmed/<digits>`.
pub fn parse_pubmed_url(pubmed_url: &str) -> Result<PubMedId> {
    let invalid = || PubMedError::InvalidQuery {
        query: pubmed_url.to_string(),
    };

    let path = pubmed_url_regex()
        .captures(pubmed_url)
        .and_then(|caps| caps.name("path"))
        .ok_or_else(invalid)?
        .as_str();

    pubmed_path_regex()
        .captures(path)
        .and_then(|caps| caps.name("pmid"))
        .map(|pmid| PubMedId(pmid.as_str().to_string()))
        .ok_or_else(invalid)
}
