//! Article URLs derived from a record's DOI

use tracing::{debug, instrument, warn};

use crate::pubmed::client::PubMedClient;
use crate::pubmed::summary::SummaryRecord;

/// Build the DOI resolver link for a record, if it has a DOI
///
/// The DOI is appended verbatim; no encoding or validation is applied.
///
/// ```
/// use pubmed_lookup::pubmed::article_url::doi_url;
/// use pubmed_lookup::SummaryRecord;
///
/// let record = SummaryRecord {
///     id: "22331878".to_string(),
///     title: String::new(),
///     author_list: vec![],
///     source: String::new(),
///     pub_date: String::new(),
///     volume: String::new(),
///     issue: String::new(),
///     pages: String::new(),
///     has_abstract: false,
///     doi: Some("10.1073/pnas.1116368109".to_string()),
/// };
///
/// assert_eq!(
///     doi_url(&record, "http://dx.doi.org").as_deref(),
///     Some("http://dx.doi.org/10.1073/pnas.1116368109")
/// );
/// ```
pub fn doi_url(record: &SummaryRecord, resolver_prefix: &str) -> Option<String> {
    record
        .doi
        .as_deref()
        .map(|doi| format!("{}/{}", resolver_prefix.trim_end_matches('/'), doi))
}

/// Determine the article's URL from its DOI
///
/// * no DOI: `""`
/// * `resolve == false`: the DOI resolver link, without any request
/// * `resolve == true`: wherever the resolver link redirects to, or `""` if
///   following it fails for any reason
#[instrument(skip(client, record), fields(pmid = %record.id))]
pub async fn resolve_article_url(client: &PubMedClient, record: &SummaryRecord, resolve: bool) -> String {
    let Some(candidate) = doi_url(record, client.config().effective_doi_resolver_url()) else {
        debug!("Record has no DOI");
        return String::new();
    };

    if !resolve {
        return candidate;
    }

    match client.resolve_redirect(&candidate).await {
        Ok(url) => url,
        Err(e) => {
            warn!(doi_url = %candidate, error = %e, "Could not resolve DOI");
            String::new()
        }
    }
}
