use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::article_url::{doi_url, resolve_article_url};
use crate::pubmed::client::PubMedClient;
use crate::pubmed::document::{MetadataDocument, PubDate, parse_abstract, parse_pub_date};
use crate::pubmed::lookup::PubMedLookup;
use crate::pubmed::summary::SummaryRecord;

/// A normalized PubMed publication
///
/// Every text field is present; missing data is the empty string. `month` is
/// the only optional value and is `None` when the document has no parseable
/// month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub(crate) id: String,
    pub(crate) source_url: String,
    pub(crate) title: String,
    pub(crate) author_list: Vec<String>,
    pub(crate) first_author: String,
    pub(crate) last_author: String,
    pub(crate) journal: String,
    pub(crate) volume: String,
    pub(crate) issue: String,
    pub(crate) pages: String,
    pub(crate) year: String,
    pub(crate) month: Option<u32>,
    pub(crate) day: String,
    pub(crate) abstract_text: String,
    pub(crate) doi_url: String,
    pub(crate) article_url: String,
}

impl Publication {
    /// Build a publication for a lookup, fetching its metadata document and
    /// article URL
    ///
    /// With `resolve_doi` the DOI link is followed to the publisher's page;
    /// otherwise `article_url` is the DOI resolver link itself. Neither fetch
    /// can fail this call: an unavailable document leaves the abstract and
    /// date empty, and an unresolvable DOI leaves `article_url` empty.
    ///
    /// # Errors
    ///
    /// * `PubMedError::MalformedRecord` - If the summary has no authors
    /// * `PubMedError::AbstractParseError` - If the record declares an abstract
    ///   the document does not hold in a recognisable shape
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_lookup::{PubMedClient, PubMedLookup, Publication};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let lookup = PubMedLookup::new("22331878", &client).await?;
    ///     let publication = Publication::new(&lookup, &client, true).await?;
    ///     println!("{}", publication.cite());
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(lookup, client), fields(pmid = %lookup.pmid()))]
    pub async fn new(lookup: &PubMedLookup, client: &PubMedClient, resolve_doi: bool) -> Result<Self> {
        let document = client.fetch_metadata_document(lookup.pmid()).await;

        let mut publication = Self::normalize(lookup.record().clone(), document.as_ref(), client.config())?;
        publication.article_url = resolve_article_url(client, lookup.record(), resolve_doi).await;

        info!(
            title = %publication.title,
            has_abstract = !publication.abstract_text.is_empty(),
            article_url = %publication.article_url,
            "Built publication"
        );
        Ok(publication)
    }

    /// Merge a summary record and its (optional) metadata document
    ///
    /// Makes no requests. `article_url` is left empty; [`Publication::new`]
    /// fills it in.
    pub fn normalize(
        record: SummaryRecord,
        document: Option<&MetadataDocument>,
        config: &ClientConfig,
    ) -> Result<Self> {
        let (first_author, last_author) = match (record.author_list.first(), record.author_list.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => {
                return Err(PubMedError::MalformedRecord {
                    message: format!("record {} has an empty author list", record.id),
                });
            }
        };

        let abstract_text = match document {
            Some(document) if record.has_abstract => parse_abstract(document)?,
            _ => String::new(),
        };

        let PubDate { year, month, day } = document.map(parse_pub_date).unwrap_or_default();
        debug!(year = %year, month = ?month, day = %day, "Publication date");

        let source_url = format!("{}/{}", config.effective_pubmed_url(), record.id);
        let doi_url = doi_url(&record, config.effective_doi_resolver_url()).unwrap_or_default();

        Ok(Self {
            id: record.id,
            source_url,
            title: record.title,
            author_list: record.author_list,
            first_author,
            last_author,
            journal: record.source,
            volume: record.volume,
            issue: record.issue,
            pages: record.pages,
            year,
            month,
            day,
            abstract_text,
            doi_url,
            article_url: String::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The PubMed page for this article
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_list(&self) -> &[String] {
        &self.author_list
    }

    pub fn first_author(&self) -> &str {
        &self.first_author
    }

    pub fn last_author(&self) -> &str {
        &self.last_author
    }

    pub fn journal(&self) -> &str {
        &self.journal
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    pub fn pages(&self) -> &str {
        &self.pages
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// Month number, 1 to 12
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    /// Abstract paragraphs separated by blank lines
    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    /// DOI resolver link, unresolved; empty without a DOI
    pub fn doi_url(&self) -> &str {
        &self.doi_url
    }

    pub fn article_url(&self) -> &str {
        &self.article_url
    }
}
