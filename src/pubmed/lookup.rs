use std::fmt::Display;

use tracing::{info, instrument};

use crate::error::Result;
use crate::pubmed::client::PubMedClient;
use crate::pubmed::summary::SummaryRecord;
use crate::query::{PubMedId, resolve_query};

/// A resolved query together with its ESummary record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubMedLookup {
    pmid: PubMedId,
    record: SummaryRecord,
}

impl PubMedLookup {
    /// Resolve `query` (a PMID or PubMed URL) and fetch its summary record
    ///
    /// # Errors
    ///
    /// * `PubMedError::InvalidQuery` - If the query is neither a PMID nor a PubMed URL;
    ///   no request is made in that case
    /// * Any error from [`PubMedClient::fetch_summary`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_lookup::{PubMedClient, PubMedLookup};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let lookup = PubMedLookup::new("http://www.ncbi.nlm.nih.gov/pubmed/22331878", &client).await?;
    ///     println!("{}", lookup.record().title);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(query, client), fields(query = %query))]
    pub async fn new<Q: Display>(query: Q, client: &PubMedClient) -> Result<Self> {
        let pmid = resolve_query(&query)?;
        let record = client.fetch_summary(&pmid).await?;

        info!(pmid = %pmid, "Lookup complete");
        Ok(Self { pmid, record })
    }

    /// Pair an already-fetched record with its PMID
    pub fn from_record(pmid: PubMedId, record: SummaryRecord) -> Self {
        Self { pmid, record }
    }

    pub fn pmid(&self) -> &PubMedId {
        &self.pmid
    }

    pub fn record(&self) -> &SummaryRecord {
        &self.record
    }

    pub fn into_record(self) -> SummaryRecord {
        self.record
    }
}
