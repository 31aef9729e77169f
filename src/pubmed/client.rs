use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::document::MetadataDocument;
use crate::pubmed::lookup::PubMedLookup;
use crate::pubmed::summary::{SummaryRecord, parse_esummary_response};
use crate::query::PubMedId;

/// Client for the PubMed E-utilities endpoints used by lookups
///
/// Every call is a single request: no retries, and no timeout unless one is
/// set on the [`ClientConfig`].
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_lookup::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_lookup::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new().with_email("researcher@university.edu");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = Client::builder()
            .user_agent(config.effective_user_agent())
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self::with_client_and_config(client, config)
    }

    /// Create a new PubMed client around an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self::with_client_and_config(client, ClientConfig::new())
    }

    fn with_client_and_config(client: Client, config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();
        Self {
            client,
            base_url,
            config,
        }
    }

    /// Get a reference to the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve a query and fetch its summary record
    ///
    /// See [`PubMedLookup::new`].
    pub async fn lookup<Q: std::fmt::Display>(&self, query: Q) -> Result<PubMedLookup> {
        PubMedLookup::new(query, self).await
    }

    /// Fetch the ESummary record for a PMID
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::ApiError` - If ESummary answers with a non-success status
    /// * `PubMedError::JsonError` - If the body is not ESummary JSON
    /// * `PubMedError::ArticleNotFound` - If ESummary has no record for the PMID
    /// * `PubMedError::MalformedRecord` - If the record lacks required fields
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_lookup::{PubMedClient, PubMedId};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let record = client.fetch_summary(&PubMedId::parse("22331878")?).await?;
    ///     println!("{}", record.title);
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self, pmid), fields(pmid = %pmid))]
    pub async fn fetch_summary(&self, pmid: &PubMedId) -> Result<SummaryRecord> {
        let url = format!(
            "{}/esummary.fcgi?db=pubmed&id={}&retmode=json",
            self.base_url, pmid
        );

        debug!("Making ESummary API request");
        let response = self.make_request(&url).await?;
        let json_text = response.text().await?;

        let record = parse_esummary_response(&json_text, pmid.as_str())?;
        info!(
            title = %record.title,
            authors_count = record.author_list.len(),
            has_abstract = record.has_abstract,
            "Fetched summary record"
        );

        Ok(record)
    }

    /// Fetch the EFetch XML document for a PMID
    ///
    /// Any failure (network, status, undecodable XML) is logged and collapsed
    /// to `None`; callers treat it as "no document available".
    #[instrument(skip(self, pmid), fields(pmid = %pmid))]
    pub async fn fetch_metadata_document(&self, pmid: &PubMedId) -> Option<MetadataDocument> {
        match self.try_fetch_metadata_document(pmid).await {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(error = %e, "Metadata document unavailable");
                None
            }
        }
    }

    /// Fetch the EFetch XML document for a PMID, surfacing failures
    pub async fn try_fetch_metadata_document(&self, pmid: &PubMedId) -> Result<MetadataDocument> {
        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml&rettype=abstract",
            self.base_url, pmid
        );

        debug!("Making EFetch API request");
        let response = self.make_request(&url).await?;
        let xml_text = response.text().await?;

        MetadataDocument::from_xml(&xml_text)
    }

    /// GET a URL, following redirects, and return where it landed
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the request fails or redirects loop
    /// * `PubMedError::ApiError` - If the final response is not a success
    #[instrument(skip(self))]
    pub async fn resolve_redirect(&self, url: &str) -> Result<String> {
        debug!("Following redirects");
        let response = self.client.get(url).send().await?;
        let response = check_status(response)?;

        let final_url = response.url().to_string();
        debug!(final_url = %final_url, "Redirects resolved");
        Ok(final_url)
    }

    /// Send a GET request to E-utilities with the identification parameters appended
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        debug!("Making API request to: {}", final_url);
        let response = self.client.get(&final_url).send().await?;
        check_status(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    warn!("API request failed with status: {}", response.status());
    Err(PubMedError::ApiError {
        status: response.status().as_u16(),
        message: response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    })
}
