//! Client configuration for NCBI E-utilities and DOI resolution
//!
//! [`ClientConfig`] collects the parameters NCBI asks clients to identify
//! themselves with (email, tool, API key) together with the URL prefixes used
//! to build PubMed page links and DOI resolver links.

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_PUBMED_URL: &str = "http://www.ncbi.nlm.nih.gov/pubmed";
const DEFAULT_DOI_RESOLVER_URL: &str = "http://dx.doi.org";
const DEFAULT_TOOL: &str = "pubmed-lookup";

/// Configuration for [`PubMedClient`](crate::PubMedClient)
///
/// # Example
///
/// ```
/// use pubmed_lookup::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_email("researcher@university.edu")
///     .with_tool("MyCitationTool");
///
/// assert_eq!(config.effective_tool(), "MyCitationTool");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// NCBI API key (optional)
    pub api_key: Option<String>,
    /// Contact email sent with every E-utilities request
    pub email: Option<String>,
    /// Tool name sent with every E-utilities request
    pub tool: Option<String>,
    /// Override for the E-utilities base URL
    pub base_url: Option<String>,
    /// Override for the PubMed article page prefix
    pub pubmed_url: Option<String>,
    /// Override for the DOI resolver prefix
    pub doi_resolver_url: Option<String>,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    /// Override for the HTTP user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with NCBI defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the NCBI API key
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the contact email
    ///
    /// An empty string is treated as "no email", matching how the command-line
    /// tools default the `--email` flag.
    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        let email = email.into();
        self.email = (!email.is_empty()).then_some(email);
        self
    }

    /// Set the tool name
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Point E-utilities requests at a different host (mock servers, mirrors)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the prefix used to build `Publication::pubmed_url`
    pub fn with_pubmed_url<S: Into<String>>(mut self, pubmed_url: S) -> Self {
        self.pubmed_url = Some(pubmed_url.into());
        self
    }

    /// Set the prefix DOIs are appended to
    pub fn with_doi_resolver_url<S: Into<String>>(mut self, doi_resolver_url: S) -> Self {
        self.doi_resolver_url = Some(doi_resolver_url.into());
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn effective_base_url(&self) -> &str {
        trim_slash(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn effective_pubmed_url(&self) -> &str {
        trim_slash(self.pubmed_url.as_deref().unwrap_or(DEFAULT_PUBMED_URL))
    }

    pub fn effective_doi_resolver_url(&self) -> &str {
        trim_slash(
            self.doi_resolver_url
                .as_deref()
                .unwrap_or(DEFAULT_DOI_RESOLVER_URL),
        )
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pubmed-lookup/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Build the identification parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(ref api_key) = self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        if let Some(ref email) = self.email {
            params.push(("email".to_string(), email.clone()));
        }
        params.push(("tool".to_string(), self.effective_tool().to_string()));

        params
    }
}

fn trim_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}
