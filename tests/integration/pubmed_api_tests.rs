//! Real API tests against NCBI E-utilities and the DOI resolver
//!
//! These tests make actual network calls and only run when:
//! 1. The `integration-tests` feature is enabled
//! 2. The `PUBMED_REAL_API_TESTS` environment variable is set
//!
//! To run:
//! ```bash
//! PUBMED_REAL_API_TESTS=1 cargo test --features integration-tests --test pubmed_api_tests
//! ```

#[path = "common/mod.rs"]
mod common;

#[cfg(feature = "integration-tests")]
mod integration_tests {
    use pubmed_lookup::{ClientConfig, PubMedClient, PubMedLookup, Publication};
    use tracing::info;
    use tracing_test::traced_test;

    use crate::common::{GOODSPEED_CITATION, GOODSPEED_MINI_CITATION, should_run_real_api_tests};

    fn create_test_client() -> PubMedClient {
        let mut config = ClientConfig::new();
        if let Ok(email) = std::env::var("NCBI_EMAIL") {
            config = config.with_email(email);
        }
        if let Ok(key) = std::env::var("NCBI_API_KEY") {
            config = config.with_api_key(key);
        }
        PubMedClient::with_config(config)
    }

    #[tokio::test]
    #[traced_test]
    async fn test_goodspeed_citation() {
        if !should_run_real_api_tests() {
            info!("Skipping real API test - enable with PUBMED_REAL_API_TESTS=1");
            return;
        }

        let client = create_test_client();
        let lookup = PubMedLookup::new("http://www.ncbi.nlm.nih.gov/pubmed/22331878", &client)
            .await
            .expect("lookup should succeed");
        let publication = Publication::new(&lookup, &client, false)
            .await
            .expect("publication should build");

        assert_eq!(publication.cite(), GOODSPEED_CITATION);
        assert_eq!(publication.cite_mini(), GOODSPEED_MINI_CITATION);
        assert_eq!(publication.month(), Some(3));
        assert_eq!(publication.day(), "20");
        assert!(!publication.abstract_text().is_empty());
        assert_eq!(
            publication.article_url(),
            "http://dx.doi.org/10.1073/pnas.1116368109"
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_doi_resolves_to_publisher() {
        if !should_run_real_api_tests() {
            info!("Skipping real API test - enable with PUBMED_REAL_API_TESTS=1");
            return;
        }

        let client = create_test_client();
        let lookup = PubMedLookup::new("22331878", &client)
            .await
            .expect("lookup should succeed");
        let publication = Publication::new(&lookup, &client, true)
            .await
            .expect("publication should build");

        info!(article_url = %publication.article_url(), "Resolved DOI");
        assert!(!publication.article_url().contains("doi.org"));
    }
}
