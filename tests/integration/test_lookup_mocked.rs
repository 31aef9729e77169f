//! Integration tests for query resolution and summary lookups using mocked HTTP responses

#[path = "common/mod.rs"]
mod common;

use common::{GOODSPEED_ESUMMARY, GOODSPEED_PMID, create_mock_client, mount_esummary};
use pubmed_lookup::{PubMedError, PubMedLookup};
use rstest::rstest;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[traced_test]
async fn test_url_and_id_lookups_agree() {
    let mock_server = MockServer::start().await;
    mount_esummary(&mock_server, GOODSPEED_PMID, GOODSPEED_ESUMMARY).await;
    let client = create_mock_client(&mock_server);

    let by_id = PubMedLookup::new("22331878", &client).await.unwrap();
    let by_url = PubMedLookup::new("http://www.ncbi.nlm.nih.gov/pubmed/22331878", &client)
        .await
        .unwrap();
    let by_number = client.lookup(22331878_u32).await.unwrap();

    assert_eq!(by_id.record(), by_url.record());
    assert_eq!(by_id.record(), by_number.record());
    assert_eq!(by_url.pmid().as_str(), "22331878");
    assert_eq!(
        by_id.record().title,
        "Arabidopsis synchronizes jasmonate-mediated defense with insect circadian behavior."
    );
}

#[rstest]
#[case::words("not a valid query")]
#[case::other_host("http://example.com/pubmed/22331878")]
#[case::pmc_path("https://www.ncbi.nlm.nih.gov/pmc/articles/PMC3311350")]
#[tokio::test]
async fn test_invalid_query_makes_no_request(#[case] query: &str) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let client = create_mock_client(&mock_server);

    let result = PubMedLookup::new(query, &client).await;
    assert!(matches!(
        result,
        Err(PubMedError::InvalidQuery { query: ref q }) if q == query
    ));
}

#[tokio::test]
#[traced_test]
async fn test_identification_parameters_are_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("email", "test@example.org"))
        .and(query_param("tool", "pubmed-lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOODSPEED_ESUMMARY))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = create_mock_client(&mock_server);

    PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
}

#[tokio::test]
#[traced_test]
async fn test_unknown_pmid_is_not_found() {
    let mock_server = MockServer::start().await;
    let body = r#"{"header":{"type":"esummary","version":"0.3"},"result":{"uids":["99999999"],"99999999":{"uid":"99999999","error":"cannot get document summary"}}}"#;
    mount_esummary(&mock_server, "99999999", body).await;
    let client = create_mock_client(&mock_server);

    let result = PubMedLookup::new("99999999", &client).await;
    assert!(matches!(
        result,
        Err(PubMedError::ArticleNotFound { ref pmid }) if pmid == "99999999"
    ));
    assert!(logs_contain("ESummary returned error for UID"));
}

#[tokio::test]
#[traced_test]
async fn test_summary_server_error_propagates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    let client = create_mock_client(&mock_server);

    let result = PubMedLookup::new(GOODSPEED_PMID, &client).await;
    assert!(matches!(
        result,
        Err(PubMedError::ApiError { status: 500, .. })
    ));
}
