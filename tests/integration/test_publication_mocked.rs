//! End-to-end publication building against a mocked E-utilities server

#[path = "common/mod.rs"]
mod common;

use common::*;
use pubmed_lookup::{PubMedError, PubMedLookup, Publication};
use serde_json::json;
use tracing_test::traced_test;
use wiremock::{MockServer, ResponseTemplate};

#[tokio::test]
#[traced_test]
async fn test_goodspeed_publication() {
    let mock_server = MockServer::start().await;
    mount_goodspeed(&mock_server).await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let publication = Publication::new(&lookup, &client, true).await.unwrap();

    assert_eq!(publication.id(), "22331878");
    assert_eq!(
        publication.source_url(),
        "http://www.ncbi.nlm.nih.gov/pubmed/22331878"
    );
    assert_eq!(
        publication.title(),
        "Arabidopsis synchronizes jasmonate-mediated defense with insect circadian behavior."
    );
    assert_eq!(
        publication.authors(),
        "Goodspeed D, Chehab EW, Min-Venditti A, Braam J, Covington MF"
    );
    assert_eq!(publication.first_author(), "Goodspeed D");
    assert_eq!(publication.last_author(), "Covington MF");
    assert_eq!(publication.journal(), "Proc Natl Acad Sci U S A");
    assert_eq!(publication.volume(), "109");
    assert_eq!(publication.issue(), "12");
    assert_eq!(publication.pages(), "4674-7");
    assert_eq!(publication.year(), "2012");
    assert_eq!(publication.month(), Some(3));
    assert_eq!(publication.day(), "20");
    assert_eq!(
        publication.abstract_text(),
        "Circadian clocks in Arabidopsis anticipate the daily feeding rhythm of Trichoplusia ni larvae."
    );
    assert_eq!(publication.article_url(), resolved_article_url(&mock_server));

    assert_eq!(publication.cite(), GOODSPEED_CITATION);
    assert_eq!(publication.cite_mini(), GOODSPEED_MINI_CITATION);
}

#[tokio::test]
#[traced_test]
async fn test_structured_abstract_and_partial_date() {
    let mock_server = MockServer::start().await;
    mount_esummary(&mock_server, GOODSPEED_PMID, GOODSPEED_ESUMMARY).await;
    mount_efetch(&mock_server, GOODSPEED_PMID, xml_response(STRUCTURED_EFETCH)).await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let publication = Publication::new(&lookup, &client, false).await.unwrap();

    assert_eq!(
        publication.abstract_text(),
        "BACKGROUND: Background text.\n\nRESULTS: Results text.\n\nClosing remarks."
    );
    assert_eq!(publication.year(), "2019");
    assert_eq!(publication.month(), None);
    assert_eq!(publication.day(), "");
}

#[tokio::test]
#[traced_test]
async fn test_record_without_abstract_flag() {
    let mock_server = MockServer::start().await;
    let esummary = goodspeed_esummary_with("attributes", json!([]));
    mount_esummary(&mock_server, GOODSPEED_PMID, &esummary).await;
    mount_efetch(&mock_server, GOODSPEED_PMID, xml_response(GOODSPEED_EFETCH)).await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let publication = Publication::new(&lookup, &client, false).await.unwrap();

    assert_eq!(publication.abstract_text(), "");
    assert_eq!(publication.year(), "2012");
}

#[tokio::test]
#[traced_test]
async fn test_efetch_failure_degrades() {
    let mock_server = MockServer::start().await;
    mount_esummary(&mock_server, GOODSPEED_PMID, GOODSPEED_ESUMMARY).await;
    mount_efetch(&mock_server, GOODSPEED_PMID, ResponseTemplate::new(503)).await;
    mount_doi_redirect(&mock_server).await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let publication = Publication::new(&lookup, &client, true).await.unwrap();

    assert_eq!(publication.abstract_text(), "");
    assert_eq!(publication.year(), "");
    assert_eq!(publication.month(), None);
    assert_eq!(publication.day(), "");
    assert_eq!(publication.article_url(), resolved_article_url(&mock_server));
    assert_eq!(
        publication.cite(),
        "Goodspeed D, Chehab EW, Min-Venditti A, Braam J, Covington MF (). Arabidopsis synchronizes jasmonate-mediated defense with insect circadian behavior. Proc Natl Acad Sci U S A 109(12): 4674-7."
    );
    assert!(logs_contain("Metadata document unavailable"));
}

#[tokio::test]
#[traced_test]
async fn test_undecodable_efetch_body_degrades() {
    let mock_server = MockServer::start().await;
    mount_esummary(&mock_server, GOODSPEED_PMID, GOODSPEED_ESUMMARY).await;
    mount_efetch(
        &mock_server,
        GOODSPEED_PMID,
        xml_response("<eFetchResult><ERROR>Empty id list</ERROR></eFetchResult>"),
    )
    .await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let publication = Publication::new(&lookup, &client, false).await.unwrap();

    assert_eq!(publication.abstract_text(), "");
    assert_eq!(publication.year(), "");
}

#[tokio::test]
#[traced_test]
async fn test_declared_abstract_missing_from_document_fails() {
    let mock_server = MockServer::start().await;
    mount_esummary(&mock_server, GOODSPEED_PMID, GOODSPEED_ESUMMARY).await;
    let without_abstract = GOODSPEED_EFETCH
        .lines()
        .filter(|line| !line.contains("Abstract"))
        .collect::<Vec<_>>()
        .join("\n");
    mount_efetch(&mock_server, GOODSPEED_PMID, xml_response(&without_abstract)).await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let result = Publication::new(&lookup, &client, false).await;

    assert!(matches!(result, Err(PubMedError::AbstractParseError { .. })));
}

#[tokio::test]
#[traced_test]
async fn test_empty_author_list_is_malformed() {
    let mock_server = MockServer::start().await;
    let esummary = goodspeed_esummary_with("authors", json!([]));
    mount_esummary(&mock_server, GOODSPEED_PMID, &esummary).await;
    mount_efetch(&mock_server, GOODSPEED_PMID, xml_response(GOODSPEED_EFETCH)).await;
    let client = create_mock_client(&mock_server);

    let lookup = PubMedLookup::new(GOODSPEED_PMID, &client).await.unwrap();
    let result = Publication::new(&lookup, &client, false).await;

    assert!(matches!(result, Err(PubMedError::MalformedRecord { .. })));
}
