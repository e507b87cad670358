//! Integration tests for the full resolution pipeline.
//!
//! These drive `resolve_project` and `scan_project_for_keyword` against
//! the mock fetcher: structured-payload success, the document fallback
//! loop, the best-effort corpus tier, and error statuses.

use serde_json::json;

use disclosure_extraction::{
    keyword_pattern, resolve_project, scan_project_for_keyword, ExtractionMethod, FetchStatus,
    MockFetcher, ScanConfig,
};

const PROJECT_URL: &str = "https://disclosures.ifc.org/project-detail/SPI/123/acme-wind";
const API_URL: &str = "https://disclosuresservice.ifc.org/api/ProjectAccess/SPIProject?projectId=123";

fn narrative_payload() -> serde_json::Value {
    json!({
        "projectId": 123,
        "content": "<div><strong>Project Description</strong>\
                    <p>Project Name: Acme Wind Expansion</p>\
                    <p>Sector: Energy</p>\
                    <p>IFC's loan will be up to $30 million. \
                    The overall facility is estimated at $120 million.</p>\
                    <strong>Sponsor</strong><p>Acme Holdings.</p></div>",
        "labels": ["short", "strings"],
    })
}

#[tokio::test]
async fn test_structured_payload_resolves_with_amounts() {
    let fetcher = MockFetcher::new().with_json(API_URL, 200, narrative_payload());
    let config = ScanConfig::default();

    let record = resolve_project(&fetcher, &config, PROJECT_URL, "Acme Wind").await;

    assert_eq!(record.project_id, "123");
    assert_eq!(record.fetch_status, FetchStatus::Ok);
    assert_eq!(record.http_status, Some(200));
    assert_eq!(record.extraction_method, Some(ExtractionMethod::HtmlBlock));
    assert_eq!(record.section_title_found, "project description");
    assert!(record.section_text.contains("Acme Wind Expansion"));
    assert!(!record.section_text.contains("Acme Holdings"));

    assert_eq!(record.ifc_investment_usd, Some(30_000_000.0));
    assert!(record
        .ifc_investment_note
        .as_deref()
        .unwrap()
        .starts_with("direct phrase: "));
    assert_eq!(record.facility_notional_usd, Some(120_000_000.0));
    assert!(record.all_amount_mentions.contains("$30 million=>30000000"));
    assert!(record.amounts_json.contains("\"amount_usd\":120000000.0"));
    assert_eq!(record.used_json_endpoint, API_URL);
    assert!(record.used_pdf_url.is_empty());
}

#[tokio::test]
async fn test_document_fallback_is_attempted_then_corpus_used() {
    // no section in the payload, one discoverable document URL that serves
    // undecodable bytes; resolution must land on the best-effort corpus
    let payload = json!({
        "attachment": "https://disclosures.ifc.org/files/spi-note.pdf",
        "blurb": "The program ceiling is $75 million for participating banks.",
    });
    let fetcher = MockFetcher::new()
        .with_json(API_URL, 200, payload)
        .with_bytes(
            "https://disclosures.ifc.org/files/spi-note.pdf",
            200,
            vec![b'x'; 600],
        );
    let config = ScanConfig::default();

    let record = resolve_project(&fetcher, &config, PROJECT_URL, "Acme Wind").await;

    assert_eq!(record.fetch_status, FetchStatus::OkButNoSectionFound);
    assert_eq!(record.extraction_method, None);
    assert!(record.section_text.is_empty());
    assert!(record.used_pdf_url.is_empty());
    // the document candidate was actually fetched
    assert!(fetcher
        .calls()
        .iter()
        .any(|u| u.ends_with("spi-note.pdf")));
    // amounts still ran against the corpus
    assert_eq!(record.facility_notional_usd, Some(75_000_000.0));
    assert!(record
        .facility_note
        .as_deref()
        .unwrap()
        .starts_with("facility sentence: "));
}

#[tokio::test]
async fn test_small_and_failing_documents_are_skipped() {
    let payload = json!({
        "attachment": "https://disclosures.ifc.org/files/tiny.pdf",
        "second": "https://disclosures.ifc.org/files/gone.pdf",
    });
    let fetcher = MockFetcher::new()
        .with_json(API_URL, 200, payload)
        // under the minimum size gate
        .with_bytes("https://disclosures.ifc.org/files/tiny.pdf", 200, vec![0; 10]);
    let config = ScanConfig::default();

    let record = resolve_project(&fetcher, &config, PROJECT_URL, "").await;

    assert_eq!(record.fetch_status, FetchStatus::OkButNoSectionFound);
    assert!(record.used_pdf_url.is_empty());
}

#[tokio::test]
async fn test_bad_url_is_reported_not_fatal() {
    let fetcher = MockFetcher::new();
    let config = ScanConfig::default();

    let record =
        resolve_project(&fetcher, &config, "https://example.org/not-a-project", "X").await;
    assert_eq!(record.fetch_status, FetchStatus::BadUrlFormat);
    assert!(record.project_id.is_empty());
    assert!(fetcher.calls().is_empty());

    let unknown_type = resolve_project(
        &fetcher,
        &config,
        "https://disclosures.ifc.org/project-detail/XYZ/55/slug",
        "X",
    )
    .await;
    assert_eq!(unknown_type.fetch_status, FetchStatus::BadUrlFormat);
    assert_eq!(unknown_type.project_id, "55");
}

#[tokio::test]
async fn test_api_failure_is_reported_with_endpoint() {
    let fetcher = MockFetcher::new();
    let config = ScanConfig::default();

    let record = resolve_project(&fetcher, &config, PROJECT_URL, "Acme").await;
    match &record.fetch_status {
        FetchStatus::ApiError(msg) => assert!(msg.contains("retries exhausted")),
        other => panic!("unexpected status: {other}"),
    }
    assert_eq!(record.used_json_endpoint, API_URL);
    assert_eq!(record.http_status, None);
}

#[tokio::test]
async fn test_keyword_scan_merges_answering_endpoints() {
    let payload = json!({
        "content": "We export turbines to three markets. Local jobs grow. \
                    Exporters gain new financing.",
    });
    let fetcher = MockFetcher::new().with_json(API_URL, 200, payload);
    let config = ScanConfig::default();
    let pattern = keyword_pattern("export");

    let record =
        scan_project_for_keyword(&fetcher, &config, &pattern, PROJECT_URL, "Acme").await;

    assert_eq!(record.project_id, "123");
    assert_eq!(record.fetch_status, FetchStatus::Ok);
    assert_eq!(record.export_hits, 2);
    assert_eq!(
        record.export_sentences,
        "We export turbines to three markets. || Exporters gain new financing."
    );
    assert_eq!(record.used_json_endpoints, API_URL);
    // all four probes were attempted
    assert_eq!(fetcher.calls().len(), 4);
    assert!(record.text_scanned_chars > 0);
}

#[tokio::test]
async fn test_keyword_scan_reports_missing_text() {
    let fetcher = MockFetcher::new();
    let config = ScanConfig::default();
    let pattern = keyword_pattern("export");

    let record =
        scan_project_for_keyword(&fetcher, &config, &pattern, PROJECT_URL, "Acme").await;
    assert_eq!(record.fetch_status, FetchStatus::OkButNoText);
    assert_eq!(record.export_hits, 0);
    assert_eq!(record.http_status, Some(404));
}
