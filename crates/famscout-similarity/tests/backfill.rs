//! Tests for `backfill_embeddings`: failed batches leave candidates
//! unscored instead of failing the run.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use famscout_core::{CandidateEvent, DedupStatus, RelevanceLabel};
use famscout_similarity::{backfill_embeddings, EmbedClient};

fn event(title: &str) -> CandidateEvent {
    CandidateEvent {
        title: title.to_owned(),
        blurb: String::new(),
        description: String::new(),
        venue_name: String::new(),
        full_address: String::new(),
        latitude: None,
        longitude: None,
        start_datetime: None,
        end_datetime: None,
        datetime_display: String::new(),
        price_display: String::new(),
        is_free: false,
        organiser: String::new(),
        categories: Vec::new(),
        source_id: "testblog".to_owned(),
        source_url: format!("https://blog/{title}"),
        images: Vec::new(),
        extracted_at: Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap(),
        relevance_label: RelevanceLabel::Unknown,
        dedup_status: DedupStatus::Unknown,
        reviewed: false,
        embedding: None,
    }
}

#[tokio::test]
async fn backfill_fills_missing_embeddings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[1.0, 0.0], [0.0, 1.0]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = EmbedClient::new(&server.uri(), 5, 0, 0).unwrap();
    let mut events = vec![event("a"), event("b")];
    let embedded = backfill_embeddings(&client, &mut events).await;

    assert_eq!(embedded, 2);
    assert_eq!(events[0].embedding, Some(vec![1.0, 0.0]));
    assert_eq!(events[1].embedding, Some(vec![0.0, 1.0]));
}

#[tokio::test]
async fn backfill_skips_already_embedded_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0.5, 0.5]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = EmbedClient::new(&server.uri(), 5, 0, 0).unwrap();
    let mut events = vec![event("a"), event("b")];
    events[0].embedding = Some(vec![9.0, 9.0]);

    let embedded = backfill_embeddings(&client, &mut events).await;
    assert_eq!(embedded, 1);
    assert_eq!(events[0].embedding, Some(vec![9.0, 9.0]), "kept as-is");
    assert_eq!(events[1].embedding, Some(vec![0.5, 0.5]));
}

#[tokio::test]
async fn backfill_failure_leaves_candidates_unscored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = EmbedClient::new(&server.uri(), 5, 0, 0).unwrap();
    let mut events = vec![event("a"), event("b")];
    let embedded = backfill_embeddings(&client, &mut events).await;

    assert_eq!(embedded, 0);
    assert!(events.iter().all(|e| e.embedding.is_none()));
}
