use super::*;

use crate::payload::RawImage;

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

fn ctx() -> ArticleContext {
    ArticleContext {
        source_id: "sassymamasg".to_owned(),
        article_id: "abc123".to_owned(),
        article_url: "https://sassymamasg.com/july-events".to_owned(),
    }
}

fn payload(title: &str) -> RawEventPayload {
    RawEventPayload {
        title: title.to_owned(),
        ..RawEventPayload::default()
    }
}

#[test]
fn normalize_collapses_title_whitespace() {
    let raw = payload("  Garden   Lights\n Show ");
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.title, "Garden Lights Show");
}

#[test]
fn normalize_rejects_empty_title() {
    let raw = payload("   \n  ");
    let err = normalize(raw, &ctx()).unwrap_err();
    assert!(
        matches!(err, NormalizeError::MalformedCandidate { ref reason, .. } if reason == "empty title"),
        "expected MalformedCandidate for empty title, got: {err:?}"
    );
}

#[test]
fn normalize_falls_back_to_article_url() {
    let raw = payload("Lights Show");
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.source_url, "https://sassymamasg.com/july-events");
}

#[test]
fn normalize_prefers_event_page_url() {
    let mut raw = payload("Lights Show");
    raw.url = " https://gardens.example.com/lights ".to_owned();
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.source_url, "https://gardens.example.com/lights");
}

#[test]
fn normalize_rejects_missing_urls() {
    let raw = payload("Lights Show");
    let mut context = ctx();
    context.article_url = "  ".to_owned();
    let err = normalize(raw, &context).unwrap_err();
    assert!(matches!(err, NormalizeError::MalformedCandidate { .. }));
}

#[test]
fn normalize_preserves_venue_casing() {
    let mut raw = payload("Lights Show");
    raw.venue_name = "Gardens  by the Bay".to_owned();
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.venue_name, "Gardens by the Bay");
    assert_eq!(event.venue_key(), "gardens by the bay");
}

#[test]
fn normalize_drops_lone_coordinate_half() {
    let mut raw = payload("Lights Show");
    raw.latitude = Some(1.28);
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.latitude, None);
    assert_eq!(event.longitude, None);
}

#[test]
fn normalize_keeps_full_coordinates() {
    let mut raw = payload("Lights Show");
    raw.latitude = Some(1.28);
    raw.longitude = Some(103.86);
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.coordinates(), Some((1.28, 103.86)));
}

#[test]
fn normalize_parses_local_datetimes() {
    let mut raw = payload("Lights Show");
    raw.start_datetime = "2025-07-01T10:00:00".to_owned();
    raw.end_datetime = "2025-07-01T17:00".to_owned();
    let event = normalize(raw, &ctx()).unwrap();
    assert!(event.start_datetime.is_some());
    assert!(event.end_datetime.is_some());
}

#[test]
fn normalize_tolerates_garbage_datetime() {
    let mut raw = payload("Lights Show");
    raw.start_datetime = "next Tuesday-ish".to_owned();
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.start_datetime, None);
}

#[test]
fn normalize_drops_images_without_urls() {
    let mut raw = payload("Lights Show");
    raw.images = vec![
        RawImage {
            original_url: "  ".to_owned(),
            local_path: None,
        },
        RawImage {
            original_url: "https://cdn.example.com/a.jpg".to_owned(),
            local_path: None,
        },
    ];
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.images.len(), 1);
    assert_eq!(event.images[0].original_url, "https://cdn.example.com/a.jpg");
}

#[test]
fn normalize_drops_empty_categories() {
    let mut raw = payload("Lights Show");
    raw.categories = vec!["Family".to_owned(), "  ".to_owned()];
    let event = normalize(raw, &ctx()).unwrap();
    assert_eq!(event.categories, vec!["Family".to_owned()]);
}

#[test]
fn normalize_starts_with_unknown_labels() {
    let event = normalize(payload("Lights Show"), &ctx()).unwrap();
    assert_eq!(event.relevance_label, RelevanceLabel::Unknown);
    assert_eq!(event.dedup_status, DedupStatus::Unknown);
    assert!(!event.reviewed);
    assert!(event.embedding.is_none());
}

// -----------------------------------------------------------------------
// article_id_from_url
// -----------------------------------------------------------------------

#[test]
fn article_id_is_stable() {
    let a = article_id_from_url("https://blog.example.com/post-1");
    let b = article_id_from_url("https://blog.example.com/post-1");
    assert_eq!(a, b);
    assert_eq!(a.len(), 16);
}

#[test]
fn article_id_ignores_trailing_slash() {
    let a = article_id_from_url("https://blog.example.com/post-1");
    let b = article_id_from_url(" https://blog.example.com/post-1/ ");
    assert_eq!(a, b);
}

#[test]
fn article_id_differs_for_different_urls() {
    let a = article_id_from_url("https://blog.example.com/post-1");
    let b = article_id_from_url("https://blog.example.com/post-2");
    assert_ne!(a, b);
}
