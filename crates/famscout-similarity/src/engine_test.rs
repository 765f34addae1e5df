use super::*;

use chrono::{TimeZone, Utc};
use famscout_core::{DedupStatus, RelevanceLabel};

fn event(title: &str, venue: &str, url: &str) -> CandidateEvent {
    CandidateEvent {
        title: title.to_owned(),
        blurb: String::new(),
        description: String::new(),
        venue_name: venue.to_owned(),
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
        source_url: url.to_owned(),
        images: Vec::new(),
        extracted_at: Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap(),
        relevance_label: RelevanceLabel::Unknown,
        dedup_status: DedupStatus::Unknown,
        reviewed: false,
        embedding: None,
    }
}

fn with_embedding(mut e: CandidateEvent, v: Vec<f32>) -> CandidateEvent {
    e.embedding = Some(v);
    e
}

fn engine() -> SimilarityEngine {
    SimilarityEngine::new(SimilarityConfig::default())
}

// -----------------------------------------------------------------------
// same-URL collapse
// -----------------------------------------------------------------------

#[test]
fn same_url_with_empty_venues_collapses() {
    let a = event("Lights Show", "", "https://blog/x");
    let b = event("Completely Different Craft Fair", "", "https://blog/x");
    assert!(engine().is_duplicate(&a, &b));
}

#[test]
fn same_url_with_matching_venues_collapses() {
    let a = event("Lights Show", "Gardens by the Bay", "https://blog/x");
    let b = event("Evening Lights", "gardens  BY the bay", "https://blog/x");
    assert!(engine().is_duplicate(&a, &b));
}

#[test]
fn same_url_with_differing_venues_falls_through() {
    let a = with_embedding(
        event("Lights Show", "Gardens by the Bay", "https://blog/x"),
        vec![1.0, 0.0],
    );
    let b = with_embedding(
        event("Craft Fair", "Jewel Changi", "https://blog/x"),
        vec![0.0, 1.0],
    );
    assert!(!engine().is_duplicate(&a, &b));
}

// -----------------------------------------------------------------------
// venue-assisted rule
// -----------------------------------------------------------------------

#[test]
fn venue_match_with_similar_titles_is_duplicate() {
    // Orthogonal embeddings keep the combined score at 0; only the
    // venue-assisted rule can fire.
    let a = with_embedding(
        event("Lights Show", "Gardens by the Bay", "https://blog/a"),
        vec![1.0, 0.0],
    );
    let b = with_embedding(
        event(
            "Garden Lights Show 2025",
            "Gardens by the Bay",
            "https://blog/b",
        ),
        vec![0.0, 1.0],
    );
    assert!(engine().is_duplicate(&a, &b));
}

#[test]
fn venue_match_with_unrelated_titles_is_not_duplicate() {
    let a = with_embedding(
        event("Lights Show", "Gardens by the Bay", "https://blog/a"),
        vec![1.0, 0.0],
    );
    let b = with_embedding(
        event("Toddler Craft Morning", "Gardens by the Bay", "https://blog/b"),
        vec![0.0, 1.0],
    );
    assert!(!engine().is_duplicate(&a, &b));
}

#[test]
fn empty_venues_never_satisfy_the_venue_signal() {
    let a = with_embedding(event("Lights Show", "", "https://blog/a"), vec![1.0, 0.0]);
    let b = with_embedding(
        event("Garden Lights Show 2025", "", "https://blog/b"),
        vec![0.0, 1.0],
    );
    assert!(!engine().is_duplicate(&a, &b));
}

#[test]
fn address_containment_counts_as_venue_match() {
    let mut a = event("Lights Show", "Gardens by the Bay", "https://blog/a");
    a.full_address = "18 Marina Gardens Drive, Singapore 018953".to_owned();
    let mut b = event("Garden Lights Show 2025", "The Gardens", "https://blog/b");
    b.full_address = "Marina Gardens Drive".to_owned();
    let a = with_embedding(a, vec![1.0, 0.0]);
    let b = with_embedding(b, vec![0.0, 1.0]);
    assert!(engine().is_duplicate(&a, &b));
}

// -----------------------------------------------------------------------
// combined-score rule
// -----------------------------------------------------------------------

#[test]
fn identical_embeddings_are_duplicates() {
    let a = with_embedding(
        event("Lights Show", "Gardens by the Bay", "https://blog/a"),
        vec![0.3, 0.7, 0.1],
    );
    let b = with_embedding(
        event("Evening Light Display", "Sentosa", "https://blog/b"),
        vec![0.3, 0.7, 0.1],
    );
    assert!(engine().is_duplicate(&a, &b));
}

#[test]
fn dissimilar_embeddings_are_not_duplicates() {
    let a = with_embedding(
        event("Lights Show", "Gardens by the Bay", "https://blog/a"),
        vec![1.0, 0.0],
    );
    let b = with_embedding(
        event("Toddler Craft Morning", "Sentosa", "https://blog/b"),
        vec![0.0, 1.0],
    );
    assert!(!engine().is_duplicate(&a, &b));
}

#[test]
fn missing_embedding_keeps_candidates() {
    let a = event("Lights Show", "Gardens by the Bay", "https://blog/a");
    let b = event("Evening Light Display", "Sentosa", "https://blog/b");
    assert!(!engine().is_duplicate(&a, &b));
}

#[test]
fn verdict_is_deterministic() {
    let a = with_embedding(
        event("Lights Show", "Gardens by the Bay", "https://blog/a"),
        vec![0.3, 0.7],
    );
    let b = with_embedding(
        event("Garden Lights Show 2025", "Gardens by the Bay", "https://blog/b"),
        vec![0.2, 0.8],
    );
    let first = engine().is_duplicate(&a, &b);
    for _ in 0..10 {
        assert_eq!(engine().is_duplicate(&a, &b), first);
    }
}

// -----------------------------------------------------------------------
// score
// -----------------------------------------------------------------------

#[test]
fn score_is_none_without_embeddings() {
    let a = event("Lights Show", "", "https://blog/a");
    let b = with_embedding(event("Other", "", "https://blog/b"), vec![1.0]);
    assert_eq!(engine().score(&a, &b), None);
}

#[test]
fn score_clamps_negative_cosine_to_zero() {
    let a = with_embedding(event("A", "", "https://blog/a"), vec![1.0, 0.0]);
    let b = with_embedding(event("B", "", "https://blog/b"), vec![-1.0, 0.0]);
    assert_eq!(engine().score(&a, &b), Some(0.0));
}

// -----------------------------------------------------------------------
// cosine_similarity
// -----------------------------------------------------------------------

#[test]
fn cosine_of_identical_vectors_is_one() {
    let v = vec![0.1, 0.5, 0.3];
    let cos = cosine_similarity(&v, &v);
    assert!((cos - 1.0).abs() < 1e-6, "expected ~1.0, got {cos}");
}

#[test]
fn cosine_of_orthogonal_vectors_is_zero() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
}

#[test]
fn cosine_of_mismatched_lengths_is_zero() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
}

#[test]
fn cosine_of_zero_vector_is_zero() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
}
