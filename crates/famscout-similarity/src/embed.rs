//! HTTP client for a text-embeddings service (`/embed` endpoint).

use std::time::Duration;

use serde::Serialize;

use famscout_core::CandidateEvent;

use crate::error::EmbedError;
use crate::retry::retry_with_backoff;

/// Maximum number of texts per /embed call.
const BATCH_SIZE: usize = 64;

/// Client for a TEI-style embedding service.
pub struct EmbedClient {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl EmbedClient {
    /// Create a new `EmbedClient` for the service at `base_url`.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for transient errors; `backoff_base_secs` the base of the
    /// exponential backoff.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, EmbedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/embed", base_url.trim_end_matches('/')),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Generate embeddings for a batch of texts.
    ///
    /// Texts are batched into groups of [`BATCH_SIZE`] (64) per request.
    /// Returns one embedding vector per input text, in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError`] if a request fails after retries, the service
    /// answers with a non-2xx status, or the response violates the
    /// one-vector-per-input contract.
    pub async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let embeddings = self.embed_chunk(chunk).await?;
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }

    async fn embed_chunk(&self, chunk: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        // `self` and `chunk` are Copy references, so each retry attempt
        // moves fresh copies into its future.
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let request = EmbedRequest { inputs: chunk };
            let response = self.client.post(&self.url).json(&request).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(EmbedError::UnexpectedStatus {
                    status: status.as_u16(),
                });
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .await
                .map_err(|e| EmbedError::Contract(format!("response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(EmbedError::Contract(format!(
                    "{} embeddings returned for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            Ok(embeddings)
        })
        .await
    }
}

/// Fills in the embedding vector of every candidate that lacks one.
///
/// Each group of [`BATCH_SIZE`] candidates is embedded in its own request so
/// one failing batch leaves only its candidates unscored: those are kept by
/// the deduplicator rather than silently dropped, and the failure is logged
/// loudly. Returns the number of candidates embedded.
pub async fn backfill_embeddings(client: &EmbedClient, events: &mut [CandidateEvent]) -> usize {
    let missing: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.embedding.is_none())
        .map(|(i, _)| i)
        .collect();

    let mut embedded = 0usize;
    for chunk in missing.chunks(BATCH_SIZE) {
        let texts: Vec<String> = chunk.iter().map(|&i| events[i].embed_text()).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        match client.embed(&refs).await {
            Ok(vectors) => {
                for (&i, vector) in chunk.iter().zip(vectors) {
                    events[i].embedding = Some(vector);
                    embedded += 1;
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    candidates = chunk.len(),
                    "embedding batch failed — affected candidates stay unscored and will be kept"
                );
            }
        }
    }

    embedded
}
