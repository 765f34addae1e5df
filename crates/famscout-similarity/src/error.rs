use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding service returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("embedding contract violation: {0}")]
    Contract(String),
}
