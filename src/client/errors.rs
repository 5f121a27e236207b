//! Error type for the HTTP client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("could not decode server response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
