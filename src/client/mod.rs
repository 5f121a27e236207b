//! Blocking HTTP client for the pack and eval endpoints.
//!
//! The server keeps per-session state behind a `sessionId` cookie, so the
//! client carries a cookie store; every eval after the first reuses the
//! session the server handed out.

pub mod errors;

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::client::errors::{ClientError, Result};
use crate::model::{EvalOutcome, EvalRequest, EvalResponse, Pack};

/// Client for one evaluation server.
pub struct PackClient {
    http: Client,
    base: String,
}

impl PackClient {
    /// Create a client for the server at `base_url`.
    ///
    /// No request timeout is applied unless one is given; a hung request
    /// simply keeps its row pending.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(PackClient {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the list of available packs.
    pub fn fetch_packs(&self) -> Result<Vec<Pack>> {
        let url = format!("{}/pack", self.base);
        debug!("GET {url}");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .unwrap_or_else(|_| "could not read error body".to_string());
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let packs: Vec<Pack> = resp.json()?;
        debug!("fetched {} pack(s)", packs.len());
        Ok(packs)
    }

    /// Submit an expression against a pack and decode the outcome.
    ///
    /// The server reports compile errors as HTTP 400 and runtime errors as
    /// HTTP 500, with the outcome JSON in the body either way, so the body
    /// is decoded before the status is consulted.
    pub fn eval(&self, request: &EvalRequest) -> Result<EvalOutcome> {
        let url = format!("{}/eval", self.base);
        debug!("POST {url} pack={}", request.pack);

        let resp = self.http.post(&url).json(request).send()?;
        let status = resp.status();
        let body = resp.text()?;

        match serde_json::from_str::<EvalResponse>(&body) {
            Ok(decoded) => Ok(decoded.into()),
            Err(_) if !status.is_success() => Err(ClientError::Http {
                status: status.as_u16(),
                body: excerpt(&body),
            }),
            Err(e) => Err(ClientError::Decode(e)),
        }
    }
}

/// Trim a response body down to something fit for an error message.
fn excerpt(body: &str) -> String {
    const LIMIT: usize = 120;
    let trimmed = body.trim();
    if trimmed.len() <= LIMIT {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < LIMIT)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &trimmed[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PackClient::new("http://localhost:8080/", None).unwrap();
        assert_eq!(client.base, "http://localhost:8080");
    }

    #[test]
    fn excerpt_keeps_short_bodies() {
        assert_eq!(excerpt("  oops  "), "oops");
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert!(cut.chars().count() <= 121);
        assert!(cut.ends_with('…'));
    }
}
