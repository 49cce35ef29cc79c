//! HTTP transport.
//!
//! The resolver and downloader only need "open a URL as a byte stream",
//! so that is all [`Transport`] offers. [`HttpTransport`] is the real
//! implementation on top of `ureq`.

use anyhow::{Context, Result};
use std::io::Read;

/// An opened response body.
pub struct Fetched {
    pub reader: Box<dyn Read>,
    /// Value of `Content-Length`, if the server sent one
    pub content_length: Option<u64>,
}

pub trait Transport {
    /// Issue a GET for `url`. Non-success statuses are errors.
    fn get(&self, url: &str) -> Result<Fetched>;
}

/// Blocking HTTP(S) client. No timeout is configured.
pub struct HttpTransport {
    agent: ureq::Agent,
}

const USER_AGENT: &str = concat!("fetch-win-deps/", env!("CARGO_PKG_VERSION"));

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Fetched> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let content_length = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());

        Ok(Fetched {
            reader: Box::new(response.into_body().into_reader()),
            content_length,
        })
    }
}
