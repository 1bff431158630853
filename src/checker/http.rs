// src/checker/http.rs
// =============================================================================
// This module checks if links are reachable by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Records the status code the server answered with
// - Turns every failure (timeout, DNS, bad URL, ...) into an "N/A" status
// - Runs all checks concurrently and waits for every one of them
//
// The HTTP client sits behind the `HeadProbe` trait. Production code uses
// `ReqwestProbe`; tests plug in a scripted probe, and check the real client
// against tiny HTTP servers on 127.0.0.1.
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Traits: To swap the real HTTP client for a fake one in tests
// - Futures: join_all waits for a whole batch of checks
// =============================================================================

use async_trait::async_trait;
use futures::future::join_all;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffered()
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::link::{HttpStatus, Link, Validation};

/// What a HEAD request came back with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
}

/// Why a HEAD request produced no response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// Not an absolute http(s) URL, so no request was sent
    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

/// Anything that can answer "what status does a HEAD on this URL get?".
#[async_trait]
pub trait HeadProbe: Send + Sync {
    async fn head(&self, url: &str) -> Result<ProbeResponse, ProbeError>;
}

/// Settings for the real HTTP client.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// When false, a 3xx answer is recorded as-is (and is not ok)
    pub follow_redirects: bool,
    /// Redirect hops allowed when following
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            timeout: Duration::from_secs(10),
            follow_redirects: true,
            max_redirects: 5,
            user_agent: concat!("md-links/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// [`HeadProbe`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    pub fn new(config: &ProbeConfig) -> reqwest::Result<Self> {
        let policy = if config.follow_redirects {
            redirect::Policy::limited(config.max_redirects)
        } else {
            redirect::Policy::none()
        };

        // One client for every request (connection pooling)
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(policy)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(ReqwestProbe { client })
    }
}

#[async_trait]
impl HeadProbe for ReqwestProbe {
    async fn head(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        // reqwest only speaks http(s); don't bother sending anything else
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(ProbeError::InvalidUrl(url.to_string())),
        }

        match self.client.head(url).send().await {
            Ok(response) => Ok(ProbeResponse {
                status: response.status().as_u16(),
            }),
            Err(e) => Err(categorize_error(e)),
        }
    }
}

// Sorts reqwest errors into the few cases worth telling apart in logs
fn categorize_error(error: reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout
    } else if error.is_redirect() {
        ProbeError::TooManyRedirects
    } else if error.is_connect() {
        ProbeError::Connect(error.to_string())
    } else {
        ProbeError::Other(error.to_string())
    }
}

/// Checks one link and returns a new record carrying the result.
///
/// Never fails: a request that errors out becomes `status: N/A, ok: false`.
pub async fn validate_link<P: HeadProbe + ?Sized>(probe: &P, link: &Link) -> Link {
    let validation = match probe.head(&link.href).await {
        Ok(response) => {
            let validation = Validation::from_status(HttpStatus::Code(response.status));
            if !validation.ok {
                debug!(href = %link.href, status = response.status, "link not ok");
            }
            validation
        }
        Err(e) => {
            debug!(href = %link.href, file = %link.file.display(), error = %e, "link unreachable");
            Validation::unreachable()
        }
    };

    link.validated(validation)
}

/// Checks a batch of links concurrently.
///
/// With `concurrency: None` every check is started at once; `Some(n)` keeps
/// at most `n` in flight. Either way the output has the same order as the
/// input and is returned only after every check has finished.
pub async fn validate_links<P: HeadProbe + ?Sized>(
    probe: &P,
    links: &[Link],
    concurrency: Option<usize>,
) -> Vec<Link> {
    debug!(count = links.len(), ?concurrency, "validating links");

    let checks = links.iter().map(|link| validate_link(probe, link));

    match concurrency {
        None => join_all(checks).await,
        // .buffered (not buffer_unordered) so results keep input order
        Some(limit) => stream::iter(checks).buffered(limit.max(1)).collect().await,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is validate_link infallible?
//    - One dead link must not stop the other 99 checks
//    - The failure becomes data (status "N/A", ok false) instead of an Err
//
// 2. join_all vs buffered?
//    - join_all polls every future at once: maximum fan-out
//    - buffered(n) runs at most n at a time, still in input order
//    - Both only finish when every check is done
//
// 3. Why #[async_trait]?
//    - It lets a trait have async methods and still be used as
//      `&dyn HeadProbe`
//
// 4. Why no Mutex around the links?
//    - Each check borrows its own &Link and builds a fresh Link
//    - No two checks touch the same record, so no locks are needed
// -----------------------------------------------------------------------------
