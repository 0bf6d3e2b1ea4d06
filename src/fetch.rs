//! Page fetching with a bounded retry.
//!
//! One HTTP GET per page, retried exactly once (immediately, no delay)
//! if the failure is connection-level.  A completed exchange with a
//! non-success status is never retried.  Either way the outcome is a
//! tagged [`FetchOutcome`] so the caller's retry-vs-skip decision stays
//! explicit; per-page failures are logged here and absorbed by the
//! reconciler, never escalated.

use std::fmt::Display;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, error, warn};

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    /// The URL the payload actually came from (after redirects).
    pub url: String,
    /// The page body as text.
    pub body: String,
}

/// The three-valued result of fetching one page.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The exchange completed with a success status.
    Success(Page),
    /// The exchange completed but the server reported an error; the
    /// page is skipped without a retry.
    ServerError(StatusCode),
    /// Two consecutive connection-level failures; the page is skipped.
    Unreachable,
}

/// The seam between the reconciler and the network, so tests can drive
/// the reconciler with canned pages.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Real HTTP fetcher over `reqwest::blocking`.
///
/// The contract imposes no timeout; a 30 second per-request timeout is
/// applied so an unresponsive mirror cannot hang the run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("debian-feed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// One GET attempt.  A non-success status is a terminal outcome; a
    /// transport error (including a failure while reading the body) is
    /// returned to the caller for the retry decision.
    fn attempt(&self, url: &str) -> reqwest::Result<FetchOutcome> {
        debug!(%url, "getting page");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            error!(%url, %status, "could not get page, skipping");
            return Ok(FetchOutcome::ServerError(status));
        }
        let effective_url = response.url().to_string();
        let body = response.text()?;
        debug!(%url, bytes = body.len(), "got page");
        Ok(FetchOutcome::Success(Page {
            url: effective_url,
            body,
        }))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        with_retry(url, || self.attempt(url))
    }
}

/// Apply the retry-once policy to an attempt function.
///
/// Split out from [`HttpFetcher`] so the policy itself is testable
/// without a network: `attempt` returns `Err` for connection-level
/// failures (retryable) and `Ok` for any completed exchange.
fn with_retry<E, F>(url: &str, mut attempt: F) -> FetchOutcome
where
    E: Display,
    F: FnMut() -> Result<FetchOutcome, E>,
{
    match attempt() {
        Ok(outcome) => outcome,
        Err(err) => {
            // Not fatal unless it happens again.
            warn!(%url, %err, "error connecting to the server, retrying");
            match attempt() {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(%url, %err, "failed to connect to the server twice, skipping");
                    FetchOutcome::Unreachable
                }
            }
        }
    }
}
