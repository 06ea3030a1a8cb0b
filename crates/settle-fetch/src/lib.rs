//! # settle-fetch
//!
//! Concurrent HTTP fetching for settle.
//!
//! - [`HttpFetcher`] turns one GET/POST into an [`Outcome`], never an error,
//!   for transport failures, non-2xx statuses and malformed bodies.
//! - [`collector::collect`] runs one task per endpoint and waits for all of
//!   them to settle, returning outcomes in input order.
//! - [`pipeline::run_pipeline`] fetches a primary and a secondary collection
//!   concurrently and joins them into per-owner category counts.

pub mod collector;
pub mod pipeline;

mod error;
mod http;

pub use collector::{collect, collect_array};
pub use error::{FetchError, PipelineError};
pub use pipeline::{PipelineSpec, run_pipeline};

use std::future::Future;
use std::time::Duration;

use serde_json::{Map, Value};
use settle_core::{FailureReason, Outcome};

use crate::http::{check_status, network_failure, read_json_array, read_json_object};

// ── Fetch ──────────────────────────────────────────────────────────

/// Something that can retrieve one JSON collection.
///
/// Implementations must classify every expected failure into the returned
/// [`Outcome`]. Cloning is expected to be cheap; the collector hands one clone
/// to each spawned task.
pub trait Fetch: Clone + Send + Sync + 'static {
    /// GET `endpoint` and return the elements of its JSON array body.
    fn get(&self, endpoint: &str) -> impl Future<Output = Outcome<Value>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// Builder options for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherOptions {
    /// Upper bound for each request. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
            user_agent: concat!("settle/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(options: &FetcherOptions) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// GET `endpoint`, expecting a JSON array body.
    pub async fn get_collection(&self, endpoint: &str) -> Outcome<Value> {
        let result = async {
            let resp = self
                .http
                .get(endpoint)
                .send()
                .await
                .map_err(|e| network_failure(&e))?;
            read_json_array(check_status(resp)?).await
        }
        .await;

        if let Err(reason) = &result {
            tracing::debug!(endpoint, %reason, "GET settled with failure");
        }
        Outcome::from(result)
    }

    /// POST `body` as JSON to `endpoint`, expecting a JSON object back.
    ///
    /// A success carries exactly one element: the object the server returned.
    pub async fn post(
        &self,
        endpoint: &str,
        body: &Map<String, Value>,
    ) -> Outcome<Map<String, Value>> {
        let result = async {
            let resp = self
                .http
                .post(endpoint)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .json(body)
                .send()
                .await
                .map_err(|e| network_failure(&e))?;
            let status = resp.status().as_u16();
            let object = read_json_object(check_status(resp)?).await?;
            tracing::debug!(endpoint, status, "POST accepted");
            Ok::<_, FailureReason>(vec![object])
        }
        .await;

        if let Err(reason) = &result {
            tracing::debug!(endpoint, %reason, "POST settled with failure");
        }
        Outcome::from(result)
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, endpoint: &str) -> Outcome<Value> {
        self.get_collection(endpoint).await
    }
}
