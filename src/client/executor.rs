//! Resilient HTTP request execution
//!
//! Wraps a single HTTP call in a bounded retry loop with exponential backoff.
//! Any response below 400 is handed back to the caller untouched; everything
//! else is retried until the attempt budget runs out, at which point the
//! caller receives [`ApiError::RetriesExhausted`] instead of a response.

use std::time::Duration;

use log::{debug, error, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Default number of attempts per request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Per-request HTTP timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry budget and backoff schedule.
///
/// The wait after attempt `i` (0-indexed) is `base_delay * 2^i`, without
/// jitter. With the defaults that is 1, 2, 4, 8 and 16 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait after the first failed attempt
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Wait before the attempt following `attempt` (0-indexed)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Every wait the policy can produce, in order
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts).map(|i| self.delay_for(i)).collect()
    }
}

/// Executes HTTP requests with retry and error-body diagnostics.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: HttpClient,
    policy: RetryPolicy,
}

impl RequestExecutor {
    /// Create an executor with its own HTTP connection pool
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::from)?;

        Ok(Self { http, policy })
    }

    /// Perform `method url` until it succeeds or the retry budget is spent.
    ///
    /// Returns the first response with a status below 400. A 500 response has
    /// its body logged (parsed JSON if possible, raw text otherwise) before
    /// the retry. Transport errors are logged and retried the same way.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Option<&Value>,
        params: Option<&[(&str, String)]>,
    ) -> std::result::Result<Response, ApiError> {
        let mut last_status: Option<StatusCode> = None;

        for attempt in 0..self.policy.max_attempts {
            let mut request = self
                .http
                .request(method.clone(), url)
                .headers(headers.clone());
            if let Some(query) = params {
                request = request.query(query);
            }
            if let Some(json) = body {
                request = request.json(json);
            }

            debug!("{} {} (attempt {})", method, url, attempt + 1);

            let attempt_status = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.as_u16() < 400 {
                        return Ok(response);
                    }
                    if status == StatusCode::INTERNAL_SERVER_ERROR {
                        log_error_body(response).await;
                    }
                    Some(status)
                }
                Err(err) => {
                    warn!("{} {} raised: {}", method, url, err);
                    None
                }
            };

            if attempt_status.is_some() {
                last_status = attempt_status;
            }

            let wait = self.policy.delay_for(attempt);
            warn!(
                "{} {} failed ({}). Retrying in {}s...",
                method,
                url,
                attempt_status
                    .map(|s| s.as_u16().to_string())
                    .unwrap_or_else(|| "NO RESP".to_string()),
                wait.as_secs_f64()
            );
            tokio::time::sleep(wait).await;
        }

        error!("Max retries reached for {}", url);
        Err(ApiError::RetriesExhausted {
            method: method.to_string(),
            url: url.to_string(),
            attempts: self.policy.max_attempts,
            last_status: last_status.map(|s| s.as_u16()),
        })
    }
}

/// Log the body of a server error so the root cause is visible before retrying
async fn log_error_body(response: Response) {
    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            warn!("Server error body unreadable: {}", err);
            return;
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => warn!("Server error body: {}", json),
        Err(_) => warn!("Server error raw body: {}", text),
    }
}
