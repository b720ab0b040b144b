//! JSON POST client with bounded retries, used by outbound notifications.
//!
//! Server errors and transport failures are retried with exponential
//! backoff; any 4xx is final.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use slotwise_domain::SlotwiseError;
use tracing::{debug, warn};

use crate::errors::conversions::to_domain;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(200);
const MAX_BACKOFF_SHIFT: u32 = 6;

/// How many times a request is tried and how long to wait in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based): base, 2x base, 4x base...
    pub fn delay_before(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(MAX_BACKOFF_SHIFT);
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: DEFAULT_ATTEMPTS, base_backoff: DEFAULT_BACKOFF }
    }
}

enum Attempt {
    Done(Response),
    Retry(String),
    Fail(SlotwiseError),
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// POSTs `body` as JSON; a non-success status left after the last
    /// attempt becomes an error.
    pub async fn post_json<T>(&self, url: &str, body: &T) -> Result<Response, SlotwiseError>
    where
        T: Serialize + ?Sized,
    {
        let attempts = self.retry.attempts.max(1);
        let mut attempt = 1;

        loop {
            let last = attempt == attempts;
            match self.try_once(url, body, last).await {
                Attempt::Done(response) => return response.error_for_status().map_err(to_domain),
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry(reason) => {
                    let delay = self.retry.delay_before(attempt);
                    warn!(%url, attempt, %reason, delay_ms = delay.as_millis(), "retrying POST");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn try_once<T>(&self, url: &str, body: &T, last: bool) -> Attempt
    where
        T: Serialize + ?Sized,
    {
        match self.client.post(url).json(body).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(%url, %status, "POST answered");
                if status.is_server_error() && !last {
                    Attempt::Retry(status.to_string())
                } else {
                    Attempt::Done(response)
                }
            }
            Err(err) if !last && is_transient(&err) => Attempt::Retry(err.to_string()),
            Err(err) => Attempt::Fail(to_domain(err)),
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, retry: RetryPolicy::default() }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts, including the first one.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry.attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.retry.base_backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient, SlotwiseError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("slotwise/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(to_domain)?;

        Ok(HttpClient { client, retry: self.retry })
    }
}
