//! # Page Fetching
//!
//! The transport seam of the crate. Strategies never talk to `reqwest`
//! directly; they describe a request as a `FetchRequest` and hand it to a
//! `PageFetcher`. `HttpFetcher` is the production implementation, tests swap
//! in canned responses.

use crate::config::DelayRange;
use crate::errors::ExtractError;
use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use std::borrow::Cow;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// The HTTP verbs the extractor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Get,
    Head,
}

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub method: FetchMethod,
    pub url: &'a str,
    /// Sent as `User-Agent` unless empty.
    pub user_agent: &'a str,
    pub headers: &'a [(&'static str, &'static str)],
    pub query: Vec<(&'static str, &'a str)>,
    pub timeout: Duration,
}

impl<'a> FetchRequest<'a> {
    pub fn get(url: &'a str, user_agent: &'a str, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::Get,
            url,
            user_agent,
            headers: &[],
            query: Vec::new(),
            timeout,
        }
    }

    pub fn head(url: &'a str, user_agent: &'a str, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::Head,
            ..Self::get(url, user_agent, timeout)
        }
    }

    pub fn headers(mut self, headers: &'a [(&'static str, &'static str)]) -> Self {
        self.headers = headers;
        self
    }

    pub fn query(mut self, key: &'static str, value: &'a str) -> Self {
        self.query.push((key, value));
        self
    }
}

/// A fully buffered response. The body is kept as raw bytes since pages may
/// not be valid UTF-8 and thumbnails are binary.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Turns a non-2xx response into an `ExtractError::Status`.
    pub fn error_for_status(self) -> Result<Self, ExtractError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ExtractError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// A generic trait for anything that can perform a `FetchRequest`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<FetchResponse, ExtractError>;
}

/// The `PageFetcher` backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ExtractError> {
        let client = Client::builder().gzip(true).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<FetchResponse, ExtractError> {
        let method = match request.method {
            FetchMethod::Get => Method::GET,
            FetchMethod::Head => Method::HEAD,
        };

        let mut headers = HeaderMap::new();
        if !request.user_agent.is_empty() {
            if let Ok(agent) = HeaderValue::from_str(request.user_agent) {
                headers.insert(USER_AGENT, agent);
            }
        }
        for &(name, value) in request.headers {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }

        let mut builder = self
            .client
            .request(method, request.url)
            .headers(headers)
            .timeout(request.timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.bytes().await?.to_vec();
        debug!(%url, status, bytes = body.len(), "Fetched page");

        Ok(FetchResponse { url, status, body })
    }
}

/// Sleeps for a random duration inside `range`.
pub async fn polite_delay(range: DelayRange) {
    if range.is_zero() {
        return;
    }
    let (min, max) = if range.min_ms <= range.max_ms {
        (range.min_ms, range.max_ms)
    } else {
        warn!(?range, "Delay range is inverted, swapping bounds");
        (range.max_ms, range.min_ms)
    };
    let millis = OsRng.gen_range(min..=max);
    sleep(Duration::from_millis(millis)).await;
}
