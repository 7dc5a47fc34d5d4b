// ABOUTME: Minimal HTTP GET capability used by every deployment step.
// ABOUTME: Trait seam for tests plus a reqwest-backed implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A read-only request with its own timeout.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub bearer: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            bearer: None,
            timeout,
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only a plain 200 counts; other 2xx codes are treated as failures.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Production client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, HttpError> {
        Self::build(reqwest::Client::builder())
    }

    /// Client that ignores `HTTP_PROXY`-style environment variables.
    pub fn direct() -> Result<Self, HttpError> {
        Self::build(reqwest::Client::builder().no_proxy())
    }

    fn build(builder: reqwest::ClientBuilder) -> Result<Self, HttpError> {
        let inner = builder
            .user_agent(concat!("mapdeploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        tracing::debug!(url = %request.url, "GET");

        let mut builder = self.inner.get(&request.url).timeout(request.timeout);
        if let Some(ref token) = request.bearer {
            builder = builder
                .bearer_auth(token)
                .header(reqwest::header::CONTENT_TYPE, "application/json");
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(request.timeout)
            } else {
                HttpError::Body(e.to_string())
            }
        })?;

        tracing::debug!(url = %request.url, status, "response received");
        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(timeout)
    } else if err.is_connect() {
        HttpError::Connect(err.to_string())
    } else {
        HttpError::Request(err.to_string())
    }
}
