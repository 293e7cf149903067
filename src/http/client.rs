//! HTTP client for backend checks
//!
//! Thin wrapper over reqwest that resolves paths against the backend base URL
//! and applies an explicit timeout to every request.

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client bound to one backend
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a client for `base_url`
    pub fn new(base_url: impl Into<String>, default_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            default_timeout,
        })
    }

    /// Build full URL; an empty path addresses the base URL unchanged
    fn build_url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), path)
        }
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.build_url(&request.url);
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        debug!("Sending {} request to {} (timeout {:?})", request.method, url, timeout);

        let mut req_builder = self
            .client
            .request(request.method.clone(), &url)
            .timeout(timeout);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder
            .send()
            .await
            .map_err(|e| classify_error(e, &url, timeout))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(e, &url, timeout))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            body,
            duration_ms,
        })
    }

    /// GET `path` with the given timeout
    pub async fn get(&self, path: &str, timeout: Duration) -> Result<HttpResponse, HttpError> {
        self.send(HttpRequest::get(path).timeout(timeout)).await
    }

    /// GET the base URL exactly as configured
    pub async fn get_base(&self, timeout: Duration) -> Result<HttpResponse, HttpError> {
        self.get("", timeout).await
    }

    /// POST `payload` as JSON to `path` with the given timeout
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
        timeout: Duration,
    ) -> Result<HttpResponse, HttpError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| HttpError::RequestFailed(format!("Failed to encode body: {e}")))?;
        self.send(
            HttpRequest::post(path)
                .header(CONTENT_TYPE.as_str(), "application/json")
                .body(body)
                .timeout(timeout),
        )
        .await
    }
}

fn classify_error(e: reqwest::Error, url: &str, timeout: Duration) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout(timeout)
    } else if e.is_connect() {
        HttpError::ConnectionRefused(url.to_string())
    } else if e.is_builder() {
        HttpError::InvalidUrl(url.to_string())
    } else {
        HttpError::RequestFailed(e.to_string())
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
