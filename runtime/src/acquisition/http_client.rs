//! Static page fetching over plain HTTP.

use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a fetch produced no usable HTML.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page ({content_type})")]
    NotHtml { url: String, content_type: String },
}

/// A fetched response body with its metadata.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The requested URL.
    pub url: String,
    /// The URL after redirects; relative logo URLs resolve against this.
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    /// True for `text/html`, `application/xhtml+xml`, or a missing content type.
    pub fn is_html(&self) -> bool {
        self.content_type.as_deref().map_or(true, |ct| {
            let ct = ct.to_ascii_lowercase();
            ct.contains("text/html") || ct.contains("application/xhtml")
        })
    }
}

/// Thin wrapper over a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    /// GET `url`, returning whatever the server sent.
    pub async fn get(&self, url: &str, timeout_ms: u64) -> Result<HttpResponse, FetchError> {
        let request_error = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_ms,
                }
            } else {
                FetchError::Request {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let resp = self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = resp.text().await.map_err(request_error)?;

        debug!(url, status, bytes = body.len(), "fetched");

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            content_type,
            body,
        })
    }

    /// GET `url` and insist on a 2xx HTML response.
    pub async fn fetch_html(&self, url: &str, timeout_ms: u64) -> Result<HttpResponse, FetchError> {
        let resp = self.get(url, timeout_ms).await?;
        if !(200..300).contains(&resp.status) {
            return Err(FetchError::Status {
                url: resp.url,
                status: resp.status,
            });
        }
        if !resp.is_html() {
            return Err(FetchError::NotHtml {
                url: resp.url,
                content_type: resp.content_type.unwrap_or_default(),
            });
        }
        Ok(resp)
    }
}
