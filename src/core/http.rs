//! HTTP transport
//!
//! API structs never talk to the network directly. They describe each call as
//! an [`ApiRequest`] and hand it to an [`HttpClient`]; [`ReqwestClient`] is the
//! production implementation, and tests plug in their own.

use crate::config::{ApiName, Configuration};
use crate::core::error::{ConfigError, LatticeError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use std::sync::Arc;

/// Payload of a request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// Sent with `Content-Type: text/plain`
    Text(String),
}

/// One call against one API, relative to that API's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub api: ApiName,
    pub method: Method,
    /// Path segments, each encoded on its own; empty for the API root
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(api: ApiName, method: Method) -> Self {
        Self {
            api,
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a fixed route such as `entity/type`, one segment per `/` part
    pub fn route(mut self, route: &str) -> Self {
        self.segments.extend(
            route
                .split('/')
                .filter(|part| !part.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Append one segment verbatim; `/` and `..` inside it stay data
    pub fn segment(mut self, value: impl ToString) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Segments joined with `/`, for logs and assertions
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// JSON body, if any
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Plain-text body, if any
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// Raw answer from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam shared by every API
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; status handling happens in the API layer.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`HttpClient`] backed by `reqwest`
///
/// Resolves each request against [`Configuration::api_base_url`] and attaches
/// the bearer token when one is configured.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    config: Arc<Configuration>,
}

impl ReqwestClient {
    pub fn new(config: Arc<Configuration>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Absolute URL for `request`; path segments are percent-encoded
    pub fn url(&self, request: &ApiRequest) -> Result<Url> {
        let base = self.config.api_base_url(request.api);
        let invalid = |reason: &str| {
            LatticeError::Config(ConfigError::InvalidBaseUrl {
                url: base.clone(),
                reason: reason.to_string(),
            })
        };
        let mut url = Url::parse(&base).map_err(|e| invalid(&e.to_string()))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| invalid("cannot be a base"))?;
            path.pop_if_empty();
            for segment in &request.segments {
                if is_dot_segment(segment) {
                    return Err(LatticeError::InvalidParameter(format!(
                        "path segment {segment:?} cannot be sent"
                    )));
                }
                path.push(segment);
            }
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

/// Whole-segment `.` and `..` are navigation to a URL parser, never data
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request)?;
        tracing::debug!(api = %request.api, method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method, url);
        if let Some(token) = self.config.auth_token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder = match request.body {
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Text(body)) => builder.header(CONTENT_TYPE, "text/plain").body(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}
