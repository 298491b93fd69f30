//! Axum framework adapters for the HTTP abstraction traits.
//!
//! `HttpRequest` and `ResponseBuilder` are defined in `farewell_core`; they are
//! implemented here on newtype wrappers to satisfy the orphan rule.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  farewell_core::HttpRequest (trait)        │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest(axum::Request)                │
//! │  impl HttpRequest for AxumRequest { }      │  ← Zero cost!
//! └────────────────────────────────────────────┘
//! ```

use axum::{
    body::Body,
    extract::{OriginalUri, Request},
    http::{StatusCode, response::Builder},
    response::{IntoResponse, Response},
};
use farewell_core::{HttpRequest, ResponseBuilder};

/// Newtype wrapper around Axum's Request type.
///
/// Path and query come from the `OriginalUri` when the route is nested, so they
/// match what the client actually requested.
#[repr(transparent)]
pub struct AxumRequest(pub Request);

impl AxumRequest {
    fn uri(&self) -> &axum::http::Uri {
        match self.0.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri,
            None => self.0.uri(),
        }
    }

    /// Path and query as requested, e.g. `/deleteaccount?rest`.
    pub fn original_url(&self) -> &str {
        self.uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| self.path())
    }

    pub fn into_inner(self) -> Request {
        self.0
    }
}

impl From<Request> for AxumRequest {
    fn from(req: Request) -> Self {
        AxumRequest(req)
    }
}

impl From<AxumRequest> for Request {
    fn from(wrapper: AxumRequest) -> Self {
        wrapper.0
    }
}

impl HttpRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name)?.to_str().ok()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        let cookie_header = self.header("cookie")?;

        cookie_header.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
    }

    fn method(&self) -> &str {
        self.0.method().as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn query(&self) -> Option<&str> {
        self.uri().query()
    }
}

/// Newtype wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder for AxumResponseBuilder {
    type Response = Response;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.builder = self.builder.header("content-type", "application/json");
        self.body = Some(body.to_string());
        self
    }

    fn html_body(mut self, body: String) -> Self {
        self.builder = self
            .builder
            .header("content-type", "text/html; charset=utf-8");
        self.body = Some(body);
        self
    }

    fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.builder = self.builder.extension(value);
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.map(Body::from).unwrap_or_else(Body::empty);
        match self.builder.body(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Invalid response parts");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Fresh response builder for route handlers.
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
