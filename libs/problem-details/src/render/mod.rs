//! Rendering errors into problem responses
//!
//! [`ProblemRenderer`] ties the pipeline together: it normalizes an error
//! through its lookup, resolves the response status, runs one of the
//! encoders and shapes the headers. Renderers hold no mutable state and can
//! be shared freely between threads.

pub mod json;
pub mod xml;

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, StatusCode};

use crate::FALLBACK_STATUS;
use crate::config::{ProblemDetailsConfig, ProblemFormat};
use crate::normalize::{ProblemDocument, normalize};
use crate::registry::{AdapterRegistry, ProblemLookup};
use crate::warning::{Anomaly, LOG_TARGET, ProblemLog, TracingLog};

/// Encoded problem report, ready to be carried by an HTTP layer.
#[derive(Debug, Clone)]
#[must_use]
pub struct ProblemResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ProblemResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// UTF-8 encoded body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn into_parts(self) -> (Bytes, StatusCode, HeaderMap) {
        (self.body, self.status, self.headers)
    }
}

/// Axum integration: make `ProblemResponse` directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemResponse {
    fn into_response(self) -> axum::response::Response {
        let mut resp = axum::response::Response::new(axum::body::Body::from(self.body));
        *resp.status_mut() = self.status;
        *resp.headers_mut() = self.headers;
        resp
    }
}

/// Renders errors as `application/problem+json` or `application/problem+xml`.
pub struct ProblemRenderer {
    lookup: Arc<dyn ProblemLookup>,
    log: Arc<dyn ProblemLog>,
    config: ProblemDetailsConfig,
}

impl Default for ProblemRenderer {
    fn default() -> Self {
        Self::new(AdapterRegistry::new())
    }
}

impl fmt::Debug for ProblemRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProblemRenderer {
    /// Create a renderer over `lookup`, logging anomalies through `tracing`.
    #[must_use]
    pub fn new(lookup: impl ProblemLookup + 'static) -> Self {
        Self {
            lookup: Arc::new(lookup),
            log: Arc::new(TracingLog),
            config: ProblemDetailsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn ProblemLog>) -> Self {
        self.log = log;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ProblemDetailsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ProblemDetailsConfig {
        &self.config
    }

    /// Normalize `error` into a problem document.
    #[must_use]
    pub fn normalize(&self, error: &(dyn Error + 'static)) -> ProblemDocument {
        normalize(error, self.lookup.as_ref(), self.log.as_ref())
    }

    /// Render `error` as `application/problem+json`.
    ///
    /// A `Content-Type` in `headers` is kept verbatim instead of the default.
    pub fn render_json(
        &self,
        error: &(dyn Error + 'static),
        headers: Option<&HeaderMap>,
    ) -> ProblemResponse {
        self.render(error, ProblemFormat::Json, headers)
    }

    /// Render `error` as `application/problem+xml`.
    ///
    /// A `Content-Type` in `headers` is kept verbatim instead of the default.
    pub fn render_xml(
        &self,
        error: &(dyn Error + 'static),
        headers: Option<&HeaderMap>,
    ) -> ProblemResponse {
        self.render(error, ProblemFormat::Xml, headers)
    }

    pub fn render(
        &self,
        error: &(dyn Error + 'static),
        format: ProblemFormat,
        headers: Option<&HeaderMap>,
    ) -> ProblemResponse {
        self.render_document(self.normalize(error), format, headers)
    }

    /// Render `error` in the format preferred by the request's `Accept`
    /// headers, falling back to the configured default format.
    pub fn render_negotiated(
        &self,
        error: &(dyn Error + 'static),
        request_headers: &HeaderMap,
        headers: Option<&HeaderMap>,
    ) -> ProblemResponse {
        let format = ProblemFormat::negotiate(request_headers, self.config.default_format);
        self.render(error, format, headers)
    }

    /// Encode an already normalized document.
    pub fn render_document(
        &self,
        document: ProblemDocument,
        format: ProblemFormat,
        headers: Option<&HeaderMap>,
    ) -> ProblemResponse {
        let status = resolve_status(&document, self.log.as_ref());
        let body = match format {
            ProblemFormat::Json => json::encode(document),
            ProblemFormat::Xml => xml::encode(document),
        };
        tracing::debug!(
            target: LOG_TARGET,
            status = status.as_u16(),
            media_type = format.media_type(),
            "rendered problem details"
        );
        ProblemResponse {
            status,
            headers: response_headers(headers, format),
            body: Bytes::from(body),
        }
    }
}

/// Status carried by the response; 500 when missing or unusable.
fn resolve_status(document: &ProblemDocument, log: &dyn ProblemLog) -> StatusCode {
    let Some(value) = document.status() else {
        log.warn(&Anomaly::MissingStatus);
        return FALLBACK_STATUS;
    };
    let status = value
        .as_u64()
        .and_then(|n| u16::try_from(n).ok())
        .and_then(|n| StatusCode::from_u16(n).ok());
    status.unwrap_or_else(|| {
        log.warn(&Anomaly::InvalidStatus {
            status: value.to_string(),
        });
        FALLBACK_STATUS
    })
}

/// Caller headers plus the default `Content-Type` unless one is already set.
fn response_headers(extra: Option<&HeaderMap>, format: ProblemFormat) -> HeaderMap {
    let mut headers = extra.cloned().unwrap_or_default();
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(format.media_type()));
    }
    headers
}
