//! RFC 7807 Problem Details rendering
//!
//! Turns arbitrary application errors into problem reports in two wire
//! formats, `application/problem+json` and `application/problem+xml`. It
//! includes:
//! - the problem record and its extension members (`ProblemDetails`)
//! - the adapter lookup and its stock registry (`AdapterRegistry`)
//! - normalization of errors into flat documents (`ProblemDocument`)
//! - the JSON and XML encoders behind `ProblemRenderer`
//!
//! ```
//! use problem_details::{AdapterRegistry, ProblemDetails, ProblemRenderer};
//!
//! #[derive(Debug)]
//! struct OutOfStock(&'static str);
//!
//! impl std::fmt::Display for OutOfStock {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{} is out of stock", self.0)
//!     }
//! }
//!
//! impl std::error::Error for OutOfStock {}
//!
//! let registry = AdapterRegistry::new().register(|e: &OutOfStock| {
//!     ProblemDetails::new()
//!         .with_status(409)
//!         .with_title("Out of Stock")
//!         .with_detail(e.to_string())
//! });
//! let renderer = ProblemRenderer::new(registry);
//!
//! let resp = renderer.render_json(&OutOfStock("widget"), None);
//! assert_eq!(resp.status().as_u16(), 409);
//! assert_eq!(resp.content_type(), Some("application/problem+json"));
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use http::StatusCode;

pub mod catalog;
pub mod config;
pub mod error;
pub mod normalize;
pub mod problem;
pub mod registry;
pub mod render;
pub mod warning;

// Re-export commonly used types
pub use catalog::ProblemDef;
pub use config::{ProblemDetailsConfig, ProblemFormat};
pub use error::ProblemDetailsError;
pub use normalize::{ProblemDocument, normalize};
pub use problem::{AsProblemDetails, Extensions, ProblemDetails, STANDARD_FIELDS};
pub use registry::{AdapterRegistry, ProblemLookup};
pub use render::xml::XmlNode;
pub use render::{ProblemRenderer, ProblemResponse};
pub use warning::{Anomaly, MemoryLog, ProblemLog, TracingLog};

/// Content type for JSON problem details.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Content type for XML problem details.
pub const APPLICATION_PROBLEM_XML: &str = "application/problem+xml";

/// Status applied when a document has no usable status.
pub const FALLBACK_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
