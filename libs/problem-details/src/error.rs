use thiserror::Error;

/// Errors raised while building problem records.
///
/// Rendering itself never fails; every anomaly found while rendering is
/// degraded to a warning (see [`crate::warning::Anomaly`]).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProblemDetailsError {
    /// Extension value could not be reduced to a JSON value
    #[error("extension field '{key}' is not JSON-encodable: {source}")]
    Extension {
        /// The extension key being inserted
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
