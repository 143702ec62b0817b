// File: crates/casecurve-core/src/error.rs
// Summary: Error taxonomy for fetching, aggregation, registry lookup and file loading.

use crate::types::MetricKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Aggregation had nothing left to emit (unknown location, empty upstream reply,
    /// or only the dropped final day).
    #[error("no usable {metric} records for location '{location}'")]
    EmptyInput { location: String, metric: MetricKind },

    /// Network or parsing failure reported by the data source. Not retried.
    #[error("fetching {metric} for '{location}' failed: {reason}")]
    UpstreamFetch { location: String, metric: MetricKind, reason: String },

    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    #[error("invalid location registry: {0}")]
    Registry(String),

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Errors the rendering layer recovers from by falling back to the default location.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::EmptyInput { .. } | Error::UnknownLocation(_))
    }
}
