// File: crates/casecurve-core/src/types.rs
// Summary: Shared enums and constants (metrics, slots, transform and change kinds).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location used when a slot has no explicit selection.
pub const DEFAULT_LOCATION: &str = "POLAND";

/// Case-count metric. `Active` is derived, never fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    Confirmed,
    Recovered,
    Deaths,
    Active,
}

impl MetricKind {
    /// Metrics fetched from the upstream source.
    pub const CUMULATIVE: [MetricKind; 3] = [MetricKind::Confirmed, MetricKind::Recovered, MetricKind::Deaths];
    /// Display order used for traces.
    pub const ALL: [MetricKind; 4] = [MetricKind::Active, MetricKind::Confirmed, MetricKind::Recovered, MetricKind::Deaths];

    /// Status segment used by the upstream API and the dump file names.
    pub const fn status(&self) -> &'static str {
        match self {
            MetricKind::Confirmed => "confirmed",
            MetricKind::Recovered => "recovered",
            MetricKind::Deaths => "deaths",
            MetricKind::Active => "active",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricKind::Confirmed => "Confirmed",
            MetricKind::Recovered => "Recovered",
            MetricKind::Deaths => "Deaths",
            MetricKind::Active => "Active",
        };
        f.write_str(s)
    }
}

/// Comparison role a location occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationSlot {
    Primary,
    Comparison,
}

/// Numeric transform applied to the line series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    #[default]
    Linear,
    #[serde(rename = "log")]
    Logarithmic,
    #[serde(rename = "percent")]
    PercentOfConfirmed,
}

impl TransformKind {
    pub const fn label(&self) -> &'static str {
        match self {
            TransformKind::Linear => "linear",
            TransformKind::Logarithmic => "log",
            TransformKind::PercentOfConfirmed => "percent",
        }
    }
}

/// Day-over-day change shown in the bar series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    #[default]
    #[serde(rename = "diff")]
    AbsoluteDelta,
    #[serde(rename = "diff-in-%")]
    PercentDelta,
}

impl ChangeKind {
    pub const fn is_percent(&self) -> bool { matches!(self, ChangeKind::PercentDelta) }
}
