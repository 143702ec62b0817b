// File: crates/casecurve-core/src/view.rs
// Summary: Render hand-off model: titles, axis specs and per-location traces with deltas.

use chrono::NaiveDate;
use serde::Serialize;

use crate::series::Series;
use crate::types::{ChangeKind, LocationSlot, MetricKind, TransformKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScaleKind {
    Linear,
    Log,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisSpec {
    pub label: String,
    pub kind: ScaleKind,
}

impl AxisSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), kind: ScaleKind::Linear }
    }

    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Primary y axis: "Number of Cases in <transform> scale".
    pub fn cases(transform: TransformKind) -> Self {
        let kind = if transform == TransformKind::Logarithmic { ScaleKind::Log } else { ScaleKind::Linear };
        Self::new(format!("Number of Cases in {} scale", transform.label())).with_kind(kind)
    }

    /// Secondary y axis for the daily change bars.
    pub fn change(change: ChangeKind) -> Self {
        Self::new(if change.is_percent() { "Daily % change" } else { "Daily change" })
    }

    /// X axis: calendar dates, or days since the threshold was crossed.
    pub fn days(threshold: Option<f64>) -> Self {
        match threshold {
            Some(n) => Self::new(format!("Days since {n} cases")),
            None => Self::new("Date"),
        }
    }
}

/// One metric of one location: the transformed line plus its daily change bars.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricTrace {
    pub metric: MetricKind,
    pub name: String,
    pub change_name: String,
    pub series: Series,
    /// Same length as `series`.
    pub deltas: Vec<f64>,
}

impl MetricTrace {
    pub fn new(metric: MetricKind, location: &str, change: ChangeKind, series: Series, deltas: Vec<f64>) -> Self {
        debug_assert_eq!(series.len(), deltas.len());
        let pct = if change.is_percent() { "% " } else { "" };
        Self {
            metric,
            name: format!("{metric} {location}"),
            change_name: format!("{metric} daily {pct}change {location}"),
            series,
            deltas,
        }
    }

    /// `(x, y)` line points.
    pub fn points(&self) -> Vec<(f64, f64)> { self.series.to_xy() }

    /// `(x, delta)` bar points sharing the line's x values.
    pub fn delta_points(&self) -> Vec<(f64, f64)> {
        self.series.to_xy().into_iter().zip(&self.deltas).map(|((x, _), &d)| (x, d)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationPanel {
    pub slot: LocationSlot,
    pub location: String,
    /// Date the window was cut at (day 0 on a relative axis).
    pub window_start: Option<NaiveDate>,
    /// Active, Confirmed, Recovered, Deaths.
    pub traces: Vec<MetricTrace>,
}

impl LocationPanel {
    pub fn trace(&self, metric: MetricKind) -> Option<&MetricTrace> {
        self.traces.iter().find(|t| t.metric == metric)
    }
}

/// Everything the rendering layer needs for one request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonView {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub y2_axis: AxisSpec,
    pub panels: Vec<LocationPanel>,
}

impl ComparisonView {
    /// View with axes and title but no data, for when nothing could be loaded.
    pub fn empty(title: String, transform: TransformKind, change: ChangeKind) -> Self {
        Self {
            title,
            x_axis: AxisSpec::days(None),
            y_axis: AxisSpec::cases(transform),
            y2_axis: AxisSpec::change(change),
            panels: Vec::new(),
        }
    }

    pub fn panel(&self, slot: LocationSlot) -> Option<&LocationPanel> {
        self.panels.iter().find(|p| p.slot == slot)
    }
}

/// "<P> graph of ..." or "<P> vs <C> graph of ...".
pub fn title(primary: &str, comparison: Option<&str>) -> String {
    match comparison {
        Some(c) => format!("{primary} vs {c} graph of the Confirmed/Recovered/Deaths/Active cases."),
        None => format!("{primary} graph of the Confirmed/Recovered/Deaths/Active cases."),
    }
}
