// File: crates/casecurve-core/src/delta.rs
// Summary: Day-over-day change (absolute or percent), aligned 1:1 with the input.

use crate::series::Series;
use crate::types::ChangeKind;

/// Change between each day and the one before. The first element is 0; any
/// non-finite percent (division by a zero previous day) is 0.
pub fn delta(series: &Series, kind: ChangeKind) -> Vec<f64> {
    let values = series.values();
    delta_values(&values, kind)
}

/// Same as [`delta`] over plain values.
pub fn delta_values(values: &[f64], kind: ChangeKind) -> Vec<f64> {
    if values.is_empty() { return Vec::new(); }
    let mut out = Vec::with_capacity(values.len());
    out.push(0.0);
    for w in values.windows(2) {
        let (prev, cur) = (w[0], w[1]);
        let d = match kind {
            ChangeKind::AbsoluteDelta => cur - prev,
            ChangeKind::PercentDelta => (cur - prev) / prev * 100.0,
        };
        out.push(if d.is_finite() { d } else { 0.0 });
    }
    out
}
