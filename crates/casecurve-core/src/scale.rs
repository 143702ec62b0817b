// File: crates/casecurve-core/src/scale.rs
// Summary: Value transforms for the line series (linear, natural log, fraction of confirmed).

use crate::series::Series;
use crate::types::TransformKind;

/// Apply `kind` to `series`, returning a new series with the same dates and index.
///
/// - `Linear`: identity.
/// - `Logarithmic`: `ln(v)`, with every `v <= 0` mapped to exactly 0.
/// - `PercentOfConfirmed`: `v / confirmed[date]` as a fraction (1.0 is 100 %).
///   Missing reference dates and divisions by zero give 0.
///
/// `confirmed` is only read for `PercentOfConfirmed`.
pub fn transform(series: &Series, kind: TransformKind, confirmed: &Series) -> Series {
    match kind {
        TransformKind::Linear => series.clone(),
        TransformKind::Logarithmic => series.map_values(|r| log_or_zero(r.value)),
        TransformKind::PercentOfConfirmed => series.map_values(|r| {
            let reference = confirmed.get(r.date).unwrap_or(f64::NAN);
            finite_or_zero(r.value / reference)
        }),
    }
}

#[inline]
fn log_or_zero(v: f64) -> f64 {
    if v > 0.0 { finite_or_zero(v.ln()) } else { 0.0 }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
