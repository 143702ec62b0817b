// File: crates/casecurve-core/src/correct.rs
// Summary: Monotonic repair of cumulative counts (backward running ceiling).

use crate::series::Series;

/// Clamp a cumulative series so it never decreases forward in time.
///
/// Scans from the newest day back with a running ceiling that starts at the
/// newest value. An older value above the ceiling is replaced by the ceiling;
/// otherwise it becomes the new ceiling. Several consecutive bad days all end
/// up at the same ceiling rather than being interpolated.
pub fn correct(series: &Series) -> Series {
    let mut values = series.values();
    let mut ceiling = f64::INFINITY;
    for v in values.iter_mut().rev() {
        if *v > ceiling {
            *v = ceiling;
        } else {
            ceiling = *v;
        }
    }
    series.with_values(values)
}
