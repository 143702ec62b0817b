// File: crates/casecurve-core/tests/correct.rs
// Purpose: Backward-ceiling monotonic correction of cumulative series.

use casecurve_core::{correct, Series};
use chrono::NaiveDate;

fn start() -> NaiveDate { NaiveDate::from_ymd_opt(2020, 4, 1).unwrap() }

#[test]
fn earlier_spike_is_clamped_to_later_value() {
    let s = Series::from_values(start(), &[10.0, 8.0, 12.0, 15.0]);
    let c = correct(&s);
    assert_eq!(c.values(), vec![8.0, 8.0, 12.0, 15.0]);
    assert_eq!(c.dates(), s.dates());
}

#[test]
fn consecutive_spikes_share_one_ceiling() {
    let s = Series::from_values(start(), &[5.0, 9.0, 9.0, 3.0, 4.0]);
    assert_eq!(correct(&s).values(), vec![3.0, 3.0, 3.0, 3.0, 4.0]);
}

#[test]
fn monotonic_input_is_unchanged_and_empty_stays_empty() {
    let s = Series::from_values(start(), &[0.0, 1.0, 1.0, 5.0, 8.0]);
    assert_eq!(correct(&s), s);
    assert!(correct(&Series::new()).is_empty());
}

#[test]
fn corrected_series_never_decreases() {
    // Deterministic noisy cumulative data with downward revisions.
    let mut seed = 0x2545_f491u64;
    let mut level = 0.0f64;
    let values: Vec<f64> = (0..200)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let r = (seed >> 33) % 100;
            level += r as f64;
            if r % 7 == 0 { level * 0.8 } else { level }
        })
        .collect();
    let c = correct(&Series::from_values(start(), &values)).values();
    assert!(c.windows(2).all(|w| w[0] <= w[1]));
    // Never raises a value, only lowers.
    assert!(c.iter().zip(&values).all(|(a, b)| a <= b));
}
