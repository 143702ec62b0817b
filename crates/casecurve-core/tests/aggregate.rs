// File: crates/casecurve-core/tests/aggregate.rs
// Purpose: Daily aggregation: duplicate collapsing, zero-fill, last-day drop, UTC normalization.

use casecurve_core::{aggregate, aggregate_with, DuplicatePolicy, EmptyInputError, RawRecord};
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2020, 3, d).unwrap() }

fn raw(ts: &str, v: f64) -> RawRecord { RawRecord::parse(ts, v).expect("valid timestamp") }

#[test]
fn sums_same_day_duplicates_and_drops_last_day() {
    let input = vec![
        raw("2020-03-01T00:00:00Z", 5.0),
        raw("2020-03-01T12:00:00Z", 3.0),
        raw("2020-03-02T00:00:00Z", 10.0),
        raw("2020-03-03T00:00:00Z", 12.0),
    ];
    let s = aggregate(&input).unwrap();
    assert_eq!(s.dates(), vec![day(1), day(2)]);
    assert_eq!(s.values(), vec![8.0, 10.0]);
}

#[test]
fn max_policy_keeps_largest_duplicate() {
    let input = vec![
        raw("2020-03-01T00:00:00Z", 5.0),
        raw("2020-03-01T06:00:00Z", 7.0),
        raw("2020-03-01T12:00:00Z", 3.0),
        raw("2020-03-02T00:00:00Z", 9.0),
    ];
    let s = aggregate_with(&input, DuplicatePolicy::Max).unwrap();
    assert_eq!(s.values(), vec![7.0]);
}

#[test]
fn unordered_input_is_sorted_and_gaps_zero_filled() {
    let input = vec![
        raw("2020-03-04T00:00:00Z", 40.0),
        raw("2020-03-05T00:00:00Z", 50.0),
        raw("2020-03-01T00:00:00Z", 10.0),
    ];
    let s = aggregate(&input).unwrap();
    assert_eq!(s.dates(), vec![day(1), day(2), day(3), day(4)]);
    assert_eq!(s.values(), vec![10.0, 0.0, 0.0, 40.0]);
}

#[test]
fn timestamps_are_grouped_by_utc_date() {
    // 23:30 at UTC-02:00 is 01:30 the next day in UTC.
    let input = vec![
        raw("2020-03-01T23:30:00-02:00", 4.0),
        raw("2020-03-02T00:00:00Z", 6.0),
        raw("2020-03-03T00:00:00Z", 1.0),
    ];
    let s = aggregate(&input).unwrap();
    assert_eq!(s.dates(), vec![day(2)]);
    assert_eq!(s.values(), vec![10.0]);
}

#[test]
fn empty_or_single_day_input_is_an_error() {
    assert_eq!(aggregate(&[]), Err(EmptyInputError));
    let one_day = vec![raw("2020-03-01T00:00:00Z", 1.0), raw("2020-03-01T08:00:00Z", 2.0)];
    assert_eq!(aggregate(&one_day), Err(EmptyInputError));
}

#[test]
fn aggregating_daily_data_only_drops_the_final_day() {
    let values = [1.0, 4.0, 4.0, 9.0, 12.0, 20.0];
    let input: Vec<RawRecord> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| raw(&format!("2020-03-{:02}T00:00:00Z", i + 1), v))
        .collect();
    let once = aggregate(&input).unwrap();
    assert_eq!(once.values(), values[..5].to_vec());

    // Feeding the output back with the same trailing partial day yields it unchanged.
    let mut again: Vec<RawRecord> = once
        .records()
        .iter()
        .map(|r| raw(&format!("{}T00:00:00Z", r.date), r.value))
        .collect();
    again.push(raw("2020-03-06T00:00:00Z", 20.0));
    assert_eq!(aggregate(&again).unwrap(), once);
}
