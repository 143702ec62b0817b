// File: crates/casecurve-core/tests/export.rs
// Purpose: Growth CSV export across every registered location.

mod common;

use casecurve_core::export::rows_for;
use casecurve_core::{growth_rows, write_growth_csv, CumulativeSet, DuplicatePolicy, Error};
use common::{day, registry, two_locations};

#[test]
fn rows_carry_values_and_percent_growth() {
    let set = CumulativeSet::fetch(&two_locations(), "GERMANY", DuplicatePolicy::Sum).unwrap();
    let rows = rows_for("GERMANY", &set);
    assert_eq!(rows.len(), 5);

    let r = &rows[2];
    assert_eq!(r.date, day(3));
    assert_eq!(r.confirmed, 150.0);
    assert_eq!(r.confirmed_growth_pct, 50.0);
    assert_eq!(r.recovered, Some(10.0));
    // 0 -> 10 recovered is a division by zero and reads as 0.
    assert_eq!(r.recovered_growth_pct, Some(0.0));
    assert_eq!(r.deaths_growth_pct, Some(0.0));
    assert_eq!(rows[4].deaths_growth_pct, Some(150.0));
}

#[test]
fn export_skips_failing_locations_and_writes_header() {
    let (rows, failed) = growth_rows(&two_locations(), &registry(), DuplicatePolicy::Sum);
    // GERMANY and POLAND have five corrected days each; SPAIN has no data.
    assert_eq!(rows.len(), 10);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "SPAIN");
    assert!(matches!(failed[0].1, Error::EmptyInput { .. }));

    let mut buf = Vec::new();
    write_growth_csv(&mut buf, &rows).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Country,Confirmed,Daily_growth_confirmed_pct,Recovered,Daily_growth_recovered_pct,Deaths,Daily_growth_deaths_pct")
    );
    assert!(lines.next().unwrap().starts_with("2020-03-01,GERMANY,"));
    assert_eq!(text.lines().count(), 11);
}
