// File: crates/casecurve-core/tests/common/mod.rs
// Purpose: Shared fixtures: daily raw records, a two-location source and registry.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use casecurve_core::{DataSource, LocationInfo, LocationRegistry, MemorySource, MetricKind, RawRecord, Result};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

pub fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2020, 3, d).unwrap() }

/// One record per day from 2020-03-01. The last value is the partial day that
/// aggregation drops.
pub fn daily(values: &[f64]) -> Vec<RawRecord> {
    let t0 = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| RawRecord::new(t0 + Duration::days(i as i64), v))
        .collect()
}

pub fn two_locations() -> MemorySource {
    MemorySource::new()
        .with("POLAND", MetricKind::Confirmed, daily(&[10.0, 50.0, 120.0, 200.0, 300.0, 999.0]))
        .with("POLAND", MetricKind::Recovered, daily(&[0.0, 5.0, 10.0, 20.0, 40.0, 999.0]))
        .with("POLAND", MetricKind::Deaths, daily(&[0.0, 1.0, 2.0, 3.0, 4.0, 999.0]))
        .with("GERMANY", MetricKind::Confirmed, daily(&[0.0, 100.0, 150.0, 400.0, 500.0, 999.0]))
        .with("GERMANY", MetricKind::Recovered, daily(&[0.0, 0.0, 10.0, 20.0, 30.0, 999.0]))
        .with("GERMANY", MetricKind::Deaths, daily(&[0.0, 0.0, 1.0, 2.0, 5.0, 999.0]))
}

pub fn registry() -> LocationRegistry {
    let at = |lat, lon| LocationInfo { lat, lon, population: None };
    LocationRegistry::from_entries([
        ("POLAND", at(51.92, 19.15)),
        ("GERMANY", at(51.17, 10.45)),
        ("SPAIN", at(40.46, -3.75)),
    ])
}

/// Wraps a source and counts `fetch` calls.
pub struct Counting<S> {
    pub inner: S,
    pub calls: Rc<Cell<usize>>,
}

impl<S> Counting<S> {
    pub fn new(inner: S) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (Self { inner, calls: calls.clone() }, calls)
    }
}

impl<S: DataSource> DataSource for Counting<S> {
    fn id(&self) -> &'static str { "counting" }

    fn fetch(&self, location: &str, metric: MetricKind) -> Result<Vec<RawRecord>> {
        self.calls.set(self.calls.get() + 1);
        self.inner.fetch(location, metric)
    }
}
