// File: crates/casecurve-core/src/series.rs
// Summary: Daily series model (date-indexed values) with invariant-checked constructors.
// Notes:
// - Dates are always kept, even when the series is relabelled as a day offset,
//   so later stages can still join on calendar dates.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};

/// One observation for one calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub value: f64,
}

impl DailyRecord {
    pub const fn new(date: NaiveDate, value: f64) -> Self { Self { date, value } }
}

/// How the x axis of a series is labelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SeriesIndex {
    #[default]
    Calendar,
    /// Day 0 is the first record ("days since N cases").
    DayOffset,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Series {
    records: Vec<DailyRecord>,
    index: SeriesIndex,
}

impl Series {
    pub fn new() -> Self { Self::default() }

    /// Build a series, enforcing strictly increasing dates.
    pub fn try_new(records: Vec<DailyRecord>) -> Result<Self> {
        if let Some(w) = records.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(Error::InvalidSeries(format!(
                "dates must be strictly increasing ({} then {})",
                w[0].date, w[1].date
            )));
        }
        Ok(Self { records, index: SeriesIndex::Calendar })
    }

    /// Build a series of consecutive days starting at `start`.
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Self {
        let records = start
            .iter_days()
            .zip(values.iter())
            .map(|(date, &value)| DailyRecord { date, value })
            .collect();
        Self { records, index: SeriesIndex::Calendar }
    }

    /// Caller guarantees ordering; used by stages that only filter or map values.
    pub(crate) fn from_sorted(records: Vec<DailyRecord>, index: SeriesIndex) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        Self { records, index }
    }

    pub fn with_index(mut self, index: SeriesIndex) -> Self {
        self.index = index;
        self
    }

    /// Same dates and index, values replaced by `f(record)`.
    pub fn map_values<F: FnMut(&DailyRecord) -> f64>(&self, mut f: F) -> Self {
        let records = self.records.iter().map(|r| DailyRecord { date: r.date, value: f(r) }).collect();
        Self { records, index: self.index }
    }

    /// Same dates and index with `values` swapped in position by position.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.records.len());
        let records = self.records.iter().zip(values).map(|(r, value)| DailyRecord { date: r.date, value }).collect();
        Self { records, index: self.index }
    }

    pub fn records(&self) -> &[DailyRecord] { &self.records }
    pub fn index(&self) -> SeriesIndex { self.index }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn first(&self) -> Option<&DailyRecord> { self.records.first() }
    pub fn last(&self) -> Option<&DailyRecord> { self.records.last() }

    pub fn values(&self) -> Vec<f64> { self.records.iter().map(|r| r.value).collect() }
    pub fn dates(&self) -> Vec<NaiveDate> { self.records.iter().map(|r| r.date).collect() }

    /// Value on `date`, if present (binary search; dates are sorted).
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.records
            .binary_search_by(|r| r.date.cmp(&date))
            .ok()
            .map(|i| self.records[i].value)
    }

    /// Points for the rendering layer: x is days since the Unix epoch for calendar
    /// series, or the position in the series for day-offset series.
    pub fn to_xy(&self) -> Vec<(f64, f64)> {
        match self.index {
            SeriesIndex::Calendar => self
                .records
                .iter()
                .map(|r| (epoch_days(r.date) as f64, r.value))
                .collect(),
            SeriesIndex::DayOffset => self
                .records
                .iter()
                .enumerate()
                .map(|(i, r)| (i as f64, r.value))
                .collect(),
        }
    }
}

fn epoch_days(date: NaiveDate) -> i64 {
    (date - NaiveDate::default()).num_days()
}
