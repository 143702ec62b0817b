// File: crates/casecurve-core/src/aggregate.rs
// Summary: Daily aggregation of raw upstream records (one row per UTC calendar day).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::series::{DailyRecord, Series, SeriesIndex};

/// One observation as reported by the upstream source.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl RawRecord {
    pub const fn new(timestamp: DateTime<Utc>, value: f64) -> Self { Self { timestamp, value } }

    /// Parse an RFC 3339 timestamp in any offset; stored normalized to UTC.
    pub fn parse(timestamp: &str, value: f64) -> Result<Self, chrono::ParseError> {
        let ts = DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc);
        Ok(Self { timestamp: ts, value })
    }

    pub fn day(&self) -> NaiveDate { self.timestamp.date_naive() }
}

/// How same-day duplicates are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Sum all records of the day (daily resample-and-sum).
    #[default]
    Sum,
    /// Keep the largest record of the day.
    Max,
}

/// Aggregation produced no rows. Carries no location context; the cache wraps it
/// into [`crate::Error::EmptyInput`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no records left after daily aggregation")]
pub struct EmptyInputError;

/// Aggregate with the default [`DuplicatePolicy::Sum`].
pub fn aggregate(raw: &[RawRecord]) -> Result<Series, EmptyInputError> {
    aggregate_with(raw, DuplicatePolicy::Sum)
}

/// Collapse `raw` (any order) into one record per UTC calendar day.
///
/// Days inside the observed span with no records are emitted as 0. The most
/// recent day is always dropped because upstream reports it before it is final.
pub fn aggregate_with(raw: &[RawRecord], policy: DuplicatePolicy) -> Result<Series, EmptyInputError> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for rec in raw {
        by_day
            .entry(rec.day())
            .and_modify(|acc| match policy {
                DuplicatePolicy::Sum => *acc += rec.value,
                DuplicatePolicy::Max => *acc = acc.max(rec.value),
            })
            .or_insert(rec.value);
    }

    let (&first, _) = by_day.first_key_value().ok_or(EmptyInputError)?;
    let (&last, _) = by_day.last_key_value().ok_or(EmptyInputError)?;

    // `last` itself is excluded
    let records: Vec<DailyRecord> = first
        .iter_days()
        .take_while(|d| *d < last)
        .map(|date| DailyRecord { date, value: by_day.get(&date).copied().unwrap_or(0.0) })
        .collect();

    if records.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(Series::from_sorted(records, SeriesIndex::Calendar))
}
