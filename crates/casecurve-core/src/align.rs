// File: crates/casecurve-core/src/align.rs
// Summary: Derived Active series, date/threshold windows and day-offset reindexing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::series::{DailyRecord, Series, SeriesIndex};

/// `Active = Confirmed - Deaths - Recovered` on the dates all three share.
pub fn derive_active(confirmed: &Series, recovered: &Series, deaths: &Series) -> Series {
    let records = confirmed
        .records()
        .iter()
        .filter_map(|c| {
            let r = recovered.get(c.date)?;
            let d = deaths.get(c.date)?;
            Some(DailyRecord { date: c.date, value: c.value - d - r })
        })
        .collect();
    Series::from_sorted(records, confirmed.index())
}

/// Suffix of `series` starting at `start` (inclusive).
pub fn window_by_date(series: &Series, start: NaiveDate) -> Series {
    let from = series.records().partition_point(|r| r.date < start);
    Series::from_sorted(series.records()[from..].to_vec(), series.index())
}

/// First date on which `confirmed` reached `threshold`.
///
/// Falls back to the last date when the threshold is never reached, so the
/// window collapses to a single day instead of failing. `None` only for an
/// empty series.
pub fn window_by_threshold(confirmed: &Series, threshold: f64) -> Option<NaiveDate> {
    match confirmed.records().iter().find(|r| r.value >= threshold) {
        Some(r) => Some(r.date),
        None => {
            let last = confirmed.last()?.date;
            warn!(threshold, %last, "threshold never reached; starting window at last date");
            Some(last)
        }
    }
}

/// Relabel a series so day 0 is its first record.
pub fn to_day_offset(series: &Series) -> Series {
    series.clone().with_index(SeriesIndex::DayOffset)
}

/// Window selection for one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    #[default]
    All,
    FromDate(NaiveDate),
    /// Start at the first day confirmed cases reached the given count.
    /// Overrides any date selection and switches to a day-offset axis.
    FromThreshold(f64),
}

impl Window {
    /// Build from the two UI inputs; a threshold wins over a date.
    pub fn from_inputs(start_date: Option<NaiveDate>, threshold: Option<f64>) -> Self {
        match (threshold, start_date) {
            (Some(n), _) => Window::FromThreshold(n),
            (None, Some(d)) => Window::FromDate(d),
            (None, None) => Window::All,
        }
    }

    /// Start date for one location, resolved against its own confirmed series.
    pub fn start_for(&self, confirmed: &Series) -> Option<NaiveDate> {
        match *self {
            Window::All => confirmed.first().map(|r| r.date),
            Window::FromDate(d) => Some(d),
            Window::FromThreshold(n) => window_by_threshold(confirmed, n),
        }
    }

    pub fn is_relative(&self) -> bool { matches!(self, Window::FromThreshold(_)) }

    /// Cut `series` at `start` and relabel it when the window is relative.
    pub fn apply(&self, series: &Series, start: Option<NaiveDate>) -> Series {
        let cut = match start {
            Some(d) => window_by_date(series, d),
            None => series.clone(),
        };
        if self.is_relative() { to_day_offset(&cut) } else { cut }
    }
}
