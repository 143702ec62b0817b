// File: crates/casecurve-core/src/export.rs
// Summary: CSV export of every registered location's corrected series with daily growth in percent.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::DuplicatePolicy;
use crate::cache::CumulativeSet;
use crate::delta::delta;
use crate::error::{Error, Result};
use crate::registry::LocationRegistry;
use crate::series::Series;
use crate::source::DataSource;
use crate::types::ChangeKind;

/// One (location, day) row. Recovered/deaths columns are empty when that
/// series has no record for the confirmed date.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrowthRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Confirmed")]
    pub confirmed: f64,
    #[serde(rename = "Daily_growth_confirmed_pct")]
    pub confirmed_growth_pct: f64,
    #[serde(rename = "Recovered")]
    pub recovered: Option<f64>,
    #[serde(rename = "Daily_growth_recovered_pct")]
    pub recovered_growth_pct: Option<f64>,
    #[serde(rename = "Deaths")]
    pub deaths: Option<f64>,
    #[serde(rename = "Daily_growth_deaths_pct")]
    pub deaths_growth_pct: Option<f64>,
}

/// Rows for one location, keyed on the confirmed series' dates.
pub fn rows_for(location: &str, set: &CumulativeSet) -> Vec<GrowthRow> {
    let confirmed_growth = delta(&set.confirmed, ChangeKind::PercentDelta);
    let recovered = with_growth(&set.recovered);
    let deaths = with_growth(&set.deaths);

    set.confirmed
        .records()
        .iter()
        .zip(confirmed_growth)
        .map(|(r, growth)| {
            let rec = recovered.get(&r.date).copied();
            let dea = deaths.get(&r.date).copied();
            GrowthRow {
                date: r.date,
                country: location.to_string(),
                confirmed: r.value,
                confirmed_growth_pct: growth,
                recovered: rec.map(|(v, _)| v),
                recovered_growth_pct: rec.map(|(_, g)| g),
                deaths: dea.map(|(v, _)| v),
                deaths_growth_pct: dea.map(|(_, g)| g),
            }
        })
        .collect()
}

fn with_growth(series: &Series) -> HashMap<NaiveDate, (f64, f64)> {
    let growth = delta(series, ChangeKind::PercentDelta);
    series.records().iter().zip(growth).map(|(r, g)| (r.date, (r.value, g))).collect()
}

/// Fetch, aggregate and correct every registered location and build its rows.
///
/// Locations that fail are skipped and returned alongside the rows.
pub fn growth_rows(
    source: &dyn DataSource,
    registry: &LocationRegistry,
    policy: DuplicatePolicy,
) -> (Vec<GrowthRow>, Vec<(String, Error)>) {
    let mut rows = Vec::new();
    let mut failed = Vec::new();
    for location in registry.names() {
        match CumulativeSet::fetch(source, location, policy) {
            Ok(set) => rows.extend(rows_for(location, &set)),
            Err(e) => {
                warn!(location, error = %e, "skipping location in export");
                failed.push((location.to_string(), e));
            }
        }
    }
    info!(rows = rows.len(), skipped = failed.len(), "growth export built");
    (rows, failed)
}

/// Write rows as CSV with a header line.
pub fn write_growth_csv<W: Write>(writer: W, rows: &[GrowthRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
