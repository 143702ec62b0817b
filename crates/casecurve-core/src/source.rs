// File: crates/casecurve-core/src/source.rs
// Summary: Upstream data source contract plus in-memory and JSON-dump implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::aggregate::RawRecord;
use crate::error::{Error, Result};
use crate::types::MetricKind;

/// Narrow contract the pipeline needs from the upstream API client.
///
/// An unknown location or an empty reply is `Ok(vec![])`; aggregation turns it
/// into [`Error::EmptyInput`]. Transport and decoding failures are
/// [`Error::UpstreamFetch`]. Implementations own any retry policy.
pub trait DataSource {
    fn id(&self) -> &'static str;
    fn fetch(&self, location: &str, metric: MetricKind) -> Result<Vec<RawRecord>>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn id(&self) -> &'static str { (**self).id() }
    fn fetch(&self, location: &str, metric: MetricKind) -> Result<Vec<RawRecord>> { (**self).fetch(location, metric) }
}

/// Records held in memory, keyed by (location, metric).
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    data: HashMap<(String, MetricKind), Vec<RawRecord>>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, location: impl Into<String>, metric: MetricKind, records: Vec<RawRecord>) {
        self.data.insert((location.into(), metric), records);
    }

    pub fn with(mut self, location: impl Into<String>, metric: MetricKind, records: Vec<RawRecord>) -> Self {
        self.insert(location, metric, records);
        self
    }
}

impl DataSource for MemorySource {
    fn id(&self) -> &'static str { "memory" }

    fn fetch(&self, location: &str, metric: MetricKind) -> Result<Vec<RawRecord>> {
        Ok(self.data.get(&(location.to_string(), metric)).cloned().unwrap_or_default())
    }
}

/// Reads saved API replies laid out as `<root>/<LOCATION>/<status>.json`, each a
/// JSON array of `{"Date": "<rfc3339>", "Cases": <n>, ...}` objects.
#[derive(Clone, Debug)]
pub struct JsonDirSource {
    root: PathBuf,
}

#[derive(Deserialize)]
struct ApiRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Cases")]
    cases: f64,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn path_for(&self, location: &str, metric: MetricKind) -> PathBuf {
        self.root.join(location).join(format!("{}.json", metric.status()))
    }
}

impl DataSource for JsonDirSource {
    fn id(&self) -> &'static str { "json-dir" }

    fn fetch(&self, location: &str, metric: MetricKind) -> Result<Vec<RawRecord>> {
        let upstream = |reason: String| Error::UpstreamFetch { location: location.to_string(), metric, reason };

        let path = self.path_for(location, metric);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no dump for location/metric");
                return Ok(Vec::new());
            }
            Err(e) => return Err(upstream(format!("{}: {e}", path.display()))),
        };

        let rows: Vec<ApiRecord> = serde_json::from_str(&text)
            .map_err(|e| upstream(format!("{}: {e}", path.display())))?;
        rows.into_iter()
            .map(|row| {
                RawRecord::parse(&row.date, row.cases)
                    .map_err(|e| upstream(format!("bad date '{}': {e}", row.date)))
            })
            .collect()
    }
}
