// File: crates/casecurve-core/src/cache.rs
// Summary: Per-slot cache of corrected cumulative series; refetches only when the slot's location changes.

use tracing::{debug, info};

use crate::aggregate::{aggregate_with, DuplicatePolicy};
use crate::correct::correct;
use crate::error::{Error, Result};
use crate::series::Series;
use crate::source::DataSource;
use crate::types::{LocationSlot, MetricKind, DEFAULT_LOCATION};

/// Aggregated and corrected cumulative series for one location.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeSet {
    pub confirmed: Series,
    pub recovered: Series,
    pub deaths: Series,
}

impl CumulativeSet {
    pub fn get(&self, metric: MetricKind) -> Option<&Series> {
        match metric {
            MetricKind::Confirmed => Some(&self.confirmed),
            MetricKind::Recovered => Some(&self.recovered),
            MetricKind::Deaths => Some(&self.deaths),
            MetricKind::Active => None,
        }
    }

    /// Run fetch -> aggregate -> correct for every cumulative metric of `location`.
    pub fn fetch(source: &dyn DataSource, location: &str, policy: DuplicatePolicy) -> Result<Self> {
        let load = |metric: MetricKind| -> Result<Series> {
            let raw = source.fetch(location, metric)?;
            let daily = aggregate_with(&raw, policy)
                .map_err(|_| Error::EmptyInput { location: location.to_string(), metric })?;
            debug!(location, %metric, raw = raw.len(), days = daily.len(), "aggregated");
            Ok(correct(&daily))
        };
        Ok(Self {
            confirmed: load(MetricKind::Confirmed)?,
            recovered: load(MetricKind::Recovered)?,
            deaths: load(MetricKind::Deaths)?,
        })
    }
}

#[derive(Clone, Debug)]
struct Cached {
    location: String,
    set: CumulativeSet,
}

/// Cache entry for one slot: the last location fetched and its series.
#[derive(Clone, Debug, Default)]
pub struct SlotEntry {
    cached: Option<Cached>,
}

impl SlotEntry {
    pub fn location(&self) -> Option<&str> { self.cached.as_ref().map(|c| c.location.as_str()) }
    pub fn set(&self) -> Option<&CumulativeSet> { self.cached.as_ref().map(|c| &c.set) }
}

/// Explicit, per-session cache of the two comparison slots.
///
/// There is no expiry: an entry is replaced only when its slot is asked for a
/// different location. `&mut self` on lookups keeps the hit check and the
/// update atomic for a slot.
#[derive(Clone, Debug)]
pub struct LocationCache {
    default_location: String,
    policy: DuplicatePolicy,
    primary: SlotEntry,
    comparison: SlotEntry,
}

impl Default for LocationCache {
    fn default() -> Self { Self::new(DEFAULT_LOCATION, DuplicatePolicy::Sum) }
}

impl LocationCache {
    pub fn new(default_location: impl Into<String>, policy: DuplicatePolicy) -> Self {
        Self {
            default_location: default_location.into(),
            policy,
            primary: SlotEntry::default(),
            comparison: SlotEntry::default(),
        }
    }

    pub fn default_location(&self) -> &str { &self.default_location }

    pub fn entry(&self, slot: LocationSlot) -> &SlotEntry {
        match slot {
            LocationSlot::Primary => &self.primary,
            LocationSlot::Comparison => &self.comparison,
        }
    }

    fn entry_mut(&mut self, slot: LocationSlot) -> &mut SlotEntry {
        match slot {
            LocationSlot::Primary => &mut self.primary,
            LocationSlot::Comparison => &mut self.comparison,
        }
    }

    /// Cached set for `slot` if it already holds `location` (`None` = default),
    /// otherwise fetch, store and return a fresh one. A failed fetch leaves the
    /// previous entry untouched.
    pub fn get_or_fetch(
        &mut self,
        source: &dyn DataSource,
        slot: LocationSlot,
        location: Option<&str>,
    ) -> Result<&CumulativeSet> {
        let wanted = location.unwrap_or(self.default_location.as_str()).to_string();
        let policy = self.policy;
        let entry = self.entry_mut(slot);

        let cached = match entry.cached.take() {
            Some(c) if c.location == wanted => {
                debug!(?slot, location = %wanted, "cache hit");
                c
            }
            previous => {
                info!(?slot, location = %wanted, source = source.id(), "fetching series");
                match CumulativeSet::fetch(source, &wanted, policy) {
                    Ok(set) => Cached { location: wanted, set },
                    Err(e) => {
                        entry.cached = previous;
                        return Err(e);
                    }
                }
            }
        };
        Ok(&entry.cached.insert(cached).set)
    }

    /// Forget a slot (e.g. when the comparison location is cleared).
    pub fn clear(&mut self, slot: LocationSlot) {
        self.entry_mut(slot).cached = None;
    }
}
