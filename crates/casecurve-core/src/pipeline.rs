// File: crates/casecurve-core/src/pipeline.rs
// Summary: Computation entry point: one render request -> cached fetch, window, delta, transform -> view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::align::{derive_active, Window};
use crate::cache::{CumulativeSet, LocationCache};
use crate::config::Config;
use crate::delta::delta;
use crate::error::{Error, Result};
use crate::registry::{normalize_location_key, LocationRegistry};
use crate::scale::transform;
use crate::source::{DataSource, JsonDirSource};
use crate::types::{ChangeKind, LocationSlot, MetricKind, TransformKind};
use crate::view::{self, AxisSpec, ComparisonView, LocationPanel, MetricTrace};

/// User selections for one render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Primary location; `None` means the configured default.
    pub location: Option<String>,
    /// Optional second location to compare with.
    pub comparison: Option<String>,
    /// Date picker value; ignored when `threshold` is set.
    pub start_date: Option<NaiveDate>,
    /// Start each location at the first day its confirmed count reached this.
    pub threshold: Option<f64>,
    pub transform: TransformKind,
    pub change: ChangeKind,
}

impl RenderRequest {
    pub fn window(&self, earliest: NaiveDate) -> Window {
        let start = if self.threshold.is_some() { earliest } else { self.start_date.unwrap_or(earliest) };
        Window::from_inputs(Some(start), self.threshold)
    }
}

/// One dashboard session: data source, registry, and the per-slot cache.
pub struct Dashboard {
    source: Box<dyn DataSource>,
    registry: LocationRegistry,
    cache: LocationCache,
    config: Config,
}

impl Dashboard {
    pub fn new(source: Box<dyn DataSource>, registry: LocationRegistry, config: Config) -> Self {
        let cache = LocationCache::new(normalize_location_key(&config.default_location), config.duplicate_policy);
        Self { source, registry, cache, config }
    }

    /// Session backed by the saved API replies under `config.data_dir`.
    pub fn from_config(config: Config) -> Result<Self> {
        let registry = LocationRegistry::load(&config.registry_path)?;
        let source = JsonDirSource::new(config.data_dir.clone());
        info!(locations = registry.len(), data_dir = %config.data_dir.display(), "dashboard ready");
        Ok(Self::new(Box::new(source), registry, config))
    }

    pub fn source(&self) -> &dyn DataSource { self.source.as_ref() }
    pub fn registry(&self) -> &LocationRegistry { &self.registry }
    pub fn cache(&self) -> &LocationCache { &self.cache }
    pub fn config(&self) -> &Config { &self.config }

    /// Run the full pipeline for the primary and (optional) comparison slot.
    pub fn render(&mut self, req: &RenderRequest) -> Result<ComparisonView> {
        self.render_slots(req).map_err(|f| f.error)
    }

    fn render_slots(&mut self, req: &RenderRequest) -> std::result::Result<ComparisonView, SlotFailure> {
        let fail = |slot: LocationSlot| move |error: Error| SlotFailure { slot, error };

        let wanted = req.location.as_deref().unwrap_or(self.config.default_location.as_str());
        let primary = self.registry.resolve(wanted).map_err(fail(LocationSlot::Primary))?.0.to_string();
        let comparison = req
            .comparison
            .as_deref()
            .map(|name| self.registry.resolve(name).map(|(key, _)| key.to_string()))
            .transpose()
            .map_err(fail(LocationSlot::Comparison))?;

        let window = req.window(self.config.earliest_date);
        let mut panels = Vec::with_capacity(2);
        let set = self
            .cache
            .get_or_fetch(self.source.as_ref(), LocationSlot::Primary, Some(&primary))
            .map_err(fail(LocationSlot::Primary))?;
        panels.push(build_panel(LocationSlot::Primary, &primary, set, window, req.transform, req.change));
        if let Some(name) = comparison.as_deref() {
            let set = self
                .cache
                .get_or_fetch(self.source.as_ref(), LocationSlot::Comparison, Some(name))
                .map_err(fail(LocationSlot::Comparison))?;
            panels.push(build_panel(LocationSlot::Comparison, name, set, window, req.transform, req.change));
        }

        Ok(ComparisonView {
            title: view::title(&primary, comparison.as_deref()),
            x_axis: AxisSpec::days(req.threshold),
            y_axis: AxisSpec::cases(req.transform),
            y2_axis: AxisSpec::change(req.change),
            panels,
        })
    }

    /// Render without ever failing. An unknown or empty selection is dropped
    /// (the primary falls back to the default location, the comparison is
    /// omitted) and the render retried; anything else yields an empty view.
    pub fn render_or_fallback(&mut self, req: &RenderRequest) -> ComparisonView {
        let mut req = req.clone();
        loop {
            let failure = match self.render_slots(&req) {
                Ok(v) => return v,
                Err(f) => f,
            };
            let selection = match failure.slot {
                LocationSlot::Primary => &mut req.location,
                LocationSlot::Comparison => &mut req.comparison,
            };
            if !failure.error.is_recoverable() || selection.is_none() {
                error!(slot = ?failure.slot, error = %failure.error, "render failed");
                break;
            }
            warn!(slot = ?failure.slot, location = ?selection, error = %failure.error, "dropping selection and retrying");
            *selection = None;
        }
        let title = view::title(&normalize_location_key(&self.config.default_location), None);
        ComparisonView::empty(title, req.transform, req.change)
    }
}

/// Which slot a render failed on.
struct SlotFailure {
    slot: LocationSlot,
    error: Error,
}

/// Window, delta and transform all four metrics of one location.
///
/// Deltas use the windowed values before the transform; the transform reads
/// the full confirmed series so percent-of-confirmed can join on dates.
pub fn build_panel(
    slot: LocationSlot,
    location: &str,
    set: &CumulativeSet,
    window: Window,
    kind: TransformKind,
    change: ChangeKind,
) -> LocationPanel {
    let active = derive_active(&set.confirmed, &set.recovered, &set.deaths);
    let start = window.start_for(&set.confirmed);

    let traces = MetricKind::ALL
        .iter()
        .map(|&metric| {
            let full = set.get(metric).unwrap_or(&active);
            let windowed = window.apply(full, start);
            let deltas = delta(&windowed, change);
            let shown = transform(&windowed, kind, &set.confirmed);
            MetricTrace::new(metric, location, change, shown, deltas)
        })
        .collect();

    LocationPanel { slot, location: location.to_string(), window_start: start, traces }
}
