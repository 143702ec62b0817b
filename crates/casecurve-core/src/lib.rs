// File: crates/casecurve-core/src/lib.rs
// Summary: Core library entry point; exports the case-count pipeline (aggregate, correct, align, scale, delta, cache).

pub mod types;
pub mod error;
pub mod series;
pub mod aggregate;
pub mod correct;
pub mod align;
pub mod scale;
pub mod delta;
pub mod source;
pub mod registry;
pub mod cache;
pub mod config;
pub mod view;
pub mod pipeline;
pub mod export;

pub use types::{ChangeKind, LocationSlot, MetricKind, TransformKind};
pub use error::{Error, Result};
pub use series::{DailyRecord, Series, SeriesIndex};
pub use aggregate::{aggregate, aggregate_with, DuplicatePolicy, EmptyInputError, RawRecord};
pub use correct::correct;
pub use align::{derive_active, to_day_offset, window_by_date, window_by_threshold, Window};
pub use scale::transform;
pub use delta::delta;
pub use source::{DataSource, JsonDirSource, MemorySource};
pub use registry::{normalize_location_key, LocationInfo, LocationRegistry};
pub use cache::{CumulativeSet, LocationCache, SlotEntry};
pub use config::Config;
pub use view::{AxisSpec, ComparisonView, LocationPanel, MetricTrace, ScaleKind};
pub use pipeline::{Dashboard, RenderRequest};
pub use export::{growth_rows, write_growth_csv, GrowthRow};
