//! Timeline Engine Library
//!
//! This library turns a snapshot of AEC project records, a set of filters and a
//! zoom level into a renderable Gantt-style timeline model: bar positions, a
//! de-duplicated time axis and the subset of rows a scrolling viewport has to
//! materialize. It does no painting and no I/O of its own; a host renderer
//! consumes the model.
//!
//! # Architecture
//!
//! The pipeline runs strictly downward and is rebuilt from scratch on every
//! input change:
//! - **Filter**: `filter` module - id/manager/type/client/preset/search selection
//! - **Range & Zoom**: `timeline::compute_range` - padded, zoom-aligned window
//! - **Ticks**: `timeline::compute_ticks` - minor day marks plus period labels
//! - **Rows**: `timeline::build_rows` - bar offsets and color tokens
//! - **Window**: `timeline::compute_visible_window` - virtualized row range
//!
//! The only stateful piece is `scroll_sync`, which coalesces header scroll
//! writes to one per frame.
//!
//! # Example
//!
//! ```
//! use timeline_engine::{EngineConfig, ProjectRecord, TimelineEngine, TimelineFilters, Zoom};
//! use chrono::NaiveDate;
//!
//! let projects = vec![
//!     ProjectRecord::new("P-1", "Clinic fit-out")
//!         .with_dates(Some("2024-01-01"), Some("2024-01-10")),
//! ];
//! let engine = TimelineEngine::new(EngineConfig::default());
//! let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let filters = TimelineFilters::default().with_zoom(Zoom::Week);
//! let model = engine.compute_at(&projects, &filters, today);
//!
//! assert_eq!(model.rows.len(), 1);
//! assert_eq!(model.range_width, model.total_days as f64 * 24.0);
//! ```

pub mod cache;
pub mod config;
pub mod filter;
pub mod formatting;
pub mod scroll_sync;
pub mod storage;
pub mod timeline;
pub mod validation;

use chrono::NaiveDate;
use std::sync::{Arc, Mutex, PoisonError};

// Re-export commonly used types
pub use cache::ModelCache;
pub use config::EngineConfig;
pub use filter::filter_projects;
pub use scroll_sync::{Coalescer, FrameScheduler, HeaderScrollSync, ScrollTarget, SyncState};
pub use storage::Storage;
pub use timeline::{
    Preset, ProjectRecord, RowModel, TimeTick, TimelineFilters, TimelineModel, TimelineViewState,
    TimelineViewport, VisibleWindow, Zoom, build_rows, compute_range, compute_ticks,
    compute_timeline_model, compute_visible_window,
};

/// Timeline engine bound to one configuration
///
/// Holds the layout constants and a single-entry model cache, so a host can
/// call [`TimelineEngine::compute`] on every render and only pay for layout
/// when an input actually changed.
#[derive(Debug)]
pub struct TimelineEngine {
    config: EngineConfig,
    cache: Mutex<ModelCache>,
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl TimelineEngine {
    /// Create a new engine
    ///
    /// # Arguments
    /// * `config` - Layout and virtualization constants
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: Mutex::new(ModelCache::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute (or reuse) the model for today's local date
    pub fn compute(
        &self,
        projects: &[ProjectRecord],
        filters: &TimelineFilters,
    ) -> Arc<TimelineModel> {
        self.compute_at(projects, filters, timeline::local_date_today())
    }

    /// Compute (or reuse) the model for an explicit "today"
    pub fn compute_at(
        &self,
        projects: &[ProjectRecord],
        filters: &TimelineFilters,
        today: NaiveDate,
    ) -> Arc<TimelineModel> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get_or_compute(projects, filters, today, &self.config)
    }

    /// Rows to materialize for a scroll position, using the configured row
    /// height, overscan and threshold
    pub fn visible_window(
        &self,
        row_count: usize,
        scroll_top: f64,
        viewport_height: f64,
    ) -> VisibleWindow {
        compute_visible_window(
            row_count,
            self.config.row_height,
            scroll_top,
            viewport_height,
            self.config.overscan,
            self.config.virtualization_threshold,
        )
    }

    /// A viewport controller sized for `model`
    pub fn viewport(&self, model: &TimelineModel, viewport_height: f64) -> TimelineViewport {
        TimelineViewport::new(&self.config, model.rows.len(), viewport_height)
    }

    /// A tokio-driven header scroll synchronizer using the configured frame length
    pub fn header_sync(&self, apply: impl Fn(f64) + Send + Sync + 'static) -> FrameScheduler<f64> {
        FrameScheduler::new(self.config.frame_interval(), apply)
    }
}
