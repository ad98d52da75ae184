use super::range::{RangeLayout, compute_range};
use super::record::{ProjectRecord, local_date_today};
use super::rows::{RowModel, build_rows};
use super::ticks::{TimeTick, compute_ticks};
use super::view::{TimelineFilters, Zoom};
use crate::config::EngineConfig;
use crate::filter::filter_projects;
use chrono::NaiveDate;
use serde::Serialize;

/// Date bounds of the rendered timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineRange {
    /// Zoom-aligned start anchor
    pub min_date: NaiveDate,
    /// Padded end anchor
    pub max_date: NaiveDate,
    pub zoom: Zoom,
}

/// Everything the renderer needs to paint the timeline
///
/// A model is rebuilt from scratch for every input change and never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineModel {
    pub rows: Vec<RowModel>,
    pub range: TimelineRange,
    pub ticks: Vec<TimeTick>,
    /// Offset of today's marker, when today is inside the range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_x: Option<f64>,
    pub range_width: f64,
    pub pixels_per_day: f64,
    pub total_days: i64,
}

impl TimelineModel {
    /// Assemble a model from an already computed range and rows
    pub fn assemble(
        layout: &RangeLayout,
        rows: Vec<RowModel>,
        ticks: Vec<TimeTick>,
        today: NaiveDate,
    ) -> Self {
        Self {
            rows,
            range: TimelineRange {
                min_date: layout.start_anchor,
                max_date: layout.end_anchor,
                zoom: layout.zoom,
            },
            ticks,
            today_x: layout.contains(today).then(|| layout.x_of(today)),
            range_width: layout.range_width,
            pixels_per_day: layout.pixels_per_day,
            total_days: layout.total_days,
        }
    }

    /// Find a row by project id
    pub fn row(&self, id: &str) -> Option<&RowModel> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Compute the timeline model using today's local date and default config
pub fn compute_timeline_model(
    projects: &[ProjectRecord],
    filters: &TimelineFilters,
) -> TimelineModel {
    compute_timeline_model_at(projects, filters, local_date_today(), &EngineConfig::default())
}

/// Compute the timeline model for an explicit "today"
///
/// # Arguments
/// * `projects` - Snapshot of project records
/// * `filters` - Active filters, including preset and zoom
/// * `today` - Reference day for presets, the default window and the today marker
/// * `config` - Layout constants
///
/// # Description
/// Runs the full pipeline: filter, range, ticks, rows. The result depends only
/// on the arguments.
pub fn compute_timeline_model_at(
    projects: &[ProjectRecord],
    filters: &TimelineFilters,
    today: NaiveDate,
    config: &EngineConfig,
) -> TimelineModel {
    let filtered = filter_projects(projects, filters, today);
    let layout = compute_range(&filtered, filters.zoom, today, config);
    let ticks = compute_ticks(layout.start_anchor, layout.end_anchor, filters.zoom, config);
    let rows = build_rows(&filtered, layout.start_anchor, layout.pixels_per_day, config);
    TimelineModel::assemble(&layout, rows, ticks, today)
}
