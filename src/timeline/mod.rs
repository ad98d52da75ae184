//! Timeline domain models and layout
//!
//! This module contains the data structures and the layout pipeline.
//! It is split into submodules for better organization:
//! - `record`: Project records and lenient date parsing
//! - `view`: Zoom, presets, filters and host view state
//! - `range`: Date window and pixel scale
//! - `ticks`: Time-axis marks
//! - `rows`: Positioned bars
//! - `window`: Row virtualization
//! - `model`: Full model assembly

mod model;
mod range;
mod record;
mod rows;
mod ticks;
mod view;
mod window;

// Re-export all public types
pub use model::{TimelineModel, TimelineRange, compute_timeline_model, compute_timeline_model_at};
pub use range::{RangeLayout, align_to_zoom, compute_range};
pub use record::{ProjectRecord, days_between, local_date_today, parse_date};
pub use rows::{Bar, ColorToken, RowModel, build_row, build_rows};
pub use ticks::{TimeTick, base_day_interval, compute_ticks, effective_day_interval};
pub use view::{Preset, TimelineFilters, TimelineViewState, Zoom};
pub use window::{TimelineViewport, VisibleWindow, compute_visible_window};
