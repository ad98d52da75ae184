//! Visible date window and pixel scale

use super::record::{ProjectRecord, days_between, shift_days};
use super::view::Zoom;
use crate::config::EngineConfig;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Output of [`compute_range`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeLayout {
    pub zoom: Zoom,
    /// Earliest project date, or the default window start when no project has dates
    pub data_min: NaiveDate,
    /// Latest project date, or the default window end when no project has dates
    pub data_max: NaiveDate,
    /// Zoom-aligned start; every pixel offset is measured from here
    pub start_anchor: NaiveDate,
    /// Padded end date (not aligned)
    pub end_anchor: NaiveDate,
    pub pixels_per_day: f64,
    pub total_days: i64,
    pub range_width: f64,
}

impl RangeLayout {
    /// Pixel offset of `date` relative to the start anchor
    pub fn x_of(&self, date: NaiveDate) -> f64 {
        days_between(self.start_anchor, date) as f64 * self.pixels_per_day
    }

    /// Whether `date` falls inside `[start_anchor, end_anchor]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_anchor <= date && date <= self.end_anchor
    }
}

/// First day of the period containing `date` for the given zoom
///
/// Weeks start on Monday.
pub fn align_to_zoom(date: NaiveDate, zoom: Zoom) -> NaiveDate {
    match zoom {
        Zoom::Week => {
            let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
            date.checked_sub_days(back).unwrap_or(date)
        }
        Zoom::Month => date.with_day(1).unwrap_or(date),
        Zoom::Quarter => {
            let quarter_month = (date.month0() / 3) * 3 + 1;
            NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(date)
        }
    }
}

/// Compute the visible date window for the filtered projects
///
/// # Arguments
/// * `projects` - Filtered records
/// * `zoom` - Active zoom level
/// * `today` - Reference day used for the default window
/// * `config` - Padding, default window and pixel scale
///
/// # Description
/// Observed min/max dates are padded by `padding_days` on each side. With no
/// valid dates at all the window defaults to `[today - lookback, today + lookahead]`
/// without padding. The start is then aligned to the zoom boundary; the end is
/// left as is. Shifted dates saturate at the supported year window, so extreme
/// config values widen the range instead of overflowing.
pub fn compute_range(
    projects: &[&ProjectRecord],
    zoom: Zoom,
    today: NaiveDate,
    config: &EngineConfig,
) -> RangeLayout {
    let dates = projects
        .iter()
        .flat_map(|p| [p.start(), p.end()])
        .flatten();

    let (mut min, mut max): (Option<NaiveDate>, Option<NaiveDate>) = (None, None);
    for date in dates {
        min = Some(min.map_or(date, |m| m.min(date)));
        max = Some(max.map_or(date, |m| m.max(date)));
    }

    let (data_min, data_max, padded_min, padded_max) = match (min, max) {
        (Some(min), Some(max)) => {
            let padding = config.padding_days;
            let padded_min = shift_days(min, padding.saturating_neg());
            (min, max, padded_min, shift_days(max, padding))
        }
        _ => {
            let min = shift_days(today, config.default_lookback_days.saturating_neg());
            let max = shift_days(today, config.default_lookahead_days);
            debug!(%min, %max, "no project dates, using default window");
            (min, max, min, max)
        }
    };

    let start_anchor = align_to_zoom(padded_min, zoom);
    let end_anchor = padded_max;
    let pixels_per_day = config.pixels_per_day.for_zoom(zoom);
    let total_days = (days_between(start_anchor, end_anchor) + 1).max(1);

    RangeLayout {
        zoom,
        data_min,
        data_max,
        start_anchor,
        end_anchor,
        pixels_per_day,
        total_days,
        range_width: total_days as f64 * pixels_per_day,
    }
}
