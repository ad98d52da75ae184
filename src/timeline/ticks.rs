//! Time-axis tick generation
//!
//! Ticks are collected in a map keyed by calendar day, so the minor (day) pass
//! and the major (period) pass can never produce two marks for the same day.
//! A major tick that lands on an existing minor tick upgrades it in place.

use super::record::days_between;
use super::view::Zoom;
use crate::config::EngineConfig;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::iter::successors;
use tracing::debug;

/// A mark on the time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeTick {
    pub date: NaiveDate,
    /// Pixel offset from the start anchor
    pub x_offset: f64,
    /// Period label (`"Jan 8"` in week zoom, `"Jan"` otherwise)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Day of month for day markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    pub is_major: bool,
}

/// Base spacing of day markers for a zoom level
pub fn base_day_interval(zoom: Zoom) -> i64 {
    match zoom {
        Zoom::Week => 1,
        Zoom::Month => 2,
        Zoom::Quarter => 7,
    }
}

/// Day interval after applying the tick cap
///
/// The interval is widened until `ceil(total_days / interval) <= max_ticks`.
pub fn effective_day_interval(total_days: i64, zoom: Zoom, max_ticks: usize) -> i64 {
    let base = base_day_interval(zoom);
    let cap = (max_ticks as i64).max(1);
    let total_days = total_days.max(1);

    let needed = (total_days + cap - 1) / cap;
    if needed > base {
        debug!(total_days, base, widened = needed, "tick interval widened to respect cap");
        needed
    } else {
        base
    }
}

/// Build the time axis between the anchors
///
/// # Arguments
/// * `start_anchor` - Zoom-aligned range start
/// * `end_anchor` - Range end (inclusive)
/// * `zoom` - Active zoom level
/// * `config` - Pixel scale and tick cap
///
/// # Returns
/// Ticks sorted ascending by `x_offset`, at most one per calendar day
pub fn compute_ticks(
    start_anchor: NaiveDate,
    end_anchor: NaiveDate,
    zoom: Zoom,
    config: &EngineConfig,
) -> Vec<TimeTick> {
    let pixels_per_day = config.pixels_per_day.for_zoom(zoom);
    let x_of = |date: NaiveDate| days_between(start_anchor, date) as f64 * pixels_per_day;
    let total_days = (days_between(start_anchor, end_anchor) + 1).max(1);

    let mut ticks: BTreeMap<NaiveDate, TimeTick> = BTreeMap::new();

    // Minor pass: day markers
    let interval = effective_day_interval(total_days, zoom, config.max_ticks);
    let interval = Days::new(u64::try_from(interval).unwrap_or(1));
    let days = successors(Some(start_anchor), |day| day.checked_add_days(interval))
        .take_while(|day| *day <= end_anchor);
    for day in days {
        ticks.insert(
            day,
            TimeTick {
                date: day,
                x_offset: x_of(day),
                label: None,
                sub_label: Some(day.day().to_string()),
                is_major: false,
            },
        );
    }

    // Major pass: period labels
    let mut add_major = |date: NaiveDate, label: String| {
        let tick = ticks.entry(date).or_insert_with(|| TimeTick {
            date,
            x_offset: x_of(date),
            label: None,
            sub_label: None,
            is_major: false,
        });
        tick.label = Some(label);
        tick.is_major = true;
    };

    match zoom {
        Zoom::Week => {
            let weeks = successors(Some(start_anchor), |week| week.checked_add_days(Days::new(7)))
                .take_while(|week| *week <= end_anchor);
            for week in weeks {
                add_major(week, week.format("%b %-d").to_string());
            }
        }
        Zoom::Month | Zoom::Quarter => {
            let first = start_anchor.with_day(1).unwrap_or(start_anchor);
            let first = if first < start_anchor {
                first.checked_add_months(Months::new(1))
            } else {
                Some(first)
            };
            let months = successors(first, |month| month.checked_add_months(Months::new(1)))
                .take_while(|month| *month <= end_anchor);
            for month in months {
                add_major(month, month.format("%b").to_string());
            }
        }
    }

    let mut list: Vec<TimeTick> = ticks.into_values().collect();
    list.sort_by(|a, b| a.x_offset.total_cmp(&b.x_offset));
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_base_intervals() {
        assert_eq!(effective_day_interval(30, Zoom::Week, 240), 1);
        assert_eq!(effective_day_interval(30, Zoom::Month, 240), 2);
        assert_eq!(effective_day_interval(30, Zoom::Quarter, 240), 7);
    }

    #[test]
    fn test_interval_widens_past_cap() {
        // 1000 days at 1/day would be 1000 ticks; ceil(1000/240) = 5
        assert_eq!(effective_day_interval(1000, Zoom::Week, 240), 5);
        // Quarter zoom's 7-day step already satisfies 1000/7 <= 240
        assert_eq!(effective_day_interval(1000, Zoom::Quarter, 240), 7);
        assert_eq!(effective_day_interval(2000, Zoom::Quarter, 240), 9);
    }

    #[test]
    fn test_week_zoom_majors_every_monday() {
        let config = EngineConfig::default();
        let ticks = compute_ticks(ymd(2024, 1, 1), ymd(2024, 1, 20), Zoom::Week, &config);
        assert_eq!(ticks.len(), 20);
        let majors: Vec<&str> = ticks
            .iter()
            .filter(|t| t.is_major)
            .filter_map(|t| t.label.as_deref())
            .collect();
        assert_eq!(majors, vec!["Jan 1", "Jan 8", "Jan 15"]);
        // Major ticks keep the day marker they upgraded
        assert_eq!(ticks[7].sub_label.as_deref(), Some("8"));
    }

    #[test]
    fn test_quarter_zoom_month_boundaries_are_inserted() {
        let config = EngineConfig::default();
        let ticks = compute_ticks(ymd(2024, 1, 1), ymd(2024, 3, 31), Zoom::Quarter, &config);
        let feb = ticks.iter().find(|t| t.date == ymd(2024, 2, 1)).unwrap();
        assert!(feb.is_major);
        assert_eq!(feb.label.as_deref(), Some("Feb"));
        // Feb 1 is not on the 7-day grid from Jan 1, so it has no day marker
        assert_eq!(feb.sub_label, None);
        assert_eq!(feb.x_offset, 31.0 * 4.0);
    }

    #[test]
    fn test_single_day_range() {
        let config = EngineConfig::default();
        let ticks = compute_ticks(ymd(2024, 4, 1), ymd(2024, 4, 1), Zoom::Month, &config);
        assert_eq!(ticks.len(), 1);
        assert!(ticks[0].is_major);
        assert_eq!(ticks[0].x_offset, 0.0);
    }

    #[test]
    fn test_anchors_at_calendar_limit_stop_cleanly() {
        let config = EngineConfig::default();
        for zoom in Zoom::ALL {
            let ticks = compute_ticks(NaiveDate::MAX, NaiveDate::MAX, zoom, &config);
            assert_eq!(ticks.len(), 1, "{zoom}");
            assert_eq!(ticks[0].date, NaiveDate::MAX);
        }
    }
}
