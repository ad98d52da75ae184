//! Validation helper functions for host input
//!
//! The engine never rejects input: each helper here maps a raw string from the
//! UI or a settings file onto a domain value and falls back to a safe default.

use crate::timeline::{Preset, Zoom, parse_date};
use chrono::NaiveDate;
use tracing::debug;

/// Parse a preset toggle value
///
/// # Arguments
/// * `preset_str` - Preset string to parse
///
/// # Returns
/// The parsed preset, or [`Preset::All`] when the value is unknown
pub fn parse_preset_filter(preset_str: &str) -> Preset {
    preset_str.parse::<Preset>().unwrap_or_else(|err| {
        debug!(%err, "unknown preset, showing all projects");
        Preset::All
    })
}

/// Parse a zoom toggle value
///
/// # Arguments
/// * `zoom_str` - Zoom string to parse
/// * `current` - Zoom to keep when the value is unknown
pub fn parse_zoom_filter(zoom_str: &str, current: Zoom) -> Zoom {
    zoom_str.parse::<Zoom>().unwrap_or_else(|err| {
        debug!(%err, %current, "unknown zoom, keeping current");
        current
    })
}

/// Parse an optional date override, treating malformed values as absent
pub fn parse_date_filter(date_str: Option<&str>) -> Option<NaiveDate> {
    let raw = date_str?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        debug!(raw, "ignoring malformed date");
    }
    parsed
}

/// Normalize a list of project ids from a comma-separated string
///
/// # Examples
/// ```
/// # use timeline_engine::validation::normalize_id_list;
/// assert_eq!(normalize_id_list(" P-1, ,P-2 "), vec!["P-1", "P-2"]);
/// ```
pub fn normalize_id_list(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset_fallback() {
        assert_eq!(parse_preset_filter("overdue"), Preset::Overdue);
        assert_eq!(parse_preset_filter("late"), Preset::All);
    }

    #[test]
    fn test_parse_zoom_keeps_current() {
        assert_eq!(parse_zoom_filter("week", Zoom::Month), Zoom::Week);
        assert_eq!(parse_zoom_filter("fortnight", Zoom::Quarter), Zoom::Quarter);
    }

    #[test]
    fn test_parse_date_filter() {
        assert_eq!(
            parse_date_filter(Some("2025-03-15")),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
        assert_eq!(parse_date_filter(Some("15/03/2025")), None);
        assert_eq!(parse_date_filter(None), None);
    }
}
