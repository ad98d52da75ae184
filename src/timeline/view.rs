use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time scale of the timeline
///
/// Controls both the pixels-per-day scale and tick granularity.
/// Uses snake_case naming to match the host's persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Zoom {
    /// Day-level detail, anchored to Monday
    Week,
    /// Anchored to the first of the month
    #[default]
    Month,
    /// Anchored to the first of the quarter
    Quarter,
}

impl Zoom {
    pub const ALL: [Zoom; 3] = [Zoom::Week, Zoom::Month, Zoom::Quarter];

    pub fn as_str(self) -> &'static str {
        match self {
            Zoom::Week => "week",
            Zoom::Month => "month",
            Zoom::Quarter => "quarter",
        }
    }

    /// Parse a zoom value, keeping `current` when the input is unknown
    pub fn parse_or(s: &str, current: Zoom) -> Zoom {
        s.parse().unwrap_or(current)
    }
}

impl FromStr for Zoom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Zoom::Week),
            "month" => Ok(Zoom::Month),
            "quarter" => Ok(Zoom::Quarter),
            other => Err(format!(
                "Invalid zoom '{}'. Valid options are: week, month, quarter",
                other
            )),
        }
    }
}

// Unknown values in persisted settings fall back to the default zoom.
impl From<String> for Zoom {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named project subset, independent of free-text search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Preset {
    /// Every project
    #[default]
    All,
    /// No end date, or ending today or later
    Active,
    /// Ended before today
    Overdue,
}

impl Preset {
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::All => "all",
            Preset::Active => "active",
            Preset::Overdue => "overdue",
        }
    }

    /// Parse a preset, failing closed to [`Preset::All`]
    pub fn parse_lenient(s: &str) -> Preset {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Preset::All),
            "active" => Ok(Preset::Active),
            "overdue" => Ok(Preset::Overdue),
            other => Err(format!(
                "Invalid preset '{}'. Valid options are: all, active, overdue",
                other
            )),
        }
    }
}

impl From<String> for Preset {
    fn from(s: String) -> Self {
        Preset::parse_lenient(&s)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters applied before layout
///
/// Blank strings and an empty id allowlist are treated as "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineFilters {
    /// Only keep these project ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    /// Exact, case-insensitive project manager match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    /// Exact, case-insensitive project type match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    /// Exact, case-insensitive client match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Free-text search across name, client, manager and type
    pub search: String,
    pub preset: Preset,
    pub zoom: Zoom,
}

impl TimelineFilters {
    /// Filters carrying only the host's persisted toggles
    pub fn from_view_state(view: &TimelineViewState) -> Self {
        Self {
            search: view.search.clone(),
            preset: view.preset,
            zoom: view.zoom,
            ..Default::default()
        }
    }

    pub fn with_zoom(mut self, zoom: Zoom) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Host-owned UI toggles for the timeline
///
/// The engine never persists this; hosts store it wherever they keep user
/// settings (see [`crate::Storage`] for a TOML file helper).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineViewState {
    pub zoom: Zoom,
    pub preset: Preset,
    pub search: String,
}

impl TimelineViewState {
    /// Apply a zoom toggle from the UI; unknown values keep the current zoom
    pub fn set_zoom_str(&mut self, zoom: &str) {
        self.zoom = Zoom::parse_or(zoom, self.zoom);
    }

    /// Apply a preset toggle from the UI; unknown values select `all`
    pub fn set_preset_str(&mut self, preset: &str) {
        self.preset = Preset::parse_lenient(preset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_parse_is_case_insensitive() {
        assert_eq!("Week".parse::<Zoom>(), Ok(Zoom::Week));
        assert_eq!(" QUARTER ".parse::<Zoom>(), Ok(Zoom::Quarter));
        assert!("year".parse::<Zoom>().is_err());
    }

    #[test]
    fn test_unknown_zoom_keeps_current() {
        let mut view = TimelineViewState {
            zoom: Zoom::Quarter,
            ..Default::default()
        };
        view.set_zoom_str("decade");
        assert_eq!(view.zoom, Zoom::Quarter);
        view.set_zoom_str("week");
        assert_eq!(view.zoom, Zoom::Week);
    }

    #[test]
    fn test_unknown_preset_fails_closed_to_all() {
        let mut view = TimelineViewState {
            preset: Preset::Overdue,
            ..Default::default()
        };
        view.set_preset_str("archived");
        assert_eq!(view.preset, Preset::All);
        assert_eq!(Preset::parse_lenient("Active"), Preset::Active);
    }

    #[test]
    fn test_filters_from_view_state() {
        let view = TimelineViewState {
            zoom: Zoom::Week,
            preset: Preset::Active,
            search: "clinic".to_string(),
        };
        let filters = TimelineFilters::from_view_state(&view);
        assert_eq!(filters.zoom, Zoom::Week);
        assert_eq!(filters.preset, Preset::Active);
        assert_eq!(filters.search, "clinic");
        assert!(filters.ids.is_none());
    }
}
