//! Positioned timeline rows

use super::record::{ProjectRecord, days_between};
use crate::config::EngineConfig;
use crate::formatting;
use chrono::NaiveDate;
use serde::Serialize;

/// Color classification for a bar, resolved to a palette by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Info,
    Primary,
    Warning,
    Neutral,
}

impl ColorToken {
    /// Keyword vocabulary checked in order against the lowercased project type
    const KEYWORDS: [(&'static str, ColorToken); 3] = [
        ("health", ColorToken::Info),
        ("data", ColorToken::Primary),
        ("coord", ColorToken::Warning),
    ];

    /// Classify a project type by keyword (case-insensitive substring)
    pub fn classify(project_type: Option<&str>) -> ColorToken {
        let Some(project_type) = project_type else {
            return ColorToken::Neutral;
        };
        let lower = project_type.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, token)| *token)
            .unwrap_or(ColorToken::Neutral)
    }
}

/// Horizontal extent of a bar in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub x_start: f64,
    pub x_end: f64,
}

impl Bar {
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }
}

/// One project laid out on the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowModel {
    /// Project id, used by the host for navigation
    pub id: String,
    pub label: String,
    pub color_token: ColorToken,
    pub bar: Bar,
    /// False when either date was missing or malformed; the bar is then a
    /// placeholder at the start anchor
    pub has_dates: bool,
    /// Auxiliary labels (date span, manager, client, ...)
    pub meta: Vec<String>,
}

/// Lay out one row
pub fn build_row(
    project: &ProjectRecord,
    start_anchor: NaiveDate,
    pixels_per_day: f64,
    config: &EngineConfig,
) -> RowModel {
    let (start, end, has_dates) = match (project.start(), project.end()) {
        (Some(start), Some(end)) => (start, end, true),
        _ => (start_anchor, start_anchor, false),
    };

    let x_start = days_between(start_anchor, start) as f64 * pixels_per_day;
    let x_end = (days_between(start_anchor, end) as f64 * pixels_per_day)
        .max(x_start + config.min_bar_width);

    let label = if project.project_name.trim().is_empty() {
        project.project_id.clone()
    } else {
        project.project_name.clone()
    };

    RowModel {
        id: project.project_id.clone(),
        label,
        color_token: ColorToken::classify(project.project_type.as_deref()),
        bar: Bar { x_start, x_end },
        has_dates,
        meta: formatting::row_meta(project, has_dates.then_some((start, end))),
    }
}

/// Lay out every filtered project, preserving input order
///
/// # Arguments
/// * `projects` - Filtered records
/// * `start_anchor` - Range start all offsets are measured from
/// * `pixels_per_day` - Scale for the active zoom
/// * `config` - Supplies the minimum bar width
pub fn build_rows(
    projects: &[&ProjectRecord],
    start_anchor: NaiveDate,
    pixels_per_day: f64,
    config: &EngineConfig,
) -> Vec<RowModel> {
    projects
        .iter()
        .map(|project| build_row(project, start_anchor, pixels_per_day, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_classify_keywords() {
        assert_eq!(ColorToken::classify(Some("Healthcare")), ColorToken::Info);
        assert_eq!(ColorToken::classify(Some("Data Center")), ColorToken::Primary);
        assert_eq!(ColorToken::classify(Some("BIM Coordination")), ColorToken::Warning);
        assert_eq!(ColorToken::classify(Some("Residential")), ColorToken::Neutral);
        assert_eq!(ColorToken::classify(None), ColorToken::Neutral);
    }

    #[test]
    fn test_classify_first_keyword_wins() {
        assert_eq!(ColorToken::classify(Some("Health data")), ColorToken::Info);
    }

    #[test]
    fn test_reversed_span_gets_minimum_width() {
        let config = EngineConfig::default();
        let record = ProjectRecord::new("p", "Backwards")
            .with_dates(Some("2024-01-10"), Some("2024-01-05"));
        let row = build_row(&record, anchor(), 8.0, &config);
        assert!(row.has_dates);
        assert_eq!(row.bar.x_start, 72.0);
        assert_eq!(row.bar.x_end, 72.0 + config.min_bar_width);
    }

    #[test]
    fn test_missing_end_is_placeholder() {
        let config = EngineConfig::default();
        let record = ProjectRecord::new("p", "Open").with_dates(Some("2024-02-01"), None);
        let row = build_row(&record, anchor(), 24.0, &config);
        assert!(!row.has_dates);
        assert_eq!(row.bar.x_start, 0.0);
        assert_eq!(row.bar.width(), config.min_bar_width);
    }

    #[test]
    fn test_blank_name_falls_back_to_id() {
        let record = ProjectRecord::new("P-77", "  ");
        let row = build_row(&record, anchor(), 8.0, &EngineConfig::default());
        assert_eq!(row.label, "P-77");
        assert_eq!(row.id, "P-77");
    }
}
