//! Formatting helper functions for the timeline
//!
//! This module contains label formatting for rows and a plain-text rendering
//! of a computed model.

use crate::timeline::{ProjectRecord, TimelineModel, VisibleWindow};
use chrono::NaiveDate;

/// Format a date span label
///
/// # Arguments
/// * `start` - First day
/// * `end` - Last day
///
/// # Returns
/// e.g. `"Jan 1, 2024 - Mar 15, 2024"`
pub fn format_date_span(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
}

/// Format a completion percentage, clamped to 0..=100
pub fn format_progress(progress: f64) -> Option<String> {
    if !progress.is_finite() {
        return None;
    }
    Some(format!("{:.0}%", progress.clamp(0.0, 100.0)))
}

/// Format a fee with thousands separators and no decimals
///
/// # Examples
/// ```
/// # use timeline_engine::formatting::format_fee;
/// assert_eq!(format_fee(12500.0).as_deref(), Some("$12,500"));
/// assert_eq!(format_fee(-980.4).as_deref(), Some("-$980"));
/// ```
pub fn format_fee(fee: f64) -> Option<String> {
    if !fee.is_finite() {
        return None;
    }

    let rounded = fee.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    Some(format!("{}${}", sign, grouped))
}

/// Build the auxiliary labels shown next to a bar
///
/// # Arguments
/// * `project` - Source record
/// * `span` - Parsed dates when both are present
///
/// # Description
/// Labels come in a fixed order: date span (or "No dates"), manager, client,
/// status, priority, progress and fee. Blank fields are skipped.
pub fn row_meta(project: &ProjectRecord, span: Option<(NaiveDate, NaiveDate)>) -> Vec<String> {
    let mut meta = Vec::new();

    meta.push(match span {
        Some((start, end)) => format_date_span(start, end),
        None => "No dates".to_string(),
    });

    let text_fields = [
        &project.project_manager,
        &project.client_name,
        &project.status,
        &project.priority,
    ];
    for field in text_fields {
        if let Some(value) = field.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            meta.push(value.to_string());
        }
    }

    if let Some(progress) = project.progress.and_then(format_progress) {
        meta.push(progress);
    }
    if let Some(fee) = project.fee.and_then(format_fee) {
        meta.push(fee);
    }

    meta
}

/// Format a model into a display string
///
/// # Arguments
/// * `model` - Computed timeline model
/// * `window` - Rows to print; all rows when `None`
///
/// # Returns
/// Formatted string representation of the model
pub fn format_model(model: &TimelineModel, window: Option<&VisibleWindow>) -> String {
    let mut result = format!(
        "Timeline {} to {} ({} zoom, {} day(s), {:.0}px wide)\n",
        model.range.min_date,
        model.range.max_date,
        model.range.zoom,
        model.total_days,
        model.range_width
    );

    if let Some(today_x) = model.today_x {
        result.push_str(&format!("Today at x={:.0}\n", today_x));
    }

    let majors: Vec<&str> = model
        .ticks
        .iter()
        .filter(|t| t.is_major)
        .filter_map(|t| t.label.as_deref())
        .collect();
    result.push_str(&format!(
        "Ticks: {} ({} major: {})\n",
        model.ticks.len(),
        majors.len(),
        majors.join(", ")
    ));

    if model.rows.is_empty() {
        result.push_str("No projects found\n");
        return result;
    }

    let (start, end) = window
        .map(|w| (w.start_index, w.end_index))
        .unwrap_or((0, model.rows.len()));
    result.push_str(&format!(
        "Rows {}..{} of {}:\n\n",
        start,
        end,
        model.rows.len()
    ));

    for row in model.rows.get(start..end).unwrap_or_default() {
        result.push_str(&format!(
            "- [{}] {} ({:?}) x={:.0}..{:.0}\n",
            row.id, row.label, row.color_token, row.bar.x_start, row.bar.x_end
        ));
        if !row.meta.is_empty() {
            result.push_str(&format!("  {}\n", row.meta.join(" | ")));
        }
    }

    result
}
