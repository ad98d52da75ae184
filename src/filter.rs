//! Project filtering for the timeline
//!
//! Each filter is a `retain` pass over borrowed records, so the input order is
//! preserved. [`filter_projects`] chains them in the fixed order the timeline
//! uses: id allowlist, manager/type/client, preset, then free-text search.

use crate::timeline::{Preset, ProjectRecord, TimelineFilters};
use chrono::NaiveDate;
use tracing::debug;

/// Returns the trimmed value, or `None` if it is blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Case-insensitive equality after trimming both sides
fn eq_ignore_case(field: Option<&str>, wanted: &str) -> bool {
    field
        .map(|f| f.trim().to_lowercase() == wanted.to_lowercase())
        .unwrap_or(false)
}

/// Apply id allowlist filtering
///
/// # Arguments
/// * `projects` - Mutable list of records to filter
/// * `ids` - Project ids to keep
pub fn apply_id_filter(projects: &mut Vec<&ProjectRecord>, ids: &[String]) {
    projects.retain(|p| ids.iter().any(|id| id.trim() == p.project_id.trim()));
}

/// Apply project manager filtering (exact, case-insensitive)
pub fn apply_manager_filter(projects: &mut Vec<&ProjectRecord>, manager: &str) {
    projects.retain(|p| eq_ignore_case(p.project_manager.as_deref(), manager));
}

/// Apply project type filtering (exact, case-insensitive)
pub fn apply_type_filter(projects: &mut Vec<&ProjectRecord>, project_type: &str) {
    projects.retain(|p| eq_ignore_case(p.project_type.as_deref(), project_type));
}

/// Apply client filtering (exact, case-insensitive)
pub fn apply_client_filter(projects: &mut Vec<&ProjectRecord>, client: &str) {
    projects.retain(|p| eq_ignore_case(p.client_name.as_deref(), client));
}

/// Apply preset filtering
///
/// # Arguments
/// * `projects` - Mutable list of records to filter
/// * `preset` - Preset to apply
/// * `today` - Reference day; end dates are compared against it
///
/// # Description
/// `active` keeps projects without an end date or ending today or later.
/// `overdue` keeps projects whose end date is before today; a project with no
/// (or an unparsable) end date is never overdue.
pub fn apply_preset_filter(projects: &mut Vec<&ProjectRecord>, preset: Preset, today: NaiveDate) {
    match preset {
        Preset::All => {}
        Preset::Active => projects.retain(|p| p.end().is_none_or(|end| end >= today)),
        Preset::Overdue => projects.retain(|p| p.end().is_some_and(|end| end < today)),
    }
}

/// Apply keyword filtering (case-insensitive search in name, client, manager and type)
///
/// # Arguments
/// * `projects` - Mutable list of records to filter
/// * `keyword` - Keyword to search for (case-insensitive)
pub fn apply_keyword_filter(projects: &mut Vec<&ProjectRecord>, keyword: &str) {
    let keyword_lower = keyword.trim().to_lowercase();
    let contains = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(&keyword_lower))
            .unwrap_or(false)
    };

    projects.retain(|p| {
        contains(Some(p.project_name.as_str()))
            || contains(p.client_name.as_deref())
            || contains(p.project_manager.as_deref())
            || contains(p.project_type.as_deref())
    });
}

/// Select the records to show on the timeline
///
/// # Arguments
/// * `projects` - All records supplied by the host
/// * `filters` - Active filters
/// * `today` - Reference day for presets
///
/// # Returns
/// Borrowed records that pass every filter, in input order
pub fn filter_projects<'a>(
    projects: &'a [ProjectRecord],
    filters: &TimelineFilters,
    today: NaiveDate,
) -> Vec<&'a ProjectRecord> {
    let mut selected: Vec<&ProjectRecord> = projects.iter().collect();

    if let Some(ids) = filters.ids.as_deref().filter(|ids| !ids.is_empty()) {
        apply_id_filter(&mut selected, ids);
    }

    if let Some(manager) = non_blank(filters.manager.as_deref()) {
        apply_manager_filter(&mut selected, manager);
    }

    if let Some(project_type) = non_blank(filters.project_type.as_deref()) {
        apply_type_filter(&mut selected, project_type);
    }

    if let Some(client) = non_blank(filters.client.as_deref()) {
        apply_client_filter(&mut selected, client);
    }

    apply_preset_filter(&mut selected, filters.preset, today);

    if let Some(keyword) = non_blank(Some(filters.search.as_str())) {
        apply_keyword_filter(&mut selected, keyword);
    }

    debug!(
        total = projects.len(),
        selected = selected.len(),
        preset = %filters.preset,
        "filtered timeline projects"
    );
    selected
}
