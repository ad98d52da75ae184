use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Earliest year accepted by [`parse_date`]
pub const MIN_SUPPORTED_YEAR: i32 = 1000;
/// Latest year accepted by [`parse_date`]
pub const MAX_SUPPORTED_YEAR: i32 = 9999;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Number of whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// First and last day of the supported year window
pub fn supported_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(MIN_SUPPORTED_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(MAX_SUPPORTED_YEAR, 12, 31).unwrap_or(NaiveDate::MAX),
    )
}

/// Move `date` by `days`, saturating at the edges of [`supported_window`]
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let (first, last) = supported_window();
    let shifted = match u64::try_from(days) {
        Ok(forward) => date.checked_add_days(Days::new(forward)),
        Err(_) => date.checked_sub_days(Days::new(days.unsigned_abs())),
    };
    match shifted {
        Some(shifted) => shifted.clamp(first, last),
        None if days < 0 => first,
        None => last,
    }
}

/// Parse a date string leniently
///
/// Accepts plain dates (`2024-01-31`, `2024/01/31`) as well as timestamps
/// (`2024-01-31T09:30:00Z`, `2024-01-31T09:30:00`, `2024-01-31 09:30:00`).
/// Timestamps are truncated to their calendar day. Anything else yields `None`.
/// Years outside `MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR` (including signed
/// extended years such as `+262142-12-30`) count as malformed.
///
/// # Arguments
/// * `raw` - Date string as delivered by the project endpoint
///
/// # Returns
/// The parsed calendar day, or `None` if the string is blank or malformed
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_any_date(raw).filter(|date| {
        (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year())
    })
}

fn parse_any_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    None
}

/// A project row as delivered by the project query endpoint
///
/// Records are read-only snapshots owned by the host. Date fields are kept as
/// the raw strings received so that malformed values can be treated as absent
/// at layout time instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    /// Project identifier (used by the host for navigation)
    pub project_id: String,
    /// Display name
    pub project_name: String,
    /// Optional start date (YYYY-MM-DD or ISO-8601 timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Optional end date (YYYY-MM-DD or ISO-8601 timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Reference to the lead the project was converted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    /// Completion percentage, only used for labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Agreed fee, only used for labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

impl ProjectRecord {
    /// Create a record with only an id and a name
    pub fn new(project_id: impl Into<String>, project_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for both dates
    pub fn with_dates(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_string);
        self.end_date = end.map(str::to_string);
        self
    }

    /// Parsed start date, `None` when absent or malformed
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    /// Parsed end date, `None` when absent or malformed
    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date.as_deref().and_then(parse_date)
    }
}

// f64 fields are hashed by bit pattern so records can key the model cache.
impl Hash for ProjectRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.project_id.hash(state);
        self.project_name.hash(state);
        self.start_date.hash(state);
        self.end_date.hash(state);
        self.project_manager.hash(state);
        self.project_type.hash(state);
        self.client_name.hash(state);
        self.status.hash(state);
        self.priority.hash(state);
        self.lead_id.hash(state);
        self.progress.map(f64::to_bits).hash(state);
        self.fee.map(f64::to_bits).hash(state);
    }
}
