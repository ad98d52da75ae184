//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use timeline_engine::ProjectRecord;

/// Build a date, panicking on invalid input
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fixed "today" used across tests (a Saturday)
pub fn test_today() -> NaiveDate {
    ymd(2024, 6, 15)
}

/// Create a test project with minimal fields
pub fn create_test_project(id: &str, start: Option<&str>, end: Option<&str>) -> ProjectRecord {
    ProjectRecord::new(id, format!("Project {}", id)).with_dates(start, end)
}

/// Create a test project with all descriptive fields
pub fn create_full_test_project(
    id: &str,
    name: &str,
    manager: &str,
    project_type: &str,
    client: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> ProjectRecord {
    ProjectRecord {
        project_manager: Some(manager.to_string()),
        project_type: Some(project_type.to_string()),
        client_name: Some(client.to_string()),
        status: Some("Active".to_string()),
        priority: Some("High".to_string()),
        ..ProjectRecord::new(id, name).with_dates(start, end)
    }
}

/// A small mixed portfolio
pub fn sample_portfolio() -> Vec<ProjectRecord> {
    vec![
        create_full_test_project(
            "P-100",
            "Riverside Hospital Wing",
            "Dana Smith",
            "Healthcare",
            "Northwind Health",
            Some("2024-01-08"),
            Some("2024-09-30"),
        ),
        create_full_test_project(
            "P-101",
            "Campus Data Center",
            "Lee Park",
            "Data Center",
            "Contoso",
            Some("2024-03-01"),
            Some("2024-05-31"),
        ),
        create_full_test_project(
            "P-102",
            "Airport BIM Coordination",
            "Dana Smith",
            "BIM Coordination",
            "City of Fairview",
            Some("2024-06-01"),
            None,
        ),
        create_full_test_project(
            "P-103",
            "Library Refurbishment",
            "Alex Chen",
            "Civic",
            "City of Fairview",
            Some("not-a-date"),
            Some("2024-12-20"),
        ),
    ]
}

/// Generate `count` dated projects, one week apart
pub fn generate_projects(count: usize) -> Vec<ProjectRecord> {
    (0..count)
        .map(|i| {
            let start = ymd(2024, 1, 1) + chrono::Duration::days(7 * i as i64);
            let end = start + chrono::Duration::days(30);
            create_test_project(
                &format!("G-{}", i),
                Some(&start.to_string()),
                Some(&end.to_string()),
            )
        })
        .collect()
}
