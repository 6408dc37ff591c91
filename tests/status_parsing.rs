// tests/status_parsing.rs

use std::error::Error;

use chrono::NaiveDate;
use serde_json::json;

use taskboard::status::model::parse_timestamp;
use taskboard::status::{Group, ResourceState, Task};
use taskboard::table::{derive_rows, format_added, BaseOptions, TableConfig};
use taskboard::types::ResourceKind;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn task_statuses_as_nested_objects() -> TestResult {
    let task: Task = serde_json::from_value(json!({
        "id": 7,
        "name": "survey.zip",
        "added": "2024-03-05T14:07:00",
        "group_id": 2,
        "kpt_status": { "state": "STARTED", "error": null },
        "kad_status": { "state": "FAILED", "error": "boom" },
    }))?;

    assert_eq!(task.id, 7);
    assert_eq!(task.group_id, Some(2));
    assert_eq!(task.kpt_status.state, ResourceState::Started);
    assert_eq!(task.kad_status.state, ResourceState::Failed);
    assert_eq!(task.kad_status.error.as_deref(), Some("boom"));
    assert_eq!(task.sort_priority(), 5);
    Ok(())
}

#[test]
fn task_statuses_as_json_strings() -> TestResult {
    let task: Task = serde_json::from_value(json!({
        "id": 1,
        "name": "a",
        "kpt_status": "{\"state\": \"SUCCESS\", \"error\": null}",
        "kad_status": "{\"state\": \"ACCEPTED\"}",
    }))?;

    assert_eq!(task.kpt_status.state, ResourceState::Success);
    assert_eq!(task.kad_status.state, ResourceState::Accepted);
    assert_eq!(task.sort_priority(), 4);
    Ok(())
}

#[test]
fn missing_null_or_empty_statuses_default_to_rejected() -> TestResult {
    let task: Task = serde_json::from_value(json!({
        "id": 3,
        "kpt_status": null,
        "kad_status": "",
    }))?;

    assert_eq!(task.kpt_status.state, ResourceState::Rejected);
    assert_eq!(task.kad_status.state, ResourceState::Rejected);
    assert_eq!(task.added, None);
    assert_eq!(task.name, "");

    let bare: Task = serde_json::from_value(json!({ "id": 4 }))?;
    assert_eq!(bare.kpt_status.state, ResourceState::Rejected);
    assert_eq!(bare.sort_priority(), 0);
    Ok(())
}

#[test]
fn group_statistics_from_string_and_object() -> TestResult {
    let from_string: Group = serde_json::from_value(json!({
        "id": 9,
        "name": "batch",
        "statistics": "{\"loaded\": 5, \"in_progress\": 2, \"completed\": 1, \"failed\": 1, \"remaining\": 1}",
    }))?;
    assert_eq!(from_string.statistics.in_progress, 2);
    assert_eq!(from_string.statistics.loaded, 5);

    let from_object: Group = serde_json::from_value(json!({
        "id": 10,
        "statistics": { "loaded": 1 },
    }))?;
    assert_eq!(from_object.statistics.loaded, 1);
    assert_eq!(from_object.statistics.in_progress, 0);
    Ok(())
}

#[test]
fn timestamps_with_and_without_offset() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(14, 7, 0))
        .unwrap();

    assert_eq!(parse_timestamp("2024-03-05T14:07:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-05 14:07:00.000"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-05T14:07:00+02:00"), Some(expected));
    assert_eq!(parse_timestamp("yesterday"), None);

    assert_eq!(format_added(Some(expected)), "05.03.2024, 14:07");
    assert_eq!(format_added(None), "-");
}

#[test]
fn odd_status_shapes_become_rejected_instead_of_failing() -> TestResult {
    let numeric_state: Task = serde_json::from_value(json!({
        "id": 1,
        "kpt_status": { "state": 7 },
        "kad_status": { "state": "STARTED" },
    }))?;
    assert_eq!(numeric_state.kpt_status.state, ResourceState::Rejected);
    assert_eq!(numeric_state.sort_priority(), 5);

    let scalar_status: Task = serde_json::from_value(json!({
        "id": 2,
        "kpt_status": 42,
        "kad_status": "{not json",
    }))?;
    assert_eq!(scalar_status.kpt_status.state, ResourceState::Rejected);
    assert_eq!(scalar_status.kad_status.state, ResourceState::Rejected);

    let numeric_added: Task = serde_json::from_value(json!({ "id": 3, "added": 1700000000 }))?;
    assert_eq!(numeric_added.added, None);

    let broken_stats: Group = serde_json::from_value(json!({ "id": 4, "statistics": [1, 2] }))?;
    assert_eq!(broken_stats.statistics.loaded, 0);
    Ok(())
}

#[test]
fn rows_with_odd_fields_are_kept() {
    let config = TableConfig::for_kind(ResourceKind::Tasks, BaseOptions::new(10));
    let rows = derive_rows(
        &config,
        vec![
            json!({ "id": 1, "kpt_status": { "state": 7 }, "kad_status": { "state": "STARTED" } }),
            json!({ "id": 2, "kpt_status": 42, "kad_status": null }),
            json!({ "id": 3, "added": 1700000000 }),
        ],
    );

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(rows[0].sort_key, 5);
    assert_eq!(rows[2].added, "-");
}
