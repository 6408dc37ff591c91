// tests/table_view.rs

mod common;

use std::error::Error;
use std::time::Duration;

use serde_json::json;

use taskboard::table::StatusBundle;
use taskboard::types::ResourceKind;
use taskboard_test_utils::builders::{group_json, task_json, tasks_json};
use taskboard_test_utils::{BackendCall, FakeBackend};

type TestResult = Result<(), Box<dyn Error>>;

const PERIOD: Duration = Duration::from_secs(8);

fn ids(rows: &[taskboard::table::TableRow]) -> Vec<i64> {
    rows.iter().map(|r| r.id).collect()
}

#[tokio::test(start_paused = true)]
async fn rows_sort_by_status_priority_descending() -> TestResult {
    common::init_tracing();
    let backend = FakeBackend::new().with_tasks(vec![
        task_json(1, "SUCCESS", "SUCCESS"),
        task_json(2, "STARTED", "SUCCESS"),
        task_json(3, "PREPARING", "PREPARING"),
        task_json(4, "FAILED", "CANCELLED"),
    ]);
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);

    let count = table.initialize(ResourceKind::Tasks, &backend).await?;

    assert_eq!(count, 4);
    assert_eq!(ids(table.rows()), vec![2, 4, 1, 3]);
    assert!(table.is_loaded());
    match &table.rows()[0].status {
        StatusBundle::Task { kpt, kad } => {
            assert_eq!(kpt.label, "Processing");
            assert_eq!(kad.label, "Done");
        }
        other => panic!("expected task status, got {other:?}"),
    }
    assert_eq!(table.rows()[0].added, "05.03.2024, 14:07");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn equal_priorities_keep_backend_order() -> TestResult {
    let backend = FakeBackend::new().with_tasks(vec![
        task_json(9, "SUCCESS", "SUCCESS"),
        task_json(3, "SUCCESS", "SUCCESS"),
        task_json(5, "SUCCESS", "SUCCESS"),
    ]);
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);

    table.initialize(ResourceKind::Tasks, &backend).await?;
    assert_eq!(ids(table.rows()), vec![9, 3, 5]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn malformed_records_are_skipped() -> TestResult {
    let backend = FakeBackend::new().with_tasks(vec![
        task_json(1, "SUCCESS", "SUCCESS"),
        json!({ "name": "no id" }),
    ]);
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);

    assert_eq!(table.initialize(ResourceKind::Tasks, &backend).await?, 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn pagination_survives_refresh_and_clamps() -> TestResult {
    let backend = FakeBackend::new().with_tasks(tasks_json(25, "SUCCESS"));
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);
    table.initialize(ResourceKind::Tasks, &backend).await?;

    assert_eq!(table.page_count(), 3);
    assert!(table.next_page());
    assert!(table.next_page());
    assert!(!table.next_page());
    assert_eq!(table.page(), 2);
    assert_eq!(table.visible_rows().len(), 5);

    table.refresh(&backend, false).await?;
    assert_eq!(table.page(), 2, "refresh keeps the page");

    backend.set_collection("tasks", tasks_json(12, "SUCCESS"));
    table.refresh(&backend, false).await?;
    assert_eq!(table.page(), 1, "page clamped to the last one");

    table.refresh(&backend, true).await?;
    assert_eq!(table.page(), 0);
    assert!(!table.prev_page());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_table_has_one_page() -> TestResult {
    let backend = FakeBackend::new();
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);
    table.initialize(ResourceKind::Tasks, &backend).await?;

    assert_eq!(table.page_count(), 1);
    assert!(table.visible_rows().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_previous_rows() -> TestResult {
    let backend = FakeBackend::new().with_tasks(tasks_json(3, "STARTED"));
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);
    table.initialize(ResourceKind::Tasks, &backend).await?;

    backend.fail_fetch(true);
    assert!(table.refresh(&backend, false).await.is_err());
    assert_eq!(table.rows().len(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn switching_rebinds_source_and_restarts_one_timer() -> TestResult {
    let backend = FakeBackend::new()
        .with_tasks(tasks_json(15, "SUCCESS"))
        .with_groups(vec![group_json(1, 0), group_json(2, 3), group_json(3, 1)]);
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);
    table.initialize(ResourceKind::Tasks, &backend).await?;
    table.start_auto_refresh();
    table.next_page();

    backend.watch_timer(table.auto_refresh_activity());
    backend.clear_calls();

    table.switch_kind(ResourceKind::Groups, &backend).await?;

    assert_eq!(table.kind(), ResourceKind::Groups);
    assert_eq!(table.config().columns[1].title, "Group");
    assert_eq!(table.page(), 0);
    assert_eq!(ids(table.rows()), vec![2, 3, 1]);
    assert!(table.auto_refresh_active());
    assert!(!table.is_switching());
    assert!(!table.accepts_tick(1), "old timer generation is dead");
    assert!(table.accepts_tick(2));
    assert_eq!(
        backend.calls(),
        vec![BackendCall::Fetch {
            path: "groups",
            auto_refresh_active: Some(false)
        }]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failed_switch_still_resumes_auto_refresh() -> TestResult {
    let backend = FakeBackend::new().with_tasks(tasks_json(2, "SUCCESS"));
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, PERIOD);
    table.initialize(ResourceKind::Tasks, &backend).await?;
    table.start_auto_refresh();

    backend.fail_fetch(true);
    assert!(table.switch_kind(ResourceKind::Groups, &backend).await.is_err());

    assert_eq!(table.kind(), ResourceKind::Groups);
    assert!(table.rows().is_empty());
    assert!(table.auto_refresh_active());
    Ok(())
}
