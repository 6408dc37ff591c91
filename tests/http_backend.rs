// tests/http_backend.rs

mod common;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use taskboard::api::{DashboardBackend, HttpBackend, UploadFile};
use taskboard::coordinator::RefreshCoordinator;
use taskboard::engine::ActionRequest;
use taskboard::errors::DashboardError;
use taskboard::fs::mock::MockFileSystem;
use taskboard::notice::NoticeLevel;
use taskboard::table::{BaseOptions, TableConfig};
use taskboard::types::{ResourceAction, ResourceKind};
use taskboard_test_utils::builders::{group_json, task_json};
use taskboard_test_utils::{HttpStub, RecordingControl, StubResponse};

type TestResult = Result<(), Box<dyn Error>>;

fn backend(stub: &HttpStub) -> Result<HttpBackend, DashboardError> {
    HttpBackend::new(stub.base_url(), Duration::from_secs(5))
}

fn source(kind: ResourceKind) -> taskboard::api::FetchSource {
    TableConfig::for_kind(kind, BaseOptions::new(10)).source
}

#[tokio::test]
async fn collection_is_read_from_its_field() -> TestResult {
    common::init_tracing();
    let stub = HttpStub::start(vec![
        (
            "GET",
            "tasks",
            StubResponse::json(200, &json!({ "tasks": [task_json(1, "SUCCESS", "STARTED")] })),
        ),
        (
            "GET",
            "groups",
            StubResponse::json(200, &json!({ "groups": [group_json(2, 0), group_json(3, 1)] })),
        ),
    ])
    .await?;
    let backend = backend(&stub)?;

    let tasks = backend.fetch_collection(source(ResourceKind::Tasks)).await?;
    let groups = backend.fetch_collection(source(ResourceKind::Groups)).await?;

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(groups.len(), 2);
    Ok(())
}

#[tokio::test]
async fn missing_collection_field_is_malformed() -> TestResult {
    let stub = HttpStub::start(vec![(
        "GET",
        "tasks",
        StubResponse::json(200, &json!({ "groups": [] })),
    )])
    .await?;

    let result = backend(&stub)?
        .fetch_collection(source(ResourceKind::Tasks))
        .await;

    assert!(matches!(result, Err(DashboardError::MalformedResponse(_))));
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_a_backend_error() -> TestResult {
    let stub = HttpStub::start(vec![(
        "GET",
        "tasks/statistics",
        StubResponse::json(500, &json!({ "detail": "boom" })),
    )])
    .await?;
    let backend = backend(&stub)?;

    let stats = backend.statistics().await;
    assert!(matches!(
        stats,
        Err(DashboardError::BackendStatus { status: 500, .. })
    ));

    // Unrouted paths answer 404.
    let groups = backend.fetch_collection(source(ResourceKind::Groups)).await;
    assert!(matches!(
        groups,
        Err(DashboardError::BackendStatus { status: 404, .. })
    ));
    Ok(())
}

#[tokio::test]
async fn delete_and_restart_use_their_own_methods() -> TestResult {
    let stub = HttpStub::start(vec![
        (
            "DELETE",
            "tasks/5/delete",
            StubResponse::json(200, &json!({ "message": "Task 5 deleted" })),
        ),
        (
            "POST",
            "groups/2/restart",
            StubResponse::json(200, &json!({ "message": "Group 2 restarted" })),
        ),
    ])
    .await?;
    let backend = backend(&stub)?;

    let deleted = backend
        .mutate(ResourceKind::Tasks, 5, ResourceAction::Delete)
        .await?;
    let restarted = backend
        .mutate(ResourceKind::Groups, 2, ResourceAction::Restart)
        .await?;

    assert_eq!(deleted.message, "Task 5 deleted");
    assert_eq!(restarted.message, "Group 2 restarted");

    let seen: Vec<(String, String)> = stub
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert!(seen.contains(&("DELETE".to_string(), "/tasks/5/delete".to_string())));
    assert!(seen.contains(&("POST".to_string(), "/groups/2/restart".to_string())));
    Ok(())
}

#[tokio::test]
async fn upload_sends_one_files_part_per_file_and_the_name() -> TestResult {
    let stub = HttpStub::start(vec![(
        "POST",
        "run_tasks",
        StubResponse::json(
            200,
            &json!({ "message": "2 tasks created", "errors": ["c.tif: duplicate"] }),
        ),
    )])
    .await?;

    let response = backend(&stub)?
        .run_tasks(
            vec![
                UploadFile {
                    file_name: "a.tif".to_string(),
                    bytes: b"AAAA".to_vec(),
                },
                UploadFile {
                    file_name: "b.tif".to_string(),
                    bytes: b"BBBB".to_vec(),
                },
            ],
            "survey".to_string(),
        )
        .await?;

    assert_eq!(response.message, "2 tasks created");
    assert_eq!(response.errors, vec!["c.tif: duplicate".to_string()]);

    let requests = stub.requests();
    let upload = requests
        .iter()
        .find(|r| r.path == "/run_tasks")
        .expect("upload request recorded");
    assert_eq!(upload.method, "POST");
    assert!(upload
        .header("content-type")
        .is_some_and(|v| v.starts_with("multipart/form-data")));

    let body = upload.body_text();
    assert_eq!(body.matches("name=\"files\"").count(), 2);
    assert!(body.contains("filename=\"a.tif\""));
    assert!(body.contains("filename=\"b.tif\""));
    assert!(body.contains("AAAA") && body.contains("BBBB"));
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("survey"));
    Ok(())
}

#[tokio::test]
async fn download_takes_the_name_from_the_response_header() -> TestResult {
    let stub = HttpStub::start(vec![
        (
            "GET",
            "tasks/7/download",
            StubResponse::bytes(200, b"PKzip")
                .with_header("Content-Disposition", "attachment; filename=\"task_7.zip\""),
        ),
        ("GET", "groups/3/download", StubResponse::bytes(200, b"PK")),
    ])
    .await?;
    let backend = backend(&stub)?;

    let named = backend.download(ResourceKind::Tasks, 7).await?;
    assert_eq!(named.file_name.as_deref(), Some("task_7.zip"));
    assert_eq!(named.bytes, b"PKzip".to_vec());

    let unnamed = backend.download(ResourceKind::Groups, 3).await?;
    assert_eq!(unnamed.file_name, None);
    Ok(())
}

#[tokio::test]
async fn delete_rejected_by_the_server_shows_error_notice() -> TestResult {
    common::init_tracing();
    let stub = HttpStub::start(vec![
        (
            "GET",
            "tasks",
            StubResponse::json(200, &json!({ "tasks": [task_json(1, "FAILED", "FAILED")] })),
        ),
        (
            "DELETE",
            "tasks/1/delete",
            StubResponse::json(500, &json!({ "detail": "locked" })),
        ),
    ])
    .await?;
    let backend = backend(&stub)?;

    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, Duration::from_secs(60));
    table.initialize(ResourceKind::Tasks, &backend).await?;
    table.start_auto_refresh();
    let coordinator = RefreshCoordinator::new(Arc::new(MockFileSystem::new()), ".");
    let mut control = RecordingControl::new();
    let mut notices = common::notices();

    let outcome = coordinator
        .run(
            ActionRequest {
                kind: ResourceKind::Tasks,
                id: 1,
                action: ResourceAction::Delete,
            },
            &mut table,
            &backend,
            &mut control,
            &mut notices,
        )
        .await;

    assert!(!outcome.success);
    assert_eq!(table.rows().len(), 1);
    assert!(table.auto_refresh_active());
    assert_eq!(control.transitions(), vec![true, false]);

    let notice = notices.latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Danger);
    assert_eq!(notice.message, "Error deleting task!");
    Ok(())
}
