// tests/upload_dialog.rs

mod common;

use std::error::Error;
use std::time::Duration;

use taskboard::api::UploadFile;
use taskboard::errors::DashboardError;
use taskboard::fs::mock::MockFileSystem;
use taskboard::notice::NoticeLevel;
use taskboard::status::RunTasksResponse;
use taskboard::types::ResourceKind;
use taskboard::upload::{ExtensionFilter, UploadDialog, UploadSession};
use taskboard_test_utils::builders::tasks_json;
use taskboard_test_utils::FakeBackend;

type TestResult = Result<(), Box<dyn Error>>;

fn filter() -> ExtensionFilter {
    ExtensionFilter::new(["zip", "geojson"]).expect("valid filter")
}

#[test]
fn only_allowed_extensions_are_kept() {
    let mut session = UploadSession::new(filter());

    let added = session.add_files(["a.zip", "b.txt", "data/c.geojson", "D.ZIP", "zip"]);

    assert_eq!(added.len(), 2);
    let names: Vec<&str> = session.files().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.zip", "c.geojson"]);
}

#[test]
fn same_file_twice_is_two_entries() {
    let mut session = UploadSession::new(filter());
    let first = session.add_files(["a.zip"]);
    let second = session.add_files(["a.zip"]);

    assert_eq!(session.files().len(), 2);
    assert_ne!(first, second);

    assert!(session.remove_file(first[0]));
    assert!(!session.remove_file(first[0]));
    assert_eq!(session.files().len(), 1);
}

#[test]
fn leading_dots_in_extensions_are_ignored() {
    let filter = ExtensionFilter::new([".zip", " "]).expect("valid filter");
    assert_eq!(filter.extensions(), ["zip".to_string()]);
    assert!(filter.allows("x.zip"));
}

#[tokio::test]
async fn empty_submit_never_reaches_the_backend() -> TestResult {
    let backend = FakeBackend::new();
    let session = UploadSession::new(filter());

    let result = session.submit(&backend, &MockFileSystem::new()).await;

    assert!(matches!(result, Err(DashboardError::NoFilesSelected)));
    assert!(backend.calls().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_confirm_warns_and_stays_open() -> TestResult {
    let backend = FakeBackend::new();
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, Duration::from_secs(8));
    let mut notices = common::notices();
    let mut dialog = UploadDialog::new(filter());
    dialog.open();

    let response = dialog
        .confirm(&backend, &MockFileSystem::new(), &mut table, &mut notices)
        .await;

    assert!(response.is_none());
    assert!(dialog.is_open());
    assert!(backend.calls().is_empty());
    let notice = notices.latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "No files selected!");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn confirm_sends_one_request_then_closes_and_refreshes() -> TestResult {
    common::init_tracing();
    let backend = FakeBackend::new()
        .with_tasks(tasks_json(1, "ACCEPTED"))
        .with_run_tasks_response(RunTasksResponse {
            message: "ok".to_string(),
            errors: vec![],
        });
    let fs = MockFileSystem::new();
    fs.add_file("in/a.zip", b"AAA".to_vec());
    fs.add_file("in/b.txt", b"BBB".to_vec());
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, Duration::from_secs(8));
    let mut notices = common::notices();
    let mut dialog = UploadDialog::new(filter());

    dialog.open();
    dialog.session_mut().add_files(["in/a.zip", "in/b.txt"]);
    dialog.session_mut().set_name("survey");
    let response = dialog.confirm(&backend, &fs, &mut table, &mut notices).await;

    assert_eq!(
        response,
        Some(RunTasksResponse {
            message: "ok".to_string(),
            errors: vec![],
        })
    );
    assert_eq!(
        backend.run_tasks_calls(),
        vec![(
            vec![UploadFile {
                file_name: "a.zip".to_string(),
                bytes: b"AAA".to_vec(),
            }],
            "survey".to_string()
        )]
    );
    assert!(!dialog.is_open());
    assert!(dialog.session().is_empty());
    assert_eq!(backend.fetch_count("tasks"), 1);
    assert_eq!(table.rows().len(), 1);

    let notice = notices.latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "ok");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn partial_failure_lists_each_error() -> TestResult {
    let backend = FakeBackend::new().with_run_tasks_response(RunTasksResponse {
        message: "created 1 of 3".to_string(),
        errors: vec!["b.zip: bad archive".to_string(), "c.zip: empty".to_string()],
    });
    let fs = MockFileSystem::new();
    fs.add_file("a.zip", b"A".to_vec());
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, Duration::from_secs(8));
    let mut notices = common::notices();
    let mut dialog = UploadDialog::new(filter());

    dialog.open();
    dialog.session_mut().add_files(["a.zip"]);
    dialog.confirm(&backend, &fs, &mut table, &mut notices).await;

    let notice = notices.latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "b.zip: bad archive\nc.zip: empty");
    assert!(!dialog.is_open());
    assert_eq!(backend.fetch_count("tasks"), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn transport_error_keeps_the_dialog_open() -> TestResult {
    let backend = FakeBackend::new();
    backend.fail_run_tasks(true);
    let fs = MockFileSystem::new();
    fs.add_file("a.zip", b"A".to_vec());
    let (mut table, _rx) = common::table(ResourceKind::Tasks, 10, Duration::from_secs(8));
    let mut notices = common::notices();
    let mut dialog = UploadDialog::new(filter());

    dialog.open();
    dialog.session_mut().add_files(["a.zip"]);
    let response = dialog.confirm(&backend, &fs, &mut table, &mut notices).await;

    assert!(response.is_none());
    assert!(dialog.is_open());
    assert_eq!(dialog.session().files().len(), 1);
    assert_eq!(backend.fetch_count("tasks"), 0);
    let notice = notices.latest().expect("a notice");
    assert_eq!(notice.level, NoticeLevel::Danger);
    assert_eq!(notice.message, "Error uploading files!");
    Ok(())
}
