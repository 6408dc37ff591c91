// tests/http_helpers.rs

use taskboard::api::action_path;
use taskboard::api::http::content_disposition_file_name;
use taskboard::types::{ResourceAction, ResourceKind};

#[test]
fn action_paths() {
    assert_eq!(
        action_path(ResourceKind::Tasks, 5, ResourceAction::Delete),
        "tasks/5/delete"
    );
    assert_eq!(
        action_path(ResourceKind::Groups, 2, ResourceAction::Restart),
        "groups/2/restart"
    );
    assert_eq!(
        action_path(ResourceKind::Groups, 9, ResourceAction::Download),
        "groups/9/download"
    );
}

#[test]
fn content_disposition_forms() {
    assert_eq!(
        content_disposition_file_name("attachment; filename=\"task_1.zip\""),
        Some("task_1.zip".to_string())
    );
    assert_eq!(
        content_disposition_file_name("attachment; filename=plain.zip"),
        Some("plain.zip".to_string())
    );
    assert_eq!(
        content_disposition_file_name(
            "attachment; filename=\"fallback.zip\"; filename*=UTF-8''r%C3%A9sultat.zip"
        ),
        Some("résultat.zip".to_string())
    );
    assert_eq!(content_disposition_file_name("attachment"), None);
}

#[test]
fn content_disposition_cannot_escape_the_download_dir() {
    assert_eq!(
        content_disposition_file_name("attachment; filename=\"../../etc/passwd\""),
        Some("passwd".to_string())
    );
}
