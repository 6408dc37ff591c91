// tests/input_parsing.rs

use std::path::PathBuf;

use taskboard::engine::{PageMove, UploadCommand, UserCommand};
use taskboard::input::parse_command;
use taskboard::types::{ResourceAction, ResourceKind};

fn parse(line: &str) -> UserCommand {
    parse_command(line)
        .expect("line should parse")
        .expect("line should yield a command")
}

#[test]
fn blank_lines_are_ignored() {
    assert_eq!(parse_command("   "), Ok(None));
    assert_eq!(parse_command(""), Ok(None));
}

#[test]
fn row_actions() {
    assert_eq!(
        parse("delete 12"),
        UserCommand::Action {
            id: 12,
            action: ResourceAction::Delete
        }
    );
    assert_eq!(
        parse("RESTART 3"),
        UserCommand::Action {
            id: 3,
            action: ResourceAction::Restart
        }
    );
    assert_eq!(
        parse("download 7"),
        UserCommand::Action {
            id: 7,
            action: ResourceAction::Download
        }
    );
    assert!(parse_command("delete").is_err());
    assert!(parse_command("delete abc").is_err());
}

#[test]
fn switching_and_paging() {
    assert_eq!(parse("switch"), UserCommand::Switch(None));
    assert_eq!(parse("switch groups"), UserCommand::Switch(Some(ResourceKind::Groups)));
    assert_eq!(parse("switch task"), UserCommand::Switch(Some(ResourceKind::Tasks)));
    assert!(parse_command("switch jobs").is_err());
    assert_eq!(parse("next"), UserCommand::Page(PageMove::Next));
    assert_eq!(parse("p"), UserCommand::Page(PageMove::Prev));
}

#[test]
fn upload_commands() {
    assert_eq!(parse("upload"), UserCommand::Upload(UploadCommand::Open));
    assert_eq!(
        parse("add a.zip dir/b.geojson"),
        UserCommand::Upload(UploadCommand::Add(vec![
            PathBuf::from("a.zip"),
            PathBuf::from("dir/b.geojson")
        ]))
    );
    assert!(parse_command("add").is_err());
    assert_eq!(parse("remove 2"), UserCommand::Upload(UploadCommand::Remove(2)));
    assert_eq!(
        parse("name  spring survey "),
        UserCommand::Upload(UploadCommand::Name("spring survey".to_string()))
    );
    assert_eq!(parse("submit"), UserCommand::Upload(UploadCommand::Submit));
    assert_eq!(parse("cancel"), UserCommand::Upload(UploadCommand::Cancel));
}

#[test]
fn add_accepts_quoted_paths_with_spaces() {
    assert_eq!(
        parse("add \"field data/a 1.zip\" 'b c.geojson' d.zip"),
        UserCommand::Upload(UploadCommand::Add(vec![
            PathBuf::from("field data/a 1.zip"),
            PathBuf::from("b c.geojson"),
            PathBuf::from("d.zip"),
        ]))
    );
    assert!(parse_command("add \"unterminated.zip").is_err());
}

#[test]
fn misc_commands() {
    assert_eq!(parse("theme"), UserCommand::ToggleTheme);
    assert_eq!(parse("dismiss"), UserCommand::Dismiss);
    assert_eq!(parse("?"), UserCommand::Help);
    assert_eq!(parse("q"), UserCommand::Quit);
    assert!(parse_command("frobnicate").is_err());
}
