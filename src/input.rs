// src/input.rs

//! Line-based operator input for the interactive dashboard.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::{DashboardEvent, PageMove, UploadCommand, UserCommand};
use crate::notice::NoticeLevel;
use crate::types::{ResourceAction, ResourceKind};

pub const HELP_TEXT: &str = "\
switch [tasks|groups]   show the other (or the named) table
download <id>           save the artifacts of a row
delete <id>             delete a row
restart <id>            restart a row
next | prev             change page
refresh                 reload the table now
upload                  open the upload dialog
add <path>...           add files to the upload (quote paths with spaces)
remove <n>              drop pending file number n
name <label>            set the upload name
submit | cancel         send or discard the upload
theme                   toggle light/dark
dismiss                 hide the newest notice
help                    show this list
quit                    leave";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, String> {
    let line = line.trim();
    let Some(word) = line.split_whitespace().next() else {
        return Ok(None);
    };
    let rest = line[word.len()..].trim();
    let word = word.to_lowercase();

    let command = match word.as_str() {
        "switch" | "s" => {
            if rest.is_empty() {
                UserCommand::Switch(None)
            } else {
                UserCommand::Switch(Some(rest.parse::<ResourceKind>()?))
            }
        }
        "download" | "delete" | "restart" => {
            let action = word.parse::<ResourceAction>()?;
            UserCommand::Action {
                id: parse_id(rest)?,
                action,
            }
        }
        "next" | "n" => UserCommand::Page(PageMove::Next),
        "prev" | "p" => UserCommand::Page(PageMove::Prev),
        "refresh" | "r" => UserCommand::Refresh,
        "upload" | "u" => UserCommand::Upload(UploadCommand::Open),
        "add" => {
            let paths = shlex::split(rest)
                .ok_or_else(|| format!("unbalanced quotes in '{rest}'"))?;
            if paths.is_empty() {
                return Err("add needs at least one path".to_string());
            }
            UserCommand::Upload(UploadCommand::Add(
                paths.into_iter().map(PathBuf::from).collect(),
            ))
        }
        "remove" => {
            let position = rest
                .parse::<usize>()
                .map_err(|_| format!("remove needs a file number, got '{rest}'"))?;
            UserCommand::Upload(UploadCommand::Remove(position))
        }
        "name" => UserCommand::Upload(UploadCommand::Name(rest.to_string())),
        "submit" => UserCommand::Upload(UploadCommand::Submit),
        "cancel" => UserCommand::Upload(UploadCommand::Cancel),
        "theme" | "t" => UserCommand::ToggleTheme,
        "dismiss" | "d" => UserCommand::Dismiss,
        "help" | "h" | "?" => UserCommand::Help,
        "quit" | "q" | "exit" => UserCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Some(command))
}

fn parse_id(s: &str) -> Result<i64, String> {
    if s.is_empty() {
        return Err("missing row id".to_string());
    }
    s.parse::<i64>().map_err(|_| format!("invalid row id '{s}'"))
}

/// Forward parsed stdin lines to the dashboard.
///
/// Unparseable lines are reported as warnings on the dashboard itself. EOF
/// on stdin is treated as a quit.
pub fn spawn_stdin_reader(tx: mpsc::Sender<DashboardEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("stdin closed");
                    let _ = tx.send(DashboardEvent::Input(UserCommand::Quit)).await;
                    break;
                }
                Err(error) => {
                    warn!(%error, "reading stdin failed");
                    break;
                }
            };

            let event = match parse_command(&line) {
                Ok(Some(command)) => DashboardEvent::Input(command),
                Ok(None) => continue,
                Err(message) => DashboardEvent::Notify(NoticeLevel::Warning, message),
            };

            if tx.send(event).await.is_err() {
                debug!("dashboard gone; stdin reader exiting");
                break;
            }
        }
    })
}
