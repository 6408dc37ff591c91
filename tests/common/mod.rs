#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use taskboard::config::ConfigFile;
use taskboard::engine::{Dashboard, DashboardEvent, RefreshTimer, TimerTarget};
use taskboard::fs::mock::MockFileSystem;
use taskboard::fs::FileSystem;
use taskboard::notice::NoticeBoard;
use taskboard::prefs::PreferenceStore;
use taskboard::table::{BaseOptions, ResourceTable};
use taskboard::types::ResourceKind;

pub use taskboard_test_utils::init_tracing;

/// A table whose timer ticks into the returned receiver.
pub fn table(
    kind: ResourceKind,
    page_size: usize,
    period: Duration,
) -> (ResourceTable, mpsc::Receiver<DashboardEvent>) {
    let (tx, rx) = mpsc::channel(64);
    let timer = RefreshTimer::new(TimerTarget::Table, period, tx);
    (ResourceTable::new(kind, BaseOptions::new(page_size), timer), rx)
}

pub fn notices() -> NoticeBoard {
    NoticeBoard::new(Duration::from_secs(3))
}

/// Dashboard on an in-memory filesystem, with preferences loaded from it.
pub fn dashboard(
    config: &ConfigFile,
    fs: &MockFileSystem,
    tx: mpsc::Sender<DashboardEvent>,
) -> Dashboard {
    let fs: Arc<dyn FileSystem> = Arc::new(fs.clone());
    let prefs = PreferenceStore::new(fs.clone(), &config.state_dir);
    let stored = prefs.load();
    Dashboard::new(config, prefs, stored, fs, tx).expect("dashboard should build")
}
