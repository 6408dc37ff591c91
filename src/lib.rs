// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod input;
pub mod logging;
pub mod notice;
pub mod prefs;
pub mod render;
pub mod stats;
pub mod status;
pub mod table;
pub mod types;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{DashboardBackend, HttpBackend};
use crate::cli::{CliArgs, Command, KindArg, ThemeArg};
use crate::config::validate::validate_base_url;
use crate::config::{load_or_default, ConfigFile};
use crate::coordinator::default_download_name;
use crate::engine::{ActionRequest, Dashboard, DashboardEvent, Runtime, RuntimeOptions};
use crate::errors::DashboardError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::prefs::PreferenceStore;
use crate::render::TerminalView;
use crate::table::{derive_rows, BaseOptions, TableConfig};
use crate::types::{ResourceAction, ResourceKind};
use crate::upload::{ExtensionFilter, UploadSession};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus the `--base-url` override)
/// - the HTTP backend
/// - preferences on the real filesystem
/// - either the interactive runtime or a one-shot command
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    if let Some(ref raw) = args.base_url {
        cfg = cfg.with_base_url(validate_base_url(raw)?);
    }
    debug!(base_url = %cfg.base_url, "configuration loaded");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let prefs = PreferenceStore::new(fs.clone(), &cfg.state_dir);

    let (base_url, timeout) = (cfg.base_url.clone(), cfg.request_timeout);
    let backend = move || HttpBackend::new(base_url.clone(), timeout);

    match args.command {
        Command::Watch { kind, once } => watch(cfg, fs, prefs, backend()?, kind, once).await,
        Command::List { kind } => list(&cfg, &prefs, &backend()?, kind.into()).await,
        Command::Stats => {
            let stats = backend()?.statistics().await?;
            let theme = prefs.load().selected_theme;
            println!("{}", render::render_statistics_line(&stats, theme));
            Ok(())
        }
        Command::Upload { files, name } => upload(&cfg, fs.as_ref(), &backend()?, files, name).await,
        Command::Delete { kind, id } => mutate(&backend()?, kind, id, ResourceAction::Delete).await,
        Command::Restart { kind, id } => {
            mutate(&backend()?, kind, id, ResourceAction::Restart).await
        }
        Command::Download { kind, id } => download(&cfg, fs.as_ref(), &backend()?, kind, id).await,
        Command::Theme { theme } => set_theme(&prefs, theme),
    }
}

async fn watch(
    cfg: ConfigFile,
    fs: Arc<dyn FileSystem>,
    prefs: PreferenceStore,
    backend: HttpBackend,
    kind: Option<KindArg>,
    once: bool,
) -> Result<()> {
    let mut stored = prefs.load();
    if let Some(kind) = kind {
        stored.table_type = kind.into();
    }

    let (tx, rx) = mpsc::channel::<DashboardEvent>(64);
    let dashboard = Dashboard::new(&cfg, prefs, stored, fs, tx.clone())?;

    if !once {
        // Ctrl-C → graceful shutdown.
        let shutdown_tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            let _ = shutdown_tx.send(DashboardEvent::ShutdownRequested).await;
        });

        input::spawn_stdin_reader(tx.clone());
    }
    drop(tx);

    let options = RuntimeOptions {
        exit_after_first_frame: once,
    };
    let runtime = Runtime::new(dashboard, backend, TerminalView::new(), rx, options);
    runtime.run().await?;
    Ok(())
}

async fn list(
    cfg: &ConfigFile,
    prefs: &PreferenceStore,
    backend: &HttpBackend,
    kind: ResourceKind,
) -> Result<()> {
    let config = TableConfig::for_kind(kind, BaseOptions::new(cfg.page_size));
    let values = backend.fetch_collection(config.source).await?;
    let rows = derive_rows(&config, values);
    print!(
        "{}",
        render::render_list(&config, &rows, prefs.load().selected_theme)
    );
    Ok(())
}

async fn upload(
    cfg: &ConfigFile,
    fs: &dyn FileSystem,
    backend: &HttpBackend,
    files: Vec<PathBuf>,
    name: String,
) -> Result<()> {
    let mut session = UploadSession::new(ExtensionFilter::new(&cfg.allowed_extensions)?);
    let added = session.add_files(&files);
    if added.len() < files.len() {
        warn!(
            skipped = files.len() - added.len(),
            allowed = ?session.filter().extensions(),
            "some files were skipped by the extension filter"
        );
    }
    session.set_name(name);

    let response = match session.submit(backend, fs).await {
        Ok(response) => response,
        Err(DashboardError::NoFilesSelected) => bail!("No files selected!"),
        Err(e) => return Err(e).context("Error uploading files!"),
    };

    if response.errors.is_empty() {
        println!("{}", response.message);
    } else {
        for error in &response.errors {
            eprintln!("{error}");
        }
    }
    Ok(())
}

async fn mutate(
    backend: &HttpBackend,
    kind: KindArg,
    id: i64,
    action: ResourceAction,
) -> Result<()> {
    let kind = ResourceKind::from(kind);
    let response = backend
        .mutate(kind, id, action)
        .await
        .with_context(|| action.error_text(kind))?;
    info!(%kind, id, %action, "action finished");
    println!("{}", response.message);
    Ok(())
}

async fn download(
    cfg: &ConfigFile,
    fs: &dyn FileSystem,
    backend: &HttpBackend,
    kind: KindArg,
    id: i64,
) -> Result<()> {
    let request = ActionRequest {
        kind: kind.into(),
        id,
        action: ResourceAction::Download,
    };
    let download = backend
        .download(request.kind, id)
        .await
        .with_context(|| request.action.error_text(request.kind))?;
    let file_name = download
        .file_name
        .unwrap_or_else(|| default_download_name(&request));
    let path = cfg.download_dir.join(file_name);
    fs.write(&path, &download.bytes)?;
    println!("Saved {}", path.display());
    Ok(())
}

fn set_theme(prefs: &PreferenceStore, theme: Option<ThemeArg>) -> Result<()> {
    let updated = prefs.update(|p| {
        p.selected_theme = match theme {
            Some(theme) => theme.into(),
            None => p.selected_theme.toggled(),
        };
    })?;
    println!("{}", updated.selected_theme);
    Ok(())
}
