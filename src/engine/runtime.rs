// src/engine/runtime.rs

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::api::DashboardBackend;
use crate::config::ConfigFile;
use crate::coordinator::{ActionControl, RefreshCoordinator};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::notice::{Notice, NoticeBoard};
use crate::prefs::{PreferenceStore, Preferences};
use crate::stats::StatisticsPoller;
use crate::status::Statistics;
use crate::table::{BaseOptions, ResourceTable};
use crate::types::{ResourceKind, Theme};
use crate::upload::{ExtensionFilter, UploadDialog};

use super::core::CoreDashboard;
use super::{
    ActionRequest, CoreCommand, DashboardEvent, PageMove, RefreshTimer, RuntimeOptions,
    TimerTarget, UploadCommand,
};

/// Everything shown on screen plus the services that keep it current.
#[derive(Debug)]
pub struct Dashboard {
    pub table: ResourceTable,
    pub stats: StatisticsPoller,
    pub coordinator: RefreshCoordinator,
    pub upload: UploadDialog,
    pub notices: NoticeBoard,
    pub prefs: PreferenceStore,
    pub fs: Arc<dyn FileSystem>,
    pub theme: Theme,
    pub show_help: bool,
}

impl Dashboard {
    /// Wire the components from validated configuration and stored
    /// preferences. Timers send their ticks on `tx` but are not started.
    pub fn new(
        config: &ConfigFile,
        prefs: PreferenceStore,
        stored: Preferences,
        fs: Arc<dyn FileSystem>,
        tx: mpsc::Sender<DashboardEvent>,
    ) -> Result<Self> {
        let table_timer = RefreshTimer::new(TimerTarget::Table, config.table_interval, tx.clone());
        let stats_timer = RefreshTimer::new(TimerTarget::Statistics, config.statistics_interval, tx);
        let filter = ExtensionFilter::new(&config.allowed_extensions)?;

        Ok(Self {
            table: ResourceTable::new(
                stored.table_type,
                BaseOptions::new(config.page_size),
                table_timer,
            ),
            stats: StatisticsPoller::new(stats_timer),
            coordinator: RefreshCoordinator::new(fs.clone(), config.download_dir.clone()),
            upload: UploadDialog::new(filter),
            notices: NoticeBoard::new(config.notice_timeout),
            prefs,
            fs,
            theme: stored.selected_theme,
            show_help: false,
        })
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            table: &self.table,
            statistics: self.stats.current(),
            notices: self.notices.notices(),
            upload: &self.upload,
            theme: self.theme,
            show_help: self.show_help,
        }
    }

    fn persist(&self, change: impl FnOnce(&mut Preferences)) {
        if let Err(error) = self.prefs.update(change) {
            warn!(%error, path = ?self.prefs.path(), "could not save preferences");
        }
    }
}

/// Borrowed snapshot handed to a [`DashboardView`] for drawing.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub table: &'a ResourceTable,
    pub statistics: Option<&'a Statistics>,
    pub notices: &'a [Notice],
    pub upload: &'a UploadDialog,
    pub theme: Theme,
    pub show_help: bool,
}

/// Output side of the dashboard.
pub trait DashboardView: Send {
    fn render(&mut self, frame: &Frame<'_>);

    /// Control representing the trigger of `request` while it runs.
    fn action_control(&mut self, request: &ActionRequest) -> Box<dyn ActionControl>;
}

enum Wake {
    Event(DashboardEvent),
    NoticeExpired,
    Closed,
}

/// Drives a [`Dashboard`] in response to [`DashboardEvent`]s.
///
/// This is the IO shell around [`CoreDashboard`]: it reads events, asks the
/// core what to do and awaits each resulting command before taking the next
/// event, so a running action never overlaps a refresh.
pub struct Runtime<B: DashboardBackend, V: DashboardView> {
    core: CoreDashboard,
    dashboard: Dashboard,
    backend: B,
    view: V,
    event_rx: mpsc::Receiver<DashboardEvent>,
    pending: VecDeque<DashboardEvent>,
    options: RuntimeOptions,
}

impl<B: DashboardBackend, V: DashboardView> fmt::Debug for Runtime<B, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("dashboard", &self.dashboard)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<B: DashboardBackend, V: DashboardView> Runtime<B, V> {
    pub fn new(
        dashboard: Dashboard,
        backend: B,
        view: V,
        event_rx: mpsc::Receiver<DashboardEvent>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            core: CoreDashboard::new(dashboard.table.kind()),
            dashboard,
            backend,
            view,
            event_rx,
            pending: VecDeque::new(),
            options,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn core(&self) -> &CoreDashboard {
        &self.core
    }

    /// Main event loop.
    ///
    /// - Performs the first table load and starts both timers.
    /// - Consumes `DashboardEvent`s and feeds them into the core.
    /// - Executes the returned commands, then redraws.
    ///
    /// Returns the dashboard so callers can inspect the final state.
    pub async fn run(mut self) -> Result<Dashboard> {
        info!(kind = %self.core.kind(), "dashboard runtime started");

        let kind = self.core.kind();
        if let Err(error) = self.dashboard.table.initialize(kind, &self.backend).await {
            warn!(%error, %kind, "initial table load failed");
            self.dashboard
                .notices
                .danger(format!("Error loading {}!", kind.as_str()));
        }

        if self.options.exit_after_first_frame {
            self.dashboard.stats.poll(&self.backend).await;
            self.render();
            info!("single frame rendered; exiting");
            return Ok(self.dashboard);
        }

        self.dashboard.table.start_auto_refresh();
        self.dashboard.stats.start();
        self.render();

        loop {
            let event = match self.next_wake().await {
                Wake::Event(event) => event,
                Wake::NoticeExpired => {
                    self.render();
                    continue;
                }
                Wake::Closed => {
                    info!("dashboard event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "dashboard received event");

            let step = self.core.step(event);
            for command in step.commands {
                self.execute_command(command).await;
            }

            if !step.keep_running {
                info!("core requested exit; stopping dashboard");
                break;
            }

            // Completion events are handled before redrawing.
            if self.pending.is_empty() {
                self.render();
            }
        }

        self.dashboard.table.stop_auto_refresh();
        self.dashboard.stats.stop();
        info!("dashboard runtime exiting");
        Ok(self.dashboard)
    }

    async fn next_wake(&mut self) -> Wake {
        if let Some(event) = self.pending.pop_front() {
            return Wake::Event(event);
        }

        match self.dashboard.notices.next_expiry() {
            Some(deadline) => tokio::select! {
                event = self.event_rx.recv() => event.map_or(Wake::Closed, Wake::Event),
                _ = sleep_until(deadline) => Wake::NoticeExpired,
            },
            None => self.event_rx.recv().await.map_or(Wake::Closed, Wake::Event),
        }
    }

    fn render(&mut self) {
        self.dashboard.notices.prune(Instant::now());
        let frame = self.dashboard.frame();
        self.view.render(&frame);
        self.dashboard.show_help = false;
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::RefreshTable {
                reset_pagination,
                tick,
            } => self.refresh_table(reset_pagination, tick).await,
            CoreCommand::PollStatistics { tick } => {
                if self.dashboard.stats.accepts_tick(tick) {
                    self.dashboard.stats.poll(&self.backend).await;
                } else {
                    debug!(generation = tick, "dropping stale statistics tick");
                }
            }
            CoreCommand::SwitchTable(kind) => self.switch_table(kind).await,
            CoreCommand::RunAction(request) => {
                let mut control = self.view.action_control(&request);
                let outcome = self
                    .dashboard
                    .coordinator
                    .run(
                        request,
                        &mut self.dashboard.table,
                        &self.backend,
                        control.as_mut(),
                        &mut self.dashboard.notices,
                    )
                    .await;
                self.pending.push_back(DashboardEvent::ActionFinished {
                    request,
                    success: outcome.success,
                });
            }
            CoreCommand::Paginate(direction) => {
                let moved = match direction {
                    PageMove::Next => self.dashboard.table.next_page(),
                    PageMove::Prev => self.dashboard.table.prev_page(),
                };
                if !moved {
                    debug!(?direction, page = self.dashboard.table.page(), "no page to move to");
                }
            }
            CoreCommand::Upload(upload) => self.upload(upload).await,
            CoreCommand::ToggleTheme => {
                let theme = self.dashboard.theme.toggled();
                self.dashboard.theme = theme;
                self.dashboard.persist(|p| p.selected_theme = theme);
                info!(%theme, "theme changed");
            }
            CoreCommand::DismissNotice => {
                self.dashboard.notices.dismiss_latest();
            }
            CoreCommand::ShowHelp => self.dashboard.show_help = true,
            CoreCommand::Notify(level, message) => self.dashboard.notices.push(level, message),
            CoreCommand::RequestExit => {
                info!("core issued RequestExit command");
            }
        }
    }

    async fn refresh_table(&mut self, reset_pagination: bool, tick: Option<u64>) {
        if let Some(generation) = tick {
            if !self.dashboard.table.accepts_tick(generation) {
                debug!(generation, "dropping stale table tick");
                return;
            }
        }

        if let Err(error) = self
            .dashboard
            .table
            .refresh(&self.backend, reset_pagination)
            .await
        {
            warn!(%error, kind = %self.dashboard.table.kind(), "table refresh failed");
            if tick.is_none() {
                self.dashboard.notices.danger(format!(
                    "Error loading {}!",
                    self.dashboard.table.kind().as_str()
                ));
            }
        }
    }

    async fn switch_table(&mut self, kind: ResourceKind) {
        if let Err(error) = self.dashboard.table.switch_kind(kind, &self.backend).await {
            warn!(%error, %kind, "loading switched table failed");
            self.dashboard
                .notices
                .danger(format!("Error loading {}!", kind.as_str()));
        }
        self.dashboard.persist(|p| p.table_type = kind);
        info!(%kind, "table switched");
    }

    async fn upload(&mut self, command: UploadCommand) {
        let dialog = &mut self.dashboard.upload;
        match command {
            UploadCommand::Open => dialog.open(),
            UploadCommand::Add(paths) => {
                if !dialog.is_open() {
                    dialog.open();
                }
                let added = dialog.session_mut().add_files(&paths);
                let skipped = paths.len() - added.len();
                if skipped > 0 {
                    let allowed = dialog.session().filter().extensions().join(", ");
                    self.dashboard.notices.warning(format!(
                        "Skipped {skipped} file(s); allowed extensions: {allowed}"
                    ));
                }
            }
            UploadCommand::Remove(position) => {
                let id = position
                    .checked_sub(1)
                    .and_then(|index| dialog.session().files().get(index))
                    .map(|file| file.id);
                match id {
                    Some(id) => {
                        dialog.session_mut().remove_file(id);
                    }
                    None => self
                        .dashboard
                        .notices
                        .warning(format!("No pending file #{position}")),
                }
            }
            UploadCommand::Name(name) => dialog.session_mut().set_name(name),
            UploadCommand::Submit => {
                dialog
                    .confirm(
                        &self.backend,
                        self.dashboard.fs.as_ref(),
                        &mut self.dashboard.table,
                        &mut self.dashboard.notices,
                    )
                    .await;
            }
            UploadCommand::Cancel => dialog.dismiss(),
        }
    }
}

