// src/table/view.rs

use tracing::{debug, info};

use crate::api::DashboardBackend;
use crate::engine::{RefreshTimer, TimerActivity};
use crate::errors::Result;
use crate::table::config::{BaseOptions, TableConfig};
use crate::table::rows::{derive_rows, TableRow};
use crate::types::ResourceKind;

/// Paginated, sorted view over the tasks or groups collection.
///
/// The table owns its auto-refresh timer; at any time it is bound to exactly
/// one fetch source and has at most one live timer.
#[derive(Debug)]
pub struct ResourceTable {
    config: TableConfig,
    base: BaseOptions,
    rows: Vec<TableRow>,
    page: usize,
    timer: RefreshTimer,
    switching: bool,
    loaded: bool,
}

impl ResourceTable {
    /// Create an unloaded table bound to `kind`. Call [`Self::initialize`]
    /// to perform the first load.
    pub fn new(kind: ResourceKind, base: BaseOptions, timer: RefreshTimer) -> Self {
        Self {
            config: TableConfig::for_kind(kind, base),
            base,
            rows: Vec::new(),
            page: 0,
            timer,
            switching: false,
            loaded: false,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.config.kind
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Discard current rows, bind to `kind` and perform the first load.
    pub async fn initialize<B>(&mut self, kind: ResourceKind, backend: &B) -> Result<usize>
    where
        B: DashboardBackend + ?Sized,
    {
        self.rows.clear();
        self.loaded = false;
        self.config = TableConfig::for_kind(kind, self.base);
        self.page = 0;
        info!(%kind, "table initialized");
        self.refresh(backend, true).await
    }

    /// Re-fetch and re-derive rows.
    ///
    /// With `reset_pagination = false` the current page is kept (clamped if
    /// the collection shrank). On error the previous rows stay untouched.
    pub async fn refresh<B>(&mut self, backend: &B, reset_pagination: bool) -> Result<usize>
    where
        B: DashboardBackend + ?Sized,
    {
        let values = backend.fetch_collection(self.config.source).await?;
        self.rows = derive_rows(&self.config, values);
        self.loaded = true;

        if reset_pagination {
            self.page = 0;
        } else {
            self.page = self.page.min(self.page_count().saturating_sub(1));
        }

        debug!(
            kind = %self.config.kind,
            rows = self.rows.len(),
            page = self.page,
            "table refreshed"
        );
        Ok(self.rows.len())
    }

    pub fn start_auto_refresh(&mut self) {
        self.timer.start();
    }

    pub fn stop_auto_refresh(&mut self) {
        self.timer.stop();
    }

    pub fn auto_refresh_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn auto_refresh_activity(&self) -> TimerActivity {
        self.timer.activity()
    }

    /// Whether a table tick of `generation` comes from the live timer.
    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.timer.accepts(generation)
    }

    /// First half of a kind switch: stop ticking and clear the view.
    pub fn begin_switch(&mut self) {
        self.stop_auto_refresh();
        self.rows.clear();
        self.loaded = false;
        self.switching = true;
    }

    /// Second half of a kind switch: bind, load from page one, resume ticking.
    ///
    /// Auto-refresh is restarted even when the first load fails, so the
    /// table recovers on the next tick.
    pub async fn finish_switch<B>(&mut self, kind: ResourceKind, backend: &B) -> Result<usize>
    where
        B: DashboardBackend + ?Sized,
    {
        let result = self.initialize(kind, backend).await;
        self.switching = false;
        self.start_auto_refresh();
        result
    }

    pub async fn switch_kind<B>(&mut self, kind: ResourceKind, backend: &B) -> Result<usize>
    where
        B: DashboardBackend + ?Sized,
    {
        self.begin_switch();
        self.finish_switch(kind, backend).await
    }

    pub fn is_switching(&self) -> bool {
        self.switching
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, id: i64) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Always at least one, even for an empty table.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.base.page_size).max(1)
    }

    pub fn visible_rows(&self) -> &[TableRow] {
        let start = (self.page * self.base.page_size).min(self.rows.len());
        let end = (start + self.base.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }
}
