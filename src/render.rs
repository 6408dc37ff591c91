// src/render.rs

//! Terminal output: frame layout, theme palettes, and the spinner shown
//! while an action runs.

use std::fmt::Write as _;
use std::time::Duration;

use console::{pad_str, Alignment, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::coordinator::{ActionControl, NoopControl};
use crate::engine::{ActionRequest, DashboardView, Frame};
use crate::input::HELP_TEXT;
use crate::notice::NoticeLevel;
use crate::status::{Badge, GroupStatistics, ResolvedStatus};
use crate::table::{Column, StatusBundle, TableConfig, TableRow};
use crate::types::Theme;

/// Styles for one theme.
#[derive(Debug, Clone)]
pub struct Palette {
    pub heading: Style,
    pub muted: Style,
    pub secondary: Style,
    pub warning: Style,
    pub success: Style,
    pub danger: Style,
    pub info: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                heading: Style::new().blue().bold(),
                muted: Style::new().dim(),
                secondary: Style::new().black().bright(),
                warning: Style::new().yellow(),
                success: Style::new().green(),
                danger: Style::new().red(),
                info: Style::new().blue(),
            },
            Theme::Dark => Self {
                heading: Style::new().cyan().bold(),
                muted: Style::new().white().dim(),
                secondary: Style::new().white(),
                warning: Style::new().yellow().bright(),
                success: Style::new().green().bright(),
                danger: Style::new().red().bright(),
                info: Style::new().cyan().bright(),
            },
        }
    }

    pub fn badge(&self, badge: Badge) -> &Style {
        match badge {
            Badge::Secondary => &self.secondary,
            Badge::Warning => &self.warning,
            Badge::Success => &self.success,
            Badge::Danger => &self.danger,
            Badge::Info => &self.info,
        }
    }

    fn notice(&self, level: NoticeLevel) -> &Style {
        match level {
            NoticeLevel::Success => &self.success,
            NoticeLevel::Warning => &self.warning,
            NoticeLevel::Danger => &self.danger,
        }
    }
}

/// Lay out a complete frame as text.
pub fn render_frame(frame: &Frame<'_>) -> String {
    let palette = Palette::for_theme(frame.theme);
    let mut out = String::new();

    let _ = writeln!(out, "{}", render_statistics(frame.statistics, &palette));
    let _ = writeln!(out);

    for notice in frame.notices {
        let _ = writeln!(out, "{}", palette.notice(notice.level).apply_to(&notice.message));
    }
    if !frame.notices.is_empty() {
        let _ = writeln!(out);
    }

    let table = frame.table;
    let _ = writeln!(
        out,
        "{}  {}",
        palette.heading.apply_to(capitalize(table.kind().as_str())),
        palette.muted.apply_to(format!(
            "page {}/{}, {} rows",
            table.page() + 1,
            table.page_count(),
            table.rows().len()
        ))
    );

    let columns = table.config().columns;
    let header: Vec<String> = columns
        .iter()
        .map(|c| cell(&palette.heading.apply_to(c.title).to_string(), c.width))
        .collect();
    let _ = writeln!(out, "{}", header.join(" "));

    if table.is_switching() || !table.is_loaded() {
        let _ = writeln!(out, "{}", palette.muted.apply_to("Loading..."));
    } else if table.rows().is_empty() {
        let _ = writeln!(out, "{}", palette.muted.apply_to("No data"));
    } else {
        for row in table.visible_rows() {
            let _ = writeln!(out, "{}", render_row(row, columns, &palette));
        }
    }

    if frame.upload.is_open() {
        let _ = writeln!(out);
        render_upload(&mut out, frame, &palette);
    }

    if frame.show_help {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", palette.heading.apply_to("Commands"));
        for line in HELP_TEXT.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    out
}

/// Header plus every row, for one-shot listing.
pub fn render_list(config: &TableConfig, rows: &[TableRow], theme: Theme) -> String {
    let palette = Palette::for_theme(theme);
    let mut out = String::new();
    let header: Vec<String> = config
        .columns
        .iter()
        .map(|c| cell(&palette.heading.apply_to(c.title).to_string(), c.width))
        .collect();
    let _ = writeln!(out, "{}", header.join(" "));
    if rows.is_empty() {
        let _ = writeln!(out, "{}", palette.muted.apply_to("No data"));
    }
    for row in rows {
        let _ = writeln!(out, "{}", render_row(row, config.columns, &palette));
    }
    out
}

/// Single statistics line, as shown above the table.
pub fn render_statistics_line(stats: &GroupStatistics, theme: Theme) -> String {
    render_statistics(Some(stats), &Palette::for_theme(theme))
}

fn render_row(row: &TableRow, columns: &[Column], palette: &Palette) -> String {
    let status = match &row.status {
        StatusBundle::Task { kpt, kad } => [
            status_part(StatusBundle::KPT_PREFIX, kpt, palette),
            status_part(StatusBundle::KAD_PREFIX, kad, palette),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("  "),
        StatusBundle::Group(stats) => group_badges(stats, palette),
    };
    let actions: Vec<&str> = row.actions.iter().map(|a| a.as_str()).collect();

    let cells = [
        row.id.to_string(),
        row.name.clone(),
        status,
        row.added.clone(),
        actions.join("/"),
    ];

    columns
        .iter()
        .zip(cells.iter())
        .map(|(column, text)| cell(text, column.width))
        .collect::<Vec<_>>()
        .join(" ")
}

fn status_part(prefix: &str, status: &ResolvedStatus, palette: &Palette) -> Option<String> {
    let badge = status.badge?;
    Some(format!(
        "{} {}",
        palette.muted.apply_to(prefix),
        palette.badge(badge).apply_to(&status.label)
    ))
}

fn group_badges(stats: &GroupStatistics, palette: &Palette) -> String {
    stats
        .badges()
        .iter()
        .map(|(badge, text)| palette.badge(*badge).apply_to(text).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_statistics(stats: Option<&GroupStatistics>, palette: &Palette) -> String {
    let heading = palette.heading.apply_to("Statistics");
    match stats {
        Some(stats) => format!("{heading}  {}", group_badges(stats, palette)),
        None => format!("{heading}  {}", palette.muted.apply_to("-")),
    }
}

fn render_upload(out: &mut String, frame: &Frame<'_>, palette: &Palette) {
    let session = frame.upload.session();
    let _ = writeln!(out, "{}", palette.heading.apply_to("Upload"));
    let _ = writeln!(
        out,
        "  name: {}",
        if session.name().is_empty() {
            palette.muted.apply_to("(none)").to_string()
        } else {
            session.name().to_string()
        }
    );
    let _ = writeln!(
        out,
        "  {}",
        palette.muted.apply_to(format!(
            "allowed: {}",
            session.filter().extensions().join(", ")
        ))
    );
    if session.is_empty() {
        let _ = writeln!(out, "  {}", palette.muted.apply_to("no files selected"));
    }
    for (position, file) in session.files().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", position + 1, file.name);
    }
}

fn cell(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, None).into_owned()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Draws frames on stdout, replacing the previous one.
#[derive(Debug)]
pub struct TerminalView {
    term: Term,
    clear: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        let term = Term::stdout();
        let clear = term.features().is_attended();
        Self { term, clear }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView for TerminalView {
    fn render(&mut self, frame: &Frame<'_>) {
        if self.clear {
            if let Err(error) = self.term.clear_screen() {
                warn!(%error, "could not clear terminal");
            }
        }
        if let Err(error) = self.term.write_str(&render_frame(frame)) {
            warn!(%error, "could not write frame");
        }
    }

    fn action_control(&mut self, request: &ActionRequest) -> Box<dyn ActionControl> {
        if self.clear {
            Box::new(SpinnerControl::new(format!(
                "{} {} {}...",
                request.action,
                request.kind.singular(),
                request.id
            )))
        } else {
            Box::new(NoopControl)
        }
    }
}

/// Spinner line standing in for a disabled button while an action runs.
#[derive(Debug)]
pub struct SpinnerControl {
    message: String,
    spinner: Option<ProgressBar>,
}

impl SpinnerControl {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.spinner.is_some()
    }
}

impl ActionControl for SpinnerControl {
    fn set_busy(&mut self, busy: bool) {
        if busy {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message(self.message.clone());
            spinner.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
