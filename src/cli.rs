// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::{ResourceId, ResourceKind, Theme};

/// Command-line arguments for `taskboard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskboard",
    version,
    about = "Monitor and manage background tasks through their REST backend.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Taskboard.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding `[server].base_url`.
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKBOARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive dashboard; reads commands from stdin.
    Watch {
        /// Table to start with. Defaults to the last one shown.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Render one frame after the first load, then exit.
        #[arg(long)]
        once: bool,
    },

    /// Print one table.
    List {
        #[arg(value_enum)]
        kind: KindArg,
    },

    /// Print aggregate statistics.
    Stats,

    /// Upload files and start processing them.
    Upload {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Label for the created group.
        #[arg(long, value_name = "LABEL", default_value = "")]
        name: String,
    },

    /// Delete a task or group.
    Delete {
        #[arg(value_enum)]
        kind: KindArg,
        id: ResourceId,
    },

    /// Restart a task or group.
    Restart {
        #[arg(value_enum)]
        kind: KindArg,
        id: ResourceId,
    },

    /// Download the artifacts of a task or group.
    Download {
        #[arg(value_enum)]
        kind: KindArg,
        id: ResourceId,
    },

    /// Set the stored theme, or toggle it when omitted.
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    #[value(alias = "task")]
    Tasks,
    #[value(alias = "group")]
    Groups,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tasks => ResourceKind::Tasks,
            KindArg::Groups => ResourceKind::Groups,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
