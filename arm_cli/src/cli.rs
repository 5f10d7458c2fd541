//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "arm_monitor", version, about = "Arm monitor CLI")]
pub struct Cli {
    /// Path to config TOML (defaults apply if the file does not exist)
    #[arg(long, value_name = "FILE", default_value = "etc/arm_monitor.toml")]
    pub config: PathBuf,

    /// Emit frames and errors as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll both segments and print one status line per tick
    Watch {
        /// Use deterministic simulated sensors instead of the HTTP endpoints
        #[arg(long, action = ArgAction::SetTrue)]
        simulate: bool,
        /// Stop after this many frames (runs until Ctrl-C if omitted)
        #[arg(long, value_name = "N")]
        max_ticks: Option<u64>,
        /// Begin an attempt as soon as the arm is in position
        #[arg(long, action = ArgAction::SetTrue)]
        start: bool,
        /// Override the upper segment endpoint URL
        #[arg(long, value_name = "URL")]
        upper_url: Option<String>,
        /// Override the lower segment endpoint URL
        #[arg(long, value_name = "URL")]
        lower_url: Option<String>,
        /// Override the poll period in milliseconds
        #[arg(long, value_name = "MS")]
        period_ms: Option<u64>,
        /// Override the warning threshold in degrees
        #[arg(long, value_name = "DEG")]
        warning_deg: Option<i32>,
        /// Override the failure threshold in degrees
        #[arg(long, value_name = "DEG")]
        failure_deg: Option<i32>,
    },
    /// One-shot health check: fetch each segment once and report
    Check {
        /// Use deterministic simulated sensors instead of the HTTP endpoints
        #[arg(long, action = ArgAction::SetTrue)]
        simulate: bool,
    },
}
