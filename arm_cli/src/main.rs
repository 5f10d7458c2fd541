mod cli;
mod error_fmt;
mod watch;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use std::io::IsTerminal;
use std::path::Path;

fn load_config(path: &Path) -> eyre::Result<arm_config::Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file absent, using defaults");
        return Ok(arm_config::Config::default());
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let cfg = arm_config::load_toml(&text)
        .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

fn init_tracing(log_level: &str, json: bool, logging: &arm_config::Logging) -> eyre::Result<()> {
    let level = logging.level.as_deref().unwrap_or(log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .wrap_err("invalid log level")?;

    if let Some(path) = &logging.file {
        // JSON lines to the configured file, console stays quiet.
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("failed to open log file {path}"))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(writer)
            .init();
    } else if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn run() -> eyre::Result<()> {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let mut cfg = load_config(&cli.config)?;
    init_tracing(&cli.log_level, cli.json, &cfg.logging)?;

    match cli.cmd {
        Commands::Watch {
            simulate,
            max_ticks,
            start,
            upper_url,
            lower_url,
            period_ms,
            warning_deg,
            failure_deg,
        } => {
            if let Some(url) = upper_url {
                cfg.endpoints.upper_arm_url = url;
            }
            if let Some(url) = lower_url {
                cfg.endpoints.lower_arm_url = url;
            }
            if let Some(ms) = period_ms {
                cfg.poll.period_ms = ms;
            }
            if let Some(deg) = warning_deg {
                cfg.thresholds.warning_deg = deg;
            }
            if let Some(deg) = failure_deg {
                cfg.thresholds.failure_deg = deg;
            }
            cfg.validate()?;
            watch::run_watch(
                &cfg,
                &watch::WatchOpts {
                    simulate,
                    max_ticks,
                    start,
                    json: cli.json,
                },
            )
        }
        Commands::Check { simulate } => {
            cfg.validate()?;
            watch::run_check(&cfg, simulate)
        }
    }
}

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporting: {e}");
    }
    if let Err(e) = run() {
        error_fmt::report(&e);
        std::process::exit(1);
    }
}
