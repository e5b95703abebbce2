use std::{fmt::Display, fs::File, str::FromStr, sync::Mutex};

use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// Path of the log file for a run started now.
pub fn log_file_path() -> String {
    format!(
        "./logs/powerset_run_{}.txt",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// Does nothing when logging is disabled. With `log_file` set, output goes to
/// a timestamped file under `./logs` instead of stderr.
pub fn init(config: &LoggerConfig) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let level = config.get_log_level().to_level_filter();
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let result = if *config.get_log_file() {
        std::fs::create_dir_all("./logs").context("failed to create log directory")?;
        let path = log_file_path();
        let file = File::create(&path).with_context(|| format!("failed to create {}", path))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))
}

#[test]
fn test_log_level_from_str() {
    assert_eq!("dbg".parse::<LogLevel>(), Ok(LogLevel::Debug));
    assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
    assert_eq!("err".parse::<LogLevel>(), Ok(LogLevel::Error));
    assert!("loud".parse::<LogLevel>().is_err());
}

#[test]
fn test_disabled_logger_is_noop() {
    assert!(init(&LoggerConfig::default()).is_ok());
}
