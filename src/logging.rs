use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "LOG_FILE";

/// Where log events go and how many of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
            std::env::var_os(LOG_FILE_ENV).map(PathBuf::from),
        )
    }

    /// `LOG_LEVEL`: 0 silent (default), 1 info, 2 debug. Anything unparsable
    /// counts as 0.
    fn from_values(level: Option<&str>, file: Option<PathBuf>) -> Self {
        let level = match level.and_then(|raw| raw.trim().parse::<u8>().ok()) {
            Some(1) => LevelFilter::INFO,
            Some(n) if n >= 2 => LevelFilter::DEBUG,
            _ => LevelFilter::OFF,
        };

        Self {
            level,
            file: file.filter(|path| !path.as_os_str().is_empty()),
        }
    }
}

/// Install the global subscriber. Logs go to `LOG_FILE` when set, otherwise
/// to stderr; stdout is reserved for the clone result.
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    if settings.level == LevelFilter::OFF {
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_target(false);

    match &settings.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        }
    }

    Ok(())
}
