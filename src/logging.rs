use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::Level;

use crate::config::LoggingConfig;

/// Installs a plain-text subscriber writing to the configured file. Without a
/// file nothing is installed and every event is dropped.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let Some(path) = config.file.as_deref() else {
        return Ok(());
    };
    let level = parse_level(&config.level)?;

    ensure_parent_dir(path)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| eyre!("unknown log level `{level}`"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("WARN").unwrap(), Level::WARN);
        assert_eq!(parse_level(" info ").unwrap(), Level::INFO);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn no_file_installs_nothing() {
        let config = LoggingConfig::default();
        assert!(init_tracing(&config).is_ok());
    }
}
