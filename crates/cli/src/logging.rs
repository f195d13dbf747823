//! Tracing setup: a rotating log file plus warnings on stderr

use anyhow::{Context, Result};
use calcrepl_core::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Rotated log files kept on disk
const MAX_LOG_FILES: usize = 5;

/// Translate a configured level name into an `EnvFilter` directive.
///
/// Accepts the `WARNING`/`CRITICAL` spellings alongside tracing's own level
/// names. Anything else is passed through as a directive.
pub fn level_directive(level: &str) -> String {
    match level.trim().to_lowercase().as_str() {
        "trace" => "trace".to_string(),
        "debug" => "debug".to_string(),
        "info" => "info".to_string(),
        "warn" | "warning" => "warn".to_string(),
        "error" | "critical" | "fatal" => "error".to_string(),
        "off" | "none" => "off".to_string(),
        _ => level.trim().to_string(),
    }
}

/// Install the global subscriber.
///
/// The file layer honours `RUST_LOG`, falling back to `config.log_level`.
/// The returned guard flushes the file writer on drop and must outlive all
/// logging.
pub fn init_tracing(config: &Config) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir).with_context(|| {
        format!("Failed to create log directory {}", config.log_dir.display())
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.log_file)
        .max_log_files(MAX_LOG_FILES)
        .build(&config.log_dir)
        .with_context(|| {
            format!(
                "Failed to open log file {}.<date>",
                config.log_file_prefix().display()
            )
        })?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let file_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_directive(&config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_filter(file_filter);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(LevelFilter::WARN);

    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive_maps_level_names() {
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("Error"), "error");
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive(" info "), "info");
    }

    #[test]
    fn test_level_directive_passes_directives_through() {
        assert_eq!(
            level_directive("calcrepl_core=debug"),
            "calcrepl_core=debug"
        );
    }

    #[test]
    fn test_mapped_levels_build_level_filters() {
        let cases = [
            ("WARNING", LevelFilter::WARN),
            ("CRITICAL", LevelFilter::ERROR),
            ("info", LevelFilter::INFO),
        ];
        for (name, expected) in cases {
            let filter = EnvFilter::try_new(level_directive(name)).unwrap();
            assert_eq!(filter.max_level_hint(), Some(expected), "{name}");
        }
    }
}
