// Logging setup for hookreg
use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Level,
    /// Output format (pretty for terminals, json for programmatic use)
    pub format: LogFormat,
    /// Color output configuration
    pub color: ColorConfig,
    /// Whether to show targets (module names); on with --verbose
    pub show_targets: bool,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

/// Color output configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ColorConfig {
    Auto,
    Always,
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            color: ColorConfig::Auto,
            show_targets: false,
        }
    }
}

impl LogConfig {
    /// Create logging configuration from CLI arguments
    pub fn from_cli(
        verbose: bool,
        quiet: bool,
        color: Option<&str>,
        format: LogFormat,
    ) -> Self {
        let level = if quiet {
            Level::ERROR
        } else if verbose {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let color = match color {
            Some("always") => ColorConfig::Always,
            Some("never") => ColorConfig::Never,
            _ => ColorConfig::Auto,
        };

        Self {
            level,
            format,
            color,
            show_targets: verbose,
        }
    }

    /// Check if colors should be used based on configuration and terminal
    pub fn should_use_colors(&self) -> bool {
        match self.color {
            ColorConfig::Always => true,
            ColorConfig::Never => false,
            ColorConfig::Auto => {
                io::stderr().is_terminal()
                    && std::env::var("TERM").map_or(true, |term| term != "dumb")
                    && std::env::var("NO_COLOR").is_err()
            }
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(format!("hookreg={}", self.level))
    }
}

/// Initialize the logging system with the given configuration.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let ansi = config.should_use_colors();
    let builder = fmt()
        .with_env_filter(config.env_filter())
        .with_writer(io::stderr)
        .with_ansi(ansi);

    // a subscriber may already be installed (tests, embedding applications)
    let installed = match config.format {
        LogFormat::Pretty => builder.with_target(config.show_targets).try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder
            .compact()
            .with_target(config.show_targets)
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("Global subscriber already set, keeping it");
    }

    Ok(())
}

/// Logging helpers for common operations
pub mod utils {
    use std::path::Path;
    use tracing::{debug, error, span, Level, Span};

    /// Create a span for document loading
    pub fn config_loading_span(config_path: &Path) -> Span {
        span!(Level::DEBUG, "config_loading", path = %config_path.display())
    }

    /// Log the outcome of document validation
    pub fn log_config_validation(config_path: &Path, valid: bool) {
        if valid {
            debug!(path = %config_path.display(), "Configuration validation passed");
        } else {
            error!(path = %config_path.display(), "Configuration validation failed");
        }
    }
}
