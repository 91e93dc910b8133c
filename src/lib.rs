// hookreg - Hook registry document library
// Typed model, strict loading and file selection for .pre-commit-config.yaml documents

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod revision;
pub mod select;
pub mod tags;

// Re-export main types for easier access
pub use config::{Document, HookSpec, Language, Source, SourceEntry, DEFAULT_CONFIG_FILE};
pub use error::{
    exit_codes, CliError, ConfigError, ErrorFormatter, HookregError, Location, Result,
    RevisionError,
};
pub use logging::{ColorConfig, LogConfig, LogFormat};
pub use pattern::{FilePattern, PatternError};
pub use revision::{GitMirrorResolver, PinRejection, ResolvedPin, RevisionPin, RevisionResolver};
pub use select::{Arguments, Invocation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// Build information (set by build script)
pub const BUILD_DATE: &str = env!("BUILD_DATE");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
pub const GIT_BRANCH: &str = env!("GIT_BRANCH");
pub const RUST_VERSION: &str = env!("RUST_VERSION");

/// Get formatted version string with build information
pub fn version_info() -> String {
    format!(
        "{NAME} {VERSION} (commit: {GIT_COMMIT}, branch: {GIT_BRANCH}, built: {BUILD_DATE}, rustc: {RUST_VERSION})"
    )
}
