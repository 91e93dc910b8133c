// Error handling framework for hookreg
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HookregError>;

/// Main error type for hookreg
#[derive(Debug, Error)]
pub enum HookregError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("Revision pin error: {0}")]
    Revision(#[from] Box<RevisionError>),

    #[error("CLI argument error: {0}")]
    Cli(#[from] Box<CliError>),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Position of a value inside a hook registry document.
///
/// Every field is optional so the same type can describe a document-level
/// key (`files`), a source entry (`repos[2]`) or a hook field
/// (`repos[2].hooks[0].exclude`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file_path: Option<PathBuf>,
    pub entry: Option<usize>,
    pub hook: Option<usize>,
    pub field: Option<String>,
}

impl Location {
    pub fn document(field: &str) -> Self {
        Self {
            field: Some(field.to_string()),
            ..Self::default()
        }
    }

    pub fn entry(entry: usize) -> Self {
        Self {
            entry: Some(entry),
            ..Self::default()
        }
    }

    pub fn hook(entry: usize, hook: usize) -> Self {
        Self {
            entry: Some(entry),
            hook: Some(hook),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    /// Dotted path of the value, e.g. `repos[1].hooks[0].files`
    pub fn field_path(&self) -> String {
        let mut parts = Vec::new();
        if let Some(entry) = self.entry {
            parts.push(format!("repos[{entry}]"));
            if let Some(hook) = self.hook {
                parts.push(format!("hooks[{hook}]"));
            }
        }
        if let Some(ref field) = self.field {
            parts.push(field.clone());
        }
        if parts.is_empty() {
            "<document>".to_string()
        } else {
            parts.join(".")
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file_path {
            Some(ref path) => write!(f, "{}: {}", path.display(), self.field_path()),
            None => f.write_str(&self.field_path()),
        }
    }
}

/// Document loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid YAML syntax: {message}")]
    InvalidYaml {
        message: String,
        line: Option<u32>,
        column: Option<u32>,
        file_path: Option<PathBuf>,
    },

    #[error("Configuration file not found: {path}")]
    NotFound {
        path: PathBuf,
        suggestion: Option<String>,
    },

    #[error("Missing required field: {location}")]
    MissingField { location: Location },

    #[error("Invalid configuration value at {location}: {message}")]
    InvalidValue {
        message: String,
        value: String,
        expected: String,
        location: Location,
    },

    #[error("Configuration validation failed at {location}: {message}")]
    ValidationFailed { message: String, location: Location },

    #[error("Invalid regex pattern at {location}: {pattern}")]
    InvalidRegex {
        pattern: String,
        error: String,
        location: Location,
    },

    #[error("Pattern is not anchored at {location}: {pattern}")]
    UnanchoredPattern { pattern: String, location: Location },

    #[error("Duplicate hook id '{id}' at {location} (first declared at hooks[{first_index}])")]
    DuplicateHookId {
        id: String,
        first_index: usize,
        location: Location,
    },

    #[error("Floating revision '{revision}' at {location}: {reason}")]
    FloatingRevision {
        revision: String,
        reason: String,
        location: Location,
    },
}

impl ConfigError {
    /// Attach the document's file path to the error position
    pub fn set_file_path(&mut self, path: &std::path::Path) {
        match self {
            ConfigError::InvalidYaml { file_path, .. } => *file_path = Some(path.to_path_buf()),
            ConfigError::NotFound { .. } => {}
            ConfigError::MissingField { location }
            | ConfigError::InvalidValue { location, .. }
            | ConfigError::ValidationFailed { location, .. }
            | ConfigError::InvalidRegex { location, .. }
            | ConfigError::UnanchoredPattern { location, .. }
            | ConfigError::DuplicateHookId { location, .. }
            | ConfigError::FloatingRevision { location, .. } => {
                location.file_path = Some(path.to_path_buf());
            }
        }
    }

    /// Position of the offending value, when the error has one
    pub fn location(&self) -> Option<&Location> {
        match self {
            ConfigError::InvalidYaml { .. } | ConfigError::NotFound { .. } => None,
            ConfigError::MissingField { location }
            | ConfigError::InvalidValue { location, .. }
            | ConfigError::ValidationFailed { location, .. }
            | ConfigError::InvalidRegex { location, .. }
            | ConfigError::UnanchoredPattern { location, .. }
            | ConfigError::DuplicateHookId { location, .. }
            | ConfigError::FloatingRevision { location, .. } => Some(location),
        }
    }
}

/// Revision pin resolution errors
#[derive(Debug, Error)]
pub enum RevisionError {
    #[error("No local mirror registered for {location}")]
    NoMirror {
        location: String,
        suggestion: Option<String>,
    },

    #[error("Revision '{revision}' of {location} (repos[{entry}]) does not resolve: {error}")]
    Unresolvable {
        location: String,
        revision: String,
        entry: usize,
        error: String,
    },

    #[error("Git operation failed: {message}")]
    Git {
        message: String,
        path: Option<PathBuf>,
    },
}

/// CLI argument errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid argument: {argument}")]
    InvalidArgument {
        argument: String,
        message: String,
        suggestion: Option<String>,
    },

    #[error("Conflicting arguments: {first} and {second}")]
    ConflictingArguments {
        first: String,
        second: String,
        suggestion: String,
    },
}

/// Format errors with colors and context
pub struct ErrorFormatter {
    use_colors: bool,
}

impl ErrorFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format an error with context and colors
    pub fn format_error(&self, error: &HookregError) -> String {
        use tracing::error;

        match error {
            HookregError::Config(_) => {
                error!(error_type = "config", error = %error, "Configuration error occurred");
            }
            HookregError::Revision(_) => {
                error!(error_type = "revision", error = %error, "Revision pin resolution failed");
            }
            HookregError::Cli(_) => {
                error!(error_type = "cli", error = %error, "CLI error occurred");
            }
            HookregError::Io(_) => {
                error!(error_type = "io", error = %error, "IO operation failed");
            }
        }

        let mut output = String::new();

        if self.use_colors {
            output.push_str("\x1b[31m");
        }
        output.push_str("Error: ");
        if self.use_colors {
            output.push_str("\x1b[0m");
        }

        output.push_str(&error.to_string());

        match error {
            HookregError::Config(config_err) => {
                self.add_config_context(&mut output, config_err.as_ref());
            }
            HookregError::Revision(revision_err) => {
                self.add_revision_context(&mut output, revision_err.as_ref());
            }
            HookregError::Cli(cli_err) => {
                self.add_cli_context(&mut output, cli_err.as_ref());
            }
            HookregError::Io(_) => {}
        }

        output
    }

    fn add_config_context(&self, output: &mut String, error: &ConfigError) {
        match error {
            ConfigError::InvalidYaml {
                file_path: Some(path),
                line: Some(line),
                column,
                ..
            } => {
                output.push_str(&format!("\n  --> {}:{}", path.display(), line));
                if let Some(column) = column {
                    output.push_str(&format!(":{column}"));
                }
            }
            ConfigError::NotFound {
                suggestion: Some(suggestion),
                ..
            } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            ConfigError::InvalidRegex { error, .. } => {
                output.push_str(&format!("\n  Regex error: {error}"));
            }
            ConfigError::UnanchoredPattern { pattern, .. } => {
                output.push_str(&format!(
                    "\n  Help: anchor the whole path, e.g. ^({})$",
                    pattern.trim_start_matches('^').trim_end_matches('$')
                ));
            }
            ConfigError::InvalidValue { expected, .. } => {
                output.push_str(&format!("\n  Expected: {expected}"));
            }
            ConfigError::FloatingRevision { .. } => {
                output.push_str("\n  Help: pin a tag or a full commit hash");
            }
            _ => {}
        }
    }

    fn add_revision_context(&self, output: &mut String, error: &RevisionError) {
        if let RevisionError::NoMirror {
            suggestion: Some(suggestion),
            ..
        } = error
        {
            output.push_str(&format!("\n  Help: {suggestion}"));
        }
    }

    fn add_cli_context(&self, output: &mut String, error: &CliError) {
        match error {
            CliError::InvalidArgument {
                suggestion: Some(suggestion),
                ..
            } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            CliError::ConflictingArguments { suggestion, .. } => {
                output.push_str(&format!("\n  Help: {suggestion}"));
            }
            _ => {}
        }
    }
}

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const REVISION_ERROR: i32 = 3;
    pub const CLI_ERROR: i32 = 7;
}

impl HookregError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HookregError::Config(_) => exit_codes::CONFIG_ERROR,
            HookregError::Revision(_) => exit_codes::REVISION_ERROR,
            HookregError::Cli(_) => exit_codes::CLI_ERROR,
            HookregError::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Create a user-friendly error message with context
    pub fn user_message(&self, use_colors: bool) -> String {
        ErrorFormatter::new(use_colors).format_error(self)
    }
}

impl From<ConfigError> for HookregError {
    fn from(error: ConfigError) -> Self {
        HookregError::Config(Box::new(error))
    }
}

impl From<RevisionError> for HookregError {
    fn from(error: RevisionError) -> Self {
        HookregError::Revision(Box::new(error))
    }
}

impl From<CliError> for HookregError {
    fn from(error: CliError) -> Self {
        HookregError::Cli(Box::new(error))
    }
}

// Conversion from serde_yaml::Error to ConfigError
impl From<serde_yaml::Error> for Box<ConfigError> {
    fn from(error: serde_yaml::Error) -> Self {
        let location = error.location();
        Box::new(ConfigError::InvalidYaml {
            message: error.to_string(),
            line: location.as_ref().map(|l| l.line() as u32),
            column: location.as_ref().map(|l| l.column() as u32),
            file_path: None,
        })
    }
}

impl From<git2::Error> for Box<RevisionError> {
    fn from(error: git2::Error) -> Self {
        Box::new(RevisionError::Git {
            message: error.message().to_string(),
            path: None,
        })
    }
}

impl From<git2::Error> for HookregError {
    fn from(error: git2::Error) -> Self {
        HookregError::Revision(Box::<RevisionError>::from(error))
    }
}
