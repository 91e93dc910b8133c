// Document validation command
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Document;
use crate::error::{exit_codes, Result};

#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub filenames: Vec<PathBuf>,
    pub use_colors: bool,
}

/// Per-file outcome
#[derive(Debug)]
pub struct FileValidation {
    pub path: PathBuf,
    pub hooks: usize,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ValidateResult {
    pub files: Vec<FileValidation>,
}

impl ValidateResult {
    pub fn all_valid(&self) -> bool {
        self.files.iter().all(|f| f.error.is_none())
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_valid() {
            exit_codes::SUCCESS
        } else {
            exit_codes::CONFIG_ERROR
        }
    }
}

/// Load every listed document, reporting each one instead of stopping at the first failure
pub fn execute_validate_command(
    config: &ValidateConfig,
    out: &mut dyn Write,
) -> Result<ValidateResult> {
    let mut files = Vec::with_capacity(config.filenames.len());

    for path in &config.filenames {
        let validation = validate_file(path, config.use_colors);
        let shown = validation.path.display();
        match validation.error {
            None => writeln!(out, "{shown}: OK ({} hooks)", validation.hooks)?,
            Some(ref message) => writeln!(out, "{shown}: {message}")?,
        }
        files.push(validation);
    }

    Ok(ValidateResult { files })
}

fn validate_file(path: &Path, use_colors: bool) -> FileValidation {
    match Document::from_file(path) {
        Ok(doc) => FileValidation {
            path: path.to_path_buf(),
            hooks: doc.hook_count(),
            error: None,
        },
        Err(e) => FileValidation {
            path: path.to_path_buf(),
            hooks: 0,
            error: Some(e.user_message(use_colors)),
        },
    }
}
