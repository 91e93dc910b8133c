// Sample document generation
// Produces a hook registry document covering the usual hook kinds

use crate::config::Document;
use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Formatter, style checker, YAML validator, requirements regenerator and CI lint wrapper
pub const SAMPLE_CONFIG: &str = r#"repos:
- repo: https://github.com/google/yapf
  rev: v0.30.0
  hooks:
  - id: yapf
    language: python
    files: ^(src/.*\.py|docs/.*\.py)$
- repo: local
  hooks:
  - id: prospector
    name: prospector
    entry: prospector
    language: system
    types: [file, python]
    exclude: ^(docs/.*|build/.*)$
  - id: docs-requirements
    name: Regenerate documentation requirements
    entry: python ./docs/update_requirements.py --pre-commit
    language: system
    files: ^(setup\.json|docs/requirements\.txt|docs/update_requirements\.py)$
    pass_filenames: false
  - id: travis-linter
    name: travis
    entry: travis lint
    language: ruby
    files: ^(\.travis\.yml)$
    additional_dependencies: [travis]
- repo: https://github.com/pre-commit/pre-commit-hooks
  rev: v4.4.0
  hooks:
  - id: check-yaml
    language: system
"#;

#[derive(Debug, Clone, Default)]
pub struct SampleConfigConfig {
    pub output_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SampleConfigResult {
    pub output_location: String,
}

pub fn execute_sample_config_command(
    config: &SampleConfigConfig,
    out: &mut dyn Write,
) -> Result<SampleConfigResult> {
    info!("Generating sample configuration");

    // never hand out a sample the loader would reject
    Document::from_yaml(SAMPLE_CONFIG)?;

    let output_location = if let Some(ref output_file) = config.output_file {
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_file, SAMPLE_CONFIG)?;
        output_file.to_string_lossy().to_string()
    } else {
        write!(out, "{SAMPLE_CONFIG}")?;
        "stdout".to_string()
    };

    Ok(SampleConfigResult {
        output_location,
    })
}
