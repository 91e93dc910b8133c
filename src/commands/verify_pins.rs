// Resolve every remote revision pin against local mirrors
use std::io::Write;
use std::path::PathBuf;

use crate::config::Document;
use crate::error::{CliError, Result};
use crate::revision::{GitMirrorResolver, ResolvedPin};

#[derive(Debug, Clone)]
pub struct VerifyPinsConfig {
    pub config_path: PathBuf,
    /// `(location, local checkout)` pairs
    pub mirrors: Vec<(String, PathBuf)>,
}

/// Parse a `LOCATION=PATH` mirror argument
pub fn parse_mirror(arg: &str) -> Result<(String, PathBuf)> {
    // locations may contain '=' in query strings, paths rarely do
    match arg.rsplit_once('=') {
        Some((location, path)) if !location.is_empty() && !path.is_empty() => {
            Ok((location.to_string(), PathBuf::from(path)))
        }
        _ => Err(CliError::InvalidArgument {
            argument: arg.to_string(),
            message: "expected LOCATION=PATH".to_string(),
            suggestion: Some(
                "e.g. --mirror https://github.com/pre-commit/pre-commit-hooks=../pre-commit-hooks"
                    .to_string(),
            ),
        }
        .into()),
    }
}

pub fn execute_verify_pins_command(
    config: &VerifyPinsConfig,
    out: &mut dyn Write,
) -> Result<Vec<ResolvedPin>> {
    let doc = Document::from_file(&config.config_path)?;

    let resolver = config
        .mirrors
        .iter()
        .fold(GitMirrorResolver::new(), |resolver, (location, path)| {
            resolver.with_mirror(location.clone(), path.clone())
        });

    let resolved = doc.verify_pins(&resolver)?;
    for pin in &resolved {
        writeln!(out, "{}@{} -> {}", pin.location, pin.revision, pin.commit)?;
    }

    Ok(resolved)
}
