// Print a loaded document in normalised form
use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::Document;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub config_path: PathBuf,
    pub format: ShowFormat,
}

pub fn execute_show_command(config: &ShowConfig, out: &mut dyn Write) -> Result<Document> {
    let doc = Document::from_file(&config.config_path)?;

    let rendered = match config.format {
        ShowFormat::Yaml => doc.to_yaml()?,
        ShowFormat::Json => doc.to_json()?,
    };
    write!(out, "{rendered}")?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }

    Ok(doc)
}
