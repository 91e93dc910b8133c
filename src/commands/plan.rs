// Show which hooks a set of paths would trigger
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::config::Document;
use crate::error::Result;
use crate::select::Arguments;

#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub config_path: PathBuf,
    pub paths: Vec<String>,
    /// File holding one path per line, appended to `paths`
    pub paths_from: Option<PathBuf>,
}

pub fn execute_plan_command(config: &PlanConfig, out: &mut dyn Write) -> Result<usize> {
    let doc = Document::from_file(&config.config_path)?;

    let mut paths = config.paths.clone();
    if let Some(ref list) = config.paths_from {
        let reader = BufReader::new(std::fs::File::open(list)?);
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                paths.push(line.to_string());
            }
        }
    }

    let plan = doc.plan_invocations(&paths);
    for invocation in &plan {
        let hook = invocation.hook;
        match invocation.arguments {
            Arguments::WholeRepository => {
                writeln!(out, "{} [{}]: (whole repository)", hook.id, hook.language)?;
            }
            Arguments::Files(ref files) => {
                writeln!(out, "{} [{}]: {} file(s)", hook.id, hook.language, files.len())?;
                for file in files {
                    writeln!(out, "  {file}")?;
                }
            }
        }
    }

    Ok(plan.len())
}
