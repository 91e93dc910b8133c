// CLI interface for hookreg using clap
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::commands::plan::{execute_plan_command, PlanConfig};
use crate::commands::sample_config::{execute_sample_config_command, SampleConfigConfig};
use crate::commands::show::{execute_show_command, ShowConfig, ShowFormat};
use crate::commands::validate::{execute_validate_command, ValidateConfig};
use crate::commands::verify_pins::{execute_verify_pins_command, parse_mirror, VerifyPinsConfig};
use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::{exit_codes, CliError, Result};
use crate::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "hookreg",
    about = "hookreg - A strict loader and validator for pre-commit hook registry documents",
    version = crate::VERSION,
    long_about = "hookreg loads hook registry documents (.pre-commit-config.yaml), rejects malformed entries with their exact position, and shows which hooks a set of files would trigger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Control color output (auto, always, never)
    #[arg(long, global = true, value_name = "WHEN")]
    pub color: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate hook registry documents (default command)
    Validate {
        /// Documents to validate; defaults to --config
        filenames: Vec<PathBuf>,
    },

    /// Print the loaded document in normalised form
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = ShowFormat::Yaml)]
        format: ShowFormat,
    },

    /// Show which hooks the given paths would trigger
    Plan {
        /// Candidate paths, relative to the repository root
        paths: Vec<String>,

        /// Read additional paths from a file, one per line
        #[arg(long, value_name = "FILE")]
        paths_from: Option<PathBuf>,
    },

    /// Resolve every remote revision pin against local git mirrors
    VerifyPins {
        /// Local checkout of a remote source, as LOCATION=PATH
        #[arg(long = "mirror", value_name = "LOCATION=PATH", value_parser = parse_mirror)]
        mirrors: Vec<(String, PathBuf)>,
    },

    /// Produce a sample .pre-commit-config.yaml file
    SampleConfig {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completion for
        shell: Shell,
    },
}

impl Cli {
    pub fn run(&self) -> Result<i32> {
        if self.verbose && self.quiet {
            return Err(CliError::ConflictingArguments {
                first: "--verbose".to_string(),
                second: "--quiet".to_string(),
                suggestion: "Use either --verbose for more output or --quiet for less output, but not both".to_string(),
            }
            .into());
        }

        let log_config = self.log_config();
        if let Err(e) = crate::logging::init_logging(&log_config) {
            eprintln!("Failed to initialize logging: {e}");
        }
        tracing::debug!("{}", crate::version_info());

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let config_path = PathBuf::from(&self.config);

        let code = match &self.command {
            Some(Commands::Validate { filenames }) => {
                self.validate(filenames.clone(), &log_config, &mut out)?
            }
            None => self.validate(Vec::new(), &log_config, &mut out)?,
            Some(Commands::Show { format }) => {
                execute_show_command(
                    &ShowConfig {
                        config_path,
                        format: *format,
                    },
                    &mut out,
                )?;
                exit_codes::SUCCESS
            }
            Some(Commands::Plan { paths, paths_from }) => {
                execute_plan_command(
                    &PlanConfig {
                        config_path,
                        paths: paths.clone(),
                        paths_from: paths_from.clone(),
                    },
                    &mut out,
                )?;
                exit_codes::SUCCESS
            }
            Some(Commands::VerifyPins { mirrors }) => {
                execute_verify_pins_command(
                    &VerifyPinsConfig {
                        config_path,
                        mirrors: mirrors.clone(),
                    },
                    &mut out,
                )?;
                exit_codes::SUCCESS
            }
            Some(Commands::SampleConfig { output }) => {
                execute_sample_config_command(
                    &SampleConfigConfig {
                        output_file: output.clone(),
                    },
                    &mut out,
                )?;
                exit_codes::SUCCESS
            }
            Some(Commands::GenerateCompletion { shell }) => {
                let mut cmd = Self::command();
                let name = cmd.get_name().to_string();
                generate(*shell, &mut cmd, name, &mut out);
                exit_codes::SUCCESS
            }
        };

        out.flush()?;
        Ok(code)
    }

    fn validate(
        &self,
        mut filenames: Vec<PathBuf>,
        log_config: &LogConfig,
        out: &mut dyn Write,
    ) -> Result<i32> {
        if filenames.is_empty() {
            filenames.push(PathBuf::from(&self.config));
        }
        let result = execute_validate_command(
            &ValidateConfig {
                filenames,
                use_colors: log_config.should_use_colors(),
            },
            out,
        )?;
        Ok(result.exit_code())
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_cli(
            self.verbose,
            self.quiet,
            self.color.as_deref(),
            self.log_format,
        )
    }
}
