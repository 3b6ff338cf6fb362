//! stubcfg driver
//!
//! Command-line front end over `stubcfg-common`: lists stub-window
//! profiles, prints calibration tables, resolves schedules and emits the
//! assembled process description for the execution engine.
//!
//! Every command renders to a `String`; `main` only prints it, so the
//! commands are testable without capturing stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use stubcfg_common::config::{resolve_job_path, write_atomic, JobConfig};
use stubcfg_common::params::extractor_metadata;
use stubcfg_common::{stub_windows, ProcessConfig, StubWindowProfile};

/// Stub-window selection and extraction schedule resolution
#[derive(Parser, Debug)]
#[command(name = "stubcfg")]
#[command(about = "Configure stub windows and resolve extraction schedules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List stub-window profiles and their aliases
    Profiles,

    /// List numeric extractor parameters with defaults and valid ranges
    Params,

    /// Print the calibration table of one profile
    Windows {
        /// Profile name or alias (e.g. Tight, 10T, SANITY)
        name: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the stages a job would run, in order
    Schedule {
        /// Job file (falls back to STUBCFG_JOB, then the user config directory)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Assemble the full process description
    Build {
        /// Job file (falls back to STUBCFG_JOB, then the user config directory)
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Rendering used by `windows` and `build`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Toml,
}

/// Run one command and return what should be printed
pub fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Command::Profiles => Ok(render_profiles()),
        Command::Params => Ok(render_params()),
        Command::Windows { name, format } => render_windows(&name, format),
        Command::Schedule { config } => {
            let job = load_job(config.as_deref())?;
            render_schedule(&job)
        }
        Command::Build { config, format, output } => {
            let job = load_job(config.as_deref())?;
            let rendered = render_process(&job, format)?;
            match output {
                Some(path) => {
                    write_output(&path, &rendered)?;
                    Ok(format!("Wrote process configuration to {}", path.display()))
                }
                None => Ok(rendered),
            }
        }
    }
}

/// One line per profile: canonical name, aliases, description
pub fn render_profiles() -> String {
    StubWindowProfile::all_variants()
        .iter()
        .map(|p| format!("{:<8} {:<18} {}", p.name(), p.aliases().join(", "), p.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per parameter: key, type, default, range, description
pub fn render_params() -> String {
    extractor_metadata()
        .map(|m| {
            format!(
                "{:<12} {:<4} {:<12} {:<28} {}",
                m.key, m.data_type, m.default_value, m.validation_range, m.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_windows(name: &str, format: OutputFormat) -> Result<String> {
    let windows = stub_windows(name)?;
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(windows)?,
        OutputFormat::Toml => toml::to_string_pretty(windows)?,
    };
    Ok(rendered)
}

/// Stage labels, one per line, in execution order
pub fn render_schedule(job: &JobConfig) -> Result<String> {
    let process = ProcessConfig::assemble(job)?;
    Ok(process.schedule.labels().join("\n"))
}

pub fn render_process(job: &JobConfig, format: OutputFormat) -> Result<String> {
    let process = ProcessConfig::assemble(job)?;
    let rendered = match format {
        OutputFormat::Json => process.to_json()?,
        OutputFormat::Toml => process.to_toml()?,
    };
    Ok(rendered)
}

fn load_job(cli_arg: Option<&Path>) -> Result<JobConfig> {
    let path = resolve_job_path(cli_arg)?;
    info!("Job file: {}", path.display());
    JobConfig::load(&path).with_context(|| format!("Invalid job file {}", path.display()))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content)?;
    info!("Wrote process configuration to {}", path.display());
    Ok(())
}
