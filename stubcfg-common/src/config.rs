//! Job configuration loading and job file resolution

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::flags::ProductionFlags;
use crate::params::{Geometry, Reanalysis, TrackingParticleCuts};
use crate::schedule::UpstreamAvailability;
use crate::windows::StubWindowProfile;
use crate::{Error, Result};

/// Environment variable naming the job file
pub const JOB_ENV_VAR: &str = "STUBCFG_JOB";

/// Source keep/drop list used when a job file names none
pub const DEFAULT_INPUT_COMMANDS: &[&str] = &["keep *_*_*_*"];

/// Everything a user edits to describe one extraction job
///
/// Deserialized from TOML; every field has a default so a minimal job
/// file only names what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Name of the engine process
    pub process_name: String,
    /// Stub-window profile; `None` keeps the release defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub_windows: Option<StubWindowProfile>,
    pub geometry: Geometry,
    /// Events to process, -1 for all
    pub max_events: i64,
    /// Extracted ntuple written by the extraction stage
    pub output_file: String,
    /// Input files, passed through unchanged
    pub source_files: Vec<String>,
    /// `"keep|drop PATTERN"` branch selection applied when reading the input
    pub input_commands: Vec<String>,
    /// `"NAME VALUE"` settings forwarded to the extractor
    pub analysis_settings: Vec<String>,
    pub flags: ProductionFlags,
    pub input: UpstreamAvailability,
    pub tracking_particles: TrackingParticleCuts,
    /// Start from an extracted ntuple instead of engine events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reanalysis: Option<Reanalysis>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            process_name: "MIBextractor".to_string(),
            stub_windows: None,
            geometry: Geometry::default(),
            max_events: -1,
            output_file: "extracted.root".to_string(),
            source_files: Vec::new(),
            input_commands: DEFAULT_INPUT_COMMANDS.iter().map(|c| c.to_string()).collect(),
            analysis_settings: Vec::new(),
            flags: ProductionFlags::default(),
            input: UpstreamAvailability::default(),
            tracking_particles: TrackingParticleCuts::default(),
            reanalysis: None,
        }
    }
}

impl JobConfig {
    /// Parse a job from TOML text
    ///
    /// An unknown `stub_windows` name fails with [`Error::Configuration`],
    /// the same error a direct profile lookup gives.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        if let Some(name) = table.get("stub_windows").and_then(toml::Value::as_str) {
            StubWindowProfile::from_alias(name)?;
        }
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Read and parse a job file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read job file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded job configuration from {}", path.display());
        Ok(config)
    }

    /// Write the job as TOML
    pub fn write_toml(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_atomic(path, &content)?;
        debug!("Wrote job configuration to {}", path.display());
        Ok(())
    }
}

/// Write `content` to `<path>.tmp`, then rename it over `path`
///
/// A reader never sees a half-written file. The temporary file is removed
/// when either step fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let mut temp_name: OsString = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let result = std::fs::write(&temp_path, content)
        .and_then(|()| std::fs::rename(&temp_path, path));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Config(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }
    Ok(())
}

/// Job file resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable `STUBCFG_JOB`
/// 3. `<user config dir>/stubcfg/job.toml`
///
/// Fails with [`Error::Config`] when none of them yields a path.
pub fn resolve_job_path(cli_arg: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(JOB_ENV_VAR) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: User config directory
    if let Some(path) = default_job_path() {
        if path.exists() {
            return Ok(path);
        }
    }

    Err(Error::Config(format!(
        "No job file given (pass --config, set {} or create {})",
        JOB_ENV_VAR,
        default_job_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stubcfg/job.toml in the user config directory".to_string())
    )))
}

/// Default job file location for the platform
pub fn default_job_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stubcfg").join("job.toml"))
}
