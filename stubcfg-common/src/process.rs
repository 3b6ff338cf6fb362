//! Assembled process configuration
//!
//! [`ProcessConfig`] is built once from a [`JobConfig`] and never mutated.
//! It carries everything the execution engine needs: the stub-building
//! parameter block, the extractor parameter block and the ordered stage
//! list.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::JobConfig;
use crate::params::{validate_input_command, ExtractorParams, Geometry};
use crate::schedule::{reanalysis, resolve, ResolvedSchedule, Stage};
use crate::windows::{StubAlgorithmParams, StubWindowProfile};
use crate::{Error, Result};

/// Immutable description of one engine process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessConfig {
    pub process_name: String,
    pub geometry: Geometry,
    pub max_events: i64,
    pub source_files: Vec<String>,
    pub input_commands: Vec<String>,
    pub schedule: ResolvedSchedule,
    /// Present when the job selects a stub-window profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub_algorithm: Option<StubAlgorithmParams>,
    pub extractor: ExtractorParams,
}

impl ProcessConfig {
    /// Validate the job and assemble the process
    ///
    /// Fails on invalid parameters or an unsatisfiable schedule; nothing is
    /// returned half-built.
    pub fn assemble(job: &JobConfig) -> Result<Self> {
        // Couplings are applied (and warned about) here only
        let flags = job.flags.effective();

        for command in &job.input_commands {
            validate_input_command(command)?;
        }

        let extractor = ExtractorParams::new(
            &flags,
            job.geometry,
            &job.tracking_particles,
            &job.output_file,
            &job.analysis_settings,
            job.reanalysis.as_ref(),
        )?;

        let schedule = match &job.reanalysis {
            Some(r) => {
                if !flags.extract {
                    return Err(Error::InvalidParameter(
                        "extract: re-analysis runs nothing but extraction and cannot switch it off"
                            .to_string(),
                    ));
                }
                if flags.remake_stubs || flags.dump_content {
                    warn!("remake_stubs and dump_content have no effect when re-analysing {}", r.input_root_file);
                }
                info!("Re-analysing {} (skip {}, analyze {})", r.input_root_file, r.skip_events, r.n_events);
                reanalysis()
            }
            None => resolve(&flags, &job.input)?,
        };

        let stub_algorithm = match job.stub_windows {
            Some(profile) => Some(stub_block(profile, &schedule, job.reanalysis.is_some())?),
            None => {
                if schedule.contains(Stage::ClusterStub) {
                    info!("Rebuilding stubs with the release default stub windows");
                }
                None
            }
        };

        info!(
            "Assembled process '{}' ({} stage(s): {})",
            job.process_name,
            schedule.len(),
            schedule.labels().join(", ")
        );

        Ok(Self {
            process_name: job.process_name.clone(),
            geometry: job.geometry,
            max_events: job.max_events,
            source_files: job.source_files.clone(),
            input_commands: job.input_commands.clone(),
            schedule,
            stub_algorithm,
            extractor,
        })
    }

    /// Pretty JSON for the execution engine
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// TOML rendering of the same content
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Stub-builder block for a selected profile
///
/// The block is emitted even when no stubs are built, so the process still
/// records which windows the job asked for.
fn stub_block(
    profile: StubWindowProfile,
    schedule: &ResolvedSchedule,
    reanalysing: bool,
) -> Result<StubAlgorithmParams> {
    profile.windows().validate()?;
    if reanalysing {
        warn!("Stub windows '{}' have no effect when re-analysing an extracted ntuple", profile);
    } else if !schedule.contains(Stage::ClusterStub) {
        // Stubs come from the input, built with whatever windows it used
        warn!(
            "Stub windows '{}' selected but the input's stubs are reused; set remake_stubs to rebuild them",
            profile
        );
    }
    Ok(StubAlgorithmParams::for_profile(profile))
}
