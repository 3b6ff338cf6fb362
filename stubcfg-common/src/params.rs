//! Extractor parameter set
//!
//! Builds the parameter block of the `RecoExtractor` analyzer from the
//! job's flags, geometry and tracking-particle selection. Keys match what
//! the analyzer reads (`doMC`, `TP_minPt`, ...) so the block can be handed
//! to the engine unchanged.

mod metadata;

pub use metadata::extractor_metadata;


use serde::{Deserialize, Serialize};

use crate::flags::ProductionFlags;
use crate::{Error, Result};

/// Tracker geometry the job runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Flat,
    #[default]
    Tilted,
}

/// Tracking-particle selection applied by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackingParticleCuts {
    /// Require tracking particles to hit the tracker
    pub hit_tracker: bool,
    /// Minimum pT (GeV)
    pub min_pt: f64,
    /// Maximum |eta|
    pub max_eta: f64,
    /// Maximum production radius (cm)
    pub max_r: f64,
}

impl Default for TrackingParticleCuts {
    fn default() -> Self {
        Self {
            hit_tracker: false,
            min_pt: 0.0,
            max_eta: 5.5,
            max_r: 10_000_000.0,
        }
    }
}

impl TrackingParticleCuts {
    /// Validate every numeric cut through its metadata validator
    ///
    /// All cuts are checked; errors are joined so one pass reports every
    /// problem.
    pub fn validate(&self) -> Result<()> {
        let errors: Vec<String> = Self::metadata()
            .iter()
            .filter_map(|meta| {
                let value = match meta.key {
                    "TP_minPt" => self.min_pt,
                    "TP_maxEta" => self.max_eta,
                    "TP_maxR" => self.max_r,
                    _ => return None,
                };
                (meta.validator)(&value.to_string()).err()
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParameter(errors.join("; ")))
        }
    }
}

/// Re-analysis of an already extracted ntuple
///
/// When present the extractor reads `input_root_file` instead of filling
/// its trees from engine events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reanalysis {
    /// Previously extracted ntuple
    pub input_root_file: String,
    /// Events to analyze
    #[serde(default = "Reanalysis::default_n_events")]
    pub n_events: i32,
    /// Events to skip first
    #[serde(default)]
    pub skip_events: i32,
}

impl Reanalysis {
    fn default_n_events() -> i32 {
        10
    }

    pub fn new(input_root_file: &str) -> Self {
        Self {
            input_root_file: input_root_file.to_string(),
            n_events: Self::default_n_events(),
            skip_events: 0,
        }
    }

    /// Check the input file name and the event window
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.input_root_file.trim().is_empty() {
            errors.push("inputRootFile: must name the extracted ntuple".to_string());
        }
        for meta in Self::metadata() {
            let value = match meta.key {
                "n_events" => self.n_events,
                "skip_events" => self.skip_events,
                _ => continue,
            };
            if let Err(e) = (meta.validator)(&value.to_string()) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParameter(errors.join("; ")))
        }
    }
}

/// Metadata for a single extractor parameter
///
/// - `key`: Parameter name as the analyzer reads it (e.g., "TP_minPt")
/// - `data_type`: Rust type as string
/// - `default_value`: Default value as string
/// - `description`: Human-readable description
/// - `validation_range`: Valid range as string
/// - `validator`: Validates string input
///
/// Validator errors follow `"{param_name}: {specific_reason}"`.
pub struct ParamMetadata {
    pub key: &'static str,
    pub data_type: &'static str,
    pub default_value: &'static str,
    pub description: &'static str,
    pub validation_range: &'static str,
    pub validator: fn(&str) -> std::result::Result<(), String>,
}

/// Check one `"NAME VALUE"` analysis setting
pub fn validate_analysis_setting(setting: &str) -> Result<()> {
    let mut parts = setting.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(_), None) => Ok(()),
        _ => Err(Error::InvalidParameter(format!(
            "analysisSettings: '{}' is not of the form \"NAME VALUE\"",
            setting
        ))),
    }
}

/// Check one source `"keep|drop PATTERN"` command
///
/// `PATTERN` is `*` or four underscore-separated fields
/// (`type_module_instance_process`), each possibly a wildcard.
pub fn validate_input_command(command: &str) -> Result<()> {
    let invalid = |why: &str| {
        Err(Error::InvalidParameter(format!(
            "inputCommands: '{}' {}",
            command, why
        )))
    };

    let mut parts = command.split_whitespace();
    let (action, pattern) = match (parts.next(), parts.next(), parts.next()) {
        (Some(action), Some(pattern), None) => (action, pattern),
        _ => return invalid("is not of the form \"keep|drop PATTERN\""),
    };
    if action != "keep" && action != "drop" {
        return invalid("must start with keep or drop");
    }
    if pattern != "*" {
        let fields: Vec<&str> = pattern.split('_').collect();
        if fields.len() != 4 || fields.iter().any(|f| f.is_empty()) {
            return invalid("pattern must be * or type_module_instance_process");
        }
    }
    Ok(())
}

/// Parameter block of the extraction analyzer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractorParams {
    #[serde(rename = "extractedRootFile")]
    pub extracted_root_file: String,
    #[serde(rename = "inputRootFile")]
    pub input_root_file: String,
    #[serde(rename = "flatBarrel")]
    pub flat_barrel: bool,
    /// False when re-analysing an extracted ntuple
    #[serde(rename = "fillTree")]
    pub fill_tree: bool,
    pub n_events: i32,
    pub skip_events: i32,
    #[serde(rename = "doMC")]
    pub do_mc: bool,
    #[serde(rename = "doSTUB")]
    pub do_stub: bool,
    #[serde(rename = "doPixel")]
    pub do_pixel: bool,
    #[serde(rename = "doMatch")]
    pub do_match: bool,
    #[serde(rename = "doL1TRK")]
    pub do_l1trk: bool,
    #[serde(rename = "doBANK")]
    pub do_bank: bool,
    #[serde(rename = "doL1TT")]
    pub do_l1tt: bool,
    #[serde(rename = "getCoords")]
    pub get_coords: bool,
    #[serde(rename = "fullInfo")]
    pub full_info: bool,
    #[serde(rename = "TP_hitTracker")]
    pub tp_hit_tracker: bool,
    #[serde(rename = "TP_minPt")]
    pub tp_min_pt: f64,
    #[serde(rename = "TP_maxEta")]
    pub tp_max_eta: f64,
    #[serde(rename = "TP_maxR")]
    pub tp_max_r: f64,
    #[serde(rename = "analysisSettings")]
    pub analysis_settings: Vec<String>,
}

impl ExtractorParams {
    /// Build the block
    ///
    /// Flags are copied as given; pass [`ProductionFlags::effective`] so
    /// couplings are applied (and warned about) once per job.
    pub fn new(
        flags: &ProductionFlags,
        geometry: Geometry,
        cuts: &TrackingParticleCuts,
        output_file: &str,
        analysis_settings: &[String],
        reanalysis: Option<&Reanalysis>,
    ) -> Result<Self> {
        cuts.validate()?;
        for setting in analysis_settings {
            validate_analysis_setting(setting)?;
        }
        if let Some(r) = reanalysis {
            r.validate()?;
        }

        let defaults = Reanalysis::new("default.root");
        let (fill_tree, window) = match reanalysis {
            Some(r) => (false, r),
            None => (true, &defaults),
        };

        Ok(Self {
            extracted_root_file: output_file.to_string(),
            input_root_file: window.input_root_file.clone(),
            flat_barrel: geometry == Geometry::Flat,
            fill_tree,
            n_events: window.n_events,
            skip_events: window.skip_events,
            do_mc: flags.do_mc,
            do_stub: flags.do_stub,
            do_pixel: flags.do_pixel,
            do_match: flags.do_match,
            do_l1trk: flags.do_l1trk,
            do_bank: flags.do_bank,
            do_l1tt: flags.do_l1tt,
            get_coords: flags.get_coords,
            full_info: flags.full_info,
            tp_hit_tracker: cuts.hit_tracker,
            tp_min_pt: cuts.min_pt,
            tp_max_eta: cuts.max_eta,
            tp_max_r: cuts.max_r,
            analysis_settings: analysis_settings.to_vec(),
        })
    }
}
