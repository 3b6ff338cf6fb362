//! Extractor parameter metadata
//!
//! Single source of truth for names, defaults and ranges of the numeric
//! extractor parameters: the tracking-particle selection and the
//! re-analysis event window.

use super::{ParamMetadata, Reanalysis, TrackingParticleCuts};

impl TrackingParticleCuts {
    /// Metadata for the numeric tracking-particle cuts
    ///
    /// # Example: Validating a Parameter
    ///
    /// ```rust
    /// # use stubcfg_common::params::TrackingParticleCuts;
    /// let metadata = TrackingParticleCuts::metadata();
    /// let min_pt = metadata.iter()
    ///     .find(|m| m.key == "TP_minPt")
    ///     .unwrap();
    ///
    /// assert!((min_pt.validator)("2.0").is_ok());
    /// assert!((min_pt.validator)("-1.0").is_err());
    /// ```
    pub fn metadata() -> &'static [ParamMetadata] {
        &[
            ParamMetadata {
                key: "TP_minPt",
                data_type: "f64",
                default_value: "0.0",
                description: "Minimum pT of saved tracking particles (GeV)",
                validation_range: ">= 0.0",
                validator: |s| {
                    let v: f64 = s.parse()
                        .map_err(|_| "TP_minPt: invalid number format".to_string())?;
                    if !(v >= 0.0) || !v.is_finite() {
                        return Err(format!("TP_minPt: value {} out of range [0.0, inf)", v));
                    }
                    Ok(())
                },
            },

            ParamMetadata {
                key: "TP_maxEta",
                data_type: "f64",
                default_value: "5.5",
                description: "Maximum |eta| of saved tracking particles",
                validation_range: "0.0-10.0 (exclusive of 0)",
                validator: |s| {
                    let v: f64 = s.parse()
                        .map_err(|_| "TP_maxEta: invalid number format".to_string())?;
                    if !(v > 0.0 && v <= 10.0) {
                        return Err(format!("TP_maxEta: value {} out of range (0.0, 10.0]", v));
                    }
                    Ok(())
                },
            },

            ParamMetadata {
                key: "TP_maxR",
                data_type: "f64",
                default_value: "10000000.0",
                description: "Maximum production radius of saved tracking particles (cm)",
                validation_range: "> 0.0",
                validator: |s| {
                    let v: f64 = s.parse()
                        .map_err(|_| "TP_maxR: invalid number format".to_string())?;
                    if !(v > 0.0) || !v.is_finite() {
                        return Err(format!("TP_maxR: value {} out of range (0.0, inf)", v));
                    }
                    Ok(())
                },
            },
        ]
    }
}

impl Reanalysis {
    /// Metadata for the re-analysis event window
    pub fn metadata() -> &'static [ParamMetadata] {
        &[
            ParamMetadata {
                key: "n_events",
                data_type: "i32",
                default_value: "10",
                description: "Events to analyze from the extracted ntuple",
                validation_range: "> 0",
                validator: |s| {
                    let v: i32 = s.parse()
                        .map_err(|_| "n_events: invalid integer format".to_string())?;
                    if v <= 0 {
                        return Err(format!("n_events: value {} out of range [1, inf)", v));
                    }
                    Ok(())
                },
            },

            ParamMetadata {
                key: "skip_events",
                data_type: "i32",
                default_value: "0",
                description: "Events to skip at the start of the extracted ntuple",
                validation_range: ">= 0",
                validator: |s| {
                    let v: i32 = s.parse()
                        .map_err(|_| "skip_events: invalid integer format".to_string())?;
                    if v < 0 {
                        return Err(format!("skip_events: value {} out of range [0, inf)", v));
                    }
                    Ok(())
                },
            },
        ]
    }
}

/// Every numeric extractor parameter, cuts first
pub fn extractor_metadata() -> impl Iterator<Item = &'static ParamMetadata> {
    TrackingParticleCuts::metadata()
        .iter()
        .chain(Reanalysis::metadata().iter())
}
