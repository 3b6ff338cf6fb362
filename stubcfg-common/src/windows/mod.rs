//! Stub-window profiles
//!
//! A profile is a versioned set of per-layer bend thresholds for the stub
//! builder. Different configuration revisions refer to the same profile by
//! different literal names, so lookups always go through the alias map and
//! land on one canonical table.
//!
//! ```rust
//! use stubcfg_common::windows::{stub_windows, StubWindowProfile};
//!
//! let tight = stub_windows("10T").unwrap();
//! assert_eq!(tight, StubWindowProfile::Tight.windows());
//! assert!(stub_windows("Bogus").is_err());
//! ```

mod tables;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Label of the stub-building module the cut sets are injected into
pub const STUB_ALGORITHM_MODULE: &str = "TTStubAlgorithm_official_Phase2TrackerDigi_";

/// Number of barrel layer slots (slot 0 unused)
pub const BARREL_LAYERS: usize = 7;

/// Expected group lengths of the tilted-barrel cut set
pub const TILTED_GROUP_LENGTHS: [usize; 4] = [1, 13, 13, 13];

/// Expected group lengths of the endcap cut set
pub const ENDCAP_GROUP_LENGTHS: [usize; 6] = [1, 16, 16, 13, 13, 13];

/// Canonical stub-window profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StubWindowProfile {
    /// Windows shipped with CMSSW_9_4_0 and 10_0_0
    Tab2013,
    /// Tight windows, CMSSW_10_2_X
    Tight,
    /// Loose windows, CMSSW_10_2_X
    Loose,
    /// All thresholds zero
    Zero,
}

/// Literal names accepted for each profile, canonical name first
const ALIASES: &[(StubWindowProfile, &[&str])] = &[
    (StubWindowProfile::Tab2013, &["Tab2013", "9", "Tab"]),
    (StubWindowProfile::Tight, &["Tight", "10T"]),
    (StubWindowProfile::Loose, &["Loose", "10L"]),
    (StubWindowProfile::Zero, &["Zero", "SANITY"]),
];

/// Lowercased alias -> profile
static ALIAS_MAP: Lazy<HashMap<String, StubWindowProfile>> = Lazy::new(|| {
    ALIASES
        .iter()
        .flat_map(|(profile, names)| names.iter().map(move |n| (n.to_ascii_lowercase(), *profile)))
        .collect()
});

impl StubWindowProfile {
    /// All profiles in declaration order
    pub fn all_variants() -> &'static [StubWindowProfile] {
        &[
            StubWindowProfile::Tab2013,
            StubWindowProfile::Tight,
            StubWindowProfile::Loose,
            StubWindowProfile::Zero,
        ]
    }

    /// Resolve a literal profile name (ASCII case-insensitive)
    ///
    /// Unknown names fail with [`Error::Configuration`] listing every
    /// accepted alias.
    pub fn from_alias(name: &str) -> Result<Self> {
        match ALIAS_MAP.get(&name.trim().to_ascii_lowercase()) {
            Some(profile) => {
                debug!("Stub-window profile '{}' resolved to {}", name, profile);
                Ok(*profile)
            }
            None => Err(Error::Configuration {
                name: name.to_string(),
                valid: Self::valid_names(),
            }),
        }
    }

    /// Every accepted literal name, grouped by profile
    pub fn valid_names() -> Vec<String> {
        ALIASES
            .iter()
            .flat_map(|(_, names)| names.iter().map(|n| n.to_string()))
            .collect()
    }

    /// Literal names for this profile, canonical name first
    pub fn aliases(&self) -> &'static [&'static str] {
        ALIASES
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            StubWindowProfile::Tab2013 => "Tab2013",
            StubWindowProfile::Tight => "Tight",
            StubWindowProfile::Loose => "Loose",
            StubWindowProfile::Zero => "Zero",
        }
    }

    /// Short description, as printed by the driver
    pub fn description(&self) -> &'static str {
        match self {
            StubWindowProfile::Tab2013 => "stub windows in CMSSW_9_4_0 and 10_0_0",
            StubWindowProfile::Tight => "tight windows in CMSSW_10_2_X",
            StubWindowProfile::Loose => "loose windows in CMSSW_10_2_X",
            StubWindowProfile::Zero => "everything is zero (sanity check)",
        }
    }

    /// Calibration table for this profile
    pub fn windows(&self) -> &'static StubWindows {
        match self {
            StubWindowProfile::Tab2013 => &tables::TAB2013,
            StubWindowProfile::Tight => &tables::TIGHT,
            StubWindowProfile::Loose => &tables::LOOSE,
            StubWindowProfile::Zero => &tables::ZERO,
        }
    }
}

impl fmt::Display for StubWindowProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StubWindowProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_alias(s)
    }
}

impl Serialize for StubWindowProfile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for StubWindowProfile {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_alias(&name).map_err(serde::de::Error::custom)
    }
}

/// Look up the calibration table for a literal profile name
pub fn stub_windows(name: &str) -> Result<&'static StubWindows> {
    StubWindowProfile::from_alias(name).map(|p| p.windows())
}

/// Per-layer bend thresholds for one profile
///
/// Outer shapes are fixed by the types; inner group lengths follow
/// [`TILTED_GROUP_LENGTHS`] and [`ENDCAP_GROUP_LENGTHS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StubWindows {
    pub barrel_cut: [f64; BARREL_LAYERS],
    pub tilted_barrel_cut_set: [&'static [f64]; 4],
    pub endcap_cut_set: [&'static [f64]; 6],
}

impl StubWindows {
    /// Check group lengths and that no threshold is negative or NaN
    pub fn validate(&self) -> Result<()> {
        for (ring, (group, expected)) in self
            .tilted_barrel_cut_set
            .iter()
            .zip(TILTED_GROUP_LENGTHS)
            .enumerate()
        {
            if group.len() != expected {
                return Err(Error::InvalidParameter(format!(
                    "TiltedBarrelCutSet[{}]: expected {} values, found {}",
                    ring,
                    expected,
                    group.len()
                )));
            }
        }
        for (disk, (group, expected)) in self
            .endcap_cut_set
            .iter()
            .zip(ENDCAP_GROUP_LENGTHS)
            .enumerate()
        {
            if group.len() != expected {
                return Err(Error::InvalidParameter(format!(
                    "EndcapCutSet[{}]: expected {} values, found {}",
                    disk,
                    expected,
                    group.len()
                )));
            }
        }
        if let Some(v) = self.values().find(|v| !(*v >= 0.0)) {
            return Err(Error::InvalidParameter(format!(
                "stub windows: threshold {} is not a non-negative number",
                v
            )));
        }
        Ok(())
    }

    /// Every threshold, barrel first, then tilted rings, then endcap disks
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.barrel_cut
            .iter()
            .chain(self.tilted_barrel_cut_set.iter().flat_map(|g| g.iter()))
            .chain(self.endcap_cut_set.iter().flat_map(|g| g.iter()))
            .copied()
    }
}

/// One tilted-barrel ring group as the stub builder expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TiltedCut {
    #[serde(rename = "TiltedCut")]
    pub tilted_cut: Vec<f64>,
}

/// One endcap disk group as the stub builder expects it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndcapCut {
    #[serde(rename = "EndcapCut")]
    pub endcap_cut: Vec<f64>,
}

/// Parameter block injected into the stub-building module
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StubAlgorithmParams {
    pub module: &'static str,
    pub profile: StubWindowProfile,
    #[serde(rename = "BarrelCut")]
    pub barrel_cut: Vec<f64>,
    #[serde(rename = "TiltedBarrelCutSet")]
    pub tilted_barrel_cut_set: Vec<TiltedCut>,
    #[serde(rename = "EndcapCutSet")]
    pub endcap_cut_set: Vec<EndcapCut>,
}

impl StubAlgorithmParams {
    pub fn for_profile(profile: StubWindowProfile) -> Self {
        let windows = profile.windows();
        Self {
            module: STUB_ALGORITHM_MODULE,
            profile,
            barrel_cut: windows.barrel_cut.to_vec(),
            tilted_barrel_cut_set: windows
                .tilted_barrel_cut_set
                .iter()
                .map(|g| TiltedCut { tilted_cut: g.to_vec() })
                .collect(),
            endcap_cut_set: windows
                .endcap_cut_set
                .iter()
                .map(|g| EndcapCut { endcap_cut: g.to_vec() })
                .collect(),
        }
    }
}
