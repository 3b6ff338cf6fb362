//! Production flags for one extraction job

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which optional pipeline outputs the job asks for
///
/// Built once per job (usually from the `[flags]` table of the job file)
/// and read-only afterwards. Field names follow the extractor options they
/// drive: `do_mc` -> `doMC`, `do_stub` -> `doSTUB`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductionFlags {
    /// Tracking-particle (Monte-Carlo truth) information
    pub do_mc: bool,
    /// Official clusters and stubs
    pub do_stub: bool,
    /// Pixel digis
    pub do_pixel: bool,
    /// Digi-to-truth matching; only meaningful with `do_pixel`
    pub do_match: bool,
    /// Level-1 tracks
    pub do_l1trk: bool,
    /// Bank-format stub containers; only meaningful with `do_stub`
    pub do_bank: bool,
    /// Track-trigger stub analysis on digis; needs `do_mc` and `do_pixel`
    pub do_l1tt: bool,
    /// Tracker coordinates
    pub get_coords: bool,
    /// All hit coordinates (true) or module IDs only (false)
    pub full_info: bool,
    /// Rebuild stubs even if the input already has them
    pub remake_stubs: bool,
    /// Run the terminal extraction stage
    pub extract: bool,
    /// Run the event-content dump before extraction
    pub dump_content: bool,
}

impl Default for ProductionFlags {
    fn default() -> Self {
        Self {
            do_mc: false,
            do_stub: false,
            do_pixel: false,
            do_match: false,
            do_l1trk: false,
            do_bank: false,
            do_l1tt: false,
            get_coords: false,
            full_info: false,
            remake_stubs: false,
            extract: true,
            dump_content: false,
        }
    }
}

impl ProductionFlags {
    /// Flags with couplings applied
    ///
    /// `do_match` without `do_pixel`, `do_bank` without `do_stub` and
    /// `do_l1tt` without both `do_mc` and `do_pixel` are no-ops: they are
    /// switched off here and a warning is logged. Call once per job.
    pub fn effective(&self) -> ProductionFlags {
        let mut flags = *self;
        if flags.do_match && !flags.do_pixel {
            warn!("do_match requested without do_pixel; digi matching disabled");
            flags.do_match = false;
        }
        if flags.do_bank && !flags.do_stub {
            warn!("do_bank requested without do_stub; bank stub containers disabled");
            flags.do_bank = false;
        }
        if flags.do_l1tt && !(flags.do_mc && flags.do_pixel) {
            warn!("do_l1tt requested without do_mc and do_pixel; stub analysis disabled");
            flags.do_l1tt = false;
        }
        flags
    }
}
