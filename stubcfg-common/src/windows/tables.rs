//! Calibration tables for each stub-window profile
//!
//! Values are taken verbatim from the tuning campaigns they are named after.
//! Index 0 of every sequence is a placeholder for the unused layer/ring/disk.

use super::StubWindows;

/// Stub windows shipped with CMSSW_9_4_0 and 10_0_0
pub(super) static TAB2013: StubWindows = StubWindows {
    barrel_cut: [0.0, 2.0, 2.0, 3.5, 4.5, 5.5, 6.5],
    tilted_barrel_cut_set: [
        &[0.0],
        &[0.0, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.0, 2.0, 1.5, 1.5, 1.0, 1.0],
        &[0.0, 3.0, 3.0, 3.0, 3.0, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.0, 2.0],
        &[0.0, 4.5, 4.5, 4.0, 4.0, 4.0, 4.0, 3.5, 3.5, 3.5, 3.0, 3.0, 3.0],
    ],
    endcap_cut_set: [
        &[0.0],
        &[0.0, 1.0, 1.5, 1.5, 2.0, 2.0, 2.5, 3.0, 3.0, 3.5, 4.0, 2.5, 3.0, 3.5, 4.5, 5.5],
        &[0.0, 1.0, 1.5, 1.5, 2.0, 2.0, 2.0, 2.5, 3.0, 3.0, 3.0, 2.0, 3.0, 4.0, 5.0, 5.5],
        &[0.0, 1.5, 1.5, 2.0, 2.0, 2.5, 2.5, 2.5, 3.5, 2.5, 5.0, 5.5, 6.0],
        &[0.0, 1.0, 1.5, 1.5, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 6.0, 6.0, 6.5],
        &[0.0, 1.0, 1.5, 1.5, 1.5, 2.0, 2.0, 2.0, 3.0, 3.0, 6.0, 6.0, 6.5],
    ],
};

/// Tight windows from CMSSW_10_2_X
pub(super) static TIGHT: StubWindows = StubWindows {
    barrel_cut: [0.0, 2.0, 2.5, 3.5, 4.5, 5.5, 7.0],
    tilted_barrel_cut_set: [
        &[0.0],
        &[0.0, 3.0, 3.0, 2.5, 3.0, 3.0, 2.5, 2.5, 2.0, 1.5, 1.5, 1.0, 1.0],
        &[0.0, 3.5, 3.0, 3.0, 3.0, 3.0, 2.5, 2.5, 3.0, 3.0, 2.5, 2.5, 2.5],
        &[0.0, 4.0, 4.0, 4.0, 3.5, 3.5, 3.5, 3.5, 3.0, 3.0, 3.0, 3.0, 3.0],
    ],
    endcap_cut_set: [
        &[0.0],
        &[0.0, 1.0, 2.5, 2.5, 3.0, 2.5, 3.0, 3.5, 4.0, 4.0, 4.5, 3.5, 4.0, 4.5, 5.0, 5.5],
        &[0.0, 0.5, 2.5, 2.5, 3.0, 2.5, 3.0, 3.0, 3.5, 3.5, 4.0, 3.5, 3.5, 4.0, 4.5, 5.0],
        &[0.0, 1.0, 3.0, 3.0, 2.5, 3.5, 3.5, 3.5, 4.0, 3.5, 3.5, 4.0, 4.5],
        &[0.0, 1.0, 2.5, 3.0, 2.5, 3.5, 3.0, 3.0, 3.5, 3.5, 3.5, 4.0, 4.0],
        &[0.0, 0.5, 1.5, 3.0, 2.5, 3.5, 3.0, 3.0, 3.5, 4.0, 3.5, 4.0, 3.5],
    ],
};

/// Loose windows from CMSSW_10_2_X
pub(super) static LOOSE: StubWindows = StubWindows {
    barrel_cut: [0.0, 2.0, 3.0, 4.5, 6.0, 6.5, 7.0],
    tilted_barrel_cut_set: [
        &[0.0],
        &[0.0, 3.0, 3.0, 2.5, 3.0, 3.0, 2.5, 2.5, 2.0, 1.5, 1.5, 1.0, 1.0],
        &[0.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.5, 5.0, 4.0, 3.5, 3.5, 3.0],
        &[0.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.5, 5.0, 5.0, 5.5, 5.5, 5.5],
    ],
    endcap_cut_set: [
        &[0.0],
        &[0.0, 1.0, 2.5, 2.5, 3.5, 5.5, 5.5, 6.0, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 7.0, 7.0],
        &[0.0, 0.5, 2.5, 2.5, 3.0, 5.0, 6.0, 6.0, 6.5, 6.5, 6.5, 6.5, 6.5, 6.5, 7.0, 7.0],
        &[0.0, 1.0, 3.0, 4.5, 6.0, 6.5, 6.5, 6.5, 7.0, 7.0, 7.0, 7.0, 7.0],
        &[0.0, 1.0, 2.5, 3.5, 6.0, 6.5, 6.5, 6.5, 6.5, 7.0, 7.0, 7.0, 7.0],
        &[0.0, 0.5, 1.5, 3.0, 4.5, 6.5, 6.5, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0],
    ],
};

/// Everything zero; accepts no bend at all. Sanity check only.
pub(super) static ZERO: StubWindows = StubWindows {
    barrel_cut: [0.0; 7],
    tilted_barrel_cut_set: [&[0.0], &[0.0; 13], &[0.0; 13], &[0.0; 13]],
    endcap_cut_set: [
        &[0.0],
        &[0.0; 16],
        &[0.0; 16],
        &[0.0; 13],
        &[0.0; 13],
        &[0.0; 13],
    ],
};
