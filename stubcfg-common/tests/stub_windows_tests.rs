//! Integration tests for stub-window profile lookup
//!
//! Covers alias equivalence, table shapes and the error reported for
//! unknown profile names.

use stubcfg_common::windows::{
    stub_windows, StubAlgorithmParams, StubWindowProfile, BARREL_LAYERS, ENDCAP_GROUP_LENGTHS,
    TILTED_GROUP_LENGTHS,
};
use stubcfg_common::Error;

#[test]
fn test_every_alias_returns_the_same_table() {
    for profile in StubWindowProfile::all_variants() {
        let canonical = stub_windows(profile.name()).unwrap();
        for alias in profile.aliases() {
            let table = stub_windows(alias).unwrap();
            // Same static table, not merely equal values
            assert!(std::ptr::eq(table, canonical), "alias {} of {}", alias, profile);
        }
    }
}

#[test]
fn test_tab_and_nine_are_tab2013() {
    assert_eq!(stub_windows("9").unwrap(), stub_windows("Tab2013").unwrap());
    assert_eq!(stub_windows("Tab").unwrap(), stub_windows("Tab2013").unwrap());
}

#[test]
fn test_zero_profile_is_all_zero() {
    let zero = stub_windows("SANITY").unwrap();
    assert!(zero.values().all(|v| v == 0.0));
    assert_eq!(zero, stub_windows("Zero").unwrap());
}

#[test]
fn test_every_profile_has_the_fixed_shape() {
    for profile in StubWindowProfile::all_variants() {
        let table = profile.windows();
        table.validate().unwrap();
        assert_eq!(table.barrel_cut.len(), BARREL_LAYERS);
        let tilted: Vec<usize> = table.tilted_barrel_cut_set.iter().map(|g| g.len()).collect();
        assert_eq!(tilted, TILTED_GROUP_LENGTHS.to_vec(), "{}", profile);
        let endcap: Vec<usize> = table.endcap_cut_set.iter().map(|g| g.len()).collect();
        assert_eq!(endcap, ENDCAP_GROUP_LENGTHS.to_vec(), "{}", profile);
        // Slot 0 is a placeholder everywhere
        assert_eq!(table.barrel_cut[0], 0.0);
        assert!(table.tilted_barrel_cut_set.iter().all(|g| g[0] == 0.0));
        assert!(table.endcap_cut_set.iter().all(|g| g[0] == 0.0));
    }
}

#[test]
fn test_tight_and_loose_differ() {
    let tight = stub_windows("10T").unwrap();
    let loose = stub_windows("10L").unwrap();
    assert_ne!(tight, loose);
    assert_eq!(tight.barrel_cut, [0.0, 2.0, 2.5, 3.5, 4.5, 5.5, 7.0]);
    assert_eq!(loose.barrel_cut, [0.0, 2.0, 3.0, 4.5, 6.0, 6.5, 7.0]);
}

#[test]
fn test_unknown_name_lists_valid_names() {
    let err = stub_windows("Bogus").unwrap_err();
    match &err {
        Error::Configuration { name, valid } => {
            assert_eq!(name, "Bogus");
            assert_eq!(valid.len(), 9);
            for expected in ["Tab2013", "9", "Tab", "Tight", "10T", "Loose", "10L", "Zero", "SANITY"] {
                assert!(valid.iter().any(|v| v == expected), "missing {}", expected);
            }
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("Bogus"));
    assert!(err.to_string().contains("10T"));
}

#[test]
fn test_empty_name_is_rejected() {
    assert!(stub_windows("").is_err());
    assert!(stub_windows("   ").is_err());
}

#[test]
fn test_stub_algorithm_block_mirrors_table() {
    let params = StubAlgorithmParams::for_profile(StubWindowProfile::Loose);
    let table = StubWindowProfile::Loose.windows();
    assert_eq!(params.barrel_cut, table.barrel_cut.to_vec());
    assert_eq!(params.tilted_barrel_cut_set.len(), 4);
    assert_eq!(params.endcap_cut_set.len(), 6);
    assert_eq!(params.endcap_cut_set[1].endcap_cut, table.endcap_cut_set[1].to_vec());
}
