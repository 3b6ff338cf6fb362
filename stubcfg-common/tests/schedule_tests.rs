//! Integration tests for schedule resolution through the public API
//!
//! Exercises typical job shapes: raw simulation, re-extraction of an
//! already processed sample and real data.

use stubcfg_common::schedule::{resolve, Product, Stage, UpstreamAvailability};
use stubcfg_common::{Error, ProductionFlags};

fn full_extraction() -> ProductionFlags {
    ProductionFlags {
        do_mc: true,
        do_stub: true,
        do_pixel: true,
        do_match: true,
        do_l1trk: true,
        full_info: true,
        ..Default::default()
    }
}

#[test]
fn test_raw_simulation_runs_whole_chain() {
    let schedule = resolve(&full_extraction(), &UpstreamAvailability::none()).unwrap();
    assert_eq!(
        schedule.stages(),
        &[
            Stage::ClusterStub,
            Stage::ClusterStubTruth,
            Stage::TracksEmulationWithTruth,
            Stage::Extraction
        ]
    );
}

#[test]
fn test_processed_sample_only_extracts() {
    let schedule = resolve(&full_extraction(), &UpstreamAvailability::all()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::Extraction]);
}

#[test]
fn test_extraction_is_always_last_when_requested() {
    let inputs = [
        UpstreamAvailability::none(),
        UpstreamAvailability::with(&[Product::ClustersStubs]),
        UpstreamAvailability::with(&[Product::ClustersStubs, Product::ClusterStubTruth]),
        UpstreamAvailability::all(),
    ];
    for input in &inputs {
        let flags = ProductionFlags {
            dump_content: true,
            ..full_extraction()
        };
        let schedule = resolve(&flags, input).unwrap();
        let labels = schedule.labels();
        assert_eq!(labels.last(), Some(&"MIBextraction"));
        assert_eq!(labels[labels.len() - 2], "dump");
    }
}

#[test]
fn test_every_product_is_made_once() {
    let schedule = resolve(&full_extraction(), &UpstreamAvailability::none()).unwrap();
    for product in Product::all_variants() {
        let producers = schedule
            .stages()
            .iter()
            .filter_map(|s| s.spec())
            .filter(|spec| spec.produces.contains(product))
            .count();
        assert!(producers <= 1, "{:?} produced {} times", product, producers);
    }
}

#[test]
fn test_real_data_without_truth() {
    let flags = ProductionFlags {
        do_stub: true,
        do_l1trk: true,
        ..Default::default()
    };
    let input = UpstreamAvailability::none().without_simulation_truth();
    let schedule = resolve(&flags, &input).unwrap();
    assert_eq!(
        schedule.labels(),
        vec!["TTClusterStub", "TTTracksEmulation", "MIBextraction"]
    );
}

#[test]
fn test_truth_on_real_data_names_stage_and_fixes() {
    let input = UpstreamAvailability::none().without_simulation_truth();
    let err = resolve(&full_extraction(), &input).unwrap_err();
    match &err {
        Error::UnsatisfiableDependency { stage, remedies, .. } => {
            assert_eq!(stage, "TTClusterStubTruth");
            assert_eq!(remedies.len(), 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().starts_with("Unsatisfiable dependency"));
}

#[test]
fn test_resolution_is_deterministic() {
    let input = UpstreamAvailability::with(&[Product::ClustersStubs]);
    let first = resolve(&full_extraction(), &input).unwrap();
    for _ in 0..10 {
        assert_eq!(resolve(&full_extraction(), &input).unwrap(), first);
    }
}
