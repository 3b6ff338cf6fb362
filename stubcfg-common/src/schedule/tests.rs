use super::*;

fn full_flags() -> ProductionFlags {
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
fn test_everything_available_runs_only_extraction() {
    let schedule = resolve(&full_flags(), &UpstreamAvailability::all()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::Extraction]);
}

#[test]
fn test_nothing_requested_runs_only_extraction() {
    let schedule = resolve(&ProductionFlags::default(), &UpstreamAvailability::none()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::Extraction]);
}

#[test]
fn test_nothing_available_runs_full_chain() {
    let schedule = resolve(&full_flags(), &UpstreamAvailability::none()).unwrap();
    assert_eq!(
        schedule.stages(),
        &[
            Stage::ClusterStub,
            Stage::ClusterStubTruth,
            Stage::TracksEmulationWithTruth,
            Stage::Extraction,
        ]
    );
    assert_eq!(
        schedule.labels(),
        vec!["TTClusterStub", "TTClusterStubTruth", "TTTracksEmulationWithTruth", "MIBextraction"]
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let upstream = UpstreamAvailability::with(&[Product::ClustersStubs]);
    let first = resolve(&full_flags(), &upstream).unwrap();
    let second = resolve(&full_flags(), &upstream).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_no_duplicates_and_prerequisites_first() {
    let upstream_sets = [
        UpstreamAvailability::none(),
        UpstreamAvailability::with(&[Product::ClustersStubs]),
        UpstreamAvailability::with(&[Product::L1Tracks]),
        UpstreamAvailability::with(&[Product::ClustersStubs, Product::L1Tracks]),
        UpstreamAvailability::with(&[Product::ClusterStubTruth, Product::ClustersStubs]),
    ];
    for upstream in &upstream_sets {
        let schedule = resolve(&full_flags(), upstream).unwrap();
        let stages = schedule.stages();
        for (i, stage) in stages.iter().enumerate() {
            assert!(!stages[i + 1..].contains(stage), "duplicate {} in {:?}", stage, stages);
            let Some(spec) = stage.spec() else { continue };
            for req in spec.requires {
                let made_earlier = stages[..i]
                    .iter()
                    .filter_map(|s| s.spec())
                    .any(|s| s.produces.contains(req));
                assert!(
                    upstream.contains(*req) || made_earlier,
                    "{} needs {} in {:?}",
                    stage,
                    req,
                    stages
                );
            }
        }
    }
}

#[test]
fn test_stubs_available_skips_stub_building() {
    let upstream = UpstreamAvailability::with(&[Product::ClustersStubs]);
    let schedule = resolve(&full_flags(), &upstream).unwrap();
    assert_eq!(
        schedule.stages(),
        &[Stage::ClusterStubTruth, Stage::TracksEmulationWithTruth, Stage::Extraction]
    );
}

#[test]
fn test_tracks_available_adds_track_truth_only() {
    let upstream = UpstreamAvailability::with(&[
        Product::ClustersStubs,
        Product::ClusterStubTruth,
        Product::L1Tracks,
    ]);
    let schedule = resolve(&full_flags(), &upstream).unwrap();
    assert_eq!(schedule.stages(), &[Stage::TracksTruth, Stage::Extraction]);
}

#[test]
fn test_tracks_without_truth_use_plain_emulation() {
    let flags = ProductionFlags {
        do_l1trk: true,
        ..Default::default()
    };
    let schedule = resolve(&flags, &UpstreamAvailability::none()).unwrap();
    assert_eq!(
        schedule.stages(),
        &[Stage::ClusterStub, Stage::TracksEmulation, Stage::Extraction]
    );
}

#[test]
fn test_stubs_only_without_mc() {
    let flags = ProductionFlags {
        do_stub: true,
        ..Default::default()
    };
    let schedule = resolve(&flags, &UpstreamAvailability::none()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::ClusterStub, Stage::Extraction]);
}

#[test]
fn test_real_data_without_truth_request_is_fine() {
    let flags = ProductionFlags {
        do_stub: true,
        do_l1trk: true,
        ..Default::default()
    };
    let upstream = UpstreamAvailability::none().without_simulation_truth();
    let schedule = resolve(&flags, &upstream).unwrap();
    assert_eq!(
        schedule.stages(),
        &[Stage::ClusterStub, Stage::TracksEmulation, Stage::Extraction]
    );
}

#[test]
fn test_truth_without_simulation_input_is_unsatisfiable() {
    let flags = ProductionFlags {
        do_mc: true,
        do_stub: true,
        ..Default::default()
    };
    let upstream = UpstreamAvailability::none().without_simulation_truth();
    let err = resolve(&flags, &upstream).unwrap_err();
    match &err {
        Error::UnsatisfiableDependency { stage, remedies, .. } => {
            assert_eq!(stage, "TTClusterStubTruth");
            assert_eq!(remedies.len(), 3);
            assert!(remedies.iter().any(|r| r.contains("cluster_stub_truth")));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("simulation truth"));
}

#[test]
fn test_truth_already_materialized_needs_no_simulation_input() {
    let flags = ProductionFlags {
        do_mc: true,
        do_stub: true,
        ..Default::default()
    };
    let upstream = UpstreamAvailability::with(&[Product::ClustersStubs, Product::ClusterStubTruth])
        .without_simulation_truth();
    let schedule = resolve(&flags, &upstream).unwrap();
    assert_eq!(schedule.stages(), &[Stage::Extraction]);
}

#[test]
fn test_remake_stubs_ignores_upstream_products() {
    let flags = ProductionFlags {
        remake_stubs: true,
        ..full_flags()
    };
    let schedule = resolve(&flags, &UpstreamAvailability::all()).unwrap();
    assert_eq!(
        schedule.stages(),
        &[
            Stage::ClusterStub,
            Stage::ClusterStubTruth,
            Stage::TracksEmulationWithTruth,
            Stage::Extraction,
        ]
    );
}

#[test]
fn test_dump_runs_before_extraction() {
    let flags = ProductionFlags {
        dump_content: true,
        ..Default::default()
    };
    let schedule = resolve(&flags, &UpstreamAvailability::none()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::Dump, Stage::Extraction]);
}

#[test]
fn test_extraction_can_be_switched_off() {
    let flags = ProductionFlags {
        do_stub: true,
        extract: false,
        ..Default::default()
    };
    let schedule = resolve(&flags, &UpstreamAvailability::none()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::ClusterStub]);
    assert!(!schedule.contains(Stage::Extraction));
}

#[test]
fn test_schedule_serializes_as_labels() {
    let schedule = resolve(&full_flags(), &UpstreamAvailability::none()).unwrap();
    let json = serde_json::to_string(&schedule).unwrap();
    assert_eq!(
        json,
        r#"["TTClusterStub","TTClusterStubTruth","TTTracksEmulationWithTruth","MIBextraction"]"#
    );
}

#[test]
fn test_availability_from_toml() {
    let upstream: UpstreamAvailability =
        toml::from_str("available = [\"clusters_stubs\", \"l1_tracks\"]").unwrap();
    assert!(upstream.contains(Product::ClustersStubs));
    assert!(upstream.contains(Product::L1Tracks));
    assert!(upstream.simulation_truth);

    let upstream: UpstreamAvailability = toml::from_str("simulation_truth = false").unwrap();
    assert!(upstream.available.is_empty());
    assert!(!upstream.simulation_truth);
}

#[test]
fn test_remake_stubs_alone_builds_stubs() {
    let flags = ProductionFlags {
        remake_stubs: true,
        ..Default::default()
    };
    let schedule = resolve(&flags, &UpstreamAvailability::all()).unwrap();
    assert_eq!(schedule.stages(), &[Stage::ClusterStub, Stage::Extraction]);
}

#[test]
fn test_existing_tracks_without_truth_use_complete_truth() {
    let upstream = UpstreamAvailability::with(&[Product::ClustersStubs, Product::L1Tracks]);
    let schedule = resolve(&full_flags(), &upstream).unwrap();
    assert_eq!(schedule.stages(), &[Stage::CompleteTruth, Stage::Extraction]);
    assert_eq!(schedule.labels(), vec!["TTCSTTruth", "MIBextraction"]);
}

#[test]
fn test_complete_truth_not_picked_before_tracks_exist() {
    let upstream = UpstreamAvailability::with(&[Product::ClustersStubs]);
    let schedule = resolve(&full_flags(), &upstream).unwrap();
    assert!(!schedule.contains(Stage::CompleteTruth));
}

#[test]
fn test_coupled_flags_do_not_change_schedule() {
    let raw = ProductionFlags {
        do_match: true,
        do_bank: true,
        do_l1tt: true,
        do_l1trk: true,
        ..Default::default()
    };
    let upstream = UpstreamAvailability::none();
    assert_eq!(
        resolve(&raw, &upstream).unwrap(),
        resolve(&raw.effective(), &upstream).unwrap()
    );
}

#[test]
fn test_reanalysis_only_extracts() {
    let schedule = reanalysis();
    assert_eq!(schedule.stages(), &[Stage::Extraction]);
}
