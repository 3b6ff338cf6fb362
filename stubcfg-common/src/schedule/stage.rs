//! Stage and product identifiers plus the fixed dependency table

use std::fmt;

use serde::{Deserialize, Serialize};

/// Data products a production stage can materialize
///
/// Declaration order is the order needed products are resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Clusters and stubs built from tracker digis
    ClustersStubs,
    /// Cluster and stub truth association maps
    ClusterStubTruth,
    /// Level-1 tracks
    L1Tracks,
    /// Track truth association map
    TrackTruth,
}

impl Product {
    pub fn all_variants() -> &'static [Product] {
        &[
            Product::ClustersStubs,
            Product::ClusterStubTruth,
            Product::L1Tracks,
            Product::TrackTruth,
        ]
    }

    /// Key used in job files
    pub fn key(&self) -> &'static str {
        match self {
            Product::ClustersStubs => "clusters_stubs",
            Product::ClusterStubTruth => "cluster_stub_truth",
            Product::L1Tracks => "l1_tracks",
            Product::TrackTruth => "track_truth",
        }
    }

    /// Whether the product can only be made from simulated input
    pub fn is_truth(&self) -> bool {
        matches!(self, Product::ClusterStubTruth | Product::TrackTruth)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Pipeline stages, in topological (declaration) order
///
/// Serialized only as engine labels, through [`ResolvedSchedule`].
///
/// [`ResolvedSchedule`]: super::ResolvedSchedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    ClusterStub,
    ClusterStubTruth,
    TracksEmulation,
    TracksEmulationWithTruth,
    TracksTruth,
    /// Cluster/stub and track truth in one pass over existing tracks
    CompleteTruth,
    Dump,
    Extraction,
}

impl Stage {
    pub fn all_variants() -> &'static [Stage] {
        &[
            Stage::ClusterStub,
            Stage::ClusterStubTruth,
            Stage::TracksEmulation,
            Stage::TracksEmulationWithTruth,
            Stage::TracksTruth,
            Stage::CompleteTruth,
            Stage::Dump,
            Stage::Extraction,
        ]
    }

    /// Path label the execution engine knows this stage by
    pub fn label(&self) -> &'static str {
        match self {
            Stage::ClusterStub => "TTClusterStub",
            Stage::ClusterStubTruth => "TTClusterStubTruth",
            Stage::TracksEmulation => "TTTracksEmulation",
            Stage::TracksEmulationWithTruth => "TTTracksEmulationWithTruth",
            Stage::TracksTruth => "TTTracksTruth",
            Stage::CompleteTruth => "TTCSTTruth",
            Stage::Dump => "dump",
            Stage::Extraction => "MIBextraction",
        }
    }

    /// Dependency entry, `None` for the non-producing stages
    pub fn spec(&self) -> Option<&'static StageSpec> {
        PRODUCTION_STAGES.iter().find(|s| s.stage == *self)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the stage dependency table
#[derive(Debug)]
pub struct StageSpec {
    pub stage: Stage,
    pub produces: &'static [Product],
    pub requires: &'static [Product],
    pub needs_simulation_truth: bool,
}

impl StageSpec {
    /// Products this stage would make that are not in `wanted`
    pub(crate) fn extraneous(&self, wanted: &std::collections::BTreeSet<Product>) -> usize {
        self.produces.iter().filter(|p| !wanted.contains(p)).count()
    }

    /// Products this stage would make that are in `wanted`
    pub(crate) fn covered(&self, wanted: &std::collections::BTreeSet<Product>) -> usize {
        self.produces.iter().filter(|p| wanted.contains(p)).count()
    }
}

/// Fixed producer -> consumer table, in declaration order
///
/// ClusterStub -> ClusterStubTruth -> {TracksEmulation, TracksEmulationWithTruth}.
/// TracksEmulation only reads stubs; TracksTruth and CompleteTruth
/// associate tracks that already exist.
pub static PRODUCTION_STAGES: &[StageSpec] = &[
    StageSpec {
        stage: Stage::ClusterStub,
        produces: &[Product::ClustersStubs],
        requires: &[],
        needs_simulation_truth: false,
    },
    StageSpec {
        stage: Stage::ClusterStubTruth,
        produces: &[Product::ClusterStubTruth],
        requires: &[Product::ClustersStubs],
        needs_simulation_truth: true,
    },
    StageSpec {
        stage: Stage::TracksEmulation,
        produces: &[Product::L1Tracks],
        requires: &[Product::ClustersStubs],
        needs_simulation_truth: false,
    },
    StageSpec {
        stage: Stage::TracksEmulationWithTruth,
        produces: &[Product::L1Tracks, Product::TrackTruth],
        requires: &[Product::ClusterStubTruth],
        needs_simulation_truth: true,
    },
    StageSpec {
        stage: Stage::TracksTruth,
        produces: &[Product::TrackTruth],
        requires: &[Product::L1Tracks, Product::ClusterStubTruth],
        needs_simulation_truth: true,
    },
    StageSpec {
        stage: Stage::CompleteTruth,
        produces: &[Product::ClusterStubTruth, Product::TrackTruth],
        requires: &[Product::ClustersStubs, Product::L1Tracks],
        needs_simulation_truth: true,
    },
];
