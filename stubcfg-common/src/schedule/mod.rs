//! Schedule resolution
//!
//! Decides which data-production stages must run before extraction, given
//! what the job asks for ([`ProductionFlags`]) and what the input dataset
//! already holds ([`UpstreamAvailability`]).
//!
//! # Algorithm
//!
//! 1. Flags map to requested products; available products are subtracted.
//! 2. Each still-needed product gets a producer from the stage table.
//!    Stages that would recompute an available product are skipped, and
//!    stages whose inputs already exist are preferred. Among the rest the
//!    one covering the most needed products (minus outputs nobody asked
//!    for) wins, ties going to declaration order.
//! 3. Unmet requirements of a chosen stage become needed products in turn.
//! 4. Chosen stages are emitted in declaration order, which is topological,
//!    followed by the dump and extraction stages when requested.
//!
//! A truth stage on an input without simulation truth is an error, never a
//! silent omission. Re-analysis of an extracted ntuple runs no production
//! stage at all (see [`reanalysis`]).

mod stage;

#[cfg(test)]
mod tests;

pub use stage::{Product, Stage, StageSpec, PRODUCTION_STAGES};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::flags::ProductionFlags;
use crate::{Error, Result};

/// Products already materialized in the input dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamAvailability {
    /// Products that need not be recomputed
    pub available: BTreeSet<Product>,
    /// Input carries simulated truth (tracking particles, digi-sim links)
    pub simulation_truth: bool,
}

impl Default for UpstreamAvailability {
    /// Raw simulated input: nothing materialized, truth present
    fn default() -> Self {
        Self::none()
    }
}

impl UpstreamAvailability {
    /// Nothing materialized; simulated input
    pub fn none() -> Self {
        Self {
            available: BTreeSet::new(),
            simulation_truth: true,
        }
    }

    /// Every product materialized; simulated input
    pub fn all() -> Self {
        Self {
            available: Product::all_variants().iter().copied().collect(),
            simulation_truth: true,
        }
    }

    /// Given products materialized; simulated input
    pub fn with(products: &[Product]) -> Self {
        Self {
            available: products.iter().copied().collect(),
            simulation_truth: true,
        }
    }

    /// Mark the input as carrying no simulated truth
    pub fn without_simulation_truth(mut self) -> Self {
        self.simulation_truth = false;
        self
    }

    pub fn contains(&self, product: Product) -> bool {
        self.available.contains(&product)
    }
}

/// Ordered, duplicate-free list of stages handed to the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedSchedule {
    stages: Vec<Stage>,
}

impl ResolvedSchedule {
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Engine path labels, in execution order
    pub fn labels(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::label).collect()
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Serialize for ResolvedSchedule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.stages.iter().map(Stage::label))
    }
}

impl<'a> IntoIterator for &'a ResolvedSchedule {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.iter()
    }
}

/// Products the flags ask the input to provide
///
/// `remake_stubs` asks for stubs on its own, so the stub builder runs even
/// when the extractor does not store them.
pub fn requested_products(flags: &ProductionFlags) -> BTreeSet<Product> {
    let mut products = BTreeSet::new();
    if flags.remake_stubs {
        products.insert(Product::ClustersStubs);
    }
    if flags.do_stub {
        products.insert(Product::ClustersStubs);
        if flags.do_mc {
            products.insert(Product::ClusterStubTruth);
        }
    }
    if flags.do_l1trk {
        products.insert(Product::L1Tracks);
        if flags.do_mc {
            products.insert(Product::TrackTruth);
        }
    }
    products
}

/// Compute the ordered stage list for one job
///
/// Deterministic: equal inputs always give equal schedules. Flag couplings
/// do not change which products are requested, so raw and effective flags
/// give the same schedule.
pub fn resolve(flags: &ProductionFlags, upstream: &UpstreamAvailability) -> Result<ResolvedSchedule> {
    // Every product in the chain is derived from stubs
    let available: BTreeSet<Product> = if flags.remake_stubs {
        if !upstream.available.is_empty() {
            debug!("remake_stubs set; ignoring {} upstream product(s)", upstream.available.len());
        }
        BTreeSet::new()
    } else {
        upstream.available.clone()
    };

    let mut needed: BTreeSet<Product> = requested_products(flags)
        .difference(&available)
        .copied()
        .collect();
    let mut produced: BTreeSet<Product> = BTreeSet::new();
    let mut selected: BTreeSet<Stage> = BTreeSet::new();

    while let Some(product) = needed.iter().copied().find(|p| !produced.contains(p)) {
        let spec = select_producer(product, &needed, &available, &produced, upstream.simulation_truth)?;
        debug!("{} scheduled to produce {}", spec.stage, product);

        selected.insert(spec.stage);
        produced.extend(spec.produces.iter().copied());
        for req in spec.requires {
            if !available.contains(req) && !produced.contains(req) {
                needed.insert(*req);
            }
        }
    }

    let mut stages: Vec<Stage> = selected.into_iter().collect();
    if flags.dump_content {
        stages.push(Stage::Dump);
    }
    if flags.extract {
        stages.push(Stage::Extraction);
    }

    Ok(ResolvedSchedule { stages })
}

/// Schedule for re-analysis of an already extracted ntuple
///
/// The extractor reads its own input file, so no production stage and no
/// event-content dump can run; only extraction is scheduled.
pub fn reanalysis() -> ResolvedSchedule {
    ResolvedSchedule {
        stages: vec![Stage::Extraction],
    }
}

/// Pick the stage that makes `product`
fn select_producer(
    product: Product,
    needed: &BTreeSet<Product>,
    available: &BTreeSet<Product>,
    produced: &BTreeSet<Product>,
    simulation_truth: bool,
) -> Result<&'static StageSpec> {
    let candidates: Vec<&'static StageSpec> = PRODUCTION_STAGES
        .iter()
        .filter(|s| s.produces.contains(&product))
        .collect();

    // Don't recompute what the input (or an earlier pick) already provides
    let fresh: Vec<&'static StageSpec> = candidates
        .iter()
        .copied()
        .filter(|s| s.produces.iter().all(|p| !available.contains(p) && !produced.contains(p)))
        .collect();
    let pool = if fresh.is_empty() { &candidates } else { &fresh };

    let feasible: Vec<&'static StageSpec> = pool
        .iter()
        .copied()
        .filter(|s| simulation_truth || !s.needs_simulation_truth)
        .collect();

    // Prefer stages that need nothing beyond what already exists
    let ready: Vec<&'static StageSpec> = feasible
        .iter()
        .copied()
        .filter(|s| s.requires.iter().all(|r| available.contains(r) || produced.contains(r)))
        .collect();
    let choices = if ready.is_empty() { &feasible } else { &ready };

    if let Some(spec) = best_of(choices.iter().copied(), needed) {
        return Ok(spec);
    }

    match best_of(pool.iter().copied(), needed) {
        Some(spec) => Err(unsatisfiable(spec, product)),
        None => Err(Error::UnsatisfiableDependency {
            stage: product.to_string(),
            reason: "has no producing stage".to_string(),
            remedies: vec![format!("list '{}' under [input].available", product)],
        }),
    }
}

/// Highest scoring stage; ties go to the earliest row
fn best_of(
    specs: impl Iterator<Item = &'static StageSpec>,
    needed: &BTreeSet<Product>,
) -> Option<&'static StageSpec> {
    let mut best: Option<(&'static StageSpec, isize)> = None;
    for spec in specs {
        let score = spec.covered(needed) as isize - spec.extraneous(needed) as isize;
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((spec, score));
        }
    }
    best.map(|(spec, _)| spec)
}

fn unsatisfiable(spec: &StageSpec, product: Product) -> Error {
    let outputs: Vec<String> = spec.produces.iter().map(|p| format!("'{}'", p)).collect();
    Error::UnsatisfiableDependency {
        stage: spec.stage.to_string(),
        reason: format!(
            "is needed for '{}' but requires simulation truth, which the input does not carry",
            product
        ),
        remedies: vec![
            "use an input with simulation truth ([input] simulation_truth = true)".to_string(),
            format!("list {} under [input].available", outputs.join(" and ")),
            "disable do_mc".to_string(),
        ],
    }
}
