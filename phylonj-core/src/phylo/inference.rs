//! Alignment to tree, optionally with bootstrap support.

use tracing::{debug, info, info_span};

use crate::error::{PhyloError, PhyloResult};
use crate::msa::{Msa, ResampledMsa};

use super::bootstrap::resampled_column_positions;
use super::confidence::{BootstrapSupport, ConfidenceAssessor};
use super::nj::NeighborJoining;
use super::pairwise::{DistanceMethod, PairwiseDistanceCalculator, DEFAULT_TOO_LARGE_DISTANCE};
use super::tree::PhyloTree;

pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 100;
pub const DEFAULT_RANDOM_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceOptions {
    pub distance_method: DistanceMethod,
    pub bootstrap_samples: usize,
    pub random_seed: u64,
    pub perform_bootstrap: bool,
    /// Round NJ branch lengths to this many fractional digits.
    pub max_fraction_digits: Option<u32>,
    pub too_large_distance: f64,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            distance_method: DistanceMethod::Kimura,
            bootstrap_samples: DEFAULT_BOOTSTRAP_SAMPLES,
            random_seed: DEFAULT_RANDOM_SEED,
            perform_bootstrap: false,
            max_fraction_digits: None,
            too_large_distance: DEFAULT_TOO_LARGE_DISTANCE,
        }
    }
}

impl InferenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance_method(mut self, method: DistanceMethod) -> Self {
        self.distance_method = method;
        self
    }

    /// Enable bootstrap resampling with `samples` replicates.
    pub fn with_bootstrap(mut self, samples: usize) -> Self {
        self.perform_bootstrap = true;
        self.bootstrap_samples = samples;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = Some(digits);
        self
    }

    pub fn with_too_large_distance(mut self, value: f64) -> Self {
        self.too_large_distance = value;
        self
    }

    pub fn validate(&self) -> PhyloResult<()> {
        if self.perform_bootstrap && self.bootstrap_samples < 1 {
            return Err(PhyloError::InvalidReplicateCount {
                n: self.bootstrap_samples,
            });
        }
        self.neighbor_joining().map(|_| ())
    }

    fn calculator(&self) -> PairwiseDistanceCalculator {
        PairwiseDistanceCalculator::new(self.distance_method)
            .with_too_large_distance(self.too_large_distance)
    }

    fn neighbor_joining(&self) -> PhyloResult<NeighborJoining> {
        match self.max_fraction_digits {
            Some(digits) => NeighborJoining::with_max_fraction_digits(digits),
            None => Ok(NeighborJoining::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Tree from the full alignment, annotated with support when
    /// bootstrapping was requested.
    pub tree: PhyloTree,
    /// Replicate trees in replicate order; empty without bootstrapping.
    pub replicates: Vec<PhyloTree>,
}

/// Infer a neighbor-joining tree from `msa`, with bootstrap support when
/// `options.perform_bootstrap` is set.
pub fn infer_tree<M: Msa + Sync + ?Sized>(
    msa: &M,
    options: &InferenceOptions,
) -> PhyloResult<InferenceResult> {
    infer_tree_with(msa, options, &BootstrapSupport)
}

/// Like [`infer_tree`] with a caller-supplied support assessor.
pub fn infer_tree_with<M, A>(
    msa: &M,
    options: &InferenceOptions,
    assessor: &A,
) -> PhyloResult<InferenceResult>
where
    M: Msa + Sync + ?Sized,
    A: ConfidenceAssessor + ?Sized,
{
    let _span = info_span!(
        "infer_tree",
        sequences = msa.num_sequences(),
        length = msa.length(),
        method = %options.distance_method,
    )
    .entered();
    options.validate()?;

    let calculator = options.calculator();
    let nj = options.neighbor_joining()?;

    let mut master = calculator.compute(msa)?;
    let mut tree = nj.execute(&mut master)?;

    if !options.perform_bootstrap {
        return Ok(InferenceResult {
            tree,
            replicates: Vec::new(),
        });
    }

    let replicates = bootstrap_trees(msa, options, &calculator, &nj)?;
    assessor.evaluate(&mut tree, &replicates)?;
    Ok(InferenceResult { tree, replicates })
}

fn bootstrap_trees<M: Msa + Sync + ?Sized>(
    msa: &M,
    options: &InferenceOptions,
    calculator: &PairwiseDistanceCalculator,
    nj: &NeighborJoining,
) -> PhyloResult<Vec<PhyloTree>> {
    let _span = info_span!("bootstrap", samples = options.bootstrap_samples).entered();
    let positions = resampled_column_positions(
        msa.length(),
        options.bootstrap_samples,
        options.random_seed,
    )?;
    info!(
        "bootstrapping {} replicates (seed {})",
        positions.len(),
        options.random_seed
    );

    let trees: PhyloResult<Vec<PhyloTree>> = par_try_map!(&positions, |cols: &Vec<usize>| {
        let view = ResampledMsa::new(msa, cols)?;
        let mut dm = calculator.compute(&view)?;
        nj.execute(&mut dm)
    });
    let trees = trees?;
    debug!("built {} replicate trees", trees.len());
    Ok(trees)
}
