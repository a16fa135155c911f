pub mod bootstrap;
pub mod confidence;
pub mod distance;
pub mod inference;
pub mod newick;
pub mod nj;
pub mod pairwise;
pub mod tree;

pub use bootstrap::{resample, resampled_column_positions};
pub use confidence::{assess_bootstrap, BootstrapSupport, ConfidenceAssessor};
pub use distance::DistanceMatrix;
pub use inference::{infer_tree, infer_tree_with, InferenceOptions, InferenceResult};
pub use newick::to_newick;
pub use nj::{neighbor_joining, NeighborJoining};
pub use pairwise::{pairwise_distances, DistanceMethod, PairwiseDistanceCalculator};
pub use tree::{Confidence, PhyloNode, PhyloTree};
