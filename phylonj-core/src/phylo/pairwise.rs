use std::fmt;
use std::str::FromStr;

use crate::error::{PhyloError, PhyloResult};
use crate::msa::Msa;

use super::distance::DistanceMatrix;

/// Distance returned when a model's log argument is not positive
/// (saturated pairs).
pub const DEFAULT_TOO_LARGE_DISTANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceMethod {
    /// Kimura (1983) protein distance: `-ln(1 - p - 0.2 p^2)`.
    Kimura,
    /// Poisson correction: `-ln(1 - p)`.
    Poisson,
    /// Uncorrected fraction of differing columns.
    FractionalDissimilarity,
}

impl DistanceMethod {
    pub fn name(self) -> &'static str {
        match self {
            DistanceMethod::Kimura => "kimura",
            DistanceMethod::Poisson => "poisson",
            DistanceMethod::FractionalDissimilarity => "fractional",
        }
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMethod {
    type Err = PhyloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kimura" => Ok(DistanceMethod::Kimura),
            "poisson" => Ok(DistanceMethod::Poisson),
            "fractional" | "fractional-dissimilarity" | "p-distance" => {
                Ok(DistanceMethod::FractionalDissimilarity)
            }
            _ => Err(PhyloError::UnknownDistanceMethod {
                name: s.to_string(),
            }),
        }
    }
}

/// Fraction of columns in which rows `a` and `b` carry different symbols.
/// Gaps and unspecified residues are compared like any other symbol.
pub fn fractional_dissimilarity<M: Msa + ?Sized>(msa: &M, a: usize, b: usize) -> f64 {
    let length = msa.length();
    let nd = (0..length)
        .filter(|&col| msa.residue_at(a, col) != msa.residue_at(b, col))
        .count();
    nd as f64 / length as f64
}

#[inline]
fn neg_log_or_sentinel(dp: f64, too_large: f64) -> f64 {
    if dp <= 0.0 {
        return too_large;
    }
    if dp == 1.0 {
        // avoid -0.0
        return 0.0;
    }
    -dp.ln()
}

pub fn kimura_distance(p: f64, too_large: f64) -> f64 {
    neg_log_or_sentinel(1.0 - p - 0.2 * p * p, too_large)
}

pub fn poisson_distance(p: f64, too_large: f64) -> f64 {
    neg_log_or_sentinel(1.0 - p, too_large)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseDistanceCalculator {
    method: DistanceMethod,
    too_large_distance: f64,
}

impl PairwiseDistanceCalculator {
    pub fn new(method: DistanceMethod) -> Self {
        Self {
            method,
            too_large_distance: DEFAULT_TOO_LARGE_DISTANCE,
        }
    }

    pub fn with_too_large_distance(mut self, value: f64) -> Self {
        self.too_large_distance = value;
        self
    }

    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    pub fn too_large_distance(&self) -> f64 {
        self.too_large_distance
    }

    pub fn pair_distance<M: Msa + ?Sized>(&self, msa: &M, a: usize, b: usize) -> f64 {
        let p = fractional_dissimilarity(msa, a, b);
        match self.method {
            DistanceMethod::FractionalDissimilarity => p,
            DistanceMethod::Poisson => poisson_distance(p, self.too_large_distance),
            DistanceMethod::Kimura => kimura_distance(p, self.too_large_distance),
        }
    }

    /// Distances between every pair of rows, labelled by row identifier.
    /// The alignment is only read. Cost is O(n^2 * L).
    pub fn compute<M: Msa + Sync + ?Sized>(&self, msa: &M) -> PhyloResult<DistanceMatrix> {
        let n = msa.num_sequences();
        if n == 0 {
            return Err(PhyloError::EmptyAlignment);
        }
        if msa.length() == 0 {
            return Err(PhyloError::ZeroLengthAlignment);
        }

        let pairs: Vec<(usize, usize)> = (1..n)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .collect();

        let distances: Vec<f64> = par_map!(&pairs, |&(i, j)| self.pair_distance(msa, i, j));

        // Only a negative too-large value can produce a negative distance.
        if let Some(pos) = distances.iter().position(|&d| d < 0.0) {
            let (i, j) = pairs[pos];
            return Err(PhyloError::NegativeDistance {
                i,
                j,
                value: distances[pos],
            });
        }

        let labels = (0..n).map(|i| Box::from(msa.identifier(i))).collect();
        let mut dm = DistanceMatrix::new(labels);
        // `pairs` enumerates the packed lower triangle in storage order.
        dm.values_mut().copy_from_slice(&distances);
        Ok(dm)
    }
}

/// Convenience wrapper using the default too-large-distance value.
pub fn pairwise_distances<M: Msa + Sync + ?Sized>(
    msa: &M,
    method: DistanceMethod,
) -> PhyloResult<DistanceMatrix> {
    PairwiseDistanceCalculator::new(method).compute(msa)
}
