use tracing::debug;

use crate::error::{PhyloError, PhyloResult};

use super::distance::{tri_index, DistanceMatrix};
use super::tree::PhyloTree;

/// Saitou-Nei neighbor-joining with Studier-Keppler net divergences.
///
/// Pair selection keeps the first minimum met while scanning `j` from 1
/// upward and, inside, `i` from 0 to `j - 1`, so tied inputs always give the
/// same topology. Each join is reported at `debug` level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborJoining {
    fraction_digits: Option<u32>,
}

impl NeighborJoining {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round every branch length half-up to `digits` fractional digits
    /// (1..=9) as it is assigned.
    pub fn with_max_fraction_digits(digits: u32) -> PhyloResult<Self> {
        if !(1..=9).contains(&digits) {
            return Err(PhyloError::InvalidFractionDigits { digits });
        }
        Ok(Self {
            fraction_digits: Some(digits),
        })
    }

    pub fn max_fraction_digits(&self) -> Option<u32> {
        self.fraction_digits
    }

    #[inline]
    fn round(&self, x: f64) -> f64 {
        match self.fraction_digits {
            Some(digits) => round_half_up(x, digits),
            None => x,
        }
    }

    /// Build an unrooted tree from `matrix`.
    ///
    /// The distances in `matrix` are overwritten while clusters merge; copy
    /// it first (or use [`NeighborJoining::execute_cloned`]) if it is needed
    /// afterwards. Fewer than two taxa is an error; two taxa are joined
    /// directly under the root.
    pub fn execute(&self, matrix: &mut DistanceMatrix) -> PhyloResult<PhyloTree> {
        let size = matrix.size();
        if size < 2 {
            return Err(PhyloError::TooFewTaxa { n: size, min: 2 });
        }

        let mut tree = PhyloTree::with_capacity(2 * size - 1);
        // Current tree node for each original slot.
        let mut live: Vec<usize> = (0..size)
            .map(|i| {
                let id = matrix.identifier(i);
                if id.is_empty() {
                    tree.add_leaf(i.to_string())
                } else {
                    tree.add_leaf(id)
                }
            })
            .collect();
        // Active cluster -> original slot. Removing an entry shifts the rest down.
        let mut mappings: Vec<usize> = (0..size).collect();
        let mut r = vec![0.0f64; size];
        let d = matrix.values_mut();

        let mut n = size;
        while n > 2 {
            let dv: &[f64] = &*d;
            for i in 0..n {
                let i_m = mappings[i];
                r[i] = mappings[..n].iter().map(|&k_m| dist(dv, i_m, k_m)).sum();
            }

            let n_2 = (n - 2) as f64;
            let mut minimum = f64::MAX;
            let (mut otu1, mut otu2) = (0usize, 1usize);
            for j in 1..n {
                let r_j = r[j];
                let j_m = mappings[j];
                for i in 0..j {
                    let m = dist(dv, mappings[i], j_m) - (r[i] + r_j) / n_2;
                    if m < minimum {
                        minimum = m;
                        otu1 = i;
                        otu2 = j;
                    }
                }
            }

            let m1 = mappings[otu1];
            let m2 = mappings[otu2];
            let d12 = dist(dv, m1, m2);
            let d1 = d12 / 2.0 + (r[otu1] - r[otu2]) / (2.0 * n_2);
            let d2 = d12 - d1;

            let (a, b) = (live[m1], live[m2]);
            tree.set_branch_length(a, self.round(d1));
            tree.set_branch_length(b, self.round(d2));
            debug!(
                "node {} joins {}",
                node_label(&tree, a),
                node_label(&tree, b)
            );
            let joined = tree.add_internal(vec![a, b]);

            for k in 0..n {
                if k == otu1 || k == otu2 {
                    continue;
                }
                let k_m = mappings[k];
                let updated = (dist(d, m1, k_m) + dist(d, m2, k_m) - d12) / 2.0;
                d[tri_index(m1, k_m)] = updated;
            }

            live[m1] = joined;
            mappings.remove(otu2);
            n -= 1;
        }

        let (m0, m1) = (mappings[0], mappings[1]);
        let half = self.round(dist(d, m0, m1) / 2.0);
        let (a, b) = (live[m0], live[m1]);
        tree.set_branch_length(a, half);
        tree.set_branch_length(b, half);
        debug!(
            "node {} joins {}",
            node_label(&tree, a),
            node_label(&tree, b)
        );
        let root = tree.add_internal(vec![a, b]);
        tree.set_root(root, false);
        Ok(tree)
    }

    /// Like [`NeighborJoining::execute`] but leaves `matrix` untouched.
    pub fn execute_cloned(&self, matrix: &DistanceMatrix) -> PhyloResult<PhyloTree> {
        let mut working = matrix.clone();
        self.execute(&mut working)
    }

    pub fn execute_all(&self, matrices: &mut [DistanceMatrix]) -> PhyloResult<Vec<PhyloTree>> {
        matrices.iter_mut().map(|m| self.execute(m)).collect()
    }
}

#[inline]
fn dist(d: &[f64], a: usize, b: usize) -> f64 {
    if a == b {
        0.0
    } else {
        d[tri_index(a, b)]
    }
}

/// Round the exact binary value of `x` to `digits` fractional digits, ties
/// away from zero. `0.015` is stored as `0.01499...` and so rounds to `0.01`.
fn round_half_up(x: f64, digits: u32) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let bits = x.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    // x = mantissa * 2^exp
    let (mantissa, exp) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    if exp >= 0 {
        return x;
    }

    let shift = exp.unsigned_abs();
    let pow10 = 10u128.pow(digits);
    // below 2^83 for digits <= 9
    let scaled = mantissa as u128 * pow10;
    let rounded = if shift >= 128 {
        0
    } else {
        let quotient = scaled >> shift;
        let remainder = scaled & ((1u128 << shift) - 1);
        quotient + u128::from(remainder >= 1u128 << (shift - 1))
    };
    let magnitude = rounded as f64 / pow10 as f64;
    if x.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

fn node_label(tree: &PhyloTree, idx: usize) -> String {
    match tree.node(idx).name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("#{}", idx),
    }
}

/// Neighbor-joining without rounding on a copy of `matrix`.
pub fn neighbor_joining(matrix: &DistanceMatrix) -> PhyloResult<PhyloTree> {
    NeighborJoining::new().execute_cloned(matrix)
}
