//! Column resampling for bootstrap replicates.
//!
//! Both entry points draw from a `StdRng` seeded with `seed`, replicate by
//! replicate and column by column, so a given `(length, n, seed)` always
//! yields the same replicates and [`resample`] materializes exactly the
//! columns listed by [`resampled_column_positions`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PhyloError, PhyloResult};
use crate::msa::{BasicMsa, Msa, ResampledMsa};

fn check_counts(length: usize, n: usize) -> PhyloResult<()> {
    if length < 2 {
        return Err(PhyloError::AlignmentTooShort { len: length });
    }
    if n < 1 {
        return Err(PhyloError::InvalidReplicateCount { n });
    }
    Ok(())
}

/// `n` arrays of `length` column indices, each drawn uniformly with
/// replacement from `0..length`.
pub fn resampled_column_positions(
    length: usize,
    n: usize,
    seed: u64,
) -> PhyloResult<Vec<Vec<usize>>> {
    check_counts(length, n)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let columns = (0..n)
        .map(|_| (0..length).map(|_| rng.random_range(0..length)).collect())
        .collect();
    Ok(columns)
}

/// `n` owned pseudo-replicate alignments sharing the identifiers and row
/// order of `msa`.
pub fn resample<M: Msa + ?Sized>(msa: &M, n: usize, seed: u64) -> PhyloResult<Vec<BasicMsa>> {
    if msa.num_sequences() < 1 {
        return Err(PhyloError::EmptyAlignment);
    }
    let positions = resampled_column_positions(msa.length(), n, seed)?;
    positions
        .iter()
        .map(|cols| BasicMsa::from_msa(&ResampledMsa::new(msa, cols)?))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::SeqType;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_positions() {
        let a = resampled_column_positions(50, 10, 42).unwrap();
        let b = resampled_column_positions(50, 10, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
        assert!(a.iter().all(|cols| cols.len() == 50));
    }

    #[test]
    fn different_seed_different_positions() {
        let a = resampled_column_positions(50, 3, 1).unwrap();
        let b = resampled_column_positions(50, 3, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn replicates_differ_from_each_other() {
        let cols = resampled_column_positions(100, 2, 7).unwrap();
        assert_ne!(cols[0], cols[1]);
    }

    #[test]
    fn too_short_rejected() {
        assert!(matches!(
            resampled_column_positions(1, 5, 0),
            Err(PhyloError::AlignmentTooShort { len: 1 })
        ));
    }

    #[test]
    fn zero_replicates_rejected() {
        assert!(matches!(
            resampled_column_positions(10, 0, 0),
            Err(PhyloError::InvalidReplicateCount { n: 0 })
        ));
    }

    #[test]
    fn resample_matches_positions() {
        let msa = BasicMsa::from_rows(
            SeqType::Protein,
            [("s1", "MKVLA"), ("s2", "MRVLG"), ("s3", "-KILA")],
        )
        .unwrap();
        let replicates = resample(&msa, 4, 99).unwrap();
        let positions = resampled_column_positions(msa.length(), 4, 99).unwrap();
        assert_eq!(replicates.len(), 4);
        for (rep, cols) in replicates.iter().zip(&positions) {
            assert_eq!(rep.identifiers(), msa.identifiers());
            assert_eq!(rep.length(), msa.length());
            for row in 0..msa.num_sequences() {
                for (col, &src) in cols.iter().enumerate() {
                    assert_eq!(rep.residue_at(row, col), msa.residue_at(row, src));
                }
            }
        }
    }

    #[test]
    fn resample_short_alignment_rejected() {
        let msa = BasicMsa::from_rows(SeqType::Dna, [("a", "A"), ("b", "C")]).unwrap();
        assert!(resample(&msa, 3, 1).is_err());
    }

    proptest! {
        #[test]
        fn positions_in_range_and_deterministic(
            length in 2usize..200,
            n in 1usize..8,
            seed in any::<u64>(),
        ) {
            let a = resampled_column_positions(length, n, seed).unwrap();
            let b = resampled_column_positions(length, n, seed).unwrap();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.len(), n);
            for cols in &a {
                prop_assert_eq!(cols.len(), length);
                prop_assert!(cols.iter().all(|&c| c < length));
            }
        }
    }
}
