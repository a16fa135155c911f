use std::collections::HashSet;

use bit_set::BitSet;

use crate::error::{PhyloError, PhyloResult};

use super::tree::{Confidence, PhyloTree};

/// Confidence kind attached by [`BootstrapSupport`].
pub const BOOTSTRAP: &str = "bootstrap";

/// Annotates a tree with support values derived from replicate trees.
pub trait ConfidenceAssessor {
    fn evaluate(&self, master: &mut PhyloTree, replicates: &[PhyloTree]) -> PhyloResult<()>;
}

/// Felsenstein bootstrap support.
///
/// Every internal non-root node of the master tree receives the fraction
/// (in `[0, 1]`) of replicates containing the same bipartition of leaf
/// names. Bipartitions are compared by label sets, so replicate node order
/// and root placement do not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapSupport;

impl ConfidenceAssessor for BootstrapSupport {
    fn evaluate(&self, master: &mut PhyloTree, replicates: &[PhyloTree]) -> PhyloResult<()> {
        if replicates.is_empty() {
            return Err(PhyloError::NoReplicates);
        }
        let names = sorted_leaf_names(master)?;

        let mut replicate_splits = Vec::with_capacity(replicates.len());
        for (replicate, tree) in replicates.iter().enumerate() {
            if sorted_leaf_names(tree).ok().as_ref() != Some(&names) {
                return Err(PhyloError::LeafSetMismatch { replicate });
            }
            replicate_splits.push(tree_splits(tree, &names));
        }

        let master_sets = clade_leaf_sets(master, &names);
        let total = replicates.len() as f64;
        for idx in master.internal_non_root() {
            let Some(set) = &master_sets[idx] else {
                continue;
            };
            let split = canonical_split(set, names.len());
            let hits = replicate_splits
                .iter()
                .filter(|splits| splits.contains(&split))
                .count();
            master.set_confidence(idx, Confidence::new(BOOTSTRAP, hits as f64 / total));
        }
        Ok(())
    }
}

/// Annotate `master` with bootstrap support from `replicates`.
pub fn assess_bootstrap(master: &mut PhyloTree, replicates: &[PhyloTree]) -> PhyloResult<()> {
    BootstrapSupport.evaluate(master, replicates)
}

fn sorted_leaf_names(tree: &PhyloTree) -> PhyloResult<Vec<String>> {
    let mut names = tree.leaf_names();
    names.sort_unstable();
    if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
        return Err(PhyloError::DuplicateLeafName {
            name: w[0].clone(),
        });
    }
    Ok(names)
}

/// Leaf-index set below every node reachable from the root, indexed by node.
/// Leaf indices refer to positions in `names`.
fn clade_leaf_sets(tree: &PhyloTree, names: &[String]) -> Vec<Option<BitSet>> {
    let mut sets: Vec<Option<BitSet>> = vec![None; tree.num_nodes()];
    for idx in tree.postorder() {
        let node = tree.node(idx);
        let mut set = BitSet::with_capacity(names.len());
        if node.is_leaf() {
            if let Ok(pos) = names.binary_search_by(|n| n.as_str().cmp(node.name_or_empty())) {
                set.insert(pos);
            }
        } else {
            for &child in &node.children {
                if let Some(child_set) = &sets[child] {
                    set.union_with(child_set);
                }
            }
        }
        sets[idx] = Some(set);
    }
    sets
}

/// The side of the split not containing leaf 0.
fn canonical_split(set: &BitSet, n: usize) -> BitSet {
    if !set.contains(0) {
        return set.clone();
    }
    let mut other = BitSet::with_capacity(n);
    for i in (0..n).filter(|&i| !set.contains(i)) {
        other.insert(i);
    }
    other
}

/// Canonical splits induced by every non-root edge of `tree`, trivial ones
/// included.
fn tree_splits(tree: &PhyloTree, names: &[String]) -> HashSet<BitSet> {
    let root = tree.root();
    clade_leaf_sets(tree, names)
        .iter()
        .enumerate()
        .filter(|&(idx, _)| Some(idx) != root)
        .filter_map(|(_, set)| set.as_ref())
        .map(|set| canonical_split(set, names.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ((a,b),(c,d)) under an unrooted synthetic root.
    fn quartet(first: [&str; 2], second: [&str; 2]) -> PhyloTree {
        let mut t = PhyloTree::new();
        let a = t.add_leaf(first[0]);
        let b = t.add_leaf(first[1]);
        let ab = t.add_internal(vec![a, b]);
        let c = t.add_leaf(second[0]);
        let d = t.add_leaf(second[1]);
        let cd = t.add_internal(vec![c, d]);
        let root = t.add_internal(vec![ab, cd]);
        t.set_root(root, false);
        t
    }

    #[test]
    fn canonical_split_complements_side_with_first_leaf() {
        let mut s = BitSet::new();
        s.insert(0);
        s.insert(1);
        let c = canonical_split(&s, 4);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn full_agreement_gives_one() {
        let mut master = quartet(["A", "B"], ["C", "D"]);
        let reps = vec![quartet(["D", "C"], ["B", "A"]), quartet(["A", "B"], ["C", "D"])];
        assess_bootstrap(&mut master, &reps).unwrap();
        for idx in master.internal_non_root() {
            let conf = master.node(idx).confidence.as_ref().unwrap();
            assert_eq!(&*conf.kind, BOOTSTRAP);
            assert!((conf.value - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn partial_agreement_gives_fraction() {
        let mut master = quartet(["A", "B"], ["C", "D"]);
        let reps = vec![
            quartet(["A", "B"], ["C", "D"]),
            quartet(["A", "C"], ["B", "D"]),
            quartet(["A", "D"], ["B", "C"]),
            quartet(["C", "D"], ["A", "B"]),
        ];
        assess_bootstrap(&mut master, &reps).unwrap();
        for idx in master.internal_non_root() {
            let conf = master.node(idx).confidence.as_ref().unwrap();
            assert!((conf.value - 0.5).abs() < 1e-10);
        }
    }

    #[test]
    fn root_and_leaves_not_annotated() {
        let mut master = quartet(["A", "B"], ["C", "D"]);
        let reps = vec![quartet(["A", "B"], ["C", "D"])];
        assess_bootstrap(&mut master, &reps).unwrap();
        let root = master.root().unwrap();
        assert!(master.node(root).confidence.is_none());
        for leaf in master.leaves() {
            assert!(master.node(leaf).confidence.is_none());
        }
    }

    #[test]
    fn no_replicates_rejected() {
        let mut master = quartet(["A", "B"], ["C", "D"]);
        assert!(matches!(
            assess_bootstrap(&mut master, &[]),
            Err(PhyloError::NoReplicates)
        ));
    }

    #[test]
    fn leaf_set_mismatch_rejected() {
        let mut master = quartet(["A", "B"], ["C", "D"]);
        let reps = vec![
            quartet(["A", "B"], ["C", "D"]),
            quartet(["A", "B"], ["C", "E"]),
        ];
        assert!(matches!(
            assess_bootstrap(&mut master, &reps),
            Err(PhyloError::LeafSetMismatch { replicate: 1 })
        ));
    }

    #[test]
    fn duplicate_master_leaf_rejected() {
        let mut master = quartet(["A", "A"], ["C", "D"]);
        let reps = vec![quartet(["A", "B"], ["C", "D"])];
        assert!(matches!(
            assess_bootstrap(&mut master, &reps),
            Err(PhyloError::DuplicateLeafName { .. })
        ));
    }
}
