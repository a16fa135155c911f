#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use phylonj_core::phylo::{self, InferenceOptions, NeighborJoining, PairwiseDistanceCalculator};

use crate::msa::PyAlignment;
use crate::utils::{parse_method, to_py_err};

#[pyclass(frozen, name = "DistanceMatrix")]
pub struct PyDistanceMatrix {
    inner: phylo::DistanceMatrix,
}

#[pymethods]
impl PyDistanceMatrix {
    #[staticmethod]
    fn from_phylip(text: &str) -> PyResult<Self> {
        phylo::DistanceMatrix::from_phylip(text.as_bytes())
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    #[getter]
    fn n(&self) -> usize {
        self.inner.size()
    }

    fn labels(&self) -> Vec<String> {
        self.inner
            .identifiers()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn get(&self, i: usize, j: usize) -> PyResult<f64> {
        let n = self.inner.size();
        if i >= n || j >= n {
            return Err(PyIndexError::new_err(format!(
                "index ({}, {}) out of range for {}x{} matrix",
                i, j, n, n
            )));
        }
        Ok(self.inner.value(i, j))
    }

    fn get_by_ids(&self, a: &str, b: &str) -> PyResult<f64> {
        self.inner.value_by_ids(a, b).map_err(to_py_err)
    }

    fn index_of(&self, id: &str) -> PyResult<usize> {
        self.inner.index_of(id).map_err(to_py_err)
    }

    fn to_list_of_lists(&self) -> Vec<Vec<f64>> {
        let n = self.inner.size();
        (0..n)
            .map(|i| (0..n).map(|j| self.inner.value(i, j)).collect())
            .collect()
    }

    fn to_phylip(&self) -> PyResult<String> {
        self.inner.to_phylip().map_err(to_py_err)
    }

    /// Tab-separated ``id1, id2, distance`` lines, one per pair.
    fn pairwise_table(&self) -> PyResult<String> {
        let mut out = Vec::new();
        self.inner
            .write_pairwise_table(&mut out)
            .map_err(to_py_err)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn __len__(&self) -> usize {
        self.inner.size()
    }

    fn __repr__(&self) -> String {
        format!("DistanceMatrix(n={})", self.inner.size())
    }

    fn __str__(&self) -> String {
        let n = self.inner.size();
        let labels = self.inner.identifiers();
        let pad = labels.iter().map(|l| l.len()).max().unwrap_or(0);

        let mut lines = Vec::with_capacity(n + 1);

        let mut header = format!("{:>pad$}", "", pad = pad + 2);
        for label in labels {
            header.push_str(&format!("{:>10}", &**label));
        }
        lines.push(header);

        for (i, label) in labels.iter().enumerate() {
            let mut row = format!("{:>pad$}  ", &**label, pad = pad);
            for j in 0..n {
                row.push_str(&format!("{:>10.4}", self.inner.value(i, j)));
            }
            lines.push(row);
        }

        lines.join("\n")
    }
}

#[pyclass(frozen, name = "PhyloTree")]
pub struct PyPhyloTree {
    inner: phylo::PhyloTree,
}

#[pymethods]
impl PyPhyloTree {
    fn to_newick(&self) -> String {
        phylo::to_newick(&self.inner)
    }

    fn ascii_diagram(&self) -> String {
        let Some(start) = self
            .inner
            .root()
            .or_else(|| self.inner.num_nodes().checked_sub(1))
        else {
            return String::new();
        };

        let mut out = String::new();
        out.push_str(&format_node_label(&self.inner, start));
        out.push('\n');

        let children = &self.inner.node(start).children;
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            write_ascii_subtree(&self.inner, *child, "", last, &mut out);
        }

        if out.ends_with('\n') {
            out.pop();
        }

        out
    }

    fn leaf_names(&self) -> Vec<String> {
        self.inner.leaf_names()
    }

    /// ``(sorted leaf names below the node, support)`` for every node
    /// carrying a confidence value.
    fn support_values(&self) -> Vec<(Vec<String>, f64)> {
        self.inner
            .preorder()
            .into_iter()
            .filter_map(|idx| {
                let conf = self.inner.node(idx).confidence.as_ref()?;
                let mut names: Vec<String> = self
                    .inner
                    .subtree_leaves(idx)
                    .into_iter()
                    .map(|leaf| self.inner.node(leaf).name_or_empty().to_string())
                    .collect();
                names.sort();
                Some((names, conf.value))
            })
            .collect()
    }

    fn num_leaves(&self) -> usize {
        self.inner.num_leaves()
    }

    fn num_nodes(&self) -> usize {
        self.inner.num_nodes()
    }

    fn is_rooted(&self) -> bool {
        self.inner.is_rooted()
    }

    fn __repr__(&self) -> String {
        let kind = if self.inner.is_rooted() {
            "rooted"
        } else {
            "unrooted"
        };
        format!(
            "PhyloTree(leaves={}, nodes={}, {})",
            self.inner.num_leaves(),
            self.inner.num_nodes(),
            kind
        )
    }

    fn __str__(&self) -> String {
        self.to_newick()
    }
}

fn format_node_label(tree: &phylo::PhyloTree, idx: usize) -> String {
    let node = tree.node(idx);
    let mut label = match node.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if node.is_leaf() => format!("leaf{}", idx),
        _ => format!("node{}", idx),
    };

    if let Some(bl) = node.branch_length {
        label.push_str(&format!(":{:.6}", bl));
    }
    if let Some(conf) = &node.confidence {
        label.push_str(&format!(" [{} {:.2}]", conf.kind, conf.value));
    }

    label
}

fn write_ascii_subtree(
    tree: &phylo::PhyloTree,
    idx: usize,
    prefix: &str,
    is_last: bool,
    out: &mut String,
) {
    out.push_str(prefix);
    out.push_str(if is_last { "`-- " } else { "|-- " });
    out.push_str(&format_node_label(tree, idx));
    out.push('\n');

    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "|   " });
    let children = &tree.node(idx).children;
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        write_ascii_subtree(tree, *child, &child_prefix, last, out);
    }
}

#[pyfunction]
#[pyo3(signature = (alignment, method = "kimura", too_large_distance = None))]
fn distance_matrix(
    py: Python<'_>,
    alignment: &PyAlignment,
    method: &str,
    too_large_distance: Option<f64>,
) -> PyResult<PyDistanceMatrix> {
    let mut calc = PairwiseDistanceCalculator::new(parse_method(method)?);
    if let Some(value) = too_large_distance {
        calc = calc.with_too_large_distance(value);
    }
    let msa = &alignment.inner;

    py.allow_threads(|| calc.compute(msa))
        .map(|inner| PyDistanceMatrix { inner })
        .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (dist_matrix, max_fraction_digits = None))]
fn build_tree(
    py: Python<'_>,
    dist_matrix: &PyDistanceMatrix,
    max_fraction_digits: Option<u32>,
) -> PyResult<PyPhyloTree> {
    let nj = match max_fraction_digits {
        Some(digits) => NeighborJoining::with_max_fraction_digits(digits).map_err(to_py_err)?,
        None => NeighborJoining::new(),
    };
    let dm = &dist_matrix.inner;

    py.allow_threads(|| nj.execute_cloned(dm))
        .map(|inner| PyPhyloTree { inner })
        .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (
    alignment,
    method = "kimura",
    bootstrap = 0,
    seed = phylo::inference::DEFAULT_RANDOM_SEED,
    max_fraction_digits = None,
))]
fn infer_tree(
    py: Python<'_>,
    alignment: &PyAlignment,
    method: &str,
    bootstrap: usize,
    seed: u64,
    max_fraction_digits: Option<u32>,
) -> PyResult<PyPhyloTree> {
    let mut options = InferenceOptions::new()
        .with_distance_method(parse_method(method)?)
        .with_random_seed(seed);
    if bootstrap > 0 {
        options = options.with_bootstrap(bootstrap);
    }
    if let Some(digits) = max_fraction_digits {
        options = options.with_max_fraction_digits(digits);
    }
    let msa = &alignment.inner;

    py.allow_threads(|| phylo::infer_tree(msa, &options))
        .map(|result| PyPhyloTree { inner: result.tree })
        .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (length, n, seed = phylo::inference::DEFAULT_RANDOM_SEED))]
fn resampled_column_positions(length: usize, n: usize, seed: u64) -> PyResult<Vec<Vec<usize>>> {
    phylo::resampled_column_positions(length, n, seed).map_err(to_py_err)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDistanceMatrix>()?;
    m.add_class::<PyPhyloTree>()?;
    m.add_function(wrap_pyfunction!(distance_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(build_tree, m)?)?;
    m.add_function(wrap_pyfunction!(infer_tree, m)?)?;
    m.add_function(wrap_pyfunction!(resampled_column_positions, m)?)?;
    Ok(())
}
