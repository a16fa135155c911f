use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use phylonj_core::phylo::DistanceMethod;
use phylonj_core::{PhyloError, SeqType};

pub fn to_py_err(e: PhyloError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

pub fn parse_seq_type(s: &str) -> PyResult<SeqType> {
    match s.to_ascii_lowercase().as_str() {
        "protein" | "aa" => Ok(SeqType::Protein),
        "dna" => Ok(SeqType::Dna),
        "rna" => Ok(SeqType::Rna),
        _ => Err(PyValueError::new_err(format!(
            "unknown sequence type '{}' (valid: 'protein', 'dna', 'rna')",
            s
        ))),
    }
}

pub fn seq_type_name(t: SeqType) -> &'static str {
    match t {
        SeqType::Protein => "protein",
        SeqType::Dna => "dna",
        SeqType::Rna => "rna",
    }
}

pub fn parse_method(s: &str) -> PyResult<DistanceMethod> {
    s.parse().map_err(to_py_err)
}

/// Resolve a possibly negative Python index against `len`.
pub fn normalize_index(index: isize, len: usize) -> Option<usize> {
    let n = len as isize;
    let idx = if index < 0 { index + n } else { index };
    if idx < 0 || idx >= n {
        None
    } else {
        Some(idx as usize)
    }
}
