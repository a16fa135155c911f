use pyo3::prelude::*;

mod msa;
mod phylo;
mod utils;

#[pymodule]
fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    msa::register(m)?;
    phylo::register(m)?;
    Ok(())
}
