use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyList, PyModule, PyTuple};

use phylonj_core::{BasicMsa, Msa};

use crate::utils::{normalize_index, parse_seq_type, seq_type_name, to_py_err};

#[pyclass(frozen, name = "Alignment")]
pub struct PyAlignment {
    pub(crate) inner: BasicMsa,
}

#[pymethods]
impl PyAlignment {
    #[new]
    #[pyo3(signature = (records, seq_type = "protein"))]
    fn new(records: &Bound<'_, PyList>, seq_type: &str) -> PyResult<Self> {
        let seq_type = parse_seq_type(seq_type)?;
        let mut rows = Vec::with_capacity(records.len());

        for item in records.iter() {
            let tuple = item.downcast::<PyTuple>().map_err(|_| {
                PyValueError::new_err("Alignment expects a list of (str, str) tuples")
            })?;

            if tuple.len() != 2 {
                return Err(PyValueError::new_err(
                    "each tuple must have exactly 2 elements: (id, seq)",
                ));
            }

            let id: String = tuple.get_item(0)?.extract()?;
            let seq: String = tuple.get_item(1)?.extract()?;
            rows.push((id, seq));
        }

        let inner = BasicMsa::from_rows(seq_type, rows).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn width(&self) -> usize {
        self.inner.length()
    }

    #[getter]
    fn seq_type(&self) -> &'static str {
        seq_type_name(self.inner.seq_type())
    }

    fn __len__(&self) -> usize {
        self.inner.num_sequences()
    }

    fn __getitem__(&self, index: isize) -> PyResult<(String, String)> {
        let row = normalize_index(index, self.inner.num_sequences())
            .ok_or_else(|| PyIndexError::new_err("index out of range"))?;
        Ok((
            self.inner.identifier(row).to_string(),
            self.inner.sequence_string(row),
        ))
    }

    fn ids(&self) -> Vec<String> {
        self.inner
            .identifiers()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.inner.index_of(id)
    }

    /// Return all aligned sequences as a list of strings.
    fn aligned_strings(&self) -> Vec<String> {
        (0..self.inner.num_sequences())
            .map(|row| self.inner.sequence_string(row))
            .collect()
    }

    fn column(&self, col: usize) -> PyResult<String> {
        if col >= self.inner.length() {
            return Err(PyIndexError::new_err("column out of range"));
        }
        Ok(self.inner.column(col).into_iter().map(char::from).collect())
    }

    fn gap_ratio(&self, col: usize) -> PyResult<f64> {
        if col >= self.inner.length() {
            return Err(PyIndexError::new_err("column out of range"));
        }
        Ok(self.inner.gap_ratio(col))
    }

    /// Clustal-style diagram: one labelled row per sequence, then a
    /// conservation line where ``*`` marks gap-free identical columns.
    fn alignment_diagram(&self) -> String {
        let n = self.inner.num_sequences();
        let ids = self.inner.identifiers();
        let pad = ids.iter().map(|id| id.len()).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(n + 1);

        for (row, id) in ids.iter().enumerate() {
            lines.push(format!(
                "{:>pad$}  {}",
                id,
                self.inner.sequence_string(row),
                pad = pad
            ));
        }

        let conservation: String = (0..self.inner.length())
            .map(|col| {
                let first = self.inner.residue_at(0, col);
                let conserved = !self.inner.is_gap_at(0, col)
                    && (1..n).all(|row| self.inner.residue_at(row, col) == first);
                if conserved {
                    '*'
                } else {
                    ' '
                }
            })
            .collect();
        lines.push(format!("{:>pad$}  {}", "", conservation, pad = pad));

        lines.join("\n")
    }

    fn __repr__(&self) -> String {
        format!(
            "Alignment(n={}, width={}, seq_type='{}')",
            self.inner.num_sequences(),
            self.inner.length(),
            seq_type_name(self.inner.seq_type())
        )
    }

    fn __str__(&self) -> String {
        self.alignment_diagram()
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAlignment>()?;
    Ok(())
}
