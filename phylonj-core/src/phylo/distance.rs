use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use crate::error::{PhyloError, PhyloResult};

const PHYLIP_LABEL_WIDTH: usize = 10;

/// Symmetric distance matrix over labelled taxa.
///
/// Only the strict lower triangle is stored: `d(i, i)` is always zero and
/// `d(i, j)` and `d(j, i)` share one cell. Labels may be empty or repeated
/// in memory; PHYLIP output requires them to be non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<Box<str>>,
    values: Vec<f64>,
    n: usize,
}

#[inline]
pub(crate) fn tri_index(i: usize, j: usize) -> usize {
    let (hi, lo) = if i > j { (i, j) } else { (j, i) };
    hi * (hi - 1) / 2 + lo
}

impl DistanceMatrix {
    /// A zero-filled matrix with one taxon per label.
    pub fn new(labels: Vec<Box<str>>) -> Self {
        let n = labels.len();
        Self {
            labels,
            values: vec![0.0; n * n.saturating_sub(1) / 2],
            n,
        }
    }

    /// A zero-filled matrix of `n` taxa with empty labels.
    pub fn with_size(n: usize) -> Self {
        Self::new(vec![Box::from(""); n])
    }

    /// Build from a full row-major `n x n` matrix. Only the lower triangle is
    /// read; the diagonal must be zero and every value non-negative.
    pub fn from_square(labels: Vec<Box<str>>, data: &[f64]) -> PhyloResult<Self> {
        let n = labels.len();
        if data.len() != n * n {
            return Err(PhyloError::DataLengthMismatch {
                len: data.len(),
                expected: n * n,
            });
        }
        let mut m = Self::new(labels);
        for i in 0..n {
            for j in 0..=i {
                m.set_value(i, j, data[i * n + j])?;
            }
        }
        Ok(m)
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn identifier(&self, i: usize) -> &str {
        &self.labels[i]
    }

    pub fn identifiers(&self) -> &[Box<str>] {
        &self.labels
    }

    pub fn set_identifier(&mut self, i: usize, id: impl Into<Box<str>>) {
        self.labels[i] = id.into();
    }

    /// Index of the first taxon carrying `id`.
    pub fn index_of(&self, id: &str) -> PhyloResult<usize> {
        self.labels
            .iter()
            .position(|l| &**l == id)
            .ok_or_else(|| PhyloError::UnknownIdentifier { id: id.to_string() })
    }

    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.n && j < self.n,
            "index ({}, {}) out of range for size {}",
            i,
            j,
            self.n
        );
        if i == j {
            0.0
        } else {
            self.values[tri_index(i, j)]
        }
    }

    pub fn value_by_ids(&self, a: &str, b: &str) -> PhyloResult<f64> {
        Ok(self.value(self.index_of(a)?, self.index_of(b)?))
    }

    pub fn set_value(&mut self, i: usize, j: usize, d: f64) -> PhyloResult<()> {
        for index in [i, j] {
            if index >= self.n {
                return Err(PhyloError::IndexOutOfRange {
                    index,
                    size: self.n,
                });
            }
        }
        if d.is_nan() {
            return Err(PhyloError::NanDistance { i, j });
        }
        if d.is_infinite() {
            return Err(PhyloError::NonFiniteDistance { i, j, value: d });
        }
        if d < 0.0 {
            return Err(PhyloError::NegativeDistance { i, j, value: d });
        }
        if i == j {
            if d != 0.0 {
                return Err(PhyloError::NonZeroDiagonal { i, value: d });
            }
            return Ok(());
        }
        self.values[tri_index(i, j)] = d;
        Ok(())
    }

    /// Packed lower triangle, row by row (`(1,0), (2,0), (2,1), ...`).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Write the matrix in PHYLIP square format.
    ///
    /// Labels must be non-empty and stay distinct after truncation to the
    /// 10-character field; nothing is written otherwise.
    pub fn write_phylip<W: Write>(&self, w: &mut W) -> PhyloResult<()> {
        let mut written = HashSet::with_capacity(self.n);
        let mut labels = Vec::with_capacity(self.n);
        for row in 0..self.n {
            let label = self.identifier(row);
            if label.is_empty() {
                return Err(PhyloError::EmptyPhylipIdentifier { row });
            }
            let padded = phylip_label(label);
            if !written.insert(padded.clone()) {
                return Err(PhyloError::DuplicatePhylipIdentifier {
                    id: padded.trim_end().to_string(),
                });
            }
            labels.push(padded);
        }

        write!(w, "    {}", self.n)?;
        writeln!(w)?;
        for (row, label) in labels.iter().enumerate() {
            write!(w, "{}  ", label)?;
            for col in 0..self.n {
                write!(w, "{:.6}", self.value(col, row))?;
                if col + 1 < self.n {
                    w.write_all(b"  ")?;
                }
            }
            if row + 1 < self.n {
                writeln!(w)?;
            }
        }
        Ok(())
    }

    pub fn to_phylip(&self) -> PhyloResult<String> {
        let mut out = Vec::new();
        self.write_phylip(&mut out)?;
        String::from_utf8(out)
            .map_err(|e| PhyloError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Read a PHYLIP square distance matrix: a size line followed by one row
    /// per taxon (label, then `n` whitespace-separated values). The lower
    /// triangle is taken.
    pub fn from_phylip<R: BufRead>(reader: R) -> PhyloResult<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|l| (i + 1, l)))
            .filter(|res| !matches!(res, Ok((_, l)) if l.trim().is_empty()));

        let (line_no, header) = lines.next().ok_or_else(|| PhyloError::PhylipFormat {
            msg: "missing size line".into(),
            line: 1,
        })??;
        let n: usize = header.trim().parse().map_err(|_| PhyloError::PhylipFormat {
            msg: format!("invalid size '{}'", header.trim()),
            line: line_no,
        })?;

        let mut m = Self::with_size(n);
        for row in 0..n {
            let (line_no, line) = lines.next().ok_or_else(|| PhyloError::PhylipFormat {
                msg: format!("expected {} rows, found {}", n, row),
                line: line_no + row + 1,
            })??;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < n + 1 {
                return Err(PhyloError::PhylipFormat {
                    msg: format!("expected a label and {} values", n),
                    line: line_no,
                });
            }
            let split = tokens.len() - n;
            m.set_identifier(row, tokens[..split].join(" "));
            for (col, tok) in tokens[split..].iter().enumerate() {
                let d: f64 = tok.parse().map_err(|_| PhyloError::PhylipFormat {
                    msg: format!("invalid distance '{}'", tok),
                    line: line_no,
                })?;
                if col <= row {
                    m.set_value(row, col, d)?;
                }
            }
        }
        Ok(m)
    }

    /// Write one tab-separated `id1, id2, distance` record per unordered pair.
    pub fn write_pairwise_table<W: Write>(&self, w: W) -> PhyloResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(w);
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let d = format!("{:.6}", self.value(i, j));
                writer.write_record([self.identifier(i), self.identifier(j), d.as_str()])?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn phylip_label(label: &str) -> String {
    let truncated: String = label.chars().take(PHYLIP_LABEL_WIDTH).collect();
    format!("{:<width$}", truncated, width = PHYLIP_LABEL_WIDTH)
}
