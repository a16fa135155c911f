use crate::alphabets::GAP;
use crate::error::{PhyloError, PhyloResult};
use crate::seq::{MolecularSequence, SeqType};

/// Read access to a multiple sequence alignment.
///
/// Rows are addressed by their stable index; every row has exactly
/// [`Msa::length`] residues and a non-empty identifier.
pub trait Msa {
    fn num_sequences(&self) -> usize;

    fn length(&self) -> usize;

    fn identifier(&self, row: usize) -> &str;

    fn residue_at(&self, row: usize, col: usize) -> u8;

    fn seq_type(&self) -> SeqType;

    fn is_gap_at(&self, row: usize, col: usize) -> bool {
        self.residue_at(row, col) == GAP
    }

    fn column(&self, col: usize) -> Vec<u8> {
        (0..self.num_sequences())
            .map(|row| self.residue_at(row, col))
            .collect()
    }

    fn sequence_string(&self, row: usize) -> String {
        (0..self.length())
            .map(|col| self.residue_at(row, col) as char)
            .collect()
    }

    /// Fraction of rows holding a gap in column `col`.
    fn gap_ratio(&self, col: usize) -> f64 {
        let n = self.num_sequences();
        if n == 0 {
            return 0.0;
        }
        let gaps = (0..n).filter(|&row| self.is_gap_at(row, col)).count();
        gaps as f64 / n as f64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicMsa {
    seqs: Vec<MolecularSequence>,
    length: usize,
    seq_type: SeqType,
}

impl BasicMsa {
    pub fn new(seqs: Vec<MolecularSequence>) -> PhyloResult<Self> {
        let first = seqs.first().ok_or(PhyloError::EmptyAlignment)?;
        let length = first.len();
        let seq_type = first.seq_type();
        for (index, seq) in seqs.iter().enumerate() {
            if seq.id().is_empty() {
                return Err(PhyloError::EmptyIdentifier { row: index });
            }
            if seq.len() != length {
                return Err(PhyloError::SequenceLengthMismatch {
                    index,
                    len: seq.len(),
                    expected: length,
                });
            }
            if seq.seq_type() != seq_type {
                return Err(PhyloError::SeqTypeMismatch { index });
            }
        }
        Ok(Self {
            seqs,
            length,
            seq_type,
        })
    }

    /// Build an alignment from `(identifier, aligned residues)` pairs.
    pub fn from_rows<I, S>(seq_type: SeqType, rows: I) -> PhyloResult<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let seqs = rows
            .into_iter()
            .map(|(id, residues)| {
                MolecularSequence::from_text(id.as_ref(), residues.as_ref(), seq_type)
            })
            .collect::<PhyloResult<Vec<_>>>()?;
        Self::new(seqs)
    }

    /// Materialize any alignment view into an owned alignment.
    pub fn from_msa<M: Msa + ?Sized>(msa: &M) -> PhyloResult<Self> {
        let seq_type = msa.seq_type();
        let seqs = (0..msa.num_sequences())
            .map(|row| {
                let residues = (0..msa.length())
                    .map(|col| msa.residue_at(row, col))
                    .collect();
                MolecularSequence::new(msa.identifier(row), residues, seq_type)
            })
            .collect::<PhyloResult<Vec<_>>>()?;
        Self::new(seqs)
    }

    pub fn sequences(&self) -> &[MolecularSequence] {
        &self.seqs
    }

    pub fn sequence(&self, row: usize) -> Option<&MolecularSequence> {
        self.seqs.get(row)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.seqs.iter().position(|s| s.id() == id)
    }

    pub fn identifiers(&self) -> Vec<Box<str>> {
        self.seqs.iter().map(|s| Box::from(s.id())).collect()
    }
}

impl Msa for BasicMsa {
    fn num_sequences(&self) -> usize {
        self.seqs.len()
    }

    fn length(&self) -> usize {
        self.length
    }

    fn identifier(&self, row: usize) -> &str {
        self.seqs[row].id()
    }

    #[inline]
    fn residue_at(&self, row: usize, col: usize) -> u8 {
        self.seqs[row].residue_at(col)
    }

    fn seq_type(&self) -> SeqType {
        self.seq_type
    }
}

/// Read-only view of an alignment whose columns are taken from a
/// bootstrap column-position array.
///
/// Column `col` of the view is column `positions[col]` of the base alignment.
#[derive(Clone, Copy, Debug)]
pub struct ResampledMsa<'a, M: Msa + ?Sized> {
    base: &'a M,
    positions: &'a [usize],
}

impl<'a, M: Msa + ?Sized> ResampledMsa<'a, M> {
    pub fn new(base: &'a M, positions: &'a [usize]) -> PhyloResult<Self> {
        let len = base.length();
        if positions.len() != len {
            return Err(PhyloError::ColumnPositionsMismatch {
                len: positions.len(),
                expected: len,
            });
        }
        if let Some(&pos) = positions.iter().find(|&&p| p >= len) {
            return Err(PhyloError::ColumnPositionOutOfRange { pos, len });
        }
        Ok(Self { base, positions })
    }

    pub fn positions(&self) -> &[usize] {
        self.positions
    }
}

impl<M: Msa + ?Sized> Msa for ResampledMsa<'_, M> {
    fn num_sequences(&self) -> usize {
        self.base.num_sequences()
    }

    fn length(&self) -> usize {
        self.positions.len()
    }

    fn identifier(&self, row: usize) -> &str {
        self.base.identifier(row)
    }

    #[inline]
    fn residue_at(&self, row: usize, col: usize) -> u8 {
        self.base.residue_at(row, self.positions[col])
    }

    fn seq_type(&self) -> SeqType {
        self.base.seq_type()
    }
}
