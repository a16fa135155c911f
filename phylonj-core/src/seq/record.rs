use crate::alphabets::GAP;
use crate::error::{PhyloError, PhyloResult};
use crate::seq::SeqType;

/// An identified, aligned residue sequence over one alphabet.
///
/// The residues are validated once at construction and never change length
/// afterwards; `.` is accepted as an alternate gap symbol on input and
/// normalized to `-`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MolecularSequence {
    id: Box<str>,
    residues: Vec<u8>,
    seq_type: SeqType,
}

impl MolecularSequence {
    pub fn new(id: impl Into<Box<str>>, residues: Vec<u8>, seq_type: SeqType) -> PhyloResult<Self> {
        let alphabet = seq_type.aligned_alphabet();
        if let Some(pos) = alphabet.first_invalid(&residues) {
            return Err(PhyloError::InvalidChar {
                ch: residues[pos] as char,
                pos,
            });
        }
        let residues = residues
            .into_iter()
            .map(|b| if b == b'.' { GAP } else { b })
            .collect();
        Ok(Self {
            id: id.into(),
            residues,
            seq_type,
        })
    }

    pub fn from_text(id: impl Into<Box<str>>, residues: &str, seq_type: SeqType) -> PhyloResult<Self> {
        let bytes: Vec<u8> = residues
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        Self::new(id, bytes, seq_type)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seq_type(&self) -> SeqType {
        self.seq_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    #[inline]
    pub fn residue_at(&self, pos: usize) -> u8 {
        self.residues[pos]
    }

    #[inline]
    pub fn is_gap_at(&self, pos: usize) -> bool {
        self.residues[pos] == GAP
    }

    /// Residues with gaps removed.
    pub fn ungapped(&self) -> Vec<u8> {
        self.residues.iter().copied().filter(|&b| b != GAP).collect()
    }
}
