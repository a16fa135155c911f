pub mod record;

pub use record::MolecularSequence;

use crate::alphabets::{dna, protein, rna, Alphabet};

/// Residue type declared for a sequence or an alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeqType {
    Protein,
    Dna,
    Rna,
}

impl SeqType {
    /// Symbol standing for an unspecified residue ("N" or "X").
    pub fn unspecified_residue(self) -> u8 {
        match self {
            SeqType::Protein => protein::UNSPECIFIED,
            SeqType::Dna => dna::UNSPECIFIED,
            SeqType::Rna => rna::UNSPECIFIED,
        }
    }

    pub fn aligned_alphabet(self) -> &'static Alphabet {
        match self {
            SeqType::Protein => protein::aligned_alphabet(),
            SeqType::Dna => dna::aligned_alphabet(),
            SeqType::Rna => rna::aligned_alphabet(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_residue_per_type() {
        assert_eq!(SeqType::Dna.unspecified_residue(), b'N');
        assert_eq!(SeqType::Rna.unspecified_residue(), b'N');
        assert_eq!(SeqType::Protein.unspecified_residue(), b'X');
    }

    #[test]
    fn unspecified_residue_is_aligned_symbol() {
        for t in [SeqType::Dna, SeqType::Rna, SeqType::Protein] {
            let x = t.unspecified_residue();
            assert!(t.aligned_alphabet().contains(x));
            let seq = MolecularSequence::new("u", vec![x, b'-', x], t).unwrap();
            assert_eq!(seq.ungapped(), vec![x, x]);
        }
    }
}
