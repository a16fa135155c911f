pub mod dna;
pub mod protein;
pub mod rna;

use bit_set::BitSet;
use std::borrow::Borrow;

/// Gap symbol shared by every residue alphabet.
pub const GAP: u8 = b'-';

#[derive(Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Alphabet {
    pub symbols: BitSet,
}

impl Alphabet {
    pub fn new<C, T>(symbols: T) -> Self
    where
        C: Borrow<u8>,
        T: IntoIterator<Item = C>,
    {
        let mut s = BitSet::new();
        s.extend(symbols.into_iter().map(|c| *c.borrow() as usize));

        Alphabet { symbols: s }
    }

    pub fn insert(&mut self, a: u8) {
        self.symbols.insert(a as usize);
    }

    #[inline]
    pub fn contains(&self, a: u8) -> bool {
        self.symbols.contains(a as usize)
    }

    pub fn is_word<C, T>(&self, text: T) -> bool
    where
        C: Borrow<u8>,
        T: IntoIterator<Item = C>,
    {
        text.into_iter()
            .all(|c| self.symbols.contains(*c.borrow() as usize))
    }

    /// Position of the first symbol of `text` that is not in the alphabet.
    pub fn first_invalid(&self, text: &[u8]) -> Option<usize> {
        text.iter().position(|&b| !self.contains(b))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn union(&self, others: &Alphabet) -> Self {
        Alphabet {
            symbols: self.symbols.union(&others.symbols).collect(),
        }
    }
}
