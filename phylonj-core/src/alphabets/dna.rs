use crate::alphabets::{Alphabet, GAP};
use std::sync::LazyLock;

pub const UNSPECIFIED: u8 = b'N';

pub fn alphabet() -> Alphabet {
    Alphabet::new(b"ACGTacgt")
}

pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ACGTRYSWKMBDHVNacgtryswkmbdhvn")
}

static ALIGNED: LazyLock<Alphabet> = LazyLock::new(|| {
    let mut a = iupac_alphabet();
    a.insert(GAP);
    a.insert(b'.');
    a
});

/// IUPAC nucleotides plus the gap symbols accepted inside an alignment row.
pub fn aligned_alphabet() -> &'static Alphabet {
    &ALIGNED
}
