use crate::alphabets::{Alphabet, GAP};
use std::sync::LazyLock;

pub const UNSPECIFIED: u8 = b'X';

pub fn alphabet() -> Alphabet {
    Alphabet::new(&b"ARNDCEQGHILKMFPSTWYVarndceqghilkmfpstwyv"[..])
}

pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ABCDEFGHIKLMNOPQRSTUVWXYZ*abcdefghiklmnopqrstuvwxyz")
}

static ALIGNED: LazyLock<Alphabet> = LazyLock::new(|| {
    let mut a = iupac_alphabet();
    a.insert(GAP);
    a.insert(b'.');
    a
});

pub fn aligned_alphabet() -> &'static Alphabet {
    &ALIGNED
}
