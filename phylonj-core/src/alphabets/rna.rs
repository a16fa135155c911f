use crate::alphabets::{Alphabet, GAP};
use std::sync::LazyLock;

pub const UNSPECIFIED: u8 = b'N';

pub fn alphabet() -> Alphabet {
    Alphabet::new(b"ACGUacgu")
}

pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ACGURYSWKMBDHVNacguryswkmbdhvn")
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uracil_not_thymine() {
        assert!(alphabet().is_word(b"GAUUACA"));
        assert!(!alphabet().is_word(b"GATTACA"));
    }
}
