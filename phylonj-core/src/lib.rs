#[macro_use]
mod par;

pub mod alphabets;
pub mod error;
pub mod msa;
pub mod phylo;
pub mod seq;

pub use error::{PhyloError, PhyloResult};
pub use msa::{BasicMsa, Msa, ResampledMsa};
pub use seq::{MolecularSequence, SeqType};
