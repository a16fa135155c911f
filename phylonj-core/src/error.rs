use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhyloError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("empty identifier for sequence {row}")]
    EmptyIdentifier { row: usize },

    #[error("alignment contains no sequences")]
    EmptyAlignment,

    #[error("alignment has no columns")]
    ZeroLengthAlignment,

    #[error("unknown distance method '{name}' (valid: 'kimura', 'poisson', 'fractional')")]
    UnknownDistanceMethod { name: String },

    #[error("sequence {index} has length {len} but expected {expected}")]
    SequenceLengthMismatch {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("sequence {index} has a different residue type than the alignment")]
    SeqTypeMismatch { index: usize },

    #[error("negative distance value {value} at ({i}, {j})")]
    NegativeDistance { i: usize, j: usize, value: f64 },

    #[error("distance value at ({i}, {j}) is not a number")]
    NanDistance { i: usize, j: usize },

    #[error("distance value {value} at ({i}, {j}) is not finite")]
    NonFiniteDistance { i: usize, j: usize, value: f64 },

    #[error("attempt to set non-zero value {value} on the diagonal at {i}")]
    NonZeroDiagonal { i: usize, value: f64 },

    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("identifier '{id}' not found in distance matrix")]
    UnknownIdentifier { id: String },

    #[error("distance data length mismatch: expected {expected}, got {len}")]
    DataLengthMismatch { len: usize, expected: usize },

    #[error("too few taxa: {n} (at least {min} required)")]
    TooFewTaxa { n: usize, min: usize },

    #[error("maximum fraction digits for distances is out of range: {digits} (expected 1..=9)")]
    InvalidFractionDigits { digits: u32 },

    #[error("alignment length {len} is too short for bootstrap resampling (at least 2 required)")]
    AlignmentTooShort { len: usize },

    #[error("number of bootstrap resamples cannot be zero")]
    InvalidReplicateCount { n: usize },

    #[error("illegal attempt to use {len} resampled column positions on alignment of length {expected}")]
    ColumnPositionsMismatch { len: usize, expected: usize },

    #[error("resampled column position {pos} out of range for alignment of length {len}")]
    ColumnPositionOutOfRange { pos: usize, len: usize },

    #[error("phylip format error at line {line}: {msg}")]
    PhylipFormat { msg: String, line: usize },

    #[error("phylip format does not allow empty identifiers (row {row})")]
    EmptyPhylipIdentifier { row: usize },

    #[error("phylip format requires unique identifiers, '{id}' is written more than once")]
    DuplicatePhylipIdentifier { id: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no replicate trees to evaluate")]
    NoReplicates,

    #[error("replicate tree {replicate} does not have the same leaf names as the evaluated tree")]
    LeafSetMismatch { replicate: usize },

    #[error("duplicate leaf name '{name}'")]
    DuplicateLeafName { name: String },
}

pub type PhyloResult<T> = Result<T, PhyloError>;
