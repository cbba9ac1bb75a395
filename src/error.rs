use thiserror::Error;

/// Failures turning dotted text into an itree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("itree input cannot be empty")]
    Empty,

    /// A field that is not an integer in `1..=65535`. Holds the field text.
    #[error("itree segment '{0}' must be an integer in 1..=65535")]
    InvalidSegment(String),

    #[error("itree must have at most 16 segments in 16 data bytes")]
    TooManySegments,

    /// More segments than the configured level limit allows.
    #[error("itree has {levels} levels, exceeding the limit of {max}")]
    ExceedsMaxLevels { levels: usize, max: usize },
}

/// The result of a path operation would not fit in a record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("itree would exceed 16 segments or 16 data bytes")]
    ExceedsMaxSegments,
}

/// Invalid slice bounds for `subpath`/`subitree`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("slice offset or length is negative after normalization")]
    NegativeAfterNormalization,

    #[error("slice is out of bounds")]
    OutOfBounds,
}

/// Index protocol misuse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    #[error("unknown strategy number: {0}")]
    UnknownPredicate(u16),
}

/// A byte buffer that is not a canonical itree record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("itree record must be 18 bytes, got {0}")]
    WrongLength(usize),

    #[error("continuation bit where a segment must start (data byte {0})")]
    OrphanContinuation(usize),

    #[error("non-canonical padding after end of path (data byte {0})")]
    NonCanonicalPadding(usize),
}

#[derive(Error, Debug)]
pub enum ItreeError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("capacity error: {0}")]
    Capacity(#[from] CapacityError),

    #[error("range error: {0}")]
    Range(#[from] RangeError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Index snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
