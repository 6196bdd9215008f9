use thiserror::Error;

/// Errors raised by the block transformations.
///
/// Every variant aborts the call that produced it; no partial result is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Decoded block coverage disagrees with the sequence it describes.
    #[error("total length of blocks ({blocks}) is not equal to the length of the sequence ({sequence})")]
    LengthMismatch { blocks: usize, sequence: usize },

    /// Blocks are out of order, overlapping or empty where a partition is assumed.
    #[error("malformed block list: {0}")]
    MalformedBlockList(String),

    #[error("sequence lengths are not the same: reference={reference}, other={other}")]
    UnequalAlignmentLength { reference: usize, other: usize },

    #[error("site {index} is out of range for a sequence of length {len}")]
    SiteOutOfRange { index: usize, len: usize },

    /// Text that cannot be read as `start:stop[:dir]`.
    #[error("invalid block '{0}'")]
    InvalidBlock(String),
}

pub type Result<T> = std::result::Result<T, BlockError>;
