//! Error types for clip writer tracks.

use crate::essence::EssenceType;
use crate::track::ClipFamily;
use crate::types::Rational;
use thiserror::Error;

/// Result type for clip writer operations.
pub type Result<T> = std::result::Result<T, ClipWriterError>;

/// Errors surfaced by the family writers.
///
/// The track layer never creates these itself; they come from the writer
/// that owns the essence stream and pass through unchanged.
#[derive(Error, Debug)]
pub enum ClipWriterError {
    /// The family cannot write this essence type at this rate.
    #[error("{family} does not support {essence_type} at {sample_rate}")]
    Unsupported {
        /// Family that rejected the combination.
        family: ClipFamily,
        /// Requested essence type.
        essence_type: EssenceType,
        /// Requested frame or sampling rate.
        sample_rate: Rational,
    },

    /// Invalid edit rate passed to a writer.
    #[error("Invalid edit rate: {0}")]
    InvalidEditRate(Rational),

    /// Sample buffer size does not match what the track expects.
    #[error("Sample size mismatch: expected {expected} bytes, got {actual}")]
    SampleSizeMismatch {
        /// Expected byte count for the declared number of samples.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// Sample buffer rejected for a reason other than its size.
    #[error("Invalid sample data: {0}")]
    InvalidSampleData(String),

    /// AVC-Intra frame needs a sequence/picture header that is not available.
    #[error("AVC-Intra header required but none was provided or cached")]
    MissingAvciHeader,

    /// Malformed KLV in an essence stream.
    #[error("Invalid KLV at offset {offset}: {message}")]
    InvalidKlv {
        /// What was wrong with the triplet.
        message: String,
        /// Offset of the triplet's key.
        offset: u64,
    },

    /// I/O error while writing essence.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
