use thiserror::Error;

use crate::model::geometry::GeometryError;
use crate::model::record::RecordError;

/// Errors that can occur while aggregating statistics.
///
/// Both variants name the position of the offending record in the input
/// sequence; the whole call fails atomically and no partial result is
/// produced.
#[derive(Debug, Error)]
pub enum StatsError {
    /// An input element matches neither accepted record shape.
    #[error("unsupported record at index {index}")]
    UnsupportedRecord {
        /// Position of the offending element in the input sequence.
        index: usize,
        #[source]
        source: RecordError,
    },

    /// A record's distance-matrix computation failed.
    #[error("distance computation failed for record at index {index}")]
    DistanceComputation {
        /// Position of the offending record in the input sequence.
        index: usize,
        #[source]
        source: GeometryError,
    },
}

impl StatsError {
    /// Position of the record that caused the failure.
    pub fn index(&self) -> usize {
        match self {
            Self::UnsupportedRecord { index, .. } => *index,
            Self::DistanceComputation { index, .. } => *index,
        }
    }
}
