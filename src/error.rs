//! Error types for Finite State Entropy coding.

use thiserror::Error;

/// Error variants for FSE operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The symbol statistics cannot form a valid slot partition
    /// (empty alphabet, zero count, duplicate symbol, or a single-slot total).
    #[error("invalid statistics: {reason}")]
    InvalidStatistics {
        /// What was wrong with the supplied counts.
        reason: String,
    },

    /// A symbol passed to the encoder is not part of the table's alphabet.
    #[error("unknown symbol: {symbol}")]
    UnknownSymbol {
        /// Debug rendering of the offending symbol.
        symbol: String,
    },

    /// A slot lookup fell outside `[0, total)`.
    #[error("slot {slot} out of range for total {total}")]
    OutOfRange {
        /// The requested slot.
        slot: u64,
        /// The table's total count.
        total: u64,
    },

    /// Decoding produced a slot that no symbol owns.
    #[error("no symbol owns slot {slot}")]
    UnknownSlot {
        /// The orphaned slot.
        slot: u64,
    },

    /// The value handed to the decoder is not a valid encoding (negative).
    #[error("invalid encoding: {value}")]
    InvalidEncoding {
        /// Decimal rendering of the rejected value.
        value: String,
    },
}

impl Error {
    pub(crate) fn invalid_statistics(reason: impl Into<String>) -> Self {
        Error::InvalidStatistics {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for FSE operations.
pub type Result<T> = std::result::Result<T, Error>;
