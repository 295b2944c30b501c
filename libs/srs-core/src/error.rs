//! Error types for srs-core.

use crate::store::StoreError;
use crate::types::CardId;
use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors surfaced by the scheduling core.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Quality rating outside 0-5. Rejected, never clamped.
    #[error("quality rating {0} out of range 0-5")]
    InvalidQuality(u8),

    /// Rating submitted to a session with no cards remaining.
    #[error("review session already complete")]
    SessionComplete,

    /// Card disappeared from the store between queueing and rating.
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    /// Unknown algorithm identifier; fails fast at construction.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Store or log write failed; the rating was not applied.
    #[error(transparent)]
    Store(#[from] StoreError),
}
