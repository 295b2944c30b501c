//! Persistence ports consumed by the scheduling core.
//!
//! The core never owns card state between calls; it reads a snapshot,
//! computes a new one and hands it back through these traits. Retry and
//! backoff policy, if any, belongs to the implementations.

use crate::types::{Card, CardId, ReviewLogRecord};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias using StoreError.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the persistence ports.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed; the write did not happen.
    #[error("store backend error: {0}")]
    Backend(String),

    /// Version guard tripped: another writer advanced the card since the
    /// caller read it.
    #[error("card {card_id} was modified by another writer")]
    Conflict { card_id: CardId },
}

/// Persistent card store.
pub trait CardStore: Send + Sync {
    fn get_card(&self, id: CardId) -> StoreResult<Option<Card>>;

    /// Unconditional upsert, keyed by `card.id`.
    fn put_card(&self, card: &Card) -> StoreResult<()>;

    /// Version-guarded upsert: fails with [`StoreError::Conflict`] when the
    /// stored card's `last_review_at` no longer matches
    /// `expected_last_review`. Guards concurrent sessions rating the same
    /// card from silently clobbering each other's schedule.
    fn update_card_checked(
        &self,
        card: &Card,
        expected_last_review: Option<DateTime<Utc>>,
    ) -> StoreResult<()>;

    /// All cards with `next_review_at <= instant`. Implementations must
    /// serve this from an index or sorted scan, not a full linear filter.
    fn query_due_before(&self, instant: DateTime<Utc>) -> StoreResult<Vec<Card>>;
}

/// Append-only audit log of rating events. No update or delete exists.
pub trait ReviewLogger: Send + Sync {
    fn append(&self, record: &ReviewLogRecord) -> StoreResult<()>;

    /// Every record for a card, in recording order.
    fn records_for_card(&self, card_id: CardId) -> StoreResult<Vec<ReviewLogRecord>>;
}
