//! Due-card selection.

use crate::error::Result;
use crate::store::CardStore;
use crate::types::Card;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Builds the ordered queue of cards whose review instant has elapsed.
pub struct DueSelector<'a> {
    store: &'a dyn CardStore,
}

impl<'a> DueSelector<'a> {
    pub fn new(store: &'a dyn CardStore) -> Self {
        Self { store }
    }

    /// Every card with `next_review_at <= now`, earliest-due first.
    ///
    /// Ties on `next_review_at` break by `created_at`, then by id so the
    /// order is total and reproducible. `limit` truncates after ordering,
    /// never before, so the earliest-due cards always win a spot. No due
    /// cards is an empty list, not an error.
    pub fn select_due(&self, now: DateTime<Utc>, limit: Option<usize>) -> Result<Vec<Card>> {
        let mut due = self.store.query_due_before(now)?;
        // The store contract already promises the cutoff; enforce it anyway
        // so a sloppy backend cannot surface not-yet-due cards.
        due.retain(|card| card.next_review_at <= now);
        due.sort_by_key(|card| (card.next_review_at, card.created_at, card.id));
        if let Some(limit) = limit {
            due.truncate(limit);
        }
        debug!(count = due.len(), "due queue built");
        Ok(due)
    }
}
