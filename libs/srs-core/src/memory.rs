//! In-process reference store.
//!
//! Backs the test suite and embedded use. Due queries walk a
//! `(next_review_at, id)` BTree index so they stop at the cutoff instead
//! of scanning every card.

use crate::store::{CardStore, ReviewLogger, StoreError, StoreResult};
use crate::types::{Card, CardId, ReviewLogRecord};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    cards: HashMap<CardId, Card>,
    due_index: BTreeSet<(DateTime<Utc>, CardId)>,
    logs: Vec<ReviewLogRecord>,
}

/// In-memory implementation of [`CardStore`] and [`ReviewLogger`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_count(&self) -> usize {
        self.locked().cards.len()
    }

    pub fn log_count(&self) -> usize {
        self.locked().logs.len()
    }

    /// Remove a card outright. Deletion is a collaborator concern, not part
    /// of the [`CardStore`] port; this exists so hosts (and tests) can model
    /// a card disappearing underneath a session.
    pub fn remove_card(&self, id: CardId) -> bool {
        let mut inner = self.locked();
        match inner.cards.remove(&id) {
            Some(card) => {
                inner.due_index.remove(&(card.next_review_at, card.id));
                true
            }
            None => false,
        }
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }
}

impl Inner {
    fn insert(&mut self, card: &Card) {
        if let Some(previous) = self.cards.get(&card.id) {
            self.due_index.remove(&(previous.next_review_at, previous.id));
        }
        self.due_index.insert((card.next_review_at, card.id));
        self.cards.insert(card.id, card.clone());
    }
}

impl CardStore for MemoryStore {
    fn get_card(&self, id: CardId) -> StoreResult<Option<Card>> {
        Ok(self.locked().cards.get(&id).cloned())
    }

    fn put_card(&self, card: &Card) -> StoreResult<()> {
        self.locked().insert(card);
        Ok(())
    }

    fn update_card_checked(
        &self,
        card: &Card,
        expected_last_review: Option<DateTime<Utc>>,
    ) -> StoreResult<()> {
        let mut inner = self.locked();
        let stored_last_review = inner.cards.get(&card.id).and_then(|c| c.last_review_at);
        if stored_last_review != expected_last_review {
            return Err(StoreError::Conflict { card_id: card.id });
        }
        inner.insert(card);
        Ok(())
    }

    fn query_due_before(&self, instant: DateTime<Utc>) -> StoreResult<Vec<Card>> {
        let inner = self.locked();
        let due = inner
            .due_index
            .iter()
            .take_while(|(at, _)| *at <= instant)
            .filter_map(|(_, id)| inner.cards.get(id).cloned())
            .collect();
        Ok(due)
    }
}

impl ReviewLogger for MemoryStore {
    fn append(&self, record: &ReviewLogRecord) -> StoreResult<()> {
        self.locked().logs.push(record.clone());
        Ok(())
    }

    fn records_for_card(&self, card_id: CardId) -> StoreResult<Vec<ReviewLogRecord>> {
        Ok(self
            .locked()
            .logs
            .iter()
            .filter(|record| record.card_id == card_id)
            .cloned()
            .collect())
    }
}
