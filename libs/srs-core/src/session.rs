//! Review session sequencing.

use crate::algorithm::{algorithm_for, SpacedRepetitionAlgorithm};
use crate::clock::Clock;
use crate::error::{Result, SchedulerError};
use crate::reminder::{wake_tag, ReminderPort};
use crate::store::{CardStore, ReviewLogger};
use crate::types::{
    Algorithm, Card, Quality, RecordId, ReviewConfig, ReviewLogRecord, ReviewSessionStats,
};
use tracing::{debug, info, warn};

/// Result of one rating submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmitOutcome {
    pub stats: ReviewSessionStats,
    pub is_complete: bool,
}

/// Stateful sequencer over a batch of due cards.
///
/// Submitting a rating is one logical operation: compute, persist the
/// card, append the audit record, then update counters. If any of the
/// persistence steps fails the counters and cursor stay put, so the same
/// submission can be retried — the computation re-reads stored values and
/// is deterministic, making the retry idempotent from the caller's side.
///
/// A session is single-writer by construction (`&mut self`); concurrent
/// submissions for one session are a caller error, not a race this type
/// resolves. Abandoning a session is just dropping it; already-persisted
/// cards are unaffected.
pub struct ReviewSession<'a> {
    queue: Vec<Card>,
    cursor: usize,
    stats: ReviewSessionStats,
    algorithm_kind: Algorithm,
    algorithm: Box<dyn SpacedRepetitionAlgorithm>,
    store: &'a dyn CardStore,
    logger: &'a dyn ReviewLogger,
    clock: &'a dyn Clock,
    reminder: Option<&'a dyn ReminderPort>,
}

impl<'a> ReviewSession<'a> {
    /// Start a session over `queue`, truncated to the configured per-session
    /// cap. An empty queue yields an immediately-terminal session.
    pub fn start(
        mut queue: Vec<Card>,
        config: &ReviewConfig,
        store: &'a dyn CardStore,
        logger: &'a dyn ReviewLogger,
        clock: &'a dyn Clock,
    ) -> Self {
        queue.truncate(config.max_reviews_per_session);
        let stats = ReviewSessionStats {
            correct_count: 0,
            incorrect_count: 0,
            remaining_count: queue.len(),
        };
        info!(
            cards = queue.len(),
            algorithm = config.algorithm.as_str(),
            "review session started"
        );
        Self {
            queue,
            cursor: 0,
            stats,
            algorithm_kind: config.algorithm,
            algorithm: algorithm_for(config.algorithm),
            store,
            logger,
            clock,
            reminder: None,
        }
    }

    /// Notify this port of each card's next review instant.
    pub fn with_reminder(mut self, reminder: &'a dyn ReminderPort) -> Self {
        self.reminder = Some(reminder);
        self
    }

    /// The card awaiting a rating, if the session is not terminal.
    pub fn current_card(&self) -> Option<&Card> {
        self.queue.get(self.cursor)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    pub fn stats(&self) -> ReviewSessionStats {
        self.stats
    }

    /// Rate the current card and advance.
    ///
    /// Errors: [`SchedulerError::SessionComplete`] after the last card
    /// (nothing mutates), [`SchedulerError::InvalidQuality`] for a rating
    /// outside 0-5 (nothing mutates), [`SchedulerError::CardNotFound`] when
    /// the card was deleted underneath the session (that item is skipped,
    /// the rest of the queue stays reviewable), and
    /// [`SchedulerError::Store`] when a write fails (nothing advances;
    /// resubmitting is safe).
    pub fn submit_rating(&mut self, quality: u8, time_taken_ms: u32) -> Result<SubmitOutcome> {
        if self.is_complete() {
            return Err(SchedulerError::SessionComplete);
        }
        let quality = Quality::new(quality)?;
        let card_id = self.queue[self.cursor].id;

        // Re-read the stored card rather than trusting the queue snapshot:
        // a retry after a failed write then recomputes from the same
        // inputs, and edits committed since queueing are respected.
        let stored = match self.store.get_card(card_id)? {
            Some(card) => card,
            None => {
                warn!(%card_id, "card missing from store, skipping");
                self.cursor += 1;
                self.stats.remaining_count -= 1;
                return Err(SchedulerError::CardNotFound(card_id));
            }
        };

        let now = self.clock.now();
        let update = self.algorithm.calculate(&stored, quality, now);

        // Guarded write: refuse to clobber a review another session
        // committed after our read.
        self.store
            .update_card_checked(&update.card, stored.last_review_at)?;

        let record = ReviewLogRecord {
            id: RecordId::new(),
            card_id,
            quality,
            time_taken_ms,
            reviewed_at: now,
            previous_interval: stored.interval,
            new_interval: update.card.interval,
            previous_ease_factor: stored.ease_factor,
            new_ease_factor: update.card.ease_factor,
            algorithm: self.algorithm_kind,
        };
        if let Err(append_err) = self.logger.append(&record) {
            // The schedule update and its audit record must land together.
            // The card write already committed, so roll it back to the
            // snapshot we read; a retry then recomputes from the same
            // inputs instead of applying the rating twice.
            if let Err(rollback_err) = self.store.put_card(&stored) {
                warn!(
                    %card_id,
                    error = %rollback_err,
                    "rollback after failed log append also failed"
                );
            }
            return Err(append_err.into());
        }

        if let Some(reminder) = self.reminder {
            reminder.schedule_wake(update.next_review_at, &wake_tag(card_id));
        }

        if quality.is_success() {
            self.stats.correct_count += 1;
        } else {
            self.stats.incorrect_count += 1;
        }
        self.stats.remaining_count -= 1;
        self.cursor += 1;

        debug!(
            %card_id,
            quality = quality.value(),
            interval = update.card.interval,
            next_review_at = %update.next_review_at,
            "rating applied"
        );

        Ok(SubmitOutcome {
            stats: self.stats,
            is_complete: self.is_complete(),
        })
    }
}
