//! Core types for the spaced-repetition scheduler.

use crate::error::SchedulerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque card identifier, assigned at creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier for a review log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Card learning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    New,
    Learning,
    Review,
    Relearning,
}

impl Default for CardState {
    fn default() -> Self {
        Self::New
    }
}

/// Recall-quality rating, 0 (blackout) through 5 (perfect).
///
/// Values of 3 and above count as a successful recall. Construction is the
/// only validation point; anything outside 0-5 is rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, SchedulerError> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(SchedulerError::InvalidQuality(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// A rating of 3 or higher is a successful recall.
    pub fn is_success(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Scheduling algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Fsrs,
    Sm2,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Fsrs
    }
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fsrs => "FSRS",
            Self::Sm2 => "SM2",
        }
    }

    /// Parse an algorithm identifier, case-insensitively.
    ///
    /// An unknown identifier is a configuration error and should abort
    /// scheduler construction rather than fall back silently.
    pub fn parse(s: &str) -> Result<Self, SchedulerError> {
        match s.to_ascii_lowercase().as_str() {
            "fsrs" => Ok(Self::Fsrs),
            "sm2" => Ok(Self::Sm2),
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A learning item with its own review schedule.
///
/// Cards are owned by the persistent store; the scheduler borrows a
/// snapshot, computes a new one, and hands it back for the caller to
/// persist. Timestamps serialize as ISO-8601, `interval` as whole days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub prompt_text: String,
    pub answer_text: String,
    pub state: CardState,
    /// Days until the next review. 0 only before the first rating.
    pub interval: u32,
    pub ease_factor: f64,
    /// Failed reviews since the last success.
    pub lapses: u32,
    /// Successful reviews, never decremented.
    pub reps: u32,
    pub created_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_at: Option<DateTime<Utc>>,
}

impl Card {
    /// New card, due immediately.
    pub fn new(
        prompt_text: impl Into<String>,
        answer_text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CardId::new(),
            prompt_text: prompt_text.into(),
            answer_text: answer_text.into(),
            state: CardState::New,
            interval: 0,
            ease_factor: 2.5,
            lapses: 0,
            reps: 0,
            created_at: now,
            next_review_at: now,
            last_review_at: None,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}

/// One immutable audit record per rating event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLogRecord {
    pub id: RecordId,
    pub card_id: CardId,
    pub quality: Quality,
    pub time_taken_ms: u32,
    pub reviewed_at: DateTime<Utc>,
    pub previous_interval: u32,
    pub new_interval: u32,
    pub previous_ease_factor: f64,
    pub new_ease_factor: f64,
    pub algorithm: Algorithm,
}

/// Counters for one review session. Ephemeral; discarded with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewSessionStats {
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub remaining_count: usize,
}

/// Scheduler configuration supplied by the host application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    pub algorithm: Algorithm,
    pub max_reviews_per_session: usize,
    pub reminder_interval_minutes: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_reviews_per_session: 100,
            reminder_interval_minutes: 60,
        }
    }
}
