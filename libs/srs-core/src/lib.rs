//! Spaced-repetition scheduling core.
//!
//! Provides:
//! - Scheduling algorithms (ease-factor FSRS variant, classic SM-2)
//! - Due-card selection with deterministic ordering
//! - Review session sequencing with an append-only audit log
//! - Port traits for the persistent store, review log and wake-up reminders
//!
//! The core is a pure decision engine over card state: it never performs
//! network I/O, never generates content and never renders anything. All
//! collaborators (store, log, reminders, clock) are injected explicitly.

pub mod algorithm;
pub mod clock;
pub mod due;
pub mod error;
pub mod memory;
pub mod reminder;
pub mod session;
pub mod store;
pub mod types;

pub use algorithm::{algorithm_for, ScheduleUpdate, SpacedRepetitionAlgorithm};
pub use clock::{Clock, FixedClock, SystemClock};
pub use due::DueSelector;
pub use error::{Result, SchedulerError};
pub use memory::MemoryStore;
pub use reminder::{
    schedule_periodic_reminder, wake_tag, InMemoryReminder, ReminderPort, ScheduledWake,
    PERIODIC_REMINDER_TAG,
};
pub use session::{ReviewSession, SubmitOutcome};
pub use store::{CardStore, ReviewLogger, StoreError, StoreResult};
pub use types::{
    Algorithm, Card, CardId, CardState, Quality, RecordId, ReviewConfig, ReviewLogRecord,
    ReviewSessionStats,
};
