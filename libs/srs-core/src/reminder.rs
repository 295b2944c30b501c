//! Wake-up scheduling port.
//!
//! The core computes when a card is next due and tells this port about
//! it; delivering the notification is the host's job. Nothing here feeds
//! back into scheduling.

use crate::types::{CardId, ReviewConfig};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Tag for the recurring "check for due cards" wake.
pub const PERIODIC_REMINDER_TAG: &str = "review-reminder";

/// A wake-up the host has agreed to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledWake {
    pub tag: String,
    pub at: DateTime<Utc>,
}

/// Fire-and-forget wake scheduling. Any backing mechanism (timer wheel,
/// OS scheduler, message queue) satisfies the contract; scheduling the
/// same tag twice replaces the earlier wake.
pub trait ReminderPort: Send + Sync {
    fn schedule_wake(&self, at: DateTime<Utc>, tag: &str);

    fn cancel_wake(&self, tag: &str);

    /// Pending wakes, soonest first.
    fn list_scheduled_wakes(&self) -> Vec<ScheduledWake>;
}

/// Wake tag for a card's next review.
pub fn wake_tag(card_id: CardId) -> String {
    format!("review-{card_id}")
}

/// Re-arm the recurring reminder `config.reminder_interval_minutes` from now.
pub fn schedule_periodic_reminder(
    port: &dyn ReminderPort,
    config: &ReviewConfig,
    now: DateTime<Utc>,
) {
    let at = now + Duration::minutes(i64::from(config.reminder_interval_minutes));
    port.schedule_wake(at, PERIODIC_REMINDER_TAG);
}

/// Reference [`ReminderPort`] holding wakes in memory, one per tag.
#[derive(Debug, Default)]
pub struct InMemoryReminder {
    wakes: Mutex<BTreeMap<String, DateTime<Utc>>>,
}

impl InMemoryReminder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReminderPort for InMemoryReminder {
    fn schedule_wake(&self, at: DateTime<Utc>, tag: &str) {
        self.wakes
            .lock()
            .expect("reminder mutex poisoned")
            .insert(tag.to_string(), at);
    }

    fn cancel_wake(&self, tag: &str) {
        self.wakes.lock().expect("reminder mutex poisoned").remove(tag);
    }

    fn list_scheduled_wakes(&self) -> Vec<ScheduledWake> {
        let wakes = self.wakes.lock().expect("reminder mutex poisoned");
        let mut list: Vec<ScheduledWake> = wakes
            .iter()
            .map(|(tag, at)| ScheduledWake {
                tag: tag.clone(),
                at: *at,
            })
            .collect();
        list.sort_by_key(|wake| wake.at);
        list
    }
}
