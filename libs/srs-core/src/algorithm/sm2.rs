//! Classic SM-2, kept as a comparison/fallback algorithm.
//!
//! Differs from the FSRS variant in two ways: the ease delta applies for
//! every rating (failures included, via the same clamped formula), and a
//! successful review multiplies by the freshly-updated ease. The first
//! two successful intervals are fixed at 1 and 6 days. State, reps and
//! lapses follow the shared conventions so callers can switch algorithms
//! without touching the surrounding session logic.

use super::{
    ease_delta, elapsed_days, next_state, ScheduleUpdate, SpacedRepetitionAlgorithm,
    MAX_INTERVAL_DAYS, MIN_EASE_FACTOR,
};
use crate::types::{Card, Quality};
use chrono::{DateTime, Duration, Utc};

/// SM-2 with configurable clamps.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub maximum_interval: u32,
    pub minimum_ease: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            maximum_interval: MAX_INTERVAL_DAYS,
            minimum_ease: MIN_EASE_FACTOR,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "SM2"
    }

    fn calculate(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> ScheduleUpdate {
        let elapsed = elapsed_days(card, now);
        let success = quality.is_success();

        let ease_factor = (card.ease_factor + ease_delta(quality)).max(self.minimum_ease);

        let interval = if success {
            match card.interval {
                0 => 1,
                1 => 6,
                n => {
                    let grown = (f64::from(n) * ease_factor).ceil() as u32;
                    grown.min(self.maximum_interval)
                }
            }
        } else {
            1
        };

        let (reps, lapses) = if success {
            (card.reps + 1, 0)
        } else {
            (card.reps, card.lapses + 1)
        };

        let state = next_state(card.state, success);
        let next_review_at = now + Duration::days(i64::from(interval));

        ScheduleUpdate {
            card: Card {
                state,
                interval,
                ease_factor,
                reps,
                lapses,
                next_review_at,
                last_review_at: Some(now),
                ..card.clone()
            },
            next_review_at,
            elapsed_days: elapsed,
        }
    }
}
