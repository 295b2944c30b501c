//! Ease-factor FSRS variant, the primary scheduling algorithm.
//!
//! Interval arithmetic follows SM-2 conventions (ease multiplier, 1.3
//! floor) driven by the shared four-state machine. On a successful review
//! the interval grows from the *pre-update* ease factor; the ease
//! adjustment is applied afterwards. That order is fixed here and relied
//! on by the tests.

use super::{
    ease_delta, elapsed_days, next_state, ScheduleUpdate, SpacedRepetitionAlgorithm,
    DEFAULT_EASE_FACTOR, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR,
};
use crate::types::{Card, CardState, Quality};
use chrono::{DateTime, Duration, Utc};

/// FSRS with configurable clamps.
#[derive(Debug, Clone)]
pub struct Fsrs {
    pub maximum_interval: u32,
    pub minimum_ease: f64,
    pub default_ease: f64,
}

impl Default for Fsrs {
    fn default() -> Self {
        Self {
            maximum_interval: MAX_INTERVAL_DAYS,
            minimum_ease: MIN_EASE_FACTOR,
            default_ease: DEFAULT_EASE_FACTOR,
        }
    }
}

impl SpacedRepetitionAlgorithm for Fsrs {
    fn name(&self) -> &'static str {
        "FSRS"
    }

    fn calculate(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> ScheduleUpdate {
        let elapsed = elapsed_days(card, now);
        let success = quality.is_success();

        let (interval, ease_factor, reps, lapses) = if success {
            // A first rating starts over from the default ease, whatever
            // the stored value says.
            let ease_before = if card.state == CardState::New {
                self.default_ease
            } else {
                card.ease_factor
            };
            let interval = match card.state {
                CardState::Review => self.grow_interval(card.interval, ease_before),
                _ => 1,
            };
            let ease = (ease_before + ease_delta(quality)).max(self.minimum_ease);
            (interval, ease, card.reps + 1, 0)
        } else {
            let ease = (card.ease_factor - 0.2).max(self.minimum_ease);
            (1, ease, card.reps, card.lapses + 1)
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

impl Fsrs {
    fn grow_interval(&self, interval: u32, ease: f64) -> u32 {
        let grown = (f64::from(interval) * ease).ceil() as u32;
        grown.max(1).min(self.maximum_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardState;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    fn review_card(interval: u32, ease_factor: f64) -> Card {
        Card {
            state: CardState::Review,
            interval,
            ease_factor,
            reps: 3,
            last_review_at: Some(now() - Duration::days(i64::from(interval))),
            ..Card::new("prompt", "answer", now() - Duration::days(30))
        }
    }

    #[test]
    fn new_card_good_enters_learning_due_tomorrow() {
        let fsrs = Fsrs::default();
        let card = Card::new("q", "a", now());

        let update = fsrs.calculate(&card, q(4), now());

        assert_eq!(update.card.state, CardState::Learning);
        assert_eq!(update.card.interval, 1);
        // q=4 delta is exactly zero, so the reset ease stands.
        assert_eq!(update.card.ease_factor, 2.5);
        assert_eq!(update.card.reps, 1);
        assert_eq!(update.next_review_at, now() + Duration::days(1));
        assert_eq!(update.card.last_review_at, Some(now()));
        assert_eq!(update.elapsed_days, 0.0);
    }

    #[test]
    fn new_card_perfect_rating_raises_ease() {
        let fsrs = Fsrs::default();
        let card = Card::new("q", "a", now());

        let update = fsrs.calculate(&card, q(5), now());
        assert!((update.card.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn review_interval_grows_from_previous_ease() {
        let fsrs = Fsrs::default();
        let card = review_card(6, 2.3);

        let update = fsrs.calculate(&card, q(5), now());

        // ceil(6 * 2.3) = 14 using the pre-update ease; the +0.1 ease
        // adjustment lands only afterwards.
        assert_eq!(update.card.interval, 14);
        assert_eq!(update.card.state, CardState::Review);
        assert!((update.card.ease_factor - 2.4).abs() < 1e-9);
        assert_eq!(update.next_review_at, now() + Duration::days(14));
    }

    #[test]
    fn review_failure_drops_to_relearning() {
        let fsrs = Fsrs::default();
        let card = review_card(10, 2.0);

        let update = fsrs.calculate(&card, q(1), now());

        assert_eq!(update.card.state, CardState::Relearning);
        assert_eq!(update.card.interval, 1);
        assert!((update.card.ease_factor - 1.8).abs() < 1e-9);
        assert_eq!(update.card.lapses, card.lapses + 1);
        assert_eq!(update.card.reps, card.reps);
    }

    #[test]
    fn relearning_success_returns_to_review() {
        let fsrs = Fsrs::default();
        let card = Card {
            state: CardState::Relearning,
            lapses: 2,
            ..review_card(1, 1.8)
        };

        let update = fsrs.calculate(&card, q(4), now());

        assert_eq!(update.card.state, CardState::Review);
        assert_eq!(update.card.interval, 1);
        assert_eq!(update.card.lapses, 0);
        assert_eq!(update.card.reps, card.reps + 1);
    }

    #[test]
    fn learning_success_graduates_with_unit_interval() {
        let fsrs = Fsrs::default();
        let card = Card {
            state: CardState::Learning,
            interval: 1,
            reps: 1,
            ..Card::new("q", "a", now())
        };

        let update = fsrs.calculate(&card, q(3), now());

        assert_eq!(update.card.state, CardState::Review);
        assert_eq!(update.card.interval, 1);
    }

    #[test]
    fn interval_capped_at_maximum() {
        let fsrs = Fsrs::default();
        let card = review_card(30_000, 2.5);

        let update = fsrs.calculate(&card, q(4), now());
        assert_eq!(update.card.interval, MAX_INTERVAL_DAYS);
    }

    #[test]
    fn ease_factor_never_below_floor() {
        let fsrs = Fsrs::default();
        let mut card = review_card(4, 1.3);

        // Repeated failures and weak successes cannot push ease under 1.3.
        for quality in [0, 1, 2, 3, 0, 3] {
            let update = fsrs.calculate(&card, q(quality), now());
            assert!(update.card.ease_factor >= 1.3);
            card = update.card;
        }
    }

    #[test]
    fn successful_review_never_shrinks_interval() {
        let fsrs = Fsrs::default();
        let card = review_card(17, 1.3);

        let update = fsrs.calculate(&card, q(3), now());
        assert!(update.card.interval >= card.interval);
    }

    #[test]
    fn elapsed_days_reflects_time_since_last_review() {
        let fsrs = Fsrs::default();
        let card = review_card(6, 2.5);

        let update = fsrs.calculate(&card, q(4), now());
        assert!((update.elapsed_days - 6.0).abs() < 1e-6);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let fsrs = Fsrs::default();
        let card = review_card(6, 2.3);

        let a = fsrs.calculate(&card, q(4), now());
        let b = fsrs.calculate(&card, q(4), now());
        assert_eq!(a.card, b.card);
        assert_eq!(a.next_review_at, b.next_review_at);
    }
}
