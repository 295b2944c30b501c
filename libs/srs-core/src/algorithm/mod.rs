//! Spaced repetition algorithm implementations.

pub mod fsrs;
pub mod sm2;

use crate::types::{Algorithm, Card, CardState, Quality};
use chrono::{DateTime, Utc};

/// Hard cap on any computed interval (~100 years).
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Ease factor never drops below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Starting ease factor for new cards.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Result of scheduling a card after a rating.
#[derive(Debug, Clone)]
pub struct ScheduleUpdate {
    /// Fully-populated card snapshot for the caller to persist.
    pub card: Card,
    pub next_review_at: DateTime<Utc>,
    /// Days since the previous rating, 0 if never reviewed. Informational.
    pub elapsed_days: f64,
}

/// Trait for spaced repetition algorithms.
///
/// `calculate` is pure: no I/O, no hidden clock, deterministic for
/// identical inputs. Quality validation happens at [`Quality`]
/// construction, so every call here sees an in-range rating.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier, matching the wire form of [`Algorithm`].
    fn name(&self) -> &'static str;

    /// Compute the card's next snapshot and review instant.
    fn calculate(&self, card: &Card, quality: Quality, now: DateTime<Utc>) -> ScheduleUpdate;
}

/// Construct the algorithm for a validated selection.
pub fn algorithm_for(kind: Algorithm) -> Box<dyn SpacedRepetitionAlgorithm> {
    match kind {
        Algorithm::Fsrs => Box::new(fsrs::Fsrs::default()),
        Algorithm::Sm2 => Box::new(sm2::Sm2::default()),
    }
}

/// State transition table shared by both algorithms.
///
/// Success walks New -> Learning -> Review; any failure drops to
/// Relearning, and a later success returns to Review. A card never
/// re-enters New once rated.
pub(crate) fn next_state(current: CardState, success: bool) -> CardState {
    if !success {
        return CardState::Relearning;
    }
    match current {
        CardState::New => CardState::Learning,
        CardState::Learning | CardState::Review | CardState::Relearning => CardState::Review,
    }
}

/// SM-2 ease-factor delta for a quality rating:
/// `0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`.
pub(crate) fn ease_delta(quality: Quality) -> f64 {
    let q = f64::from(quality.value());
    0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)
}

/// Days since the card's last rating, 0 if never reviewed.
pub(crate) fn elapsed_days(card: &Card, now: DateTime<Utc>) -> f64 {
    match card.last_review_at {
        Some(last) => {
            let secs = now.signed_duration_since(last).num_seconds();
            (secs as f64 / 86_400.0).max(0.0)
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_always_lands_in_relearning() {
        for state in [
            CardState::New,
            CardState::Learning,
            CardState::Review,
            CardState::Relearning,
        ] {
            assert_eq!(next_state(state, false), CardState::Relearning);
        }
    }

    #[test]
    fn success_path_reaches_review_and_stays() {
        assert_eq!(next_state(CardState::New, true), CardState::Learning);
        assert_eq!(next_state(CardState::Learning, true), CardState::Review);
        assert_eq!(next_state(CardState::Review, true), CardState::Review);
        assert_eq!(next_state(CardState::Relearning, true), CardState::Review);
    }

    #[test]
    fn ease_delta_values() {
        // q=5 -> +0.1, q=4 -> 0, q=3 -> -0.14, q=0 -> -0.8
        let delta = |q: u8| ease_delta(Quality::new(q).unwrap());
        assert!((delta(5) - 0.1).abs() < 1e-9);
        assert!(delta(4).abs() < 1e-9);
        assert!((delta(3) + 0.14).abs() < 1e-9);
        assert!((delta(0) + 0.8).abs() < 1e-9);
    }
}
