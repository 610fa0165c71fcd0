//! Pause tracking for the location stream.
//!
//! A pause means location updates went stale or invalid. It is distinct
//! from `MotionType::NotMoving`, which is a valid fix with a low speed.

use crate::core::SpeedSample;

#[derive(Debug, Clone, Copy, Default)]
pub struct PauseTracker;

impl PauseTracker {
    /// Paused state after observing `sample`.
    ///
    /// An invalid fix (validity flag cleared, or the platform's pause
    /// condition) pauses; a valid fix resumes. The result depends only on
    /// the current fix. `previous_paused` matters only to [`Self::edge`].
    pub fn evaluate(sample: &SpeedSample, _previous_paused: bool) -> bool {
        !sample.is_valid()
    }

    /// `Some(new_state)` only when `sample` flips the paused state.
    pub fn edge(sample: &SpeedSample, previous_paused: bool) -> Option<bool> {
        let paused = Self::evaluate(sample, previous_paused);
        (paused != previous_paused).then_some(paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn evaluate_depends_only_on_current_fix() {
        let now = Utc::now();
        for previous in [false, true] {
            assert!(PauseTracker::evaluate(&SpeedSample::invalid(now), previous));
            assert!(PauseTracker::evaluate(&SpeedSample::paused(now), previous));
            assert!(!PauseTracker::evaluate(&SpeedSample::valid(1.0, now), previous));
        }
    }

    #[test]
    fn invalid_after_valid_pauses() {
        let now = Utc::now();
        assert_eq!(PauseTracker::edge(&SpeedSample::invalid(now), false), Some(true));
        assert_eq!(PauseTracker::edge(&SpeedSample::paused(now), false), Some(true));
    }

    #[test]
    fn valid_after_invalid_resumes() {
        let now = Utc::now();
        assert_eq!(PauseTracker::edge(&SpeedSample::valid(1.0, now), true), Some(false));
    }

    #[test]
    fn sustained_states_produce_no_edge() {
        let now = Utc::now();
        assert_eq!(PauseTracker::edge(&SpeedSample::invalid(now), true), None);
        assert_eq!(PauseTracker::edge(&SpeedSample::valid(0.0, now), false), None);
    }

    #[test]
    fn sequence_yields_two_edges() {
        let now = Utc::now();
        let fixes = [
            SpeedSample::valid(1.0, now),
            SpeedSample::valid(1.1, now),
            SpeedSample::invalid(now),
            SpeedSample::invalid(now),
            SpeedSample::valid(1.2, now),
        ];

        let mut paused = false;
        let mut edges = Vec::new();
        for fix in &fixes {
            if let Some(next) = PauseTracker::edge(fix, paused) {
                edges.push(next);
                paused = next;
            }
        }

        assert_eq!(edges, vec![true, false]);
    }
}
