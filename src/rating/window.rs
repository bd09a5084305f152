use log::info;
use serde::Serialize;

use crate::domain::{ScheduleEntry, Timestamp};
use crate::errors::EstimateError;

/// Rolling span of rounds eligible for the next ratings update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvaluationWindow {
    /// Submission deadline of the next update
    pub next_update: Timestamp,
    /// Publication date of the next update
    pub publication: Timestamp,
    /// Rounds on or before this instant no longer count
    pub last_date: Timestamp,
}

impl EvaluationWindow {
    /// Pick the earliest deadline strictly after `now` and reach back one rating year from it.
    /// Schedule order does not matter.
    pub fn resolve(
        now: Timestamp,
        schedule: &[ScheduleEntry],
        window_secs: i64,
    ) -> Result<Self, EstimateError> {
        let next = schedule
            .iter()
            .filter(|entry| entry.deadline > now)
            .min_by_key(|entry| entry.deadline)
            .ok_or(EstimateError::ScheduleExhausted { now })?;

        let window = Self {
            next_update: next.deadline,
            publication: next.publication,
            last_date: next.deadline - window_secs,
        };

        info!(
            "Next ratings deadline {}, counting rounds after {}",
            window.next_update, window.last_date
        );
        Ok(window)
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        timestamp > self.last_date
    }
}
