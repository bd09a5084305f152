use std::cmp::Reverse;
use std::collections::HashSet;

use log::{debug, info};
use serde::Serialize;

use super::window::EvaluationWindow;
use crate::domain::{
    EventSummary, LiveEvent, Rating, RoundBreakdown, RoundRecord, RoundSource, Timestamp,
};

/// Event identities the history page already lists
pub fn known_event_ids(history: &[RoundRecord]) -> HashSet<&str> {
    history.iter().map(|round| round.event_id.as_str()).collect()
}

/// Participation rows absent from history, each event at most once
pub fn select_new_events<'a>(
    history: &[RoundRecord],
    participation: &'a [EventSummary],
) -> Vec<&'a EventSummary> {
    let mut seen = known_event_ids(history);
    participation
        .iter()
        .filter(|event| seen.insert(event.event_id.as_str()))
        .collect()
}

/// Live events covered by neither history nor the new participation rows
pub fn select_live_events<'a>(
    history: &[RoundRecord],
    new_events: &[&EventSummary],
    live: impl IntoIterator<Item = &'a LiveEvent>,
) -> Vec<&'a LiveEvent> {
    let mut seen = known_event_ids(history);
    seen.extend(new_events.iter().map(|event| event.event_id.as_str()));

    let mut selected: Vec<&LiveEvent> = Vec::new();
    for event in live {
        if seen.contains(event.event_id.as_str())
            || selected.iter().any(|s| s.event_id == event.event_id)
        {
            debug!("Skipping live event {}: already covered", event.event_id);
            continue;
        }
        selected.push(event);
    }
    selected
}

/// One record per rated round of a participation row.
///
/// Leagues dated on or after the next deadline are still open and count for nothing.
pub fn expand_event(
    event: &EventSummary,
    breakdown: &RoundBreakdown,
    source: RoundSource,
    window: &EvaluationWindow,
) -> Vec<RoundRecord> {
    if breakdown.is_league && breakdown.timestamp >= window.next_update {
        info!("Skipping open league {} until its cycle closes", event.name);
        return Vec::new();
    }

    breakdown
        .ratings
        .iter()
        .zip(1..)
        .map(|(&rating, round_number)| RoundRecord::from_event(event, round_number, rating, source))
        .collect()
}

/// Expand an in-progress or just-finished event, dated by its results page
pub fn expand_live_event(
    event: &LiveEvent,
    breakdown: &RoundBreakdown,
    window: &EvaluationWindow,
) -> Vec<RoundRecord> {
    let summary = EventSummary {
        event_id: event.event_id.clone(),
        name: event.name.clone(),
        timestamp: breakdown.timestamp,
        tier: None,
        place: None,
    };
    expand_event(&summary, breakdown, RoundSource::InProgress, window)
}

/// Hypothetical rounds, most recent first, all played `now`
pub fn what_if_rounds(ratings: &[Rating], now: Timestamp) -> Vec<RoundRecord> {
    ratings
        .iter()
        .zip(1..)
        .map(|(&rating, round_number)| RoundRecord::what_if(round_number, rating, now))
        .collect()
}

/// The round sets one estimate works from
#[derive(Debug, Clone, Default, Serialize)]
pub struct Reconciliation {
    /// Rounds that count, newest first
    pub used: Vec<RoundRecord>,
    /// Rounds not yet on the published rating, oldest first
    pub incoming: Vec<RoundRecord>,
    /// Evaluated rounds that fall out of the window
    pub outgoing: Vec<RoundRecord>,
}

impl Reconciliation {
    /// Merge evaluated history with rounds the history page does not show yet.
    ///
    /// History rounds count only when evaluated and strictly after `last_date`;
    /// the "included" column is ignored.
    pub fn assemble(
        history: &[RoundRecord],
        added: Vec<RoundRecord>,
        window: &EvaluationWindow,
    ) -> Self {
        let (current, outgoing): (Vec<&RoundRecord>, Vec<&RoundRecord>) = history
            .iter()
            .filter(|round| round.evaluated)
            .partition(|round| window.contains(round.timestamp));

        let mut incoming = added;
        incoming.sort_by(|a, b| incoming_order(a).cmp(&incoming_order(b)));

        let mut used: Vec<RoundRecord> = incoming
            .iter()
            .cloned()
            .chain(current.into_iter().cloned())
            .collect();
        // Stable: ties keep round 1 ahead of round 2
        used.sort_by_key(|round| (Reverse(round.timestamp), round.round_number));

        let reconciliation = Self {
            used,
            incoming,
            outgoing: outgoing.into_iter().cloned().collect(),
        };

        info!(
            "Reconciled {} used rounds ({} incoming, {} outgoing)",
            reconciliation.used.len(),
            reconciliation.incoming.len(),
            reconciliation.outgoing.len()
        );
        reconciliation
    }
}

/// Display order for incoming rounds: oldest first, then round number, then event name
fn incoming_order(round: &RoundRecord) -> (Timestamp, u32, &str) {
    (round.timestamp, round.round_number, round.name.as_str())
}
