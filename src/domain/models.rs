use serde::{Deserialize, Serialize};

pub type PdgaNumber = u32;
pub type Rating = i32;
pub type Timestamp = i64;

/// Where a round record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundSource {
    History,
    NewEvent,
    InProgress,
    WhatIf,
}

/// One scored round, normalized across every page it can come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub name: String,
    /// Event link path without fragment; empty for what-if rounds
    pub event_id: String,
    pub rating: Option<Rating>,
    pub timestamp: Timestamp,
    pub round_number: u32,
    pub evaluated: bool,
    pub source: RoundSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

impl RoundRecord {
    /// A round from an event summary that the history page does not list yet
    pub fn from_event(
        event: &EventSummary,
        round_number: u32,
        rating: Rating,
        source: RoundSource,
    ) -> Self {
        Self {
            name: event.name.clone(),
            event_id: event.event_id.clone(),
            rating: Some(rating),
            timestamp: event.timestamp,
            round_number,
            evaluated: false,
            source,
            tier: event.tier.clone(),
            division: None,
            score: None,
        }
    }

    /// A hypothetical round played "now"
    pub fn what_if(round_number: u32, rating: Rating, now: Timestamp) -> Self {
        Self {
            name: "What-if round".to_string(),
            event_id: String::new(),
            rating: Some(rating),
            timestamp: now,
            round_number,
            evaluated: false,
            source: RoundSource::WhatIf,
            tier: None,
            division: None,
            score: None,
        }
    }
}

/// Submission deadline and publication date of one ratings update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub deadline: Timestamp,
    pub publication: Timestamp,
}

/// Row of the player's participation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: String,
    pub name: String,
    pub timestamp: Timestamp,
    pub tier: Option<String>,
    pub place: Option<String>,
}

/// An event the player is playing or just finished, named on the profile
/// page before it reaches the participation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveEvent {
    pub event_id: String,
    pub name: String,
}

/// Everything the profile page says about the player's events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerEvents {
    pub participation: Vec<EventSummary>,
    pub currently_playing: Vec<LiveEvent>,
    pub just_concluded: Vec<LiveEvent>,
}

impl PlayerEvents {
    /// Current events first, then recently finished ones
    pub fn live_events(&self) -> impl Iterator<Item = &LiveEvent> {
        self.currently_playing.iter().chain(&self.just_concluded)
    }
}

/// A player's per-round ratings for one event
#[derive(Debug, Clone, PartialEq)]
pub struct RoundBreakdown {
    pub ratings: Vec<Rating>,
    pub timestamp: Timestamp,
    pub is_league: bool,
}

/// Strip the `#fragment` off an event link so links from different pages compare equal
pub fn event_identity(href: &str) -> String {
    href.split('#').next().unwrap_or(href).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_identity_drops_fragment() {
        assert_eq!(event_identity("/tour/event/88276#Open"), "/tour/event/88276");
        assert_eq!(event_identity("/tour/event/88276"), "/tour/event/88276");
    }

    #[test]
    fn test_live_events_lists_current_before_recent() {
        let events = PlayerEvents {
            participation: Vec::new(),
            currently_playing: vec![LiveEvent {
                event_id: "/tour/event/2".to_string(),
                name: "Now".to_string(),
            }],
            just_concluded: vec![LiveEvent {
                event_id: "/tour/event/1".to_string(),
                name: "Yesterday".to_string(),
            }],
        };

        let names: Vec<&str> = events.live_events().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Now", "Yesterday"]);
    }
}
