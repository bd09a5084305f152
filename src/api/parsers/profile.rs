use regex::Regex;
use scraper::{ElementRef, Html};

use super::html::{child_text, non_empty, selector, text_of};
use crate::domain::{EventSummary, LiveEvent, PlayerEvents, Rating, event_identity, parse_event_date};
use crate::errors::{AcquisitionError, ParseError};

const PAGE: &str = "profile";
const RATING_PATTERN: &str = r"Current Rating:\s*(\d+)";

/// Current published rating from the `li.current-rating` badge
pub fn parse_current_rating(html: &Html) -> Result<Rating, ParseError> {
    let badge = selector("li.current-rating")?;
    let text = html
        .select(&badge)
        .next()
        .map(text_of)
        .ok_or(ParseError::MissingField {
            page: PAGE,
            field: "current rating",
        })?;

    let pattern = Regex::new(RATING_PATTERN).map_err(|_| ParseError::InvalidPattern {
        pattern: RATING_PATTERN,
    })?;
    pattern
        .captures(&text)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or(ParseError::Malformed {
            page: PAGE,
            field: "current rating",
            value: text,
        })
}

/// Participation table plus the current and recent event callouts
pub fn parse_player_events(html: &Html) -> Result<PlayerEvents, AcquisitionError> {
    Ok(PlayerEvents {
        participation: parse_participation(html)?,
        currently_playing: parse_live_links(html, ".current-events a[href]")?,
        just_concluded: parse_live_links(html, ".recent-events a[href]")?,
    })
}

fn parse_participation(html: &Html) -> Result<Vec<EventSummary>, AcquisitionError> {
    let rows = selector("tbody tr")?;
    let tournament = selector("td.tournament")?;

    let mut events = Vec::new();
    for row in html.select(&rows) {
        if let Some(cell) = row.select(&tournament).next() {
            events.push(parse_participation_row(row, cell)?);
        }
    }
    Ok(events)
}

fn parse_participation_row(
    row: ElementRef,
    tournament: ElementRef,
) -> Result<EventSummary, AcquisitionError> {
    let link = selector("a[href]")?;
    let dates = selector("td.dates")?;
    let tier = selector("td.tier")?;
    let place = selector("td.place")?;

    let anchor = tournament.select(&link).next().ok_or(ParseError::MissingField {
        page: PAGE,
        field: "event link",
    })?;
    let date_text = child_text(row, &dates).ok_or(ParseError::MissingField {
        page: PAGE,
        field: "event dates",
    })?;

    Ok(EventSummary {
        event_id: event_identity(anchor.value().attr("href").unwrap_or_default()),
        name: text_of(anchor),
        timestamp: parse_event_date(&date_text)?,
        tier: non_empty(row, &tier),
        place: non_empty(row, &place),
    })
}

fn parse_live_links(html: &Html, css: &'static str) -> Result<Vec<LiveEvent>, ParseError> {
    let links = selector(css)?;

    Ok(html
        .select(&links)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            Some(LiveEvent {
                event_id: event_identity(href),
                name: text_of(anchor),
            })
        })
        .collect())
}
