use scraper::Html;

use super::html::{child_text, selector, text_of};
use crate::domain::{PdgaNumber, RoundBreakdown, parse_event_date};
use crate::errors::{AcquisitionError, ParseError};

const PAGE: &str = "event results";

/// One player's round ratings on an event results page.
///
/// A player missing from the results, or not yet rated, yields an empty list.
pub fn parse_round_breakdown(
    html: &Html,
    pdga_number: PdgaNumber,
) -> Result<RoundBreakdown, AcquisitionError> {
    let date = selector(".tournament-date")?;
    let date_text = html
        .select(&date)
        .next()
        .map(text_of)
        .ok_or(ParseError::MissingField {
            page: PAGE,
            field: "tournament date",
        })?;

    Ok(RoundBreakdown {
        ratings: player_ratings(html, pdga_number)?,
        timestamp: parse_event_date(&date_text)?,
        is_league: is_league(html)?,
    })
}

fn player_ratings(html: &Html, pdga_number: PdgaNumber) -> Result<Vec<i32>, ParseError> {
    let rows = selector("tr")?;
    let number = selector("td.pdga-number")?;
    let rating = selector("td.round-rating")?;
    let wanted = pdga_number.to_string();

    let Some(row) = html
        .select(&rows)
        .find(|row| child_text(*row, &number).is_some_and(|text| text == wanted))
    else {
        return Ok(Vec::new());
    };

    row.select(&rating)
        .map(text_of)
        .filter(|text| !text.is_empty())
        .map(|text| {
            text.parse().map_err(|_| ParseError::Malformed {
                page: PAGE,
                field: "round rating",
                value: text,
            })
        })
        .collect()
}

fn is_league(html: &Html) -> Result<bool, ParseError> {
    let tier = selector(".tournament-tier")?;
    Ok(html.select(&tier).next().map(text_of).is_some_and(|text| is_league_tier(&text)))
}

/// `"Tier: L"`, `"L"` or anything naming a league
fn is_league_tier(text: &str) -> bool {
    let tier = text.strip_prefix("Tier:").unwrap_or(text).trim();
    tier == "L" || tier.to_lowercase().contains("league")
}
