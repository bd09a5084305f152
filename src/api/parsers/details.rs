use scraper::{ElementRef, Html};

use super::html::{child_text, non_empty, selector, text_of};
use crate::domain::{RoundRecord, RoundSource, event_identity, parse_event_date};
use crate::errors::{AcquisitionError, ParseError};

const PAGE: &str = "ratings detail";

/// Every round on the ratings detail page, one record per table row
pub fn parse_history(html: &Html) -> Result<Vec<RoundRecord>, AcquisitionError> {
    let rows = selector("tr")?;
    let tournament = selector("td.tournament")?;

    let mut rounds = Vec::new();
    for row in html.select(&rows) {
        if let Some(cell) = row.select(&tournament).next() {
            rounds.push(parse_round_row(row, cell)?);
        }
    }
    Ok(rounds)
}

fn parse_round_row(row: ElementRef, tournament: ElementRef) -> Result<RoundRecord, AcquisitionError> {
    let link = selector("a[href]")?;
    let date = selector("td.date")?;
    let round = selector("td.round")?;
    let rating = selector("td.round-rating")?;
    let evaluated = selector("td.evaluated")?;
    let tier = selector("td.tier")?;
    let division = selector("td.division")?;
    let score = selector("td.score")?;

    let anchor = tournament.select(&link).next().ok_or(missing("event link"))?;
    let date_text = child_text(row, &date).ok_or(missing("date"))?;
    let round_text = non_empty(row, &round).ok_or(missing("round"))?;

    Ok(RoundRecord {
        name: text_of(anchor),
        event_id: event_identity(anchor.value().attr("href").unwrap_or_default()),
        rating: non_empty(row, &rating)
            .map(|text| parse_number(&text, "round rating"))
            .transpose()?,
        timestamp: parse_event_date(&date_text)?,
        round_number: parse_number(&round_text, "round")?,
        evaluated: child_text(row, &evaluated).is_some_and(|text| text == "Yes"),
        source: RoundSource::History,
        tier: non_empty(row, &tier),
        division: non_empty(row, &division),
        score: non_empty(row, &score),
    })
}

fn parse_number<T: std::str::FromStr>(text: &str, field: &'static str) -> Result<T, ParseError> {
    text.parse().map_err(|_| ParseError::Malformed {
        page: PAGE,
        field,
        value: text.to_string(),
    })
}

fn missing(field: &'static str) -> ParseError {
    ParseError::MissingField { page: PAGE, field }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(round: &str, rating: &str, evaluated: &str) -> String {
        format!(
            r#"<tr>
                <td class="tournament"><a href="/tour/event/77001">Harvest Classic</a></td>
                <td class="tier">B</td>
                <td class="date">Date: 12-Oct-2024</td>
                <td class="division">MA3</td>
                <td class="round tooltip">{round}</td>
                <td class="score">54</td>
                <td class="round-rating">{rating}</td>
                <td class="evaluated">{evaluated}</td>
                <td class="included">Yes</td>
            </tr>"#
        )
    }

    fn page(rows: &[String]) -> Html {
        Html::parse_document(&format!(
            "<table><thead><tr><th>Tournament</th></tr></thead><tbody>{}</tbody></table>",
            rows.concat()
        ))
    }

    #[test]
    fn test_history_rows() {
        let html = page(&[row("1", "948", "Yes"), row("2", "963", "No")]);

        let rounds = parse_history(&html).unwrap();

        assert_eq!(rounds.len(), 2);
        let first = &rounds[0];
        assert_eq!(first.name, "Harvest Classic");
        assert_eq!(first.event_id, "/tour/event/77001");
        assert_eq!(first.rating, Some(948));
        assert_eq!(first.round_number, 1);
        assert_eq!(first.timestamp, parse_event_date("12-Oct-2024").unwrap());
        assert_eq!(first.division.as_deref(), Some("MA3"));
        assert_eq!(first.score.as_deref(), Some("54"));
        assert!(first.evaluated);
        assert!(!rounds[1].evaluated);
        assert_eq!(rounds[1].round_number, 2);
    }

    #[test]
    fn test_unrated_round_has_no_rating() {
        let html = page(&[row("1", "", "No")]);

        let rounds = parse_history(&html).unwrap();

        assert_eq!(rounds[0].rating, None);
    }

    #[test]
    fn test_malformed_rating() {
        let html = page(&[row("1", "DNF", "No")]);

        let err = parse_history(&html).unwrap_err();

        match err {
            AcquisitionError::Parse(ParseError::Malformed { field, value, .. }) => {
                assert_eq!(field, "round rating");
                assert_eq!(value, "DNF");
            }
            other => panic!("expected malformed rating, got {other:?}"),
        }
    }
}
