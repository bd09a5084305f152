use scraper::Html;

use super::html::{selector, text_of};
use crate::domain::{ScheduleEntry, parse_schedule_date};
use crate::errors::{AcquisitionError, ParseError};

/// Deadline/publication pairs from the first table on the schedule page, sorted by deadline
pub fn parse_schedule(html: &Html) -> Result<Vec<ScheduleEntry>, AcquisitionError> {
    let tables = selector("table")?;
    let rows = selector("tbody tr")?;
    let cell = selector("td")?;

    let table = html.select(&tables).next().ok_or(ParseError::MissingField {
        page: "ratings schedule",
        field: "schedule table",
    })?;

    let mut schedule = Vec::new();
    for row in table.select(&rows) {
        let cells: Vec<String> = row.select(&cell).map(text_of).collect();
        if let [deadline, publication] = cells.as_slice() {
            schedule.push(ScheduleEntry {
                deadline: parse_schedule_date(deadline)?,
                publication: parse_schedule_date(publication)?,
            });
        }
    }

    schedule.sort_by_key(|entry| entry.deadline);
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_rows_sorted() {
        let html = Html::parse_document(
            r#"<table>
                <thead><tr><th>Submission deadline</th><th>Publication date</th></tr></thead>
                <tbody>
                    <tr><td>February 11, 2025</td><td>February 18, 2025</td></tr>
                    <tr><td>January 14, 2025</td><td>January 21, 2025</td></tr>
                    <tr><td colspan="2">Dates subject to change</td></tr>
                </tbody>
            </table>"#,
        );

        let schedule = parse_schedule(&html).unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].deadline, parse_schedule_date("January 14, 2025").unwrap());
        assert_eq!(schedule[0].publication, parse_schedule_date("January 21, 2025").unwrap());
        assert_eq!(schedule[1].deadline, parse_schedule_date("February 11, 2025").unwrap());
    }

    #[test]
    fn test_bad_schedule_date() {
        let html = Html::parse_document(
            "<table><tbody><tr><td>Someday</td><td>February 18, 2025</td></tr></tbody></table>",
        );

        assert!(matches!(parse_schedule(&html), Err(AcquisitionError::Date(_))));
    }

    #[test]
    fn test_missing_table() {
        let html = Html::parse_document("<p>Nothing here</p>");

        assert!(matches!(parse_schedule(&html), Err(AcquisitionError::Parse(_))));
    }
}
