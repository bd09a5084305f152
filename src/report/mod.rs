use std::fmt::Write as _;

use chrono::DateTime;
use colored::Colorize;
use serde::Serialize;

use crate::domain::{PdgaNumber, Rating, RoundRecord, RoundSource, Timestamp};
use crate::rating::{Estimate, EvaluationWindow, Reconciliation};

/// A round as it appears in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundLine {
    pub name: String,
    pub round_number: u32,
    pub rating: Option<Rating>,
    pub date: String,
    pub source: RoundSource,
}

impl From<&RoundRecord> for RoundLine {
    fn from(round: &RoundRecord) -> Self {
        Self {
            name: round.name.clone(),
            round_number: round.round_number,
            rating: round.rating,
            date: format_date(round.timestamp),
            source: round.source,
        }
    }
}

/// Everything one run has to say about the next rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub pdga_number: PdgaNumber,
    pub current_rating: Rating,
    pub new_rating: Rating,
    pub rating_change: Rating,
    pub next_update: String,
    pub publication: String,
    pub mean: f64,
    pub stddev: f64,
    pub cutoff: Rating,
    pub rounds_counted: usize,
    pub bonus_rounds: usize,
    pub dropped: Vec<RoundLine>,
    pub added: Vec<RoundLine>,
    pub outliers: Vec<RoundLine>,
}

impl Report {
    pub fn build(
        pdga_number: PdgaNumber,
        window: &EvaluationWindow,
        reconciliation: &Reconciliation,
        estimate: &Estimate,
    ) -> Self {
        Self {
            pdga_number,
            current_rating: estimate.current_rating,
            new_rating: estimate.pdga_rating,
            rating_change: estimate.rating_change,
            next_update: format_date(window.next_update),
            publication: format_date(window.publication),
            mean: estimate.mean,
            stddev: estimate.stddev,
            cutoff: estimate.cutoff,
            rounds_counted: estimate.kept.len(),
            bonus_rounds: estimate.bonus_rounds,
            dropped: lines(&reconciliation.outgoing),
            added: lines(&reconciliation.incoming),
            outliers: lines(&estimate.outliers),
        }
    }

    /// Plain-text report; `color` paints the rating change
    pub fn render_text(&self, color: bool) -> String {
        let mut out = String::new();
        let change = format!("{:+}", self.rating_change);
        let change = match (color, self.rating_change.signum()) {
            (true, 1) => change.green().to_string(),
            (true, -1) => change.red().to_string(),
            _ => change,
        };

        let _ = writeln!(out, "New rating: {} ({})", self.new_rating, change);
        let _ = writeln!(
            out,
            "Current rating: {}, next update: deadline {}, published {}",
            self.current_rating, self.next_update, self.publication
        );
        let _ = writeln!(
            out,
            "Counted {} rounds ({} bonus), mean {:.2}, stddev {:.2}",
            self.rounds_counted, self.bonus_rounds, self.mean, self.stddev
        );

        write_section(&mut out, "Rounds you are dropping:", &self.dropped, "No rounds dropped");
        write_section(&mut out, "Rounds you are adding:", &self.added, "No rounds added");

        let _ = writeln!(out, "\nOutlier cutoff: {}", self.cutoff);
        write_section(&mut out, "Outlier rounds:", &self.outliers, "No outlier rounds");
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn lines(rounds: &[RoundRecord]) -> Vec<RoundLine> {
    rounds.iter().map(RoundLine::from).collect()
}

fn write_section(out: &mut String, title: &str, rounds: &[RoundLine], empty: &str) {
    let _ = writeln!(out, "\n{title}\n");
    if rounds.is_empty() {
        let _ = writeln!(out, "{empty}");
    }
    for round in rounds {
        let rating = round
            .rating
            .map_or_else(|| "-".to_string(), |rating| rating.to_string());
        let _ = writeln!(out, "{}, round {}, rating: {}", round.name, round.round_number, rating);
    }
}

/// Same `DD-Mon-YYYY` shape the site uses
fn format_date(timestamp: Timestamp) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|date| date.format("%d-%b-%Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
