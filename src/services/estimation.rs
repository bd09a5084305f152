use log::info;

use crate::api::Acquisition;
use crate::config::AppConfig;
use crate::domain::{PdgaNumber, Rating, RoundRecord, RoundSource, Timestamp};
use crate::errors::EstimateError;
use crate::rating::reconcile::{self, Reconciliation};
use crate::rating::{Estimator, EvaluationWindow};
use crate::report::Report;

/// What the caller wants estimated
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub pdga_number: PdgaNumber,
    /// Hypothetical round ratings, most recent first
    pub what_if: Vec<Rating>,
    pub now: Timestamp,
}

/// Runs one estimate end to end. Fetches are sequential and any failure aborts the run.
pub struct EstimationService<A> {
    source: A,
    config: AppConfig,
}

impl<A: Acquisition> EstimationService<A> {
    pub fn new(source: A, config: AppConfig) -> Self {
        Self { source, config }
    }

    pub async fn run(&mut self, request: &EstimateRequest) -> Result<Report, EstimateError> {
        info!("=== Estimating rating for PDGA #{} ===", request.pdga_number);
        let pdga_number = request.pdga_number;

        let current_rating = self.source.fetch_current_rating(pdga_number).await?;
        let schedule = self.source.fetch_rating_schedule().await?;
        let window = EvaluationWindow::resolve(request.now, &schedule, self.config.rating.window_secs)?;

        let history = self.source.fetch_player_history(pdga_number).await?;
        info!("  → {} rounds on the ratings detail page", history.len());

        let mut added = self.collect_unpublished_rounds(pdga_number, &history, &window).await?;

        let what_if = reconcile::what_if_rounds(&request.what_if, request.now);
        if !what_if.is_empty() {
            info!("  → {} what-if rounds", what_if.len());
        }
        added.extend(what_if);

        let reconciliation = Reconciliation::assemble(&history, added, &window);
        let estimate = Estimator::new(&self.config.rating).estimate(&reconciliation.used, current_rating)?;
        info!(
            "  → New rating {} ({:+})",
            estimate.pdga_rating, estimate.rating_change
        );

        Ok(Report::build(pdga_number, &window, &reconciliation, &estimate))
    }

    /// Rounds from events the history page does not list yet, then from live events
    async fn collect_unpublished_rounds(
        &mut self,
        pdga_number: PdgaNumber,
        history: &[RoundRecord],
        window: &EvaluationWindow,
    ) -> Result<Vec<RoundRecord>, EstimateError> {
        let events = self.source.fetch_player_recent_events(pdga_number).await?;
        let new_events = reconcile::select_new_events(history, &events.participation);
        info!("  → {} events not yet in history", new_events.len());

        let mut rounds = Vec::new();
        for event in &new_events {
            let breakdown = self
                .source
                .fetch_event_round_breakdown(&event.event_id, pdga_number)
                .await?;
            rounds.extend(reconcile::expand_event(event, &breakdown, RoundSource::NewEvent, window));
        }

        let live_events = reconcile::select_live_events(history, &new_events, events.live_events());
        info!("  → {} in-progress or just-finished events", live_events.len());

        for event in live_events {
            let breakdown = self
                .source
                .fetch_event_round_breakdown(&event.event_id, pdga_number)
                .await?;
            rounds.extend(reconcile::expand_live_event(event, &breakdown, window));
        }

        Ok(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventSummary, LiveEvent, PlayerEvents, RoundBreakdown, ScheduleEntry};
    use crate::errors::AcquisitionError;
    use std::collections::HashMap;

    const DAY: i64 = 86_400;
    const NOW: i64 = 20_000 * DAY;
    const DEADLINE: i64 = NOW + 10 * DAY;

    /// In-memory stand-in for the site
    #[derive(Default)]
    struct FakeSite {
        current_rating: Rating,
        schedule: Vec<ScheduleEntry>,
        history: Vec<RoundRecord>,
        events: PlayerEvents,
        breakdowns: HashMap<String, RoundBreakdown>,
        breakdown_requests: Vec<String>,
    }

    impl Acquisition for FakeSite {
        async fn fetch_current_rating(&mut self, _: PdgaNumber) -> Result<Rating, AcquisitionError> {
            Ok(self.current_rating)
        }

        async fn fetch_rating_schedule(&mut self) -> Result<Vec<ScheduleEntry>, AcquisitionError> {
            Ok(self.schedule.clone())
        }

        async fn fetch_player_history(&mut self, _: PdgaNumber) -> Result<Vec<RoundRecord>, AcquisitionError> {
            Ok(self.history.clone())
        }

        async fn fetch_player_recent_events(&mut self, _: PdgaNumber) -> Result<PlayerEvents, AcquisitionError> {
            Ok(self.events.clone())
        }

        async fn fetch_event_round_breakdown(
            &mut self,
            event_id: &str,
            _: PdgaNumber,
        ) -> Result<RoundBreakdown, AcquisitionError> {
            self.breakdown_requests.push(event_id.to_string());
            self.breakdowns.get(event_id).cloned().ok_or(AcquisitionError::Status {
                url: event_id.to_string(),
                status: 404,
            })
        }
    }

    fn site() -> FakeSite {
        FakeSite {
            current_rating: 950,
            schedule: vec![
                ScheduleEntry { deadline: NOW - 20 * DAY, publication: NOW - 13 * DAY },
                ScheduleEntry { deadline: DEADLINE, publication: DEADLINE + 7 * DAY },
            ],
            ..FakeSite::default()
        }
    }

    fn history_round(event: &str, round_number: u32, rating: Rating, days_ago: i64) -> RoundRecord {
        RoundRecord {
            name: event.to_string(),
            event_id: format!("/tour/event/{event}"),
            rating: Some(rating),
            timestamp: NOW - days_ago * DAY,
            round_number,
            evaluated: true,
            source: RoundSource::History,
            tier: None,
            division: None,
            score: None,
        }
    }

    fn summary(event: &str, days_ago: i64) -> EventSummary {
        EventSummary {
            event_id: format!("/tour/event/{event}"),
            name: event.to_string(),
            timestamp: NOW - days_ago * DAY,
            tier: None,
            place: None,
        }
    }

    fn live(event: &str) -> LiveEvent {
        LiveEvent {
            event_id: format!("/tour/event/{event}"),
            name: event.to_string(),
        }
    }

    fn breakdown(ratings: &[Rating], timestamp: Timestamp, is_league: bool) -> RoundBreakdown {
        RoundBreakdown { ratings: ratings.to_vec(), timestamp, is_league }
    }

    fn request(what_if: &[Rating]) -> EstimateRequest {
        EstimateRequest {
            pdga_number: 123456,
            what_if: what_if.to_vec(),
            now: NOW,
        }
    }

    async fn run(site: FakeSite, what_if: &[Rating]) -> (Result<Report, EstimateError>, FakeSite) {
        let mut service = EstimationService::new(site, AppConfig::new());
        let result = service.run(&request(what_if)).await;
        (result, service.source)
    }

    #[tokio::test]
    async fn test_what_if_rounds_on_top_of_history() {
        let mut site = site();
        site.history = vec![history_round("base", 1, 960, 30)];

        let (report, _) = run(site, &[970, 965]).await;
        let report = report.unwrap();

        let added: Vec<(u32, Option<Rating>)> =
            report.added.iter().map(|r| (r.round_number, r.rating)).collect();
        assert_eq!(added, vec![(1, Some(970)), (2, Some(965))]);
        assert_eq!(report.rounds_counted, 3);
        // (970 + 965 + 960) / 3 = 965
        assert_eq!(report.new_rating, 965);
        assert_eq!(report.rating_change, 15);
    }

    #[tokio::test]
    async fn test_event_in_history_and_participation_counts_once() {
        let mut site = site();
        site.history = vec![
            history_round("spring", 1, 940, 40),
            history_round("spring", 2, 960, 40),
        ];
        site.events.participation = vec![summary("spring", 40), summary("summer", 5)];
        site.breakdowns.insert("/tour/event/summer".to_string(), breakdown(&[950, 970], NOW - 5 * DAY, false));

        let (report, site) = run(site, &[]).await;
        let report = report.unwrap();

        assert_eq!(site.breakdown_requests, vec!["/tour/event/summer"]);
        assert_eq!(report.rounds_counted, 4);
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.new_rating, 955);
    }

    #[tokio::test]
    async fn test_open_league_contributes_nothing() {
        let mut site = site();
        site.history = vec![history_round("base", 1, 900, 30)];
        site.events.currently_playing = vec![live("league")];
        site.breakdowns.insert("/tour/event/league".to_string(), breakdown(&[1000, 1000], DEADLINE, true));

        let (report, _) = run(site, &[]).await;
        let report = report.unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.new_rating, 900);
    }

    #[tokio::test]
    async fn test_live_event_already_listed_is_not_fetched_twice() {
        let mut site = site();
        site.history = vec![history_round("base", 1, 900, 30)];
        site.events.participation = vec![summary("finals", 1)];
        site.events.just_concluded = vec![live("finals"), live("doubles")];
        site.breakdowns.insert("/tour/event/finals".to_string(), breakdown(&[920], NOW - DAY, false));
        site.breakdowns.insert("/tour/event/doubles".to_string(), breakdown(&[910], NOW, false));

        let (report, site) = run(site, &[]).await;
        let report = report.unwrap();

        assert_eq!(site.breakdown_requests, vec!["/tour/event/finals", "/tour/event/doubles"]);
        let added: Vec<(&str, RoundSource)> =
            report.added.iter().map(|r| (r.name.as_str(), r.source)).collect();
        assert_eq!(added, vec![("finals", RoundSource::NewEvent), ("doubles", RoundSource::InProgress)]);
    }

    #[tokio::test]
    async fn test_rounds_leaving_the_window_are_dropped() {
        let mut site = site();
        site.history = vec![
            history_round("recent", 1, 950, 30),
            history_round("ancient", 1, 800, 400),
        ];

        let (report, _) = run(site, &[]).await;
        let report = report.unwrap();

        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].name, "ancient");
        assert_eq!(report.new_rating, 950);
    }

    #[tokio::test]
    async fn test_no_rounds_is_insufficient_data() {
        let (result, _) = run(site(), &[]).await;

        assert!(matches!(result, Err(EstimateError::InsufficientData)));
    }

    #[tokio::test]
    async fn test_no_future_deadline() {
        let mut site = site();
        site.schedule.truncate(1);

        let (result, _) = run(site, &[950]).await;

        assert!(matches!(result, Err(EstimateError::ScheduleExhausted { now: NOW })));
    }

    #[tokio::test]
    async fn test_failed_fetch_aborts_run() {
        let mut site = site();
        site.events.participation = vec![summary("missing", 3)];

        let (result, _) = run(site, &[950]).await;

        assert!(matches!(
            result,
            Err(EstimateError::Acquisition(AcquisitionError::Status { status: 404, .. }))
        ));
    }
}
