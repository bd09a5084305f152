use log::info;
use scraper::Html;

use super::Acquisition;
use super::parsers;
use crate::config::ScraperSettings;
use crate::domain::{PdgaNumber, PlayerEvents, Rating, RoundBreakdown, RoundRecord, ScheduleEntry};
use crate::errors::AcquisitionError;
use crate::http::RateLimitedClient;

const SCHEDULE_PATH: &str = "/faq/ratings/when-updated";

/// Scrapes player, event and schedule pages from the PDGA site
pub struct PdgaClient {
    client: RateLimitedClient,
    base_url: String,
    /// The profile page serves both the rating badge and the event lists
    profile: Option<(PdgaNumber, String)>,
}

impl PdgaClient {
    pub fn new(settings: &ScraperSettings) -> Result<Self, AcquisitionError> {
        Ok(Self {
            client: RateLimitedClient::new(settings)?,
            base_url: settings.base_url.clone(),
            profile: None,
        })
    }

    async fn fetch_page(&mut self, url: &str) -> Result<Html, AcquisitionError> {
        info!("Fetching {}", url);
        let body = self.client.get_text(url).await?;
        Ok(Html::parse_document(&body))
    }

    async fn profile_page(&mut self, pdga_number: PdgaNumber) -> Result<Html, AcquisitionError> {
        if let Some((cached_for, body)) = &self.profile {
            if *cached_for == pdga_number {
                return Ok(Html::parse_document(body));
            }
        }

        let url = self.build_profile_url(pdga_number);
        info!("Fetching {}", url);
        let body = self.client.get_text(&url).await?;
        let html = Html::parse_document(&body);
        self.profile = Some((pdga_number, body));
        Ok(html)
    }

    // --- URL Building ---

    fn build_profile_url(&self, pdga_number: PdgaNumber) -> String {
        format!("{}/player/{}", self.base_url, pdga_number)
    }

    fn build_details_url(&self, pdga_number: PdgaNumber) -> String {
        format!("{}/player/{}/details", self.base_url, pdga_number)
    }

    fn build_schedule_url(&self) -> String {
        format!("{}{}", self.base_url, SCHEDULE_PATH)
    }

    fn build_event_url(&self, event_id: &str) -> String {
        format!("{}{}", self.base_url, event_id)
    }
}

impl Acquisition for PdgaClient {
    async fn fetch_current_rating(&mut self, pdga_number: PdgaNumber) -> Result<Rating, AcquisitionError> {
        let html = self.profile_page(pdga_number).await?;
        Ok(parsers::parse_current_rating(&html)?)
    }

    async fn fetch_rating_schedule(&mut self) -> Result<Vec<ScheduleEntry>, AcquisitionError> {
        let url = self.build_schedule_url();
        let html = self.fetch_page(&url).await?;
        parsers::parse_schedule(&html)
    }

    async fn fetch_player_history(
        &mut self,
        pdga_number: PdgaNumber,
    ) -> Result<Vec<RoundRecord>, AcquisitionError> {
        let url = self.build_details_url(pdga_number);
        let html = self.fetch_page(&url).await?;
        parsers::parse_history(&html)
    }

    async fn fetch_player_recent_events(
        &mut self,
        pdga_number: PdgaNumber,
    ) -> Result<PlayerEvents, AcquisitionError> {
        let html = self.profile_page(pdga_number).await?;
        parsers::parse_player_events(&html)
    }

    async fn fetch_event_round_breakdown(
        &mut self,
        event_id: &str,
        pdga_number: PdgaNumber,
    ) -> Result<RoundBreakdown, AcquisitionError> {
        let url = self.build_event_url(event_id);
        let html = self.fetch_page(&url).await?;
        parsers::parse_round_breakdown(&html, pdga_number)
    }
}
