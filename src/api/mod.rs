pub mod parsers;
pub mod pdga_client;

pub use pdga_client::PdgaClient;

use crate::domain::{PdgaNumber, PlayerEvents, Rating, RoundBreakdown, RoundRecord, ScheduleEntry};
use crate::errors::AcquisitionError;

/// Source of everything the estimator needs to know about a player.
///
/// Calls are awaited one at a time; implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Acquisition {
    async fn fetch_current_rating(&mut self, pdga_number: PdgaNumber) -> Result<Rating, AcquisitionError>;

    /// Deadline/publication pairs, ascending by deadline
    async fn fetch_rating_schedule(&mut self) -> Result<Vec<ScheduleEntry>, AcquisitionError>;

    /// Every round on the player's ratings detail page
    async fn fetch_player_history(
        &mut self,
        pdga_number: PdgaNumber,
    ) -> Result<Vec<RoundRecord>, AcquisitionError>;

    async fn fetch_player_recent_events(
        &mut self,
        pdga_number: PdgaNumber,
    ) -> Result<PlayerEvents, AcquisitionError>;

    async fn fetch_event_round_breakdown(
        &mut self,
        event_id: &str,
        pdga_number: PdgaNumber,
    ) -> Result<RoundBreakdown, AcquisitionError>;
}
