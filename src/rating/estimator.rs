use log::{debug, info};
use ndarray::Array1;
use serde::Serialize;

use crate::config::settings::RatingSettings;
use crate::domain::{Rating, RoundRecord};
use crate::errors::EstimateError;

/// Outcome of one rating calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub pdga_rating: Rating,
    pub current_rating: Rating,
    pub rating_change: Rating,
    pub mean: f64,
    pub stddev: f64,
    pub cutoff: Rating,
    /// Ratings at or above the cutoff, newest first
    pub kept: Vec<Rating>,
    /// How many of `kept` were counted twice
    pub bonus_rounds: usize,
    pub outliers: Vec<RoundRecord>,
}

/// Weighted-average rating rule with outlier removal and a bonus tail
pub struct Estimator<'a> {
    settings: &'a RatingSettings,
}

impl<'a> Estimator<'a> {
    pub fn new(settings: &'a RatingSettings) -> Self {
        Self { settings }
    }

    /// Estimate the next rating from `used` rounds, ordered newest first.
    /// Rounds without a rating are ignored.
    pub fn estimate(
        &self,
        used: &[RoundRecord],
        current_rating: Rating,
    ) -> Result<Estimate, EstimateError> {
        let rated: Vec<(&RoundRecord, Rating)> = used
            .iter()
            .filter_map(|round| round.rating.map(|rating| (round, rating)))
            .collect();

        let values: Array1<f64> = rated.iter().map(|&(_, rating)| f64::from(rating)).collect();
        let mean = values.mean().ok_or(EstimateError::InsufficientData)?;
        let stddev = values.std(0.0);
        let cutoff = self.cutoff(mean, stddev);
        info!(
            "{} rated rounds: mean {:.2}, stddev {:.2}, cutoff {}",
            rated.len(),
            mean,
            stddev,
            cutoff
        );

        let (kept, dropped): (Vec<_>, Vec<_>) =
            rated.into_iter().partition(|&(_, rating)| rating >= cutoff);
        let kept: Vec<Rating> = kept.into_iter().map(|(_, rating)| rating).collect();
        let outliers: Vec<RoundRecord> = dropped.into_iter().map(|(round, _)| round.clone()).collect();

        let bonus_rounds = self.bonus_rounds(kept.len());
        let pdga_rating = average_with_bonus(&kept, bonus_rounds)?;
        debug!(
            "{} kept, {} outliers, {} bonus rounds",
            kept.len(),
            outliers.len(),
            bonus_rounds
        );

        Ok(Estimate {
            pdga_rating,
            current_rating,
            rating_change: pdga_rating - current_rating,
            mean,
            stddev,
            cutoff,
            kept,
            bonus_rounds,
            outliers,
        })
    }

    fn cutoff(&self, mean: f64, stddev: f64) -> Rating {
        let floor = mean - self.settings.outlier_floor_points;
        let spread = mean - self.settings.outlier_std_devs * stddev;
        round_rating(floor.max(spread))
    }

    /// Leading kept rounds counted a second time
    fn bonus_rounds(&self, kept: usize) -> usize {
        if kept < self.settings.bonus_min_rounds {
            0
        } else {
            kept / self.settings.bonus_divisor
        }
    }
}

/// The bonus tail is the first `bonus_rounds` of `kept` in recency order, not the best-rated ones.
fn average_with_bonus(kept: &[Rating], bonus_rounds: usize) -> Result<Rating, EstimateError> {
    let counted: Array1<f64> = kept
        .iter()
        .chain(&kept[..bonus_rounds])
        .map(|&rating| f64::from(rating))
        .collect();
    counted
        .mean()
        .map(round_rating)
        .ok_or(EstimateError::InsufficientData)
}

/// Round half to even
fn round_rating(value: f64) -> Rating {
    value.round_ties_even() as Rating
}
