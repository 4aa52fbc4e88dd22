//! # Preprocessing
//!
//! Turns raw tracking series into cleaned ones:
//!
//! 1. [`smooth_series`] replaces the jittery tracker speed with a centred
//!    moving average over a time window;
//! 2. [`remove_stationary`] drops samples of entities standing still;
//! 3. [`remove_off_pitch`] drops samples outside the pitch rectangle.
//!
//! The ball and the players go through the same steps with the same options.

mod filtering;
mod smoothing;

pub use filtering::*;
pub use smoothing::*;

use rayon::prelude::*;
use tracing::{debug, info};
use tracking::{Dataset, EntitySeries, PitchBounds, Result, Sample, SmoothedSample, ensure_finite};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CleaningOptions {
    pub smoothing: SmoothingOptions,
    /// Adjusted speed in m/s a sample needs to be kept
    pub min_speed: f64,
    pub pitch: PitchBounds,
}

impl CleaningOptions {
    pub const fn new() -> Self {
        Self {
            smoothing: SmoothingOptions::new(),
            min_speed: MIN_SPEED,
            pitch: PitchBounds::new(),
        }
    }

    pub const fn set_smoothing(mut self, smoothing: SmoothingOptions) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub const fn set_min_speed(mut self, min_speed: f64) -> Self {
        self.min_speed = min_speed;
        self
    }

    pub const fn set_pitch(mut self, pitch: PitchBounds) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.smoothing.validate()?;
        ensure_finite("min_speed", self.min_speed)?;
        self.pitch.validate()
    }
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Cleaned counterpart of [`Dataset`], players in the same order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CleanedDataset {
    pub ball: EntitySeries<SmoothedSample>,
    pub players: Vec<EntitySeries<SmoothedSample>>,
}

impl CleanedDataset {
    pub fn player(&self, entity_id: &str) -> Option<&EntitySeries<SmoothedSample>> {
        self.players
            .iter()
            .find(|series| series.entity_id == entity_id)
    }
}

/// Smooths one series, then applies both filters.
pub fn clean_series(
    series: &EntitySeries<Sample>,
    options: &CleaningOptions,
) -> Result<EntitySeries<SmoothedSample>> {
    let EntitySeries { entity_id, samples } = smooth_series(series, &options.smoothing)?;

    let samples = remove_stationary(samples, options.min_speed)?;
    let samples = remove_off_pitch(samples, &options.pitch)?;

    debug!(
        entity = %entity_id,
        before = series.len(),
        after = samples.len(),
        "cleaned series"
    );

    Ok(EntitySeries::new(entity_id, samples))
}

/// Cleans the ball and every player.
///
/// Players are processed in parallel, the first failing entity aborts the
/// whole run.
pub fn clean_dataset(dataset: &Dataset, options: &CleaningOptions) -> Result<CleanedDataset> {
    options.validate()?;

    let ball = clean_series(&dataset.ball, options)?;
    let players = dataset
        .players
        .par_iter()
        .map(|series| clean_series(series, options))
        .collect::<Result<Vec<_>>>()?;

    info!(
        players = players.len(),
        ball_samples = ball.len(),
        player_samples = players.iter().map(EntitySeries::len).sum::<usize>(),
        "cleaned dataset"
    );

    Ok(CleanedDataset { ball, players })
}
