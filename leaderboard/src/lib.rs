//! # Leaderboard
//!
//! Ranks players by metrics derived from their cleaned speed series:
//!
//! - total distance covered;
//! - distance covered in speed zone 5 (high intensity running, `5.5-6.972` m/s);
//! - top speed.
//!
//! Distance is estimated as `adjusted_speed * dt` per sample, where `dt` is the
//! nominal sampling interval of the tracker (10 Hz) and not the real gap
//! between samples, since cleaning leaves holes in the series.

use std::collections::HashMap;

use tracing::debug;
use tracking::{EntitySeries, Error, Result, SmoothedSample, SpeedBand, ensure_positive};

pub const DEFAULT_TOP_K: usize = 10;
/// Seconds between two samples of a 10 Hz tracker.
pub const SAMPLE_INTERVAL: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    TotalDistance,
    Zone5Distance,
    TopSpeed,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::TotalDistance, Self::Zone5Distance, Self::TopSpeed];

    pub const fn title(self) -> &'static str {
        match self {
            Metric::TotalDistance => "Total Distance Covered",
            Metric::Zone5Distance => "Speed Zone 5 Distance Covered",
            Metric::TopSpeed => "Top Speed",
        }
    }

    fn label(self, value: f64) -> String {
        match self {
            Metric::TotalDistance | Metric::Zone5Distance => format!("Dist={value:.2} m"),
            Metric::TopSpeed => format!("Speed={value:.2} m/s"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RankingOptions {
    /// Rows to return; more than the number of players returns all of them
    pub top_k: usize,
    /// Nominal seconds between samples used for the distance estimate
    pub sample_interval: f64,
    pub zone5: SpeedBand,
}

impl RankingOptions {
    pub const fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            sample_interval: SAMPLE_INTERVAL,
            zone5: SpeedBand::ZONE_5,
        }
    }

    pub const fn set_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub const fn set_sample_interval(mut self, sample_interval: f64) -> Self {
        self.sample_interval = sample_interval;
        self
    }

    pub const fn set_zone5(mut self, zone5: SpeedBand) -> Self {
        self.zone5 = zone5;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_top_k(self.top_k)?;
        ensure_positive("sample_interval", self.sample_interval)?;
        self.zone5.validate()
    }
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingRow {
    pub entity_id: String,
    pub metric_value: f64,
    pub formatted_label: String,
}

/// Running totals of one player, `None` until a qualifying sample is seen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    distance: Option<f64>,
    zone5_distance: Option<f64>,
    top_speed: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, sample: &SmoothedSample, options: &RankingOptions) {
        let speed = sample.adjusted_speed;
        let step = speed * options.sample_interval;

        self.distance = Some(self.distance.unwrap_or_default() + step);

        if options.zone5.contains(speed) {
            self.zone5_distance = Some(self.zone5_distance.unwrap_or_default() + step);
        }

        self.top_speed = Some(match self.top_speed {
            Some(top) => top.max(speed),
            None => speed,
        });
    }

    const fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TotalDistance => self.distance,
            Metric::Zone5Distance => self.zone5_distance,
            Metric::TopSpeed => self.top_speed,
        }
    }
}

/// Per player totals for every [`Metric`], built in a single pass.
///
/// Rankings can then be requested for any metric and `top_k` without
/// touching the samples again.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    entries: Vec<(String, Accumulator)>,
}

impl Leaderboard {
    pub fn new<'a>(
        players: impl IntoIterator<Item = &'a EntitySeries<SmoothedSample>>,
        options: &RankingOptions,
    ) -> Result<Self> {
        options.validate()?;

        let mut entries: Vec<(String, Accumulator)> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        for series in players {
            let slot = *index.entry(series.entity_id.as_str()).or_insert_with(|| {
                entries.push((series.entity_id.clone(), Accumulator::default()));
                entries.len() - 1
            });

            let (_, accumulator) = &mut entries[slot];
            for sample in series {
                accumulator.push(sample, options);
            }
        }

        debug!(players = entries.len(), "accumulated leaderboard");

        Ok(Self { entries })
    }

    /// Players sorted by `metric`, highest first, at most `top_k` rows.
    ///
    /// Players without a qualifying sample are left out. Equal values keep
    /// the order in which players were first seen.
    pub fn ranking(&self, metric: Metric, top_k: usize) -> Result<Vec<RankingRow>> {
        validate_top_k(top_k)?;

        let mut rows = self
            .entries
            .iter()
            .filter_map(|(entity_id, accumulator)| {
                accumulator.value(metric).map(|value| (entity_id, value))
            })
            .collect::<Vec<_>>();

        rows.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        Ok(rows
            .into_iter()
            .take(top_k)
            .map(|(entity_id, metric_value)| RankingRow {
                entity_id: entity_id.clone(),
                metric_value,
                formatted_label: metric.label(metric_value),
            })
            .collect())
    }
}

fn validate_top_k(top_k: usize) -> Result<()> {
    if top_k == 0 {
        return Err(Error::invalid("top_k", "must be at least 1"));
    }

    Ok(())
}

fn rank<'a>(
    players: impl IntoIterator<Item = &'a EntitySeries<SmoothedSample>>,
    metric: Metric,
    options: &RankingOptions,
) -> Result<Vec<RankingRow>> {
    Leaderboard::new(players, options)?.ranking(metric, options.top_k)
}

/// Ranking by estimated total distance in meters.
pub fn rank_distance_covered<'a>(
    players: impl IntoIterator<Item = &'a EntitySeries<SmoothedSample>>,
    options: &RankingOptions,
) -> Result<Vec<RankingRow>> {
    rank(players, Metric::TotalDistance, options)
}

/// Ranking by estimated distance in meters covered inside the zone 5 band.
pub fn rank_z5_distance_covered<'a>(
    players: impl IntoIterator<Item = &'a EntitySeries<SmoothedSample>>,
    options: &RankingOptions,
) -> Result<Vec<RankingRow>> {
    rank(players, Metric::Zone5Distance, options)
}

/// Ranking by highest adjusted speed in m/s.
pub fn rank_top_speed<'a>(
    players: impl IntoIterator<Item = &'a EntitySeries<SmoothedSample>>,
    options: &RankingOptions,
) -> Result<Vec<RankingRow>> {
    rank(players, Metric::TopSpeed, options)
}
