//! # Possession
//!
//! Assigns the ball, at every instant it was tracked, to the nearest player
//! tracked at exactly the same instant.
//!
//! Ball and players are cleaned independently, so their timelines do not
//! have to line up: a ball sample without any player sample at its timestamp
//! gets no possessor. Timestamps are matched by exact equality.

mod share;

pub use share::*;

use std::collections::HashMap;

use tracing::debug;
use tracking::{EntitySeries, Observation, SmoothedSample};

/// Ball sample with the player closest to it.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PossessionRecord {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub raw_speed: f64,
    pub adjusted_speed: f64,
    /// `None` when no player was tracked at this instant
    pub possessor: Option<String>,
}

impl From<(&SmoothedSample, Option<String>)> for PossessionRecord {
    fn from((ball, possessor): (&SmoothedSample, Option<String>)) -> Self {
        Self {
            time: ball.time,
            x: ball.x,
            y: ball.y,
            raw_speed: ball.raw_speed,
            adjusted_speed: ball.adjusted_speed,
            possessor,
        }
    }
}

/// Hash key for exact time matching, `-0.0` and `0.0` are the same instant.
#[inline]
fn instant(time: f64) -> u64 {
    (time + 0.0).to_bits()
}

/// Player positions grouped by timestamp, players in the order given.
struct Snapshots<'a> {
    by_time: HashMap<u64, Vec<(&'a str, (f64, f64))>>,
}

impl<'a> Snapshots<'a> {
    fn new<O: Observation + 'a>(players: impl IntoIterator<Item = &'a EntitySeries<O>>) -> Self {
        let mut by_time: HashMap<u64, Vec<(&'a str, (f64, f64))>> = HashMap::new();

        for series in players {
            for sample in series {
                by_time
                    .entry(instant(sample.time()))
                    .or_default()
                    .push((series.entity_id.as_str(), sample.position()));
            }
        }

        Self { by_time }
    }

    /// Closest player at `time`, the first one listed wins a tie.
    fn nearest(&self, time: f64, (x, y): (f64, f64)) -> Option<&'a str> {
        let players = self.by_time.get(&instant(time))?;

        let mut best: Option<(&'a str, f64)> = None;
        for &(entity_id, (px, py)) in players {
            let distance = (px - x).hypot(py - y);

            match best {
                Some((_, closest)) if distance >= closest => {}
                _ => best = Some((entity_id, distance)),
            }
        }

        best.map(|(entity_id, _)| entity_id)
    }
}

/// One record per ball sample, in ball order, with the nearest player as
/// possessor.
///
/// # Params
/// - `ball` - cleaned ball series
/// - `players` - cleaned player series, their order decides ties
pub fn assign_possession<'a>(
    ball: &EntitySeries<SmoothedSample>,
    players: impl IntoIterator<Item = &'a EntitySeries<SmoothedSample>>,
) -> Vec<PossessionRecord> {
    let snapshots = Snapshots::new(players);

    let records = ball
        .iter()
        .map(|sample| {
            let possessor = snapshots
                .nearest(sample.time, sample.position())
                .map(str::to_owned);

            PossessionRecord::from((sample, possessor))
        })
        .collect::<Vec<_>>();

    debug!(
        ball_samples = records.len(),
        unassigned = records.iter().filter(|this| this.possessor.is_none()).count(),
        "assigned possession"
    );

    records
}
