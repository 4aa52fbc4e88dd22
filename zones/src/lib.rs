//! # Zones
//!
//! Where on the pitch an entity spends its time. The pitch is split along its
//! length into three equal thirds (left, middle, right) and the share of an
//! entity's samples in each third is reported in percent.

mod grid;

pub use grid::*;

use tracking::{Observation, PitchBounds, Result};

/// Percentages of samples in each longitudinal third.
///
/// All three are NaN when there was nothing to count.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDistribution {
    pub left: f64,
    pub middle: f64,
    pub right: f64,
}

impl ZoneDistribution {
    pub fn is_defined(&self) -> bool {
        !(self.left.is_nan() || self.middle.is_nan() || self.right.is_nan())
    }

    pub const fn as_array(&self) -> [f64; 3] {
        [self.left, self.middle, self.right]
    }

    /// Whole percent labels, e.g. `["25%", "50%", "25%"]`.
    pub fn labels(&self) -> [String; 3] {
        self.as_array().map(|share| format!("{share:.0}%"))
    }
}

impl From<&LocationGrid> for ZoneDistribution {
    fn from(grid: &LocationGrid) -> Self {
        let total = grid.total() as f64;
        let columns = grid.columns();
        let share = |i: usize| {
            let count = columns.get(i).copied().unwrap_or_default() as f64;
            // 0 / 0 stays NaN on purpose
            count / total * 100.0
        };

        Self {
            left: share(0),
            middle: share(1),
            right: share(2),
        }
    }
}

/// Share of `samples` in the left, middle and right third of the pitch.
pub fn zone_distribution<O: Observation>(
    samples: impl IntoIterator<Item = O>,
    pitch: &PitchBounds,
) -> Result<ZoneDistribution> {
    let grid = location_grid(samples, pitch, 3, 1)?;

    Ok(ZoneDistribution::from(&grid))
}
