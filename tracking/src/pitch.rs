//! Pitch geometry.
//!
//! Tracking coordinates are in meters with the origin on the centre spot,
//! `x` running along the length of the pitch and `y` across it.

use crate::error::{Error, Result, ensure_finite};

/// Half of a 105m pitch.
pub const HALF_LENGTH: f64 = 52.5;
/// Half of a 68m pitch.
pub const HALF_WIDTH: f64 = 34.0;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PitchBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PitchBounds {
    pub const fn new() -> Self {
        Self {
            x_min: -HALF_LENGTH,
            x_max: HALF_LENGTH,
            y_min: -HALF_WIDTH,
            y_max: HALF_WIDTH,
        }
    }

    pub const fn set_x(mut self, x_min: f64, x_max: f64) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self
    }

    pub const fn set_y(mut self, y_min: f64, y_max: f64) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("pitch.x_min", self.x_min)?;
        ensure_finite("pitch.x_max", self.x_max)?;
        ensure_finite("pitch.y_min", self.y_min)?;
        ensure_finite("pitch.y_max", self.y_max)?;

        if self.x_min >= self.x_max {
            return Err(Error::invalid(
                "pitch.x_min",
                format!("{} is not below x_max {}", self.x_min, self.x_max),
            ));
        }

        if self.y_min >= self.y_max {
            return Err(Error::invalid(
                "pitch.y_min",
                format!("{} is not below y_max {}", self.y_min, self.y_max),
            ));
        }

        Ok(())
    }

    /// Strict containment: a point on a touchline or goal line is outside.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min < x && x < self.x_max && self.y_min < y && y < self.y_max
    }

    pub fn length(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn width(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Moves a point into the non-negative frame with the origin on the
    /// bottom-left corner flag.
    #[inline]
    pub fn to_corner_frame(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.x_min, y - self.y_min)
    }
}

impl Default for PitchBounds {
    fn default() -> Self {
        Self::new()
    }
}

/// Open speed interval in m/s, `lower < speed < upper`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SpeedBand {
    pub lower: f64,
    pub upper: f64,
}

impl SpeedBand {
    /// High-intensity running band.
    pub const ZONE_5: Self = Self::new(5.5, 6.972);

    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("speed_band.lower", self.lower)?;
        ensure_finite("speed_band.upper", self.upper)?;

        if self.lower >= self.upper {
            return Err(Error::invalid(
                "speed_band.lower",
                format!("{} is not below upper bound {}", self.lower, self.upper),
            ));
        }

        Ok(())
    }

    #[inline]
    pub fn contains(&self, speed: f64) -> bool {
        self.lower < speed && speed < self.upper
    }
}

impl Default for SpeedBand {
    fn default() -> Self {
        Self::ZONE_5
    }
}
