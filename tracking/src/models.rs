use crate::error::{Error, Result};

/// Identifier the tracker uses for ball rows.
pub const BALL_ID: &str = "ball";

/// One line of the tracking export, before it is split by entity.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub entity_id: String,
    /// Seconds since the start of the session
    pub time: f64,
    pub x: f64,
    pub y: f64,
    /// Instantaneous speed in m/s as reported by the tracker
    pub raw_speed: f64,
}

impl Row {
    pub(crate) fn validate(&self, row: usize) -> Result<()> {
        if self.entity_id.trim().is_empty() {
            return Err(Error::EmptyEntityId { row });
        }

        let fields = [
            ("time", self.time),
            ("x", self.x),
            ("y", self.y),
            ("speed", self.raw_speed),
        ];

        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(Error::MalformedRow { row, field }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub raw_speed: f64,
}

impl From<&Row> for Sample {
    fn from(row: &Row) -> Self {
        Self {
            time: row.time,
            x: row.x,
            y: row.y,
            raw_speed: row.raw_speed,
        }
    }
}

/// [`Sample`] with the windowed speed attached.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothedSample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub raw_speed: f64,
    pub adjusted_speed: f64,
}

impl From<(Sample, f64)> for SmoothedSample {
    fn from(
        (
            Sample {
                time,
                x,
                y,
                raw_speed,
            },
            adjusted_speed,
        ): (Sample, f64),
    ) -> Self {
        Self {
            time,
            x,
            y,
            raw_speed,
            adjusted_speed,
        }
    }
}

/// Anything with a timestamp and a position on the pitch.
pub trait Observation {
    fn time(&self) -> f64;
    fn position(&self) -> (f64, f64);
}

impl Observation for Sample {
    fn time(&self) -> f64 {
        self.time
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Observation for SmoothedSample {
    fn time(&self) -> f64 {
        self.time
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl<T: Observation> Observation for &T {
    fn time(&self) -> f64 {
        (*self).time()
    }

    fn position(&self) -> (f64, f64) {
        (*self).position()
    }
}

/// Time ordered samples of a single player or the ball.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySeries<S = Sample> {
    pub entity_id: String,
    pub samples: Vec<S>,
}

impl<S> EntitySeries<S> {
    pub fn new(entity_id: impl Into<String>, samples: Vec<S>) -> Self {
        Self {
            entity_id: entity_id.into(),
            samples,
        }
    }

    pub fn empty(entity_id: impl Into<String>) -> Self {
        Self::new(entity_id, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.samples.iter()
    }

    /// Keeps the samples matching `keep`, relative order untouched.
    pub fn filter(mut self, keep: impl FnMut(&S) -> bool) -> Self {
        self.samples.retain(keep);
        self
    }
}

impl<S: Observation> EntitySeries<S> {
    /// Checks that timestamps strictly increase.
    pub fn check_order(&self) -> Result<()> {
        for (index, pair) in self.samples.windows(2).enumerate() {
            let (previous, current) = (pair[0].time(), pair[1].time());

            if current == previous {
                return Err(Error::DuplicateTimestamp {
                    entity_id: self.entity_id.clone(),
                    time: current,
                });
            }

            if current < previous {
                return Err(Error::UnsortedSeries {
                    entity_id: self.entity_id.clone(),
                    index: index + 1,
                });
            }
        }

        Ok(())
    }
}

impl<'a, S> IntoIterator for &'a EntitySeries<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64) -> Sample {
        Sample {
            time,
            x: 0.0,
            y: 0.0,
            raw_speed: 1.0,
        }
    }

    #[test]
    fn row_with_nan_is_malformed() {
        let row = Row {
            entity_id: "7".into(),
            time: 1.0,
            x: f64::NAN,
            y: 0.0,
            raw_speed: 2.0,
        };

        assert_eq!(Err(Error::MalformedRow { row: 4, field: "x" }), row.validate(4));
    }

    #[test]
    fn blank_identifier_is_rejected() {
        let row = Row {
            entity_id: "  ".into(),
            time: 1.0,
            x: 0.0,
            y: 0.0,
            raw_speed: 2.0,
        };

        assert_eq!(Err(Error::EmptyEntityId { row: 0 }), row.validate(0));
    }

    #[test]
    fn order_check() {
        let sorted = EntitySeries::new("1", vec![sample(0.0), sample(0.1), sample(0.2)]);
        assert!(sorted.check_order().is_ok());

        let duplicated = EntitySeries::new("1", vec![sample(0.0), sample(0.1), sample(0.1)]);
        assert!(matches!(
            duplicated.check_order(),
            Err(Error::DuplicateTimestamp { .. })
        ));

        let unsorted = EntitySeries::new("1", vec![sample(0.0), sample(0.2), sample(0.1)]);
        assert_eq!(
            Err(Error::UnsortedSeries {
                entity_id: "1".into(),
                index: 2
            }),
            unsorted.check_order()
        );
    }

    #[test]
    fn filter_keeps_order() {
        let series = EntitySeries::new(
            "1",
            vec![sample(0.0), sample(0.1), sample(0.2), sample(0.3)],
        )
        .filter(|this| this.time != 0.1);

        let times = series.iter().map(|this| this.time).collect::<Vec<_>>();
        assert_eq!(vec![0.0, 0.2, 0.3], times);
    }

    #[test]
    fn smoothed_from_sample() {
        let smoothed = SmoothedSample::from((sample(0.5), 3.0));

        assert_eq!(0.5, smoothed.time);
        assert_eq!(1.0, smoothed.raw_speed);
        assert_eq!(3.0, smoothed.adjusted_speed);
    }
}
