use tracking::{EntitySeries, Result, Sample, SmoothedSample, ensure_finite, ensure_positive};

/// Extra seconds added on both sides of the window to absorb timestamp jitter.
pub const WINDOW_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SmoothingOptions {
    /// Full width of the centred window in seconds
    pub window: f64,
    /// Slack added to each half of the window in seconds
    pub tolerance: f64,
}

impl SmoothingOptions {
    pub const fn new() -> Self {
        Self {
            window: 0.3,
            tolerance: WINDOW_TOLERANCE,
        }
    }

    pub const fn set_window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    pub const fn set_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("smoothing.window", self.window)?;
        ensure_finite("smoothing.tolerance", self.tolerance)?;

        if self.tolerance < 0.0 {
            return Err(tracking::Error::invalid(
                "smoothing.tolerance",
                format!("must not be negative, got {}", self.tolerance),
            ));
        }

        Ok(())
    }

    fn half_width(&self) -> f64 {
        self.window / 2.0 + self.tolerance
    }
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Centred moving average of the raw speed of one entity.
///
/// Each sample gets the mean raw speed of every sample of the same series
/// whose time lies in `[t - w/2 - tol, t + w/2 + tol]`. The window is cut at
/// the ends of the series, never padded.
///
/// Both window edges only move forward, so they are found with a binary
/// search over the part of the time axis not yet passed.
pub fn smooth_series(
    series: &EntitySeries<Sample>,
    options: &SmoothingOptions,
) -> Result<EntitySeries<SmoothedSample>> {
    options.validate()?;
    series.check_order()?;

    let half_width = options.half_width();
    let times = series.iter().map(|this| this.time).collect::<Vec<_>>();
    let speeds = series.iter().map(|this| this.raw_speed).collect::<Vec<_>>();

    let mut left = 0;
    let mut right = 0;

    let samples = series
        .iter()
        .map(|sample| {
            let (from, to) = (sample.time - half_width, sample.time + half_width);

            left += times[left..].partition_point(|&time| time < from);
            right += times[right..].partition_point(|&time| time <= to);

            // the sample itself is always inside its own window
            let window = &speeds[left..right];
            let adjusted_speed = window.iter().sum::<f64>() / window.len() as f64;

            SmoothedSample::from((*sample, adjusted_speed))
        })
        .collect();

    Ok(EntitySeries::new(series.entity_id.clone(), samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(f64, f64)]) -> EntitySeries<Sample> {
        EntitySeries::new(
            "9",
            points
                .iter()
                .map(|&(time, raw_speed)| Sample {
                    time,
                    x: 0.0,
                    y: 0.0,
                    raw_speed,
                })
                .collect(),
        )
    }

    fn adjusted(series: &EntitySeries<SmoothedSample>) -> Vec<f64> {
        series.iter().map(|this| this.adjusted_speed).collect()
    }

    #[test]
    fn centred_window_mean() {
        // half width 0.1 + 0.05: the sample at 0.2 sees [0.05, 0.35]
        let input = series(&[(0.0, 1.0), (0.1, 2.0), (0.2, 4.0), (0.3, 6.0), (0.4, 8.0)]);
        let options = SmoothingOptions::new().set_window(0.2);

        let output = smooth_series(&input, &options).expect("valid series");
        let actual = adjusted(&output);

        assert_eq!((1.0 + 2.0) / 2.0, actual[0]);
        assert_eq!((1.0 + 2.0 + 4.0) / 3.0, actual[1]);
        assert_eq!((2.0 + 4.0 + 6.0) / 3.0, actual[2]);
        assert_eq!((4.0 + 6.0 + 8.0) / 3.0, actual[3]);
        assert_eq!((6.0 + 8.0) / 2.0, actual[4]);
    }

    #[test]
    fn irregular_spacing() {
        let input = series(&[(0.0, 3.0), (0.05, 5.0), (1.0, 7.0), (1.12, 9.0), (3.0, 11.0)]);
        let options = SmoothingOptions::new();

        let output = smooth_series(&input, &options).expect("valid series");

        // half width 0.2
        assert_eq!(vec![4.0, 4.0, 8.0, 8.0, 11.0], adjusted(&output));
    }

    #[test]
    fn lonely_sample_keeps_raw_speed() {
        let input = series(&[(0.0, 2.5), (10.0, 4.25)]);

        let output = smooth_series(&input, &SmoothingOptions::new()).expect("valid series");

        assert_eq!(vec![2.5, 4.25], adjusted(&output));
    }

    #[test]
    fn keeps_every_sample_and_its_fields() {
        let input = EntitySeries::new(
            "9",
            vec![
                Sample {
                    time: 0.0,
                    x: 1.0,
                    y: -2.0,
                    raw_speed: 3.0,
                },
                Sample {
                    time: 0.1,
                    x: 1.5,
                    y: -2.5,
                    raw_speed: 5.0,
                },
            ],
        );

        let output = smooth_series(&input, &SmoothingOptions::new()).expect("valid series");

        assert_eq!("9", output.entity_id);
        assert_eq!(2, output.len());
        assert_eq!((1.5, -2.5), (output.samples[1].x, output.samples[1].y));
        assert_eq!(5.0, output.samples[1].raw_speed);
        assert_eq!(4.0, output.samples[1].adjusted_speed);
    }

    #[test]
    fn empty_series() {
        let output = smooth_series(&series(&[]), &SmoothingOptions::new()).expect("valid series");

        assert!(output.is_empty());
    }

    #[test]
    fn rejects_non_positive_window() {
        let input = series(&[(0.0, 1.0)]);

        for window in [0.0, -0.3, f64::NAN] {
            let options = SmoothingOptions::new().set_window(window);

            assert!(
                smooth_series(&input, &options)
                    .err()
                    .is_some_and(|e| e.is_configuration())
            );
        }
    }

    #[test]
    fn rejects_unsorted_series() {
        let input = series(&[(0.2, 1.0), (0.1, 1.0)]);

        assert_eq!(
            Err(tracking::Error::UnsortedSeries {
                entity_id: "9".into(),
                index: 1
            }),
            smooth_series(&input, &SmoothingOptions::new())
        );
    }
}
