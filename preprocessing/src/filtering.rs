use tracking::{PitchBounds, Result, SmoothedSample, ensure_finite};

/// Speed in m/s below which a sample counts as standing still.
pub const MIN_SPEED: f64 = 0.03;

/// Drops samples whose adjusted speed is strictly below `min_speed`.
pub fn remove_stationary(
    input: impl IntoIterator<Item = SmoothedSample>,
    min_speed: f64,
) -> Result<Vec<SmoothedSample>> {
    ensure_finite("min_speed", min_speed)?;

    Ok(input
        .into_iter()
        .filter(|this| this.adjusted_speed >= min_speed)
        .collect())
}

/// Keeps samples strictly inside the pitch, the lines themselves are out.
pub fn remove_off_pitch(
    input: impl IntoIterator<Item = SmoothedSample>,
    pitch: &PitchBounds,
) -> Result<Vec<SmoothedSample>> {
    pitch.validate()?;

    Ok(input
        .into_iter()
        .filter(|this| pitch.contains(this.x, this.y))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoothed(time: f64, x: f64, y: f64, adjusted_speed: f64) -> SmoothedSample {
        SmoothedSample {
            time,
            x,
            y,
            raw_speed: adjusted_speed,
            adjusted_speed,
        }
    }

    fn times(samples: &[SmoothedSample]) -> Vec<f64> {
        samples.iter().map(|this| this.time).collect()
    }

    #[test]
    fn threshold_speed_is_kept() {
        let input = vec![
            smoothed(0.0, 0.0, 0.0, 0.0),
            smoothed(0.1, 0.0, 0.0, MIN_SPEED),
            smoothed(0.2, 0.0, 0.0, 0.029),
            smoothed(0.3, 0.0, 0.0, 4.0),
        ];

        let output = remove_stationary(input, MIN_SPEED).expect("finite threshold");

        assert_eq!(vec![0.1, 0.3], times(&output));
    }

    #[test]
    fn pitch_lines_are_removed() {
        let input = vec![
            smoothed(0.0, 52.5, 0.0, 1.0),
            smoothed(0.1, 52.4, 33.9, 1.0),
            smoothed(0.2, 0.0, -34.0, 1.0),
            smoothed(0.3, -60.0, 0.0, 1.0),
            smoothed(0.4, -52.4, 0.0, 1.0),
        ];

        let output = remove_off_pitch(input, &PitchBounds::default()).expect("valid pitch");

        assert_eq!(vec![0.1, 0.4], times(&output));
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let input = (0..50)
            .map(|i| {
                let i = f64::from(i);
                smoothed(i / 10.0, i * 2.5 - 60.0, 30.0 - i, (i - 20.0).abs() / 100.0)
            })
            .collect::<Vec<_>>();
        let pitch = PitchBounds::default();

        let once = remove_off_pitch(
            remove_stationary(input, MIN_SPEED).expect("finite threshold"),
            &pitch,
        )
        .expect("valid pitch");

        let twice = remove_off_pitch(
            remove_stationary(once.clone(), MIN_SPEED).expect("finite threshold"),
            &pitch,
        )
        .expect("valid pitch");

        assert_eq!(once, twice);
        assert!(once.is_sorted_by(|a, b| a.time < b.time));
    }

    #[test]
    fn filter_order_does_not_matter() {
        let input = vec![
            smoothed(0.0, 60.0, 0.0, 3.0),
            smoothed(0.1, 10.0, 0.0, 0.0),
            smoothed(0.2, 10.0, 0.0, 3.0),
        ];
        let pitch = PitchBounds::default();

        let a = remove_off_pitch(remove_stationary(input.clone(), MIN_SPEED).unwrap(), &pitch)
            .unwrap();
        let b = remove_stationary(remove_off_pitch(input, &pitch).unwrap(), MIN_SPEED).unwrap();

        assert_eq!(a, b);
        assert_eq!(vec![0.2], times(&a));
    }

    #[test]
    fn bad_parameters_are_reported() {
        let input = vec![smoothed(0.0, 0.0, 0.0, 1.0)];

        assert!(remove_stationary(input.clone(), f64::NAN).is_err());
        assert!(remove_off_pitch(input, &PitchBounds::new().set_x(52.5, -52.5)).is_err());
    }
}
