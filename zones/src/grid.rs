use tracking::{Error, Observation, PitchBounds, Result};

/// Bins used for location heatmaps, along and across the pitch.
pub const HEATMAP_BINS: (usize, usize) = (30, 20);

/// Sample counts over an `nx` x `ny` grid laid on the pitch.
///
/// Column `0` starts at `x_min`, row `0` at `y_min`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationGrid {
    pub nx: usize,
    pub ny: usize,
    counts: Vec<usize>,
}

impl LocationGrid {
    fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            counts: vec![0; nx * ny],
        }
    }

    pub fn count(&self, ix: usize, iy: usize) -> usize {
        match ix < self.nx && iy < self.ny {
            true => self.counts[ix * self.ny + iy],
            false => 0,
        }
    }

    /// Samples that landed on the grid.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Counts of every column, summed across the pitch.
    pub fn columns(&self) -> Vec<usize> {
        self.counts
            .chunks(self.ny.max(1))
            .map(|column| column.iter().sum())
            .collect()
    }

    /// Rows of counts, `ny` rows of `nx` values, ready to be drawn.
    pub fn rows(&self) -> Vec<Vec<usize>> {
        (0..self.ny)
            .map(|iy| (0..self.nx).map(|ix| self.count(ix, iy)).collect())
            .collect()
    }
}

/// Counts where on the pitch the samples were recorded.
///
/// Positions are rounded to a decimeter before binning. Bins include their
/// lower edge, the last one includes the far line too. Positions outside the
/// pitch are not counted.
pub fn location_grid<O: Observation>(
    samples: impl IntoIterator<Item = O>,
    pitch: &PitchBounds,
    nx: usize,
    ny: usize,
) -> Result<LocationGrid> {
    pitch.validate()?;

    if nx == 0 || ny == 0 {
        return Err(Error::invalid("bins", format!("need at least one bin, got {nx}x{ny}")));
    }

    let x_edges = edges(pitch.length(), nx);
    let y_edges = edges(pitch.width(), ny);
    let mut grid = LocationGrid::new(nx, ny);

    for sample in samples {
        let (x, y) = sample.position();
        let (x, y) = pitch.to_corner_frame(decimeters(x), decimeters(y));

        if let (Some(ix), Some(iy)) = (bin(&x_edges, x), bin(&y_edges, y)) {
            grid.counts[ix * ny + iy] += 1;
        }
    }

    Ok(grid)
}

#[inline]
fn decimeters(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn edges(span: f64, bins: usize) -> Vec<f64> {
    (0..=bins)
        .map(|i| span * i as f64 / bins as f64)
        .collect()
}

fn bin(edges: &[f64], value: f64) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);

    if !(first..=last).contains(&value) {
        return None;
    }

    let bins = edges.len() - 1;
    let index = edges.partition_point(|&edge| edge <= value).saturating_sub(1);

    Some(index.min(bins - 1))
}
