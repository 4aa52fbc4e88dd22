//! # Match report
//!
//! Wires the tracking algorithms into one batch run over a session export:
//! read rows, clean ball and players, then derive leaderboards, zone
//! distributions and ball possession.
//!
//! ```no_run
//! use match_report::{Analysis, Cache, Config, read_rows_from_path};
//! use tracking::Dataset;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let input = read_rows_from_path("match_data.csv", false)?;
//! let dataset = Dataset::from_rows(input.rows, &config.ball_id)?;
//!
//! let cache = Cache::new();
//! let analysis = Analysis::new(&dataset, config)?.with_cache(&cache);
//! let report = analysis.report()?;
//! # Ok(())
//! # }
//! ```

mod analysis;
mod cache;
mod config;
mod error;
mod input;

pub use analysis::*;
pub use cache::*;
pub use config::*;
pub use error::*;
pub use input::*;
