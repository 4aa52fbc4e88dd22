use std::path::Path;

use leaderboard::RankingOptions;
use preprocessing::CleaningOptions;
use tracking::BALL_ID;

use crate::error::Result;

/// Every tunable of a report run.
///
/// Missing keys in a JSON config fall back to their defaults, e.g.
///
/// ```json
/// { "cleaning": { "smoothing": { "window": 0.5 } }, "ranking": { "top_k": 5 } }
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifier of the ball rows
    pub ball_id: String,
    pub cleaning: CleaningOptions,
    pub ranking: RankingOptions,
}

impl Config {
    pub fn new() -> Self {
        Self {
            ball_id: BALL_ID.to_owned(),
            cleaning: CleaningOptions::new(),
            ranking: RankingOptions::new(),
        }
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(std::io::BufReader::new(std::fs::File::open(path)?))
    }

    pub fn validate(&self) -> tracking::Result<()> {
        if self.ball_id.trim().is_empty() {
            return Err(tracking::Error::invalid("ball_id", "must not be empty"));
        }

        self.cleaning.validate()?;
        self.ranking.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
