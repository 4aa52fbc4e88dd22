use std::sync::Arc;

use leaderboard::{Leaderboard, Metric, RankingRow};
use possession::{PossessionRecord, PossessionShare, assign_possession, possession_share};
use preprocessing::{CleanedDataset, clean_dataset};
use tracing::info;
use tracking::{Dataset, EntitySeries, Result, SmoothedSample};
use zones::{HEATMAP_BINS, LocationGrid, ZoneDistribution, location_grid, zone_distribution};

use crate::{
    Config,
    cache::{Cache, Fingerprint},
};

/// Entry point for every figure of one session.
///
/// Cleaning and possession are the expensive steps; with a [`Cache`] they are
/// computed once per dataset and options, without one they are recomputed on
/// every call. Results are the same either way.
#[derive(Debug)]
pub struct Analysis<'a> {
    dataset: &'a Dataset,
    config: Config,
    cache: Option<&'a Cache>,
    fingerprint: Option<Fingerprint>,
}

impl<'a> Analysis<'a> {
    pub fn new(dataset: &'a Dataset, config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            dataset,
            config,
            cache: None,
            fingerprint: None,
        })
    }

    pub fn with_cache(mut self, cache: &'a Cache) -> Self {
        self.fingerprint = Some(Fingerprint::of_dataset(self.dataset));
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cleaned(&self) -> Result<Arc<CleanedDataset>> {
        let compute = || clean_dataset(self.dataset, &self.config.cleaning);

        match (self.cache, self.fingerprint) {
            (Some(cache), Some(data)) => {
                cache.cleaned(data.cleaning(&self.config.cleaning), compute)
            }
            _ => compute().map(Arc::new),
        }
    }

    pub fn leaderboard(&self) -> Result<Leaderboard> {
        let cleaned = self.cleaned()?;

        Leaderboard::new(&cleaned.players, &self.config.ranking)
    }

    /// Ranking for `metric`, `top_k` defaults to the configured one.
    pub fn ranking(&self, metric: Metric, top_k: Option<usize>) -> Result<Vec<RankingRow>> {
        self.leaderboard()?
            .ranking(metric, top_k.unwrap_or(self.config.ranking.top_k))
    }

    /// Zone distribution of a player or of the ball, `None` for an unknown id.
    pub fn zone_distribution(&self, entity_id: &str) -> Result<Option<ZoneDistribution>> {
        let cleaned = self.cleaned()?;

        entity(&cleaned, entity_id)
            .map(|series| zone_distribution(series, &self.config.cleaning.pitch))
            .transpose()
    }

    /// Heatmap counts of a player or of the ball, `None` for an unknown id.
    pub fn heatmap(&self, entity_id: &str) -> Result<Option<LocationGrid>> {
        let cleaned = self.cleaned()?;
        let (nx, ny) = HEATMAP_BINS;

        entity(&cleaned, entity_id)
            .map(|series| location_grid(series, &self.config.cleaning.pitch, nx, ny))
            .transpose()
    }

    pub fn possession(&self) -> Result<Arc<Vec<PossessionRecord>>> {
        let compute = || -> Result<Vec<PossessionRecord>> {
            let cleaned = self.cleaned()?;
            Ok(assign_possession(&cleaned.ball, &cleaned.players))
        };

        match (self.cache, self.fingerprint) {
            (Some(cache), Some(data)) => cache.possession(
                data.cleaning(&self.config.cleaning).possession(),
                compute,
            ),
            _ => compute().map(Arc::new),
        }
    }

    pub fn possession_share(&self) -> Result<Vec<PossessionShare>> {
        Ok(possession_share(self.possession()?.iter()))
    }

    /// Everything the presentation layer shows, in one go.
    pub fn report(&self) -> Result<MatchReport> {
        let cleaned = self.cleaned()?;
        let leaderboard = Leaderboard::new(&cleaned.players, &self.config.ranking)?;
        let pitch = &self.config.cleaning.pitch;

        let rankings = Metric::ALL
            .into_iter()
            .map(|metric| {
                leaderboard
                    .ranking(metric, self.config.ranking.top_k)
                    .map(|rows| (metric, rows))
            })
            .collect::<Result<Vec<_>>>()?;

        let zones = cleaned
            .players
            .iter()
            .map(|series| {
                zone_distribution(series, pitch).map(|share| (series.entity_id.clone(), share))
            })
            .collect::<Result<Vec<_>>>()?;

        let ball_zones = zone_distribution(&cleaned.ball, pitch)?;
        let possession = self.possession()?;
        let possession_share = possession_share(possession.iter());

        info!(
            players = cleaned.players.len(),
            ball_samples = possession.len(),
            "built match report"
        );

        Ok(MatchReport {
            rankings,
            zones,
            ball_zones,
            possession_share,
            possession: possession.as_ref().clone(),
        })
    }
}

fn entity<'c>(
    cleaned: &'c CleanedDataset,
    entity_id: &str,
) -> Option<&'c EntitySeries<SmoothedSample>> {
    match cleaned.ball.entity_id == entity_id {
        true => Some(&cleaned.ball),
        false => cleaned.player(entity_id),
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MatchReport {
    pub rankings: Vec<(Metric, Vec<RankingRow>)>,
    /// Per player zone distribution, players in dataset order
    pub zones: Vec<(String, ZoneDistribution)>,
    pub ball_zones: ZoneDistribution,
    pub possession_share: Vec<PossessionShare>,
    /// Cleaned ball series with the possessor of every sample
    pub possession: Vec<PossessionRecord>,
}

impl MatchReport {
    pub fn ranking(&self, metric: Metric) -> &[RankingRow] {
        self.rankings
            .iter()
            .find(|(this, _)| *this == metric)
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or_default()
    }
}
