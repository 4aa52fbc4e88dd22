use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::Result,
    models::{EntitySeries, Row, Sample},
};

/// Tracking data of one session, split into the ball and the players.
///
/// Players keep the order in which their first row appeared in the input,
/// which is the canonical order used whenever ties have to be broken.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    pub ball: EntitySeries,
    pub players: Vec<EntitySeries>,
}

impl Dataset {
    /// Validates, partitions and sorts raw rows.
    ///
    /// # Params
    /// - `rows` - tracking rows in any order
    /// - `ball_id` - identifier reserved for the ball, usually [`crate::BALL_ID`]
    pub fn from_rows(rows: impl IntoIterator<Item = Row>, ball_id: &str) -> Result<Self> {
        let mut ball = EntitySeries::empty(ball_id);
        let mut players: Vec<EntitySeries> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (position, row) in rows.into_iter().enumerate() {
            row.validate(position)?;

            let sample = Sample::from(&row);

            if row.entity_id == ball_id {
                ball.samples.push(sample);
                continue;
            }

            match index.get(&row.entity_id) {
                Some(&slot) => players[slot].samples.push(sample),
                None => {
                    index.insert(row.entity_id.clone(), players.len());
                    players.push(EntitySeries::new(row.entity_id, vec![sample]));
                }
            }
        }

        sort_series(&mut ball)?;
        for series in players.iter_mut() {
            sort_series(series)?;
        }

        debug!(
            players = players.len(),
            ball_samples = ball.len(),
            "partitioned tracking rows"
        );

        Ok(Self { ball, players })
    }

    pub fn player(&self, entity_id: &str) -> Option<&EntitySeries> {
        self.players
            .iter()
            .find(|series| series.entity_id == entity_id)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|series| series.entity_id.as_str())
    }

    /// Number of samples across the ball and all players.
    pub fn len(&self) -> usize {
        self.ball.len() + self.players.iter().map(EntitySeries::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sort_series(series: &mut EntitySeries) -> Result<()> {
    if !series.samples.is_sorted_by(|a, b| a.time <= b.time) {
        debug!(entity = %series.entity_id, "input rows out of time order, sorting");
        series.samples.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    series.check_order()
}
