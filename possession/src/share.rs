use std::collections::HashMap;

use crate::PossessionRecord;

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PossessionShare {
    pub entity_id: String,
    /// Ball samples assigned to this player
    pub samples: usize,
    /// Fraction of all assigned ball samples, `0.0..=1.0`
    pub share: f64,
    pub formatted_label: String,
}

/// Possession table, biggest share first.
///
/// Ball samples without a possessor are left out of the total. Equal
/// shares keep the order in which players first had the ball.
pub fn possession_share<'a>(
    records: impl IntoIterator<Item = &'a PossessionRecord>,
) -> Vec<PossessionShare> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for entity_id in records
        .into_iter()
        .filter_map(|this| this.possessor.as_deref())
    {
        match index.get(entity_id) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(entity_id, counts.len());
                counts.push((entity_id, 1));
            }
        }
    }

    let total = counts.iter().map(|(_, count)| count).sum::<usize>() as f64;

    counts.sort_by(|(_, a), (_, b)| b.cmp(a));

    counts
        .into_iter()
        .map(|(entity_id, samples)| {
            let share = samples as f64 / total;

            PossessionShare {
                entity_id: entity_id.to_owned(),
                samples,
                share,
                formatted_label: format!("{:.2}%", share * 100.0),
            }
        })
        .collect()
}
