//! Optional memoization of the expensive steps of an [`crate::Analysis`].
//!
//! Everything the analysis computes is a pure function of the dataset and
//! the options, so results are keyed by a content hash of both.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use possession::PossessionRecord;
use preprocessing::{CleanedDataset, CleaningOptions};
use sha2::{Digest, Sha256};
use tracing::debug;
use tracking::{Dataset, EntitySeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Content hash of a whole dataset.
    pub fn of_dataset(dataset: &Dataset) -> Self {
        let mut hasher = KeyHasher::new("dataset");

        let EntitySeries { entity_id, samples } = &dataset.ball;
        hasher.text(entity_id).count(samples.len());
        for sample in samples {
            hasher.number(sample.time).number(sample.x).number(sample.y).number(sample.raw_speed);
        }

        hasher.count(dataset.players.len());
        for EntitySeries { entity_id, samples } in &dataset.players {
            hasher.text(entity_id).count(samples.len());
            for sample in samples {
                hasher
                    .number(sample.time)
                    .number(sample.x)
                    .number(sample.y)
                    .number(sample.raw_speed);
            }
        }

        hasher.finish()
    }

    /// Key of a cleaning run over the dataset with this fingerprint.
    pub fn cleaning(&self, options: &CleaningOptions) -> Self {
        let CleaningOptions {
            smoothing,
            min_speed,
            pitch,
        } = options;

        KeyHasher::new("cleaning")
            .fingerprint(self)
            .number(smoothing.window)
            .number(smoothing.tolerance)
            .number(*min_speed)
            .number(pitch.x_min)
            .number(pitch.x_max)
            .number(pitch.y_min)
            .number(pitch.y_max)
            .finish()
    }

    /// Key of a possession assignment over the output of a cleaning run.
    pub fn possession(&self) -> Self {
        KeyHasher::new("possession").fingerprint(self).finish()
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

struct KeyHasher(Sha256);

impl KeyHasher {
    fn new(kind: &str) -> Self {
        let mut this = Self(Sha256::new());
        this.text(kind);
        this
    }

    fn text(&mut self, value: &str) -> &mut Self {
        self.count(value.len());
        self.0.update(value.as_bytes());
        self
    }

    fn count(&mut self, value: usize) -> &mut Self {
        self.0.update((value as u64).to_le_bytes());
        self
    }

    fn number(&mut self, value: f64) -> &mut Self {
        self.0.update(value.to_bits().to_le_bytes());
        self
    }

    fn fingerprint(&mut self, value: &Fingerprint) -> &mut Self {
        self.0.update(value.0);
        self
    }

    fn finish(&mut self) -> Fingerprint {
        Fingerprint(std::mem::take(&mut self.0).finalize().into())
    }
}

type Slot<T> = Mutex<HashMap<Fingerprint, Arc<T>>>;

#[derive(Debug, Default)]
pub struct Cache {
    cleaned: Slot<CleanedDataset>,
    possession: Slot<Vec<PossessionRecord>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cleaned<E>(
        &self,
        key: Fingerprint,
        compute: impl FnOnce() -> Result<CleanedDataset, E>,
    ) -> Result<Arc<CleanedDataset>, E> {
        get_or_try_insert(&self.cleaned, key, compute)
    }

    pub fn possession<E>(
        &self,
        key: Fingerprint,
        compute: impl FnOnce() -> Result<Vec<PossessionRecord>, E>,
    ) -> Result<Arc<Vec<PossessionRecord>>, E> {
        get_or_try_insert(&self.possession, key, compute)
    }

    /// Number of memoized results.
    pub fn len(&self) -> usize {
        lock(&self.cleaned).len() + lock(&self.possession).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.cleaned).clear();
        lock(&self.possession).clear();
    }
}

fn lock<T>(slot: &Slot<T>) -> std::sync::MutexGuard<'_, HashMap<Fingerprint, Arc<T>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn get_or_try_insert<T, E>(
    slot: &Slot<T>,
    key: Fingerprint,
    compute: impl FnOnce() -> Result<T, E>,
) -> Result<Arc<T>, E> {
    if let Some(hit) = lock(slot).get(&key) {
        debug!(key = %key.to_hex(), "cache hit");
        return Ok(Arc::clone(hit));
    }

    // computed without holding the lock, a racing insert of the same key wins
    let value = Arc::new(compute()?);

    Ok(Arc::clone(lock(slot).entry(key).or_insert(value)))
}
