// otxrust-data/src/samplers/adaptive_sampler.rs

use super::distributed::{epoch_len, pad_to, per_replica, shard, checked_total_size};
use super::traits::Sampler;
use crate::config::{RepeatPolicy, SamplerConfig};
use crate::datasets::Dataset;
use log::debug;
use otxrust_core::{proper_repeat_times, OtxError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Upper bound (exclusive) of seeds drawn when the config carries none.
const SEED_RANGE: u64 = 1 << 31;

/// A sampler that adapts the epoch length to the dataset statistics.
///
/// On a very small dataset an epoch is only a few iterations long, which
/// makes training slow because the loader restarts all the time. This sampler
/// repeats every item `repeat` times per epoch, where `repeat` shrinks as the
/// dataset grows (see [`proper_repeat_times`]). On large datasets it falls
/// back to a single pass.
///
/// With `num_replicas > 1`, every replica shuffles with the same
/// `seed + epoch`, pads the repeated sequence to `total_size` and keeps its
/// strided share, so replicas see disjoint positions of one global order.
#[derive(Debug, Clone)]
pub struct AdaptiveSampler {
    dataset_len: usize,
    samples_per_gpu: usize,
    num_replicas: usize,
    rank: usize,
    shuffle: bool,
    repeat: usize,
    num_samples: usize,
    total_size: usize,
    seed: u64,
    epoch: u64,
}

impl AdaptiveSampler {
    /// Creates a new `AdaptiveSampler` for `dataset`.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The dataset to sample from. Only its length is kept.
    /// * `config` - Sampler options. See [`SamplerConfig`].
    /// * `rng` - Supplies the shuffle seed when `config.seed` is `None`.
    ///   Replicas that rely on it must seed their generators identically.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::InvalidArgument` for an empty dataset or any invalid
    /// option (see [`SamplerConfig::validate`]).
    pub fn new<D, G>(dataset: &D, config: &SamplerConfig, rng: &mut G) -> Result<Self, OtxError>
    where
        D: Dataset + ?Sized,
        G: Rng,
    {
        Self::from_len(dataset.len(), config, rng)
    }

    /// Same as [`AdaptiveSampler::new`] for a dataset known only by its length.
    pub fn from_len<G>(dataset_len: usize, config: &SamplerConfig, rng: &mut G) -> Result<Self, OtxError>
    where
        G: Rng,
    {
        if dataset_len == 0 {
            return Err(OtxError::invalid("dataset must not be empty"));
        }
        let ctx = config.validate()?;
        let repeat = resolve_repeat(config, dataset_len);

        let num_replicas = ctx.num_replicas();
        let num_samples = per_replica(epoch_len(&[dataset_len, repeat])?, num_replicas, false);
        let total_size = checked_total_size(num_samples, num_replicas)?;
        let seed = config.seed.unwrap_or_else(|| rng.gen_range(0..SEED_RANGE));

        debug!(
            "AdaptiveSampler: dataset_len={}, n_repeats={}, repeat={}, num_samples={}, total_size={}",
            dataset_len, config.n_repeats, repeat, num_samples, total_size
        );

        Ok(AdaptiveSampler {
            dataset_len,
            samples_per_gpu: config.samples_per_gpu,
            num_replicas,
            rank: ctx.rank(),
            shuffle: config.shuffle,
            repeat,
            num_samples,
            total_size,
            seed,
            epoch: 0,
        })
    }

    /// Times each item appears in one epoch, before padding and sharding.
    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Indices this replica yields per epoch.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Length of the padded sequence shared by all replicas.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Base shuffle seed; the epoch is added to it.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Epoch set by the last `set_epoch` call.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of cooperating processes.
    pub fn num_replicas(&self) -> usize {
        self.num_replicas
    }

    /// Shard index of this process.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Batch size hint the repeat factor was derived from.
    pub fn samples_per_gpu(&self) -> usize {
        self.samples_per_gpu
    }

    /// Dataset order for the current epoch, before repetition.
    fn epoch_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.dataset_len).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.epoch));
            order.shuffle(&mut rng);
        }
        order
    }
}

impl Sampler for AdaptiveSampler {
    fn iter(&mut self) -> Box<dyn Iterator<Item = usize> + Send> {
        let repeat = self.repeat;
        // e.g. [3, 3, 3, 0, 0, 0, 7, 7, 7, ...]
        let repeated: Vec<usize> = self
            .epoch_order()
            .into_iter()
            .flat_map(|index| std::iter::repeat(index).take(repeat))
            .collect();
        let padded = pad_to(repeated, self.total_size);
        let indices = shard(&padded, self.rank, self.num_replicas);
        debug_assert_eq!(indices.len(), self.num_samples);
        Box::new(indices.into_iter())
    }

    fn len(&self) -> usize {
        self.num_samples
    }

    fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }
}

/// Resolves the repeat factor shared by the adaptive and balanced samplers.
///
/// `config.n_repeats` must already be validated.
pub(crate) fn resolve_repeat(config: &SamplerConfig, dataset_len: usize) -> usize {
    match config.n_repeats {
        RepeatPolicy::Auto => proper_repeat_times(
            dataset_len,
            config.samples_per_gpu,
            config.coef,
            config.min_repeat,
        ),
        RepeatPolicy::Fixed(n) => n.trunc() as usize,
    }
}

#[cfg(test)]
#[path = "adaptive_sampler_test.rs"]
mod tests;
