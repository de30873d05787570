// otxrust-data/src/samplers/balanced_sampler.rs

use super::adaptive_sampler::resolve_repeat;
use super::distributed::{epoch_len, pad_to, per_replica, shard, checked_total_size, truncate_to};
use super::traits::Sampler;
use crate::config::SamplerConfig;
use crate::datasets::ClassIndexed;
use log::{info, warn};
use otxrust_core::OtxError;
use rand::rngs::StdRng;
use rand::Rng;
use std::fmt::Debug;

/// Probability of missing a tail-class item that efficient mode tolerates.
const MISS_PROBABILITY: f64 = 0.001;

/// A sampler that draws every class equally often, for long-tailed datasets.
///
/// An epoch is made of `repeat * num_trials` rounds; each round draws one
/// random item (with replacement) from every class, in class-id order.
///
/// In efficient mode, `num_trials` is the number of draws after which every
/// item of the smallest class has been picked with probability 0.999, capped
/// at `dataset_len / num_classes`. Otherwise `num_trials` is
/// `dataset_len / num_classes`.
///
/// Randomness comes from the generator handed to the constructor and is not
/// tied to the epoch, so replicas do not agree on the draws.
#[derive(Debug)]
pub struct BalancedSampler<R: Rng + Send = StdRng> {
    class_indices: Vec<Vec<usize>>,
    samples_per_gpu: usize,
    num_replicas: usize,
    rank: usize,
    drop_last: bool,
    repeat: usize,
    num_tail: usize,
    num_trials: usize,
    num_samples: usize,
    total_size: usize,
    epoch: u64,
    rng: R,
}

impl<R: Rng + Send> BalancedSampler<R> {
    /// Creates a new `BalancedSampler` for `dataset`.
    ///
    /// # Arguments
    ///
    /// * `dataset` - A class-indexed dataset. Its class grouping is copied.
    /// * `config` - Sampler options; `efficient_mode` and `drop_last` apply here.
    /// * `rng` - Generator used for every draw of every epoch.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::InvalidArgument` for an empty dataset, an empty class
    /// map, an empty class, a class index past the dataset end, a smallest
    /// class of one item in efficient mode, or any invalid option.
    pub fn new<D>(dataset: &D, config: &SamplerConfig, rng: R) -> Result<Self, OtxError>
    where
        D: ClassIndexed + ?Sized,
    {
        let dataset_len = dataset.len();
        if dataset_len == 0 {
            return Err(OtxError::invalid("dataset must not be empty"));
        }
        let ctx = config.validate()?;
        let class_indices = collect_class_indices(dataset, dataset_len)?;
        let num_classes = class_indices.len();
        let num_tail = class_indices.iter().map(Vec::len).min().unwrap_or(0);

        let full_pass = dataset_len / num_classes;
        let num_trials = if config.efficient_mode {
            efficient_num_trials(num_tail)?.min(full_pass)
        } else {
            full_pass
        };
        if num_trials == 0 {
            warn!(
                "BalancedSampler: {} classes over {} items leave no trials, epochs will be empty",
                num_classes, dataset_len
            );
        }

        let repeat = resolve_repeat(config, dataset_len);
        let num_replicas = ctx.num_replicas();
        let global_len = epoch_len(&[num_trials, num_classes, repeat])?;
        let num_samples = per_replica(global_len, num_replicas, config.drop_last);
        let total_size = checked_total_size(num_samples, num_replicas)?;

        info!(
            "Balanced sampler will select balanced samples {} times",
            num_samples.div_ceil(config.samples_per_gpu)
        );

        Ok(BalancedSampler {
            class_indices,
            samples_per_gpu: config.samples_per_gpu,
            num_replicas,
            rank: ctx.rank(),
            drop_last: config.drop_last,
            repeat,
            num_tail,
            num_trials,
            num_samples,
            total_size,
            epoch: 0,
            rng,
        })
    }

    /// Number of classes drawn from in every round.
    pub fn num_classes(&self) -> usize {
        self.class_indices.len()
    }

    /// Size of the smallest class.
    pub fn num_tail(&self) -> usize {
        self.num_tail
    }

    /// Balanced rounds per repeat.
    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    /// Times the `num_trials` rounds are run per epoch.
    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Indices this replica yields per epoch.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Length of the padded (or trimmed) sequence shared by all replicas.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Epoch set by the last `set_epoch` call. Draws do not depend on it.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Batch size used to report the number of balanced batches.
    pub fn samples_per_gpu(&self) -> usize {
        self.samples_per_gpu
    }

    /// One draw per class, in class-id order.
    fn draw_round(&mut self, out: &mut Vec<usize>) {
        for members in &self.class_indices {
            out.push(members[self.rng.gen_range(0..members.len())]);
        }
    }
}

impl<R: Rng + Send + Debug> Sampler for BalancedSampler<R> {
    fn iter(&mut self) -> Box<dyn Iterator<Item = usize> + Send> {
        let rounds = self.repeat * self.num_trials;
        let mut indices = Vec::with_capacity(rounds * self.class_indices.len());
        for _ in 0..rounds {
            self.draw_round(&mut indices);
        }

        let indices = if self.drop_last && indices.len() > self.total_size {
            truncate_to(indices, self.total_size)
        } else {
            pad_to(indices, self.total_size)
        };
        Box::new(shard(&indices, self.rank, self.num_replicas).into_iter())
    }

    fn len(&self) -> usize {
        self.num_samples
    }

    /// Only recorded: draws never depend on the epoch.
    fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }
}

/// Smallest number of uniform draws from a class of `num_tail` items after
/// which each item has been drawn with probability at least 0.999:
/// `floor(ln(0.001) / ln(1 - 1 / num_tail))`.
///
/// # Errors
///
/// Returns `OtxError::InvalidArgument` when `num_tail <= 1`, for which the
/// logarithm base degenerates.
pub fn efficient_num_trials(num_tail: usize) -> Result<usize, OtxError> {
    if num_tail <= 1 {
        return Err(OtxError::invalid(format!(
            "efficient mode requires more than one sample per class, smallest class has {}",
            num_tail
        )));
    }
    let base = 1.0 - 1.0 / num_tail as f64;
    Ok((MISS_PROBABILITY.ln() / base.ln()).floor() as usize)
}

fn collect_class_indices<D>(dataset: &D, dataset_len: usize) -> Result<Vec<Vec<usize>>, OtxError>
where
    D: ClassIndexed + ?Sized,
{
    let classes = dataset.class_indices();
    if classes.is_empty() {
        return Err(OtxError::invalid("dataset exposes no classes"));
    }
    let mut collected = Vec::with_capacity(classes.len());
    for (class_id, members) in classes {
        if members.is_empty() {
            return Err(OtxError::invalid(format!("class {} has no items", class_id)));
        }
        if let Some(&index) = members.iter().find(|&&index| index >= dataset_len) {
            return Err(OtxError::invalid(format!(
                "class {} refers to index {} of a dataset of {} items",
                class_id, index, dataset_len
            )));
        }
        collected.push(members.clone());
    }
    Ok(collected)
}

#[cfg(test)]
#[path = "balanced_sampler_test.rs"]
mod tests;
