// dataloader.rs
//! # DataLoader
//!
//! The `DataLoader` groups the indices produced by a [`Sampler`] into batches
//! and fetches the matching items from a [`Dataset`].
//!
//! ## Basic usage
//!
//! ```rust
//! use otxrust_data::config::SamplerConfig;
//! use otxrust_data::dataloader::DataLoader;
//! use otxrust_data::datasets::VecDataset;
//! use otxrust_data::samplers::AdaptiveSampler;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let dataset = VecDataset::new((0..10).collect::<Vec<u32>>());
//! let config = SamplerConfig::new(4).with_seed(0);
//! let sampler = AdaptiveSampler::new(&dataset, &config, &mut StdRng::seed_from_u64(0)).unwrap();
//! let mut loader = DataLoader::new(dataset, 4, sampler, false, None).unwrap();
//! for epoch in 0..2 {
//!     loader.set_epoch(epoch);
//!     for batch in loader.iter() {
//!         let batch = batch.expect("items exist");
//!         assert!(batch.len() <= 4);
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - Automatic batching
//! - Any sampling strategy through the `Sampler` trait
//! - Optional custom collate function
//! - Optionally drop the last incomplete batch (`drop_last`)

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use otxrust_core::OtxError;

/// Custom collate function.
///
/// Takes the samples of one batch and returns the batch handed to the model.
pub type CollateFn<D> = Box<
    dyn Fn(Vec<<D as Dataset>::Item>) -> Result<Vec<<D as Dataset>::Item>, OtxError> + Send + Sync,
>;

/// Generic loader for batching and sampling data.
///
/// # Type Parameters
/// - `D`: The dataset type, implementing [`Dataset`].
/// - `S`: The sampler type, implementing [`Sampler`].
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
    collate_fn: Option<CollateFn<D>>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// # Arguments
    /// - `dataset`: The dataset to read from.
    /// - `batch_size`: Number of items per batch.
    /// - `sampler`: Produces the index sequence of each epoch.
    /// - `drop_last`: If true, the last batch is skipped when incomplete.
    /// - `collate_fn`: Optional custom collate function.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::InvalidArgument` if `batch_size` is zero.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: Option<CollateFn<D>>,
    ) -> Result<Self, OtxError> {
        if batch_size == 0 {
            return Err(OtxError::invalid("batch_size must be positive"));
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            collate_fn,
        })
    }

    /// Forwards the epoch number to the sampler before an epoch starts.
    pub fn set_epoch(&mut self, epoch: u64) {
        self.sampler.set_epoch(epoch);
    }

    /// Starts one epoch and returns its batches.
    pub fn iter(&mut self) -> Batches<'_, D> {
        Batches {
            dataset: &self.dataset,
            indices: self.sampler.iter(),
            batch_size: self.batch_size,
            drop_last: self.drop_last,
            collate_fn: self.collate_fn.as_ref(),
        }
    }

    /// Number of batches one epoch yields on this process.
    pub fn num_batches(&self) -> usize {
        let len = self.sampler.len();
        if self.drop_last {
            len / self.batch_size
        } else {
            len.div_ceil(self.batch_size)
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }
}

/// Batches of one epoch, as returned by [`DataLoader::iter`].
pub struct Batches<'a, D: Dataset> {
    dataset: &'a D,
    indices: Box<dyn Iterator<Item = usize> + Send>,
    batch_size: usize,
    drop_last: bool,
    collate_fn: Option<&'a CollateFn<D>>,
}

impl<D: Dataset> Iterator for Batches<'_, D> {
    type Item = Result<Vec<D::Item>, OtxError>;

    /// Returns the next batch.
    ///
    /// - `Some(Ok(batch))`: a batch ready for use.
    /// - `Some(Err(e))`: an item could not be fetched.
    /// - `None`: the epoch is over.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        match self.collate_fn {
            Some(collate_fn) => Some(collate_fn(batch)),
            None => Some(Ok(batch)),
        }
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
