// otxrust-data/src/samplers/traits.rs

use std::fmt::Debug;

/// A Sampler trait that defines how to iterate over indices of a dataset.
///
/// Samplers are used by `DataLoader` to generate, once per epoch, the
/// sequence of indices to fetch from a `Dataset`. A sampler captures what it
/// needs from the dataset at construction, so it does not borrow it.
pub trait Sampler: Debug + Send {
    /// Returns the index sequence of one epoch.
    ///
    /// Every call starts a fresh, complete epoch.
    fn iter(&mut self) -> Box<dyn Iterator<Item = usize> + Send>;

    /// Returns the number of indices `iter` yields for this process.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records the epoch about to start.
    ///
    /// Distributed replicas must all pass the same value before iterating.
    /// Samplers whose order does not depend on the epoch ignore it.
    fn set_epoch(&mut self, _epoch: u64) {}
}
