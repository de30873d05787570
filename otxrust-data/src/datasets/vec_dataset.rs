use super::traits::Dataset;
use otxrust_core::OtxError;

/// A simple dataset that wraps a `Vec` of items.
///
/// # Type Parameters
///
/// * `T`: The type of the items stored in the dataset. Must be `Clone + Send + 'static`.
#[derive(Debug, Clone)]
pub struct VecDataset<T: Clone + Send + 'static> {
    data: Vec<T>,
}

impl<T: Clone + Send + 'static> VecDataset<T> {
    /// Creates a new `VecDataset` from a vector of items.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Clone + Send + 'static> Dataset for VecDataset<T> {
    type Item = T;

    /// Clones the item at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, OtxError> {
        self.data
            .get(index)
            .cloned()
            .ok_or(OtxError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
