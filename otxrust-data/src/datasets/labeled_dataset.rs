use super::traits::{ClassId, ClassIndexed, Dataset};
use otxrust_core::OtxError;
use std::collections::BTreeMap;

/// A dataset of `(item, label)` pairs that tracks which indices carry each label.
///
/// The class index map is built once, in ascending index order within each
/// class, so repeated runs see the same grouping.
#[derive(Debug, Clone)]
pub struct LabeledDataset<T: Clone + Send + 'static> {
    samples: Vec<(T, ClassId)>,
    class_indices: BTreeMap<ClassId, Vec<usize>>,
}

impl<T: Clone + Send + 'static> LabeledDataset<T> {
    pub fn new(samples: Vec<(T, ClassId)>) -> Self {
        let mut class_indices: BTreeMap<ClassId, Vec<usize>> = BTreeMap::new();
        for (index, (_, label)) in samples.iter().enumerate() {
            class_indices.entry(*label).or_default().push(index);
        }
        Self {
            samples,
            class_indices,
        }
    }

    /// Builds a dataset from parallel item and label vectors.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::InvalidArgument` if the vectors differ in length.
    pub fn from_parts(items: Vec<T>, labels: Vec<ClassId>) -> Result<Self, OtxError> {
        if items.len() != labels.len() {
            return Err(OtxError::invalid(format!(
                "{} items but {} labels",
                items.len(),
                labels.len()
            )));
        }
        Ok(Self::new(items.into_iter().zip(labels).collect()))
    }

    /// Label of the item at `index`.
    pub fn label(&self, index: usize) -> Option<ClassId> {
        self.samples.get(index).map(|(_, label)| *label)
    }
}

impl<T: Clone + Send + 'static> Dataset for LabeledDataset<T> {
    type Item = (T, ClassId);

    fn get(&self, index: usize) -> Result<Self::Item, OtxError> {
        self.samples
            .get(index)
            .cloned()
            .ok_or(OtxError::IndexOutOfBounds {
                index,
                len: self.samples.len(),
            })
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl<T: Clone + Send + 'static> ClassIndexed for LabeledDataset<T> {
    fn class_indices(&self) -> &BTreeMap<ClassId, Vec<usize>> {
        &self.class_indices
    }
}

#[cfg(test)]
#[path = "labeled_dataset_test.rs"]
mod tests;
