use super::traits::{ClassId, ClassIndexed, Dataset};
use otxrust_core::OtxError;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// A view over selected items of another dataset.
///
/// Position `i` of the subset maps to `indices[i]` of the inner dataset.
/// When the inner dataset is class-indexed, the subset answers
/// `class_indices()` in its own index space, so samplers never need to look
/// through it.
#[derive(Debug)]
pub struct Subset<D: Dataset> {
    dataset: D,
    indices: Vec<usize>,
    class_indices: OnceLock<BTreeMap<ClassId, Vec<usize>>>,
}

impl<D: Dataset> Subset<D> {
    /// Creates a new `Subset`.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::IndexOutOfBounds` for the first selected index that
    /// does not exist in `dataset`.
    pub fn new(dataset: D, indices: Vec<usize>) -> Result<Self, OtxError> {
        let len = dataset.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(OtxError::IndexOutOfBounds { index, len });
        }
        Ok(Self {
            dataset,
            indices,
            class_indices: OnceLock::new(),
        })
    }

    /// Indices into the inner dataset, in subset order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn inner(&self) -> &D {
        &self.dataset
    }

    pub fn into_inner(self) -> D {
        self.dataset
    }
}

impl<D: Dataset> Dataset for Subset<D> {
    type Item = D::Item;

    fn get(&self, index: usize) -> Result<Self::Item, OtxError> {
        let inner_index = self
            .indices
            .get(index)
            .copied()
            .ok_or(OtxError::IndexOutOfBounds {
                index,
                len: self.indices.len(),
            })?;
        self.dataset.get(inner_index)
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

impl<D: ClassIndexed> ClassIndexed for Subset<D> {
    fn class_indices(&self) -> &BTreeMap<ClassId, Vec<usize>> {
        self.class_indices
            .get_or_init(|| remap_class_indices(self.dataset.class_indices(), &self.indices))
    }
}

fn remap_class_indices(
    inner: &BTreeMap<ClassId, Vec<usize>>,
    indices: &[usize],
) -> BTreeMap<ClassId, Vec<usize>> {
    let mut positions_of: HashMap<usize, Vec<usize>> = HashMap::new();
    for (position, &inner_index) in indices.iter().enumerate() {
        positions_of.entry(inner_index).or_default().push(position);
    }

    // An item may carry several labels; it keeps every one of them.
    let mut remapped: BTreeMap<ClassId, Vec<usize>> = BTreeMap::new();
    for (&class_id, members) in inner {
        let mut positions: Vec<usize> = members
            .iter()
            .filter_map(|inner_index| positions_of.get(inner_index))
            .flatten()
            .copied()
            .collect();
        if positions.is_empty() {
            continue;
        }
        positions.sort_unstable();
        remapped.insert(class_id, positions);
    }
    remapped
}

#[cfg(test)]
#[path = "subset_test.rs"]
mod tests;
