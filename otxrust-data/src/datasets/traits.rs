use otxrust_core::OtxError;
use std::collections::BTreeMap;

/// Identifier of a class label.
pub type ClassId = usize;

/// Represents a dataset that can be accessed by index.
///
/// A dataset is a collection of items, where each item can be an image path,
/// a tuple of (features, label), or any other custom type that implements
/// `Send + 'static`.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::IndexOutOfBounds` if the index is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item, OtxError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A dataset that knows which items belong to which class.
///
/// Class-balanced samplers read the grouping once at construction. Decorating
/// datasets (subsets, views) implement this explicitly in their own index
/// space instead of exposing the dataset they wrap.
pub trait ClassIndexed: Dataset {
    /// Mapping from class id to the ordered indices of its items.
    fn class_indices(&self) -> &BTreeMap<ClassId, Vec<usize>>;

    /// Number of distinct classes.
    fn num_classes(&self) -> usize {
        self.class_indices().len()
    }
}
