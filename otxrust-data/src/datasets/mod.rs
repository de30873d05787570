pub mod traits;
pub mod vec_dataset;
pub mod labeled_dataset;
pub mod subset;

pub use traits::{ClassId, ClassIndexed, Dataset};
pub use vec_dataset::VecDataset;
pub use labeled_dataset::LabeledDataset;
pub use subset::Subset;
