//! Datasets, adaptive samplers and batching for distributed training.

pub mod config;
pub mod dataloader;
pub mod datasets;
pub mod samplers;

// Re-export main components
pub use config::{RepeatPolicy, SamplerConfig};
pub use dataloader::DataLoader;
pub use datasets::{ClassId, ClassIndexed, Dataset, LabeledDataset, Subset, VecDataset};
pub use samplers::{AdaptiveSampler, BalancedSampler, Sampler, SequentialSampler};
