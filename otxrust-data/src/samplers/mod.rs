pub mod traits;
pub mod distributed;
pub mod sequential_sampler;
pub mod adaptive_sampler;
pub mod balanced_sampler;

pub use traits::Sampler;
pub use sequential_sampler::SequentialSampler;
pub use adaptive_sampler::AdaptiveSampler;
pub use balanced_sampler::BalancedSampler;
