// Main modules of the crate
pub mod dist;
pub mod logging;
pub mod repeat_times;

pub mod error;
pub use error::OtxError;

// Re-export the pieces samplers reach for most often
pub use dist::DistributedContext;
pub use logging::init_logging;
pub use repeat_times::proper_repeat_times;
