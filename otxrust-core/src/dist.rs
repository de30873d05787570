// otxrust-core/src/dist.rs

use crate::error::OtxError;
use std::env;

/// Identity of one process in a data-parallel training job.
///
/// Every replica builds its own sampler; they only agree on the index stream
/// when they share `num_replicas` and the shuffle seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributedContext {
    num_replicas: usize,
    rank: usize,
}

impl DistributedContext {
    /// Creates a new `DistributedContext`.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::InvalidArgument` when `num_replicas` is zero or
    /// `rank` is not in `[0, num_replicas)`.
    pub fn new(num_replicas: usize, rank: usize) -> Result<Self, OtxError> {
        if num_replicas == 0 {
            return Err(OtxError::invalid("num_replicas must be positive"));
        }
        if rank >= num_replicas {
            return Err(OtxError::invalid(format!(
                "rank {} is out of range for {} replicas",
                rank, num_replicas
            )));
        }
        Ok(Self { num_replicas, rank })
    }

    /// A single, non-distributed process.
    pub fn single() -> Self {
        Self {
            num_replicas: 1,
            rank: 0,
        }
    }

    /// Reads `WORLD_SIZE` and `RANK` as exported by common launchers.
    ///
    /// Missing variables fall back to a single process.
    pub fn from_env() -> Result<Self, OtxError> {
        let num_replicas = read_env_usize("WORLD_SIZE")?.unwrap_or(1);
        let rank = read_env_usize("RANK")?.unwrap_or(0);
        Self::new(num_replicas, rank)
    }

    pub fn num_replicas(&self) -> usize {
        self.num_replicas
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn is_distributed(&self) -> bool {
        self.num_replicas > 1
    }
}

impl Default for DistributedContext {
    fn default() -> Self {
        Self::single()
    }
}

fn read_env_usize(key: &str) -> Result<Option<usize>, OtxError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<usize>().map(Some).map_err(|_| {
            OtxError::invalid(format!("{} must be a non-negative integer, got {:?}", key, raw))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(OtxError::invalid(format!("{} is not valid unicode", key)))
        }
    }
}

#[cfg(test)]
#[path = "dist_test.rs"]
mod tests;
