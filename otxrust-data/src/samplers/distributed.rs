//! Index arithmetic shared by the distributed-aware samplers.
//!
//! Each replica pads (or trims) the same global sequence to `total_size`,
//! then keeps every `num_replicas`-th element starting at its `rank`. The
//! shards are disjoint by position and together rebuild the global sequence.

use otxrust_core::OtxError;

/// Extends `indices` with a wrapping prefix of itself until it holds
/// `total_size` elements.
///
/// The prefix is repeated when the padding is longer than the sequence.
/// Sequences already at least `total_size` long, or empty, are returned as is.
pub fn pad_to(mut indices: Vec<usize>, total_size: usize) -> Vec<usize> {
    if indices.is_empty() || indices.len() >= total_size {
        return indices;
    }
    let padding: Vec<usize> = indices
        .iter()
        .copied()
        .cycle()
        .take(total_size - indices.len())
        .collect();
    indices.extend(padding);
    indices
}

/// Drops the tail so that at most `total_size` elements remain.
pub fn truncate_to(mut indices: Vec<usize>, total_size: usize) -> Vec<usize> {
    indices.truncate(total_size);
    indices
}

/// Strided slice `[rank :: num_replicas]` of `indices`.
pub fn shard(indices: &[usize], rank: usize, num_replicas: usize) -> Vec<usize> {
    indices
        .iter()
        .skip(rank)
        .step_by(num_replicas.max(1))
        .copied()
        .collect()
}

/// Per-replica sample count for a global sequence of `len` elements.
///
/// Rounds up (the sequence will be padded) unless `drop_last` is set and the
/// split is uneven, in which case it rounds down (the tail will be trimmed).
pub fn per_replica(len: usize, num_replicas: usize, drop_last: bool) -> usize {
    if drop_last && len % num_replicas != 0 {
        len / num_replicas
    } else {
        len.div_ceil(num_replicas)
    }
}

/// Product of the factors that size one epoch, e.g. `[len, repeat]`.
///
/// # Errors
///
/// Returns `OtxError::InvalidArgument` when the product does not fit in `usize`.
pub fn epoch_len(factors: &[usize]) -> Result<usize, OtxError> {
    factors
        .iter()
        .try_fold(1usize, |acc, &factor| acc.checked_mul(factor))
        .ok_or_else(|| OtxError::invalid(format!("epoch size {:?} overflows usize", factors)))
}

/// `num_samples * num_replicas`, or `InvalidArgument` on overflow.
pub fn checked_total_size(num_samples: usize, num_replicas: usize) -> Result<usize, OtxError> {
    num_samples.checked_mul(num_replicas).ok_or_else(|| {
        OtxError::invalid(format!(
            "total size of {} samples over {} replicas overflows usize",
            num_samples, num_replicas
        ))
    })
}

#[cfg(test)]
#[path = "distributed_test.rs"]
mod tests;
