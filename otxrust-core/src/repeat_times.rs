/// Estimates how many times a dataset should be repeated within one epoch.
///
/// Tiny datasets finish an epoch in a handful of iterations, which makes the
/// per-epoch overhead (loader restarts, validation, checkpointing) dominate.
/// The estimate decays with the square root of the iteration count:
///
/// `floor(max(coef * sqrt(ceil(data_size / batch_size) - 1) + 5, min_repeat))`
///
/// With a negative `coef` the result never increases as the dataset grows and
/// never drops below `min_repeat`.
///
/// The samplers validate `min_repeat >= 1` before calling this, but the
/// function is public and accepts any input. When both the estimate and
/// `min_repeat` are non-positive, it returns 0.
///
/// # Arguments
///
/// * `data_size` - Number of items in the dataset.
/// * `batch_size` - Items per batch on one device.
/// * `coef` - Slope of the decay curve. Default in the samplers: `-0.7`.
/// * `min_repeat` - Lower bound on the returned value.
pub fn proper_repeat_times(data_size: usize, batch_size: usize, coef: f64, min_repeat: f64) -> usize {
    if data_size == 0 || batch_size == 0 {
        return 1;
    }
    let n_iters_per_epoch = data_size.div_ceil(batch_size);
    let estimate = coef * ((n_iters_per_epoch - 1) as f64).sqrt() + 5.0;
    let repeat = estimate.max(min_repeat).floor();
    if repeat <= 0.0 {
        0
    } else {
        repeat as usize
    }
}

#[cfg(test)]
#[path = "repeat_times_test.rs"]
mod tests;
