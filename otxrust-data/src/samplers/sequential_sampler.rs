// otxrust-data/src/samplers/sequential_sampler.rs

use super::traits::Sampler;

/// Samples elements sequentially, always in the same order.
///
/// Suited to evaluation loaders, where every item is visited exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSampler {
    len: usize,
}

impl SequentialSampler {
    /// Creates a new `SequentialSampler` over `len` items.
    pub fn new(len: usize) -> Self {
        SequentialSampler { len }
    }
}

impl Sampler for SequentialSampler {
    fn iter(&mut self) -> Box<dyn Iterator<Item = usize> + Send> {
        Box::new(0..self.len)
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
