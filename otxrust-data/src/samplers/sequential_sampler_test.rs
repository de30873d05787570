// otxrust-data/src/samplers/sequential_sampler_test.rs

use super::*;

#[test]
fn test_sequential_sampler_len() {
    assert_eq!(SequentialSampler::new(0).len(), 0);
    assert!(SequentialSampler::new(0).is_empty());
    assert_eq!(SequentialSampler::new(100).len(), 100);
}

#[test]
fn test_sequential_sampler_iter_non_empty() {
    let mut sampler = SequentialSampler::new(5);
    let indices: Vec<usize> = sampler.iter().collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_sequential_sampler_ignores_epoch() {
    let mut sampler = SequentialSampler::new(3);
    let first: Vec<usize> = sampler.iter().collect();
    sampler.set_epoch(7);
    let second: Vec<usize> = sampler.iter().collect();
    assert_eq!(first, second);
}
