use otxrust_core::DistributedContext;
use otxrust_data::samplers::distributed::pad_to;
use otxrust_data::{AdaptiveSampler, RepeatPolicy, Sampler, SamplerConfig, VecDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn dataset(len: usize) -> VecDataset<usize> {
    VecDataset::new((0..len).collect())
}

fn replica(len: usize, config: &SamplerConfig, ctx: DistributedContext, epoch: u64) -> Vec<usize> {
    let config = config.clone().with_distributed(ctx);
    // Each process owns its own generator; the shared seed comes from the config.
    let mut rng = StdRng::seed_from_u64(1000 + ctx.rank() as u64);
    let mut sampler = AdaptiveSampler::new(&dataset(len), &config, &mut rng).unwrap();
    sampler.set_epoch(epoch);
    let indices: Vec<usize> = sampler.iter().collect();
    assert_eq!(indices.len(), sampler.len());
    indices
}

#[test]
fn test_two_replicas_take_even_and_odd_positions() {
    otxrust_core::init_logging();
    let config = SamplerConfig::new(4)
        .with_seed(2024)
        .with_n_repeats(RepeatPolicy::Fixed(1.0));

    let single = replica(10, &config, DistributedContext::single(), 3);
    let rank0 = replica(10, &config, DistributedContext::new(2, 0).unwrap(), 3);
    let rank1 = replica(10, &config, DistributedContext::new(2, 1).unwrap(), 3);

    let even: Vec<usize> = single.iter().step_by(2).copied().collect();
    let odd: Vec<usize> = single.iter().skip(1).step_by(2).copied().collect();
    assert_eq!(rank0, even);
    assert_eq!(rank1, odd);

    let a: HashSet<usize> = rank0.into_iter().collect();
    let b: HashSet<usize> = rank1.into_iter().collect();
    assert!(a.is_disjoint(&b));
    assert_eq!(a.union(&b).count(), 10);
}

#[test]
fn test_replicas_rebuild_padded_sequence() {
    let len = 11;
    let num_replicas = 4;
    let config = SamplerConfig::new(2)
        .with_seed(7)
        .with_n_repeats(RepeatPolicy::Fixed(2.0));

    for epoch in 0..3 {
        let single = replica(len, &config, DistributedContext::single(), epoch);
        assert_eq!(single.len(), 22);
        let padded = pad_to(single, 24);

        let shards: Vec<Vec<usize>> = (0..num_replicas)
            .map(|rank| {
                replica(len, &config, DistributedContext::new(num_replicas, rank).unwrap(), epoch)
            })
            .collect();

        let mut rebuilt = Vec::with_capacity(padded.len());
        for step in 0..6 {
            for shard in &shards {
                rebuilt.push(shard[step]);
            }
        }
        assert_eq!(rebuilt, padded);

        let mut union: Vec<usize> = shards.concat();
        let mut expected = padded.clone();
        union.sort_unstable();
        expected.sort_unstable();
        assert_eq!(union, expected);
    }
}

#[test]
fn test_replicas_agree_on_epoch_order() {
    let config = SamplerConfig::new(4)
        .with_seed(99)
        .with_n_repeats(RepeatPolicy::Fixed(1.0));
    let ctx = DistributedContext::new(3, 2).unwrap();

    let epoch1 = replica(30, &config, ctx, 1);
    let epoch1_again = replica(30, &config, ctx, 1);
    let epoch2 = replica(30, &config, ctx, 2);
    assert_eq!(epoch1, epoch1_again);
    assert_ne!(epoch1, epoch2);
}
