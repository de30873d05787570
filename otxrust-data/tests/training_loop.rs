use otxrust_data::dataloader::DataLoader;
use otxrust_data::{
    BalancedSampler, ClassIndexed, Dataset, LabeledDataset, Sampler, SamplerConfig, SequentialSampler,
    Subset,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

fn long_tail() -> LabeledDataset<String> {
    let mut samples = Vec::new();
    for (class_id, size) in [(0usize, 4usize), (1, 12), (2, 40)] {
        for i in 0..size {
            samples.push((format!("img_{}_{}.jpg", class_id, i), class_id));
        }
    }
    LabeledDataset::new(samples)
}

#[test]
fn test_balanced_epochs_through_loader() {
    otxrust_core::init_logging();
    let dataset = long_tail();
    let config = SamplerConfig::from_json(r#"{"samples_per_gpu": 6, "n_repeats": 1}"#).unwrap();
    let sampler = BalancedSampler::new(&dataset, &config, StdRng::seed_from_u64(17)).unwrap();
    // tail 4 -> 24 trials, under the 56 / 3 = 18 cap -> 18 rounds of 3
    assert_eq!(sampler.num_trials(), 18);
    assert_eq!(sampler.len(), 54);

    let mut loader = DataLoader::new(dataset, 6, sampler, false, None).unwrap();
    assert_eq!(loader.num_batches(), 9);

    for epoch in 0..3 {
        loader.set_epoch(epoch);
        let mut per_class: BTreeMap<usize, usize> = BTreeMap::new();
        let mut batches = 0;
        for batch in loader.iter() {
            let batch = batch.unwrap();
            assert_eq!(batch.len(), 6);
            for (_, label) in batch {
                *per_class.entry(label).or_default() += 1;
            }
            batches += 1;
        }
        assert_eq!(batches, 9);
        assert_eq!(per_class, BTreeMap::from([(0, 18), (1, 18), (2, 18)]));
    }
}

#[test]
fn test_subset_is_resolved_before_sampling() {
    let dataset = long_tail();
    // Keep the first half of every class.
    let keep: Vec<usize> = dataset
        .class_indices()
        .values()
        .flat_map(|members| members[..members.len() / 2].to_vec())
        .collect();
    let subset = Subset::new(dataset, keep).unwrap();
    assert_eq!(subset.len(), 28);
    assert_eq!(subset.class_indices()[&0], vec![0, 1]);

    let config = SamplerConfig::new(4).with_efficient_mode(false);
    let mut sampler = BalancedSampler::new(&subset, &config, StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(sampler.num_trials(), 28 / 3);
    for index in sampler.iter() {
        assert!(index < subset.len());
    }
}

#[test]
fn test_evaluation_loader_visits_every_item_once() {
    let dataset = long_tail();
    let len = dataset.len();
    let mut loader = DataLoader::new(dataset, 8, SequentialSampler::new(len), false, None).unwrap();
    let seen: usize = loader.iter().map(|batch| batch.unwrap().len()).sum();
    assert_eq!(seen, len);
    assert_eq!(loader.num_batches(), 7);
}
