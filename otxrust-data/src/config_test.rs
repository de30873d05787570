// otxrust-data/src/config_test.rs

use super::*;

#[test]
fn test_repeat_policy_from_str() {
    assert_eq!("auto".parse::<RepeatPolicy>().unwrap(), RepeatPolicy::Auto);
    assert_eq!(" AUTO ".parse::<RepeatPolicy>().unwrap(), RepeatPolicy::Auto);
    assert_eq!("3".parse::<RepeatPolicy>().unwrap(), RepeatPolicy::Fixed(3.0));
    assert_eq!("2.5".parse::<RepeatPolicy>().unwrap(), RepeatPolicy::Fixed(2.5));
}

#[test]
fn test_repeat_policy_rejects_garbage_and_negative() {
    for bad in ["many", "", "-1", "NaN", "inf"] {
        match bad.parse::<RepeatPolicy>() {
            Err(OtxError::InvalidArgument(_)) => {}
            other => panic!("{:?} should be rejected, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_repeat_policy_display() {
    assert_eq!(RepeatPolicy::Auto.to_string(), "auto");
    assert_eq!(RepeatPolicy::Fixed(2.0).to_string(), "2");
}

#[test]
fn test_config_new_defaults() {
    let config = SamplerConfig::new(4);
    assert_eq!(config.samples_per_gpu, 4);
    assert_eq!(config.num_replicas, 1);
    assert_eq!(config.rank, 0);
    assert!(config.shuffle);
    assert!((config.coef + 0.7).abs() < f64::EPSILON);
    assert!((config.min_repeat - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.n_repeats, RepeatPolicy::Auto);
    assert_eq!(config.seed, None);
    assert!(config.efficient_mode);
    assert!(!config.drop_last);
}

#[test]
fn test_config_from_json_applies_defaults() {
    let config = SamplerConfig::from_json(r#"{ "samples_per_gpu": 16 }"#).unwrap();
    assert_eq!(config, SamplerConfig::new(16));
}

#[test]
fn test_config_from_json_full() {
    let json = r#"{
        "samples_per_gpu": 8,
        "num_replicas": 4,
        "rank": 2,
        "shuffle": false,
        "coef": -0.5,
        "min_repeat": 2.0,
        "n_repeats": "auto",
        "seed": 1234,
        "efficient_mode": false,
        "drop_last": true
    }"#;
    let config = SamplerConfig::from_json(json).unwrap();
    assert_eq!(config.num_replicas, 4);
    assert_eq!(config.rank, 2);
    assert!(!config.shuffle);
    assert_eq!(config.n_repeats, RepeatPolicy::Auto);
    assert_eq!(config.seed, Some(1234));
    assert!(!config.efficient_mode);
    assert!(config.drop_last);
    let ctx = config.validate().unwrap();
    assert_eq!(ctx.rank(), 2);
}

#[test]
fn test_config_from_json_numeric_and_text_repeats() {
    let numeric = SamplerConfig::from_json(r#"{"samples_per_gpu": 1, "n_repeats": 2}"#).unwrap();
    assert_eq!(numeric.n_repeats, RepeatPolicy::Fixed(2.0));
    let text = SamplerConfig::from_json(r#"{"samples_per_gpu": 1, "n_repeats": "4"}"#).unwrap();
    assert_eq!(text.n_repeats, RepeatPolicy::Fixed(4.0));
}

#[test]
fn test_config_from_json_rejects_bad_repeats() {
    for json in [
        r#"{"samples_per_gpu": 1, "n_repeats": "often"}"#,
        r#"{"samples_per_gpu": 1, "n_repeats": -3}"#,
        r#"{"samples_per_gpu": 1, "n_repeats": [1]}"#,
    ] {
        match SamplerConfig::from_json(json) {
            Err(OtxError::ConfigParse(_)) => {}
            other => panic!("{} should fail to parse, got {:?}", json, other),
        }
    }
}

#[test]
fn test_config_json_roundtrip_keeps_auto() {
    let config = SamplerConfig::new(2).with_seed(9);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""n_repeats":"auto""#));
    assert_eq!(SamplerConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_config_validate_failures() {
    assert!(SamplerConfig::new(0).validate().is_err());
    assert!(SamplerConfig::new(4).with_min_repeat(0.5).validate().is_err());

    let mut bad_rank = SamplerConfig::new(4);
    bad_rank.num_replicas = 2;
    bad_rank.rank = 2;
    assert!(bad_rank.validate().is_err());

    let mut no_replicas = SamplerConfig::new(4);
    no_replicas.num_replicas = 0;
    assert!(no_replicas.validate().is_err());

    let bad_repeat = SamplerConfig::new(4).with_n_repeats(RepeatPolicy::Fixed(-1.0));
    assert!(bad_repeat.validate().is_err());
}

#[test]
fn test_config_with_distributed() {
    let ctx = DistributedContext::new(8, 5).unwrap();
    let config = SamplerConfig::new(4).with_distributed(ctx);
    assert_eq!(config.num_replicas, 8);
    assert_eq!(config.rank, 5);
    assert_eq!(config.validate().unwrap(), ctx);
}
