//! End-to-end gating behavior through the public API: a config goes in, and
//! the substitution table is attached exactly when every gate passes.

use kernels_config::{
    apply_kernels, apply_kernels_checked, configure_kernels_checked, Backend, KernelsStatus,
    ModelArguments, ModelConfig, NoopRuntime, SkipReason, StaticRuntime, SUPPORTED_MODEL_TYPES,
};

fn enabled() -> ModelArguments {
    ModelArguments::new().with_hf_kernels(true)
}

#[test]
fn disabled_runs_never_touch_the_config() {
    for model_type in SUPPORTED_MODEL_TYPES {
        let mut config = ModelConfig::new(*model_type);
        apply_kernels(&mut config, &ModelArguments::new());
        assert!(config.kernels_config.is_none(), "{model_type}");
    }
}

#[test]
fn unsupported_model_is_skipped_quietly() {
    let mut config = ModelConfig::new("bert");
    apply_kernels(&mut config, &enabled());
    assert!(config.kernels_config.is_none());
}

#[test]
fn qwen3_gets_the_default_table() {
    let mut config = ModelConfig::new("qwen3");
    apply_kernels(&mut config, &enabled());

    let mapping = config.kernels_config.as_ref().expect("table attached");
    let silu = mapping.get("SiLU").expect("SiLU entry");
    let rms_norm = mapping.get("RMSNorm").expect("RMSNorm entry");
    assert!(!silu.is_empty());
    assert!(!rms_norm.is_empty());
    assert_eq!(
        rms_norm.get(&Backend::Cuda).unwrap().to_string(),
        "kernels-community/liger_kernels:LigerRMSNorm"
    );
}

#[test]
fn stale_runtime_blocks_attachment() {
    let mut config = ModelConfig::new("qwen3");
    let stale = StaticRuntime::parse("4.57.1").unwrap();
    apply_kernels_checked(&mut config, &enabled(), &stale);
    assert!(config.kernels_config.is_none());

    let missing = NoopRuntime;
    apply_kernels_checked(&mut config, &enabled(), &missing);
    assert!(config.kernels_config.is_none());
}

#[test]
fn recent_runtime_allows_attachment() {
    let mut config = ModelConfig::new("qwen2_5_vl");
    let runtime = StaticRuntime::parse("5.1.0").unwrap();
    apply_kernels_checked(&mut config, &enabled(), &runtime);
    assert!(config.kernels_config.is_some());
}

#[test]
fn checked_outcome_names_the_versions() {
    let mut config = ModelConfig::new("qwen3");
    let stale = StaticRuntime::parse("4.57.1").unwrap();
    let status = configure_kernels_checked(&mut config, &enabled(), &stale).unwrap();

    match status {
        KernelsStatus::Skipped(SkipReason::RuntimeTooOld { found, required }) => {
            assert_eq!(found.unwrap().to_string(), "4.57.1");
            assert_eq!(required.to_string(), "5.0.0rc0");
        }
        other => panic!("expected RuntimeTooOld, got {other:?}"),
    }
}

#[test]
fn applying_twice_is_idempotent() {
    let mut config = ModelConfig::new("llama");
    apply_kernels(&mut config, &enabled());
    let first = config.kernels_config.clone();
    assert!(first.is_some());

    apply_kernels(&mut config, &enabled());
    assert_eq!(config.kernels_config, first);
}

#[test]
fn attached_table_survives_a_pipeline_round_trip() {
    let raw = r#"{"model_type":"qwen3","hidden_size":2048,"num_hidden_layers":28}"#;
    let mut config = ModelConfig::from_json(raw).unwrap();
    apply_kernels(&mut config, &enabled());

    let json = config.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["hidden_size"], serde_json::json!(2048));
    assert_eq!(
        value["kernels_config"]["SiLU"]["cuda"],
        serde_json::json!("kernels-community/activations:SiLU")
    );

    let back = ModelConfig::from_json(&json).unwrap();
    assert_eq!(back, config);
}
