use crate::loss::{ConfigError, LossConfig, PacketEventSimulator, ScriptedSource};

#[test]
fn default_probabilities() {
    let cfg = LossConfig::default();
    assert_eq!(cfg.normal_loss, 0.05);
    assert_eq!(cfg.burst_loss, 0.40);
    assert_eq!(cfg.burst_enter, 0.30);
    assert_eq!(cfg.burst_exit, 0.20);
    assert_eq!(cfg.retransmit, 0.60);
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn validate_rejects_out_of_range_and_non_finite() {
    let cfg = LossConfig {
        burst_loss: 1.5,
        ..LossConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::InvalidProbability {
            name: "burst_loss",
            value: 1.5
        })
    );

    let cfg = LossConfig {
        retransmit: -0.1,
        ..LossConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidProbability {
            name: "retransmit",
            ..
        })
    ));

    let cfg = LossConfig {
        normal_loss: f64::NAN,
        ..LossConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_accepts_bounds() {
    let cfg = LossConfig {
        normal_loss: 0.0,
        burst_loss: 1.0,
        burst_enter: 1.0,
        burst_exit: 0.0,
        retransmit: 1.0,
    };
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn try_new_propagates_config_error() {
    let cfg = LossConfig {
        burst_exit: 2.0,
        ..LossConfig::default()
    };
    let err = PacketEventSimulator::try_new(cfg, ScriptedSource::new()).expect_err("invalid");
    assert_eq!(
        err.to_string(),
        "probability `burst_exit` must be within [0, 1], got 2"
    );
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg: LossConfig = serde_json::from_str(r#"{ "burst_loss": 0.9 }"#).expect("parse");
    assert_eq!(cfg.burst_loss, 0.9);
    assert_eq!(cfg.normal_loss, 0.05);
    assert_eq!(cfg.retransmit, 0.60);
}

#[test]
fn unknown_json_field_is_rejected() {
    let res: Result<LossConfig, _> = serde_json::from_str(r#"{ "burst_los": 0.9 }"#);
    assert!(res.is_err());
}
