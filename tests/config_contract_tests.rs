use macro_charts::GraphError;
use macro_charts::api::{
    AdasSnapshot, GrapherConfig, SCREEN_SNAPSHOT_JSON_SCHEMA_V1, Screen,
    ScreenSnapshotJsonContractV1, SnapshotContract, SolowScreen, SolowSnapshot,
};
use macro_charts::core::Viewport;
use macro_charts::status::SolowStatus;

#[test]
fn empty_json_is_the_default_config() {
    let config = GrapherConfig::from_json_str("{}").expect("defaults");
    assert_eq!(config, GrapherConfig::default());
    assert!(config.shadow_enabled);
    assert_eq!(config.viewport, Viewport::new(900, 520));
    assert_eq!(config.demo.tick_interval_ms, 20);
    assert_eq!(config.demo.max_ticks, 5_000);
    assert!(!config.demo.cancel_on_input);
    assert_eq!(config.world_rate.max_iterations, 10_000);
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let config = GrapherConfig::from_json_str(
        r#"{ "shadow_enabled": false, "demo": { "cancel_on_input": true } }"#,
    )
    .expect("config");
    assert!(!config.shadow_enabled);
    assert!(config.annotation_shadow().is_none());
    assert!(config.demo.cancel_on_input);
    assert_eq!(config.demo.step_divisor, 10.0);
}

#[test]
fn config_json_round_trip() {
    let config = GrapherConfig::default().with_viewport(Viewport::new(640, 480));
    let json = config.to_json_pretty().expect("serialize");
    let restored = GrapherConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored.viewport, Viewport::new(640, 480));
    assert_eq!(restored.shadow_enabled, config.shadow_enabled);
}

#[test]
fn invalid_config_is_rejected() {
    let err = GrapherConfig::from_json_str(r#"{ "viewport": { "width": 0, "height": 10 } }"#)
        .expect_err("zero width");
    assert!(matches!(err, GraphError::InvalidViewport { width: 0, height: 10 }));

    let err = GrapherConfig::from_json_str(r#"{ "demo": { "max_ticks": 0 } }"#)
        .expect_err("zero tick cap");
    assert!(matches!(err, GraphError::InvalidData(_)));

    let err = GrapherConfig::from_json_str("not json").expect_err("garbage");
    assert!(matches!(err, GraphError::InvalidData(_)));
}

#[test]
fn snapshot_contract_carries_version_and_screen() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let json = screen
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("serialize");

    let payload: ScreenSnapshotJsonContractV1<SolowSnapshot> =
        serde_json::from_str(&json).expect("wrapper");
    assert_eq!(payload.schema_version, SCREEN_SNAPSHOT_JSON_SCHEMA_V1);
    assert_eq!(payload.screen, "solow");

    let restored = SolowSnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored.status, SolowStatus::NoError);
    assert_eq!(restored.params, screen.snapshot().params);
}

#[test]
fn compat_parser_accepts_bare_snapshots() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let bare = serde_json::to_string(screen.snapshot()).expect("bare json");
    let restored = SolowSnapshot::from_json_compat_str(&bare).expect("bare parse");
    assert_eq!(restored.series.len(), 3);
}

#[test]
fn compat_parser_rejects_other_screens_and_versions() {
    let screen = SolowScreen::new(GrapherConfig::default()).expect("screen");
    let json = screen
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("serialize");
    assert!(AdasSnapshot::from_json_compat_str(&json).is_err());

    let future = json.replacen(
        "\"schema_version\": 1",
        "\"schema_version\": 2",
        1,
    );
    let err = SolowSnapshot::from_json_compat_str(&future).expect_err("future version");
    assert!(matches!(err, GraphError::InvalidData(message) if message.contains("version")));
}
