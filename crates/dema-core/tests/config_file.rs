//! Loading configuration from disk

use dema_core::{Error, StreamConfig};
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dema-core-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_valid_file() {
    let path = scratch_file(
        "valid.json",
        r#"{
            "data_stream_size": 200,
            "noise_level": 0.5,
            "seasonality": 25,
            "window_size": 5,
            "ema_alpha": 0.5,
            "lookback": 5,
            "threshold_factor": 2.0,
            "seed": 99
        }"#,
    );

    let config = StreamConfig::from_path(&path).unwrap();
    assert_eq!(config.data_stream_size, 200);
    assert_eq!(config.seasonality, 25);
    assert_eq!(config.seed, Some(99));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("dema-core-definitely-absent").join("config.json");
    let err = StreamConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_configuration());
}

#[test]
fn malformed_file_is_parse_error() {
    let path = scratch_file("broken.json", "{ \"data_stream_size\": 10,");
    assert!(matches!(StreamConfig::from_path(&path), Err(Error::Parse(_))));
}

#[test]
fn missing_key_in_file() {
    let path = scratch_file(
        "partial.json",
        r#"{ "data_stream_size": 10, "noise_level": 1.0, "seasonality": 5 }"#,
    );
    match StreamConfig::from_path(&path) {
        Err(Error::MissingConfigurationKey(key)) => assert_eq!(key, "window_size"),
        other => panic!("expected missing key, got {other:?}"),
    }
}
