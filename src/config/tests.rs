use std::fs;

use tempfile::tempdir;

use super::{ConfigError, ViewerConfig, load_config, save_config};
use crate::slice::RatioPolicy;
use crate::view::Viewport;

#[test]
fn default_config_is_valid() {
    let config = ViewerConfig::default();
    config.validate().expect("valid");
    assert_eq!(config.history_capacity, None);
    assert_eq!(config.ratio_policy, RatioPolicy::Zero);
}

#[test]
fn yaml_overrides_only_listed_fields() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("viewer.yml");
    fs::write(
        &path,
        "history_capacity: 50\nratio_policy: propagate\naxial_viewport:\n  width: 800\n  height: 600\n",
    )
    .expect("write");

    let config = load_config(&path).expect("load");
    assert_eq!(config.history_capacity, Some(50));
    assert_eq!(config.ratio_policy, RatioPolicy::Propagate);
    assert_eq!(config.axial_viewport, Viewport::new(800, 600));
    assert_eq!(config.coronal_viewport, Viewport::default());
    assert_eq!(config.pan_sessions, ViewerConfig::default().pan_sessions);
}

#[test]
fn json_round_trips_through_save() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("viewer.json");
    let config = ViewerConfig {
        erase_radius: 4.5,
        wheel_zoom_per_notch: 0.1,
        ..ViewerConfig::default()
    };
    save_config(&path, &config).expect("save");
    assert_eq!(load_config(&path).expect("load"), config);
}

#[test]
fn zero_history_capacity_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("viewer.json");
    fs::write(&path, r#"{"history_capacity": 0}"#).expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn invalid_tunables_are_rejected() {
    let cases = [
        ViewerConfig {
            pan_sessions: 0,
            ..ViewerConfig::default()
        },
        ViewerConfig {
            pan_sessions: 1,
            ..ViewerConfig::default()
        },
        ViewerConfig {
            wheel_zoom_per_notch: f32::NAN,
            ..ViewerConfig::default()
        },
        ViewerConfig {
            erase_radius: -1.0,
            ..ViewerConfig::default()
        },
        ViewerConfig {
            coronal_viewport: Viewport::new(0, 10),
            ..ViewerConfig::default()
        },
    ];
    for config in cases {
        assert!(config.validate().is_err(), "{config:?}");
    }
}

#[test]
fn malformed_files_surface_parse_errors() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("viewer.yaml");
    fs::write(&path, "history_capacity: [oops").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::SerdeYaml(_))));
    assert!(matches!(
        load_config(dir.path().join("missing.json")),
        Err(ConfigError::Io(_))
    ));
}
