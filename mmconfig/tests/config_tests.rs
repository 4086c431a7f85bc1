use mmconfig::Config;
use serde_yaml::Value;
use tempfile::TempDir;

/// Charge une configuration dans un répertoire temporaire
fn create_test_config() -> (TempDir, Config) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();
    (temp_dir, config)
}

#[test]
fn test_defaults_are_embedded() {
    let (_temp_dir, config) = create_test_config();

    assert_eq!(config.get_u64(&["cache", "ttl_ms"], 0), 300_000);
    assert!(config.get_bool(&["renderer", "hardware", "available"], false));
    assert!(config.get_bool(&["renderer", "prefer_hardware"], false));
    assert_eq!(config.get_optional_u64(&["sources", "rng_seed"]), None);
    assert_eq!(config.get_log_min_level().unwrap(), "INFO");
}

#[test]
fn test_load_writes_merged_file() {
    let (temp_dir, config) = create_test_config();

    let path = temp_dir.path().join("config.yaml");
    assert!(path.exists());
    assert_eq!(config.file_path(), path);
    assert_eq!(config.directory(), temp_dir.path().to_str().unwrap());
}

#[test]
fn test_external_file_overrides_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("config.yaml"),
        "Cache:\n  TTL_ms: 5000\nrenderer:\n  hardware:\n    available: false\n",
    )
    .unwrap();

    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();

    // Clés mises en minuscules, valeurs externes prioritaires
    assert_eq!(config.get_u64(&["cache", "ttl_ms"], 0), 5_000);
    assert!(!config.get_bool(&["renderer", "hardware", "available"], true));
    // Les clés absentes du fichier externe gardent leur valeur par défaut
    assert!(config.get_bool(&["renderer", "prefer_hardware"], false));
}

#[test]
fn test_empty_external_file_keeps_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("config.yaml"), "").unwrap();

    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();
    assert_eq!(config.get_u64(&["cache", "ttl_ms"], 0), 300_000);
}

#[test]
fn test_set_value_is_persisted() {
    let (temp_dir, config) = create_test_config();

    config.set_u64(&["cache", "ttl_ms"], 1_234).unwrap();
    config.set_u64(&["sources", "rng_seed"], 7).unwrap();

    let reloaded = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();
    assert_eq!(reloaded.get_u64(&["cache", "ttl_ms"], 0), 1_234);
    assert_eq!(reloaded.get_optional_u64(&["sources", "rng_seed"]), Some(7));
}

#[test]
fn test_typed_getters_fall_back_on_wrong_type() {
    let (_temp_dir, config) = create_test_config();

    config
        .set_value(&["cache", "ttl_ms"], Value::String("soon".to_string()))
        .unwrap();
    config
        .set_value(&["renderer", "prefer_hardware"], Value::String("maybe".to_string()))
        .unwrap();

    assert_eq!(config.get_u64(&["cache", "ttl_ms"], 42), 42);
    assert!(!config.get_bool(&["renderer", "prefer_hardware"], false));
}

#[test]
fn test_string_values_are_parsed() {
    let (_temp_dir, config) = create_test_config();

    config
        .set_value(&["cache", "ttl_ms"], Value::String("2500".to_string()))
        .unwrap();
    config
        .set_value(&["renderer", "hardware", "available"], Value::String("off".to_string()))
        .unwrap();

    assert_eq!(config.get_u64(&["cache", "ttl_ms"], 0), 2_500);
    assert!(!config.get_bool(&["renderer", "hardware", "available"], true));
}

#[test]
fn test_missing_path_is_an_error() {
    let (_temp_dir, config) = create_test_config();
    assert!(config.get_value(&["does", "not", "exist"]).is_err());
    assert_eq!(config.get_u64(&["does", "not", "exist"], 9), 9);
}

#[test]
fn test_log_level_roundtrip() {
    let (_temp_dir, config) = create_test_config();
    config.set_log_min_level("DEBUG".to_string()).unwrap();
    assert_eq!(config.get_log_min_level().unwrap(), "DEBUG");
}
