use featherview_core::config::WindowConfig;
use featherview_core::consts::DEFAULT_WINDOW_SIZE;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[test]
fn test_parse_size_and_maximized() {
    let config = WindowConfig::from_json_str(r#"{"size":[1024,768],"maximized":false}"#);
    assert_eq!(config.size, Some([1024, 768]));
    assert!(!config.maximized);
    assert!(config.extra.is_empty());
    assert_eq!(config.initial_size(), [1024, 768]);
}

#[test]
fn test_parse_maximized_without_size() {
    let config = WindowConfig::from_json_str(r#"{"maximized":true}"#);
    assert_eq!(config.size, None);
    assert!(config.maximized);
    assert_eq!(config.initial_size(), DEFAULT_WINDOW_SIZE);
}

#[test]
fn test_malformed_document_gives_defaults() {
    assert_eq!(WindowConfig::from_json_str("{\"size\": [1024,"), WindowConfig::default());
    assert_eq!(WindowConfig::from_json_str(""), WindowConfig::default());
}

#[test]
fn test_non_object_document_gives_defaults() {
    assert_eq!(WindowConfig::from_json_str("[1024, 768]"), WindowConfig::default());
    assert_eq!(WindowConfig::from_json_str("42"), WindowConfig::default());
}

#[test]
fn test_malformed_size_keeps_other_keys() {
    let config = WindowConfig::from_json_str(r#"{"size":"big","maximized":true}"#);
    assert_eq!(config.size, None);
    assert!(config.maximized);
    assert!(!config.extra.contains_key("size"));
}

#[test]
fn test_negative_size_is_ignored() {
    let config = WindowConfig::from_json_str(r#"{"size":[-1,600]}"#);
    assert_eq!(config.size, None);
}

#[test]
fn test_unknown_keys_are_kept() {
    let config = WindowConfig::from_json_str(r#"{"maximized":true,"theme":"dark"}"#);
    assert_eq!(
        config.extra.get("theme"),
        Some(&serde_json::Value::String("dark".into()))
    );
}

#[test]
fn test_tiny_size_is_not_used() {
    let config = WindowConfig::from_json_str(r#"{"size":[40,30]}"#);
    assert_eq!(config.size, Some([40, 30]));
    assert_eq!(config.window_size(), None);
    assert_eq!(config.initial_size(), DEFAULT_WINDOW_SIZE);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_output_is_indented_with_sorted_keys() {
    let mut config = WindowConfig::from_json_str(r#"{"zoom":2,"size":[1024,768]}"#);
    config.maximized = true;
    let text = config.to_json_string().unwrap();

    assert!(text.starts_with("{\n  \"maximized\": true,"), "{text}");
    let maximized = text.find("\"maximized\"").unwrap();
    let size = text.find("\"size\"").unwrap();
    let zoom = text.find("\"zoom\"").unwrap();
    assert!(maximized < size && size < zoom, "{text}");
}

#[test]
fn test_missing_size_is_not_written() {
    let text = WindowConfig::default().to_json_string().unwrap();
    assert!(!text.contains("size"));
    assert!(text.contains("\"maximized\": false"));
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FeatherView").join("config");

    let mut config = WindowConfig::from_json_str(r#"{"theme":"dark"}"#);
    config.size = Some([1280, 720]);
    config.maximized = true;
    config.save(&path).unwrap();

    assert!(path.exists());
    assert_eq!(WindowConfig::load(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = WindowConfig::load(&dir.path().join("nope"));
    assert_eq!(config, WindowConfig::default());
}

#[test]
fn test_corrupt_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    std::fs::write(&path, "not json at all").unwrap();
    assert_eq!(WindowConfig::load(&path), WindowConfig::default());
}
