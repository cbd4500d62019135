use folderstat_core::{
    ExtensionFilter, ExtensionKey, ExtensionStat, IgnoreSet, ScanConfig, ScanResult, format_size,
};
use std::collections::BTreeMap;

#[test]
fn test_extension_key_ordering_is_lexicographic() {
    let mut keys = vec![
        ExtensionKey::from_file_name("b.zip"),
        ExtensionKey::no_extension(),
        ExtensionKey::from_file_name("a.TXT"),
        ExtensionKey::from_file_name("c.avi"),
    ];
    keys.sort();

    let ordered: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
    assert_eq!(ordered, vec![".avi", ".txt", ".zip", "no_extension"]);
}

#[test]
fn test_extension_key_serializes_as_plain_string() {
    let key = ExtensionKey::from_file_name("Report.PDF");
    assert_eq!(serde_json::to_string(&key).unwrap(), "\".pdf\"");
}

#[test]
fn test_scan_result_serialization_roundtrip() {
    let mut map = BTreeMap::new();
    map.insert(
        ExtensionKey::from_file_name("x.rs"),
        ExtensionStat { count: 4, total_bytes: 4096 },
    );
    let result = ScanResult::from_stats(map, Vec::new());

    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("warnings"));

    let back: ScanResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_config_serializes_with_filter() {
    let config = ScanConfig::builder()
        .root("/data")
        .allowed_extensions(ExtensionFilter::parse("jpg,png"))
        .ignore(IgnoreSet::empty().with("target"))
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: ScanConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back.root, config.root);
    assert_eq!(back.allowed_extensions, config.allowed_extensions);
    assert!(back.should_ignore("target"));
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/srv"}"#).unwrap();
    assert!(config.should_ignore("node_modules"));
    assert!(config.allowed_extensions.is_none());
    assert_eq!(config.threads, 0);
}

#[test]
fn test_format_size_matches_totals() {
    let mut map = BTreeMap::new();
    map.insert(
        ExtensionKey::from_file_name("a.bin"),
        ExtensionStat { count: 1, total_bytes: 1536 },
    );
    let result = ScanResult::from_stats(map, Vec::new());
    assert_eq!(format_size(result.total_bytes), "1.50 KB");
}

#[test]
fn test_config_deserializes_unnormalized_filter() {
    let config: ScanConfig = serde_json::from_str(
        r#"{"root": "/srv", "allowed_extensions": {"allowed": ["JPG", "png"]}}"#,
    )
    .unwrap();

    assert!(config.should_count(&ExtensionKey::from_file_name("holiday.jpg")));
    assert!(config.should_count(&ExtensionKey::from_file_name("icon.PNG")));
    assert!(!config.should_count(&ExtensionKey::from_file_name("notes.txt")));
}
