use docsync_core::{
    FetchMethod, ItemOutcome, Manifest, ManifestEntry, ManifestLabels, RunMetadata, RunStats,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn empty_manifest_serializes_with_null_timestamp() {
    let value = serde_json::to_value(Manifest::new()).unwrap();
    assert_eq!(value, json!({ "files": {}, "last_updated": null }));
}

#[test]
fn partial_manifest_fills_defaults() {
    let manifest: Manifest = serde_json::from_str(
        r#"{"files": {"test.md": {"hash": "abc123"}}, "last_updated": "2023-01-01T00:00:00"}"#,
    )
    .unwrap();
    assert_eq!(manifest.prior_hash("test.md"), "abc123");
    assert_eq!(manifest.entry("test.md").unwrap().original_url, "");
    assert_eq!(manifest.last_updated.as_deref(), Some("2023-01-01T00:00:00"));
    assert!(manifest.fetch_metadata.is_none());

    let no_files: Manifest = serde_json::from_str(r#"{"last_updated": null}"#).unwrap();
    assert!(no_files.is_empty());
}

#[test]
fn unknown_items_have_empty_prior_hash() {
    let mut manifest = Manifest::new();
    assert_eq!(manifest.prior_hash("cli.md"), "");
    manifest.record(
        "cli.md",
        ManifestEntry {
            original_url: "https://docs.example.com/en/cli.html".into(),
            hash: "H1".into(),
            last_updated: "2024-01-01T00:00:00Z".into(),
        },
    );
    assert_eq!(manifest.prior_hash("cli.md"), "H1");
    assert_eq!(manifest.len(), 1);
}

#[test]
fn run_metadata_uses_documented_keys() {
    let mut stats = RunStats::default();
    stats.record(ItemOutcome::New);
    stats.record(ItemOutcome::FetchFailed);
    let metadata = RunMetadata::from_stats(
        &stats,
        7,
        1.5,
        "2024-01-01T00:00:00Z",
        "3.0",
        FetchMethod::HardcodedUrls,
    );

    let value = serde_json::to_value(&metadata).unwrap();
    assert_eq!(
        value,
        json!({
            "last_fetch_completed": "2024-01-01T00:00:00Z",
            "fetch_duration_seconds": 1.5,
            "pages_processed": 2,
            "pages_saved_successfully": 1,
            "pages_failed": 1,
            "new_files": 1,
            "updated_files": 0,
            "unchanged_files": 0,
            "total_files": 7,
            "has_meaningful_changes": true,
            "fetch_tool_version": "3.0",
            "fetch_method": "hardcoded_urls"
        })
    );
}

#[test]
fn labels_are_flattened_into_the_top_level_object() {
    let manifest = Manifest {
        labels: ManifestLabels::for_repository(
            "acme/docs-mirror",
            "main",
            "SDK documentation manifest",
            "https://docs.example.com",
        ),
        ..Manifest::default()
    };
    let value = serde_json::to_value(&manifest).unwrap();
    assert_eq!(
        value["base_url"],
        "https://raw.githubusercontent.com/acme/docs-mirror/main/docs/"
    );
    assert_eq!(value["github_repository"], "acme/docs-mirror");
    assert_eq!(value["github_ref"], "main");
    assert_eq!(value["source"], "https://docs.example.com");

    let parsed: Manifest = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.labels, manifest.labels);
}
