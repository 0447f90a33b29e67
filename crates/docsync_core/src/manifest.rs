use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::RunStats;

/// Record of one persisted output file.
///
/// The output identifier is the key under which the entry lives in
/// [`Manifest::files`]. `hash` always describes the content currently on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub original_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hash: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMethod {
    #[default]
    HardcodedUrls,
    Crawl,
}

/// Statistics of the run that last wrote the manifest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunMetadata {
    pub last_fetch_completed: String,
    pub fetch_duration_seconds: f64,
    pub pages_processed: usize,
    pub pages_saved_successfully: usize,
    pub pages_failed: usize,
    pub new_files: usize,
    pub updated_files: usize,
    pub unchanged_files: usize,
    pub total_files: usize,
    pub has_meaningful_changes: bool,
    pub fetch_tool_version: String,
    pub fetch_method: FetchMethod,
}

impl RunMetadata {
    pub fn from_stats(
        stats: &RunStats,
        total_files: usize,
        fetch_duration_seconds: f64,
        completed_at: impl Into<String>,
        tool_version: impl Into<String>,
        fetch_method: FetchMethod,
    ) -> Self {
        Self {
            last_fetch_completed: completed_at.into(),
            fetch_duration_seconds,
            pages_processed: stats.processed,
            pages_saved_successfully: stats.succeeded,
            pages_failed: stats.failed,
            new_files: stats.new,
            updated_files: stats.updated,
            unchanged_files: stats.unchanged,
            total_files,
            has_meaningful_changes: stats.has_meaningful_changes(),
            fetch_tool_version: tool_version.into(),
            fetch_method,
        }
    }
}

/// Publication labels stamped into the manifest for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestLabels {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_label"
    )]
    pub base_url: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_label"
    )]
    pub github_repository: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_label"
    )]
    pub github_ref: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_label"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_label"
    )]
    pub source: Option<String>,
}

impl ManifestLabels {
    /// Labels for a mirror published from `repository` at `git_ref`; `base_url`
    /// points at the raw `docs/` directory of that ref.
    pub fn for_repository(
        repository: &str,
        git_ref: &str,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            base_url: Some(format!(
                "https://raw.githubusercontent.com/{repository}/{git_ref}/docs/"
            )),
            github_repository: Some(repository.to_string()),
            github_ref: Some(git_ref.to_string()),
            description: Some(description.into()),
            source: Some(source.into()),
        }
    }
}

/// Durable record of every persisted output file.
///
/// Deserialization is lenient below the top level: a malformed entry is
/// dropped on its own, and unusable run metadata or labels read as absent, so
/// one odd field never discards the whole manifest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "lenient_files")]
    pub files: BTreeMap<String, ManifestEntry>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub last_updated: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_metadata"
    )]
    pub fetch_metadata: Option<RunMetadata>,
    #[serde(flatten)]
    pub labels: ManifestLabels,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, output_id: &str) -> Option<&ManifestEntry> {
        self.files.get(output_id)
    }

    /// Hash recorded for `output_id`, or the empty string for an unknown item.
    pub fn prior_hash(&self, output_id: &str) -> &str {
        self.files
            .get(output_id)
            .map(|entry| entry.hash.as_str())
            .unwrap_or("")
    }

    pub fn record(&mut self, output_id: impl Into<String>, entry: ManifestEntry) {
        self.files.insert(output_id.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Strings read as themselves; `null` and other shapes read as empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned).unwrap_or_default())
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

fn lenient_metadata<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RunMetadata>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(RunMetadata::deserialize(value).ok())
}

fn lenient_files<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, ManifestEntry>, D::Error> {
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(output_id, entry)| {
            ManifestEntry::deserialize(entry)
                .ok()
                .map(|entry| (output_id, entry))
        })
        .collect())
}
