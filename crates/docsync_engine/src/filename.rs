use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Rules that map a source URL path onto a flat Markdown filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    /// Prefixes removed from the flattened name; the longest match is stripped.
    pub strip_prefixes: Vec<String>,
    /// Bare names that would be ambiguous on their own.
    pub reserved_names: Vec<String>,
    /// Appended to a reserved bare name.
    pub reserved_suffix: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            strip_prefixes: vec![
                "en__developing-connectors__sdk__".to_string(),
                "en__developing-connectors__".to_string(),
            ],
            reserved_names: vec!["sdk".to_string()],
            reserved_suffix: "-overview".to_string(),
        }
    }
}

const PATH_SEPARATOR_REPLACEMENT: &str = "__";

impl OutputNaming {
    /// Deterministic output identifier for `source_url`.
    ///
    /// Only the path takes part: `https://host/a/b/page.html?x#y` becomes
    /// `a__b__page.md`.
    pub fn output_id(&self, source_url: &str) -> String {
        let path = url_path(source_url);
        let trimmed = path.trim_matches('/');
        let trimmed = trimmed.strip_suffix(".html").unwrap_or(trimmed);

        let mut filename = trimmed.replace('/', PATH_SEPARATOR_REPLACEMENT);

        let mut prefixes: Vec<&str> = self.strip_prefixes.iter().map(String::as_str).collect();
        prefixes.sort_by_key(|prefix| std::cmp::Reverse(prefix.len()));
        if let Some(rest) = prefixes
            .iter()
            .find_map(|prefix| filename.strip_prefix(prefix))
        {
            filename = rest.to_string();
        }

        if self.reserved_names.iter().any(|name| *name == filename) {
            filename.push_str(&self.reserved_suffix);
        }

        if !filename.ends_with(".md") {
            filename.push_str(".md");
        }
        filename
    }
}

/// Derive the output identifier with the default naming rules.
pub fn derive_output_id(source_url: &str) -> String {
    OutputNaming::default().output_id(source_url)
}

/// The path exactly as written in `source_url`: no percent-encoding and no
/// dot-segment resolution. Input without a scheme is taken as a bare path.
fn url_path(source_url: &str) -> &str {
    let end = source_url.find(['?', '#']).unwrap_or(source_url.len());
    let without_query = &source_url[..end];
    match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => without_query,
    }
}

/// Hex-encoded SHA-256 of the UTF-8 bytes of `content`.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

/// A name we are willing to write into the output directory.
pub fn is_valid_output_id(output_id: &str) -> bool {
    output_id.len() > ".md".len()
        && output_id.ends_with(".md")
        && !output_id.contains(['/', '\\', '\0'])
}
