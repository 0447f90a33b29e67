//! Built-in source list and source-file parsing.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// SDK documentation pages mirrored when no source file is given.
pub const SDK_PAGES: &[&str] = &[
    "https://docs.workato.com/en/developing-connectors/sdk/cli.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/download-streaming-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/methods.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/multistep-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/pick_lists.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/test.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/triggers.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/cli/upload-streaming-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/getting-started.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/rspec/connector_spec.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/rspec/enable-ci-cd-on-github.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/rspec/file_streaming.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/rspec/vcr.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/rspec/writing_tests.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/security-guidelines.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/guides/troubleshooting.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/reference/cli-commands.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/reference/cli-project-directory-reference.html",
    "https://docs.workato.com/en/developing-connectors/sdk/cli/reference/rspec-commands.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/advanced-connector-guide/connector-building-building-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/advanced-connector-guide/connector-building-building-triggers.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/advanced-connector-guide/connector-building-code-patterns.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/advanced-connector-guide/connector-building-defining-schema.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/advanced-connector-guide/connector-planning.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/advanced-connector-guide/introduction.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/api-key.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/aws_auth.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/basic-authentication.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/header-auth.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/jwt.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/multi_auth.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/oauth/auth-code-pkce.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/oauth/auth-code.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/oauth/client-credentials.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/oauth/ropc.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/authentication/on-prem.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/best-practices.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/create-objects.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/custom-action.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/get-objects.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/multi-threaded-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/multistep-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/streaming.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/streaming/download-stream.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/streaming/upload-stream-chunk-id.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/streaming/upload-stream-content-range.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/update-objects.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-actions/wait-for-resume-actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-triggers.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-triggers/dynamic-webhook.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-triggers/hybrid-triggers.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-triggers/poll.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-triggers/securing-webhooks.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/building-triggers/static-webhook.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/config_fields.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/data-formats.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/data-formats/form-url-encoded.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/data-formats/json-format.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/data-formats/request_format_multipart_form.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/data-formats/xml-format.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/debugging.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/error-handling.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/examples.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/trigger-limit.html",
    "https://docs.workato.com/en/developing-connectors/sdk/guides/walkthrough.html",
    "https://docs.workato.com/en/developing-connectors/sdk/limits.html",
    "https://docs.workato.com/en/developing-connectors/sdk/quickstart.html",
    "https://docs.workato.com/en/developing-connectors/sdk/quickstart/FAQ.html",
    "https://docs.workato.com/en/developing-connectors/sdk/quickstart/debugging.html",
    "https://docs.workato.com/en/developing-connectors/sdk/quickstart/sharing.html",
    "https://docs.workato.com/en/developing-connectors/sdk/quickstart/version-control.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/actions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/connection.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/connection/authorization.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/custom-action.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/http.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/methods.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/object_definitions.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/picklists.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/ruby_methods.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/schema.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/streams.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/test.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/triggers.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference/whitelist-removal.html",
];

/// Starting points for link discovery.
pub const CRAWL_ENTRY_POINTS: &[&str] = &[
    "https://docs.workato.com/en/developing-connectors/sdk.html",
    "https://docs.workato.com/en/developing-connectors/sdk/sdk-reference.html",
    "https://docs.workato.com/en/developing-connectors/sdk/platform-quickstart.html",
];

pub const DOCS_ORIGIN: &str = "https://docs.workato.com";

pub fn default_sources() -> Vec<String> {
    SDK_PAGES.iter().map(|url| url.to_string()).collect()
}

/// One URL per line. Blank lines and `#` comments are skipped, duplicates
/// keep their first position.
pub fn parse_source_list(text: &str) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !sources.iter().any(|known| known == line) {
            sources.push(line.to_string());
        }
    }
    sources
}

pub fn load_source_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read source list {}", path.display()))?;
    Ok(parse_source_list(&text))
}
