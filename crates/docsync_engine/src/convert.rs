use crate::extract::{DocsContentExtractor, Extractor};

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Turns a fetched HTML page into the Markdown document that gets persisted.
pub trait DocumentTransform: Send + Sync {
    fn transform(&self, html: &str, source_url: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSettings {
    /// First-level heading of every document; the page title is used when unset.
    pub heading: Option<String>,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            heading: Some("SDK Documentation".to_string()),
        }
    }
}

/// Extract, convert, then normalize.
pub struct MarkdownTransform<E = DocsContentExtractor, C = Html2MdConverter> {
    extractor: E,
    converter: C,
    settings: TransformSettings,
}

impl MarkdownTransform {
    pub fn new(settings: TransformSettings) -> Self {
        Self::with_parts(DocsContentExtractor::default(), Html2MdConverter, settings)
    }
}

impl<E: Extractor, C: Converter> MarkdownTransform<E, C> {
    pub fn with_parts(extractor: E, converter: C, settings: TransformSettings) -> Self {
        Self {
            extractor,
            converter,
            settings,
        }
    }
}

impl<E: Extractor, C: Converter> DocumentTransform for MarkdownTransform<E, C> {
    fn transform(&self, html: &str, source_url: &str) -> String {
        let extracted = self.extractor.extract(html);
        let body = self.converter.to_markdown(&extracted.content_html);
        let heading = self
            .settings
            .heading
            .as_deref()
            .or(extracted.title.as_deref())
            .unwrap_or("Documentation");
        post_process(&body, heading, source_url)
    }
}

/// Prepend the provenance header and tidy blank lines.
///
/// Output is a pure function of its inputs: no fetch time is embedded, so an
/// unchanged page converts to byte-identical Markdown on every run.
pub fn post_process(markdown: &str, heading: &str, source_url: &str) -> String {
    let heading_line = format!("# {heading}");
    let source_line = format!("> **Source**: {source_url}");
    let mut lines: Vec<&str> = vec![&heading_line, "", &source_line, "", "---", ""];

    let mut in_code_block = false;
    let mut body_started = false;
    for line in markdown.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
        }
        if !body_started && trimmed.is_empty() {
            continue;
        }
        body_started = true;

        if in_code_block {
            lines.push(line);
            continue;
        }
        if trimmed.is_empty() {
            if lines.last().is_some_and(|last| last.is_empty()) {
                continue;
            }
            lines.push("");
        } else {
            lines.push(line.trim_end());
        }
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::post_process;

    #[test]
    fn header_names_source_and_body_follows_rule() {
        let out = post_process("\n\nHello\n", "Docs", "https://example.com/a.html");
        assert_eq!(
            out,
            "# Docs\n\n> **Source**: https://example.com/a.html\n\n---\n\nHello\n"
        );
    }

    #[test]
    fn blank_runs_collapse_outside_code_blocks_only() {
        let md = "a\n\n\n\nb\n```\nx\n\n\ny\n```\n  \nc";
        let out = post_process(md, "T", "u");
        let body = out.split("---\n\n").nth(1).unwrap();
        assert_eq!(body, "a\n\nb\n```\nx\n\n\ny\n```\n\nc\n");
    }

    #[test]
    fn output_is_stable_across_calls() {
        let md = "# Title\n\nSome text";
        assert_eq!(post_process(md, "T", "u"), post_process(md, "T", "u"));
    }
}
