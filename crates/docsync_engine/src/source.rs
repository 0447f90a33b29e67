use engine_logging::engine_info;

use crate::config::{ContentLimits, SyncConfig};
use crate::decode::decode_html;
use crate::filename::content_hash;
use crate::{
    retry_with_backoff, DocumentTransform, FailureKind, FetchError, FetchResult, Fetcher,
    MarkdownTransform, ReqwestFetcher, RetryPolicy,
};

/// Resolves a source identifier to converted, hashed content.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, source_id: &str) -> Result<FetchResult, FetchError>;
}

/// Fetch, validate, transform and hash one document, with retries around the
/// whole sequence.
pub struct DocumentSource<F = ReqwestFetcher, T = MarkdownTransform> {
    fetcher: F,
    transform: T,
    limits: ContentLimits,
    retry: RetryPolicy,
}

impl DocumentSource {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            ReqwestFetcher::new(config.fetch.clone()),
            MarkdownTransform::new(config.transform.clone()),
            config.limits,
            config.retry,
        )
    }
}

impl<F: Fetcher, T: DocumentTransform> DocumentSource<F, T> {
    pub fn new(fetcher: F, transform: T, limits: ContentLimits, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            transform,
            limits,
            retry,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// One attempt, no retries.
    pub async fn fetch_once(&self, url: &str) -> Result<FetchResult, FetchError> {
        engine_info!("Fetching: {}", url);
        let output = self.fetcher.fetch(url).await?;

        if output.bytes.len() < self.limits.min_raw_bytes {
            return Err(FetchError::new(
                FailureKind::ContentTooShort {
                    min_bytes: self.limits.min_raw_bytes,
                    actual: output.bytes.len(),
                },
                format!("content too short for {url} (possibly empty page)"),
            ));
        }

        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, format!("{url}: {err}")))?;

        let markdown = self.transform.transform(&decoded.html, url);
        let converted_len = markdown.trim().chars().count();
        if converted_len < self.limits.min_markdown_chars {
            return Err(FetchError::new(
                FailureKind::ConvertedTooShort {
                    min_chars: self.limits.min_markdown_chars,
                    actual: converted_len,
                },
                format!("converted content too short for {url}"),
            ));
        }

        Ok(FetchResult {
            source_id: url.to_string(),
            content_hash: content_hash(&markdown),
            content: markdown,
        })
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, T: DocumentTransform> ContentSource for DocumentSource<F, T> {
    async fn fetch(&self, source_id: &str) -> Result<FetchResult, FetchError> {
        retry_with_backoff(&self.retry, source_id, || self.fetch_once(source_id)).await
    }
}
