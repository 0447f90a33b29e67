//! Docsync engine: fetch, convert, compare and persist documentation pages.
mod config;
mod convert;
mod crawl;
mod decode;
mod extract;
mod fetch;
mod filename;
mod manifest;
mod persist;
mod retry;
mod source;
mod sync;
mod types;

pub use config::{utc_clock, Clock, ContentLimits, SyncConfig};
pub use convert::{
    post_process, Converter, DocumentTransform, Html2MdConverter, MarkdownTransform,
    TransformSettings,
};
pub use crawl::{extract_links, CrawlSettings, Crawler};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use extract::{DocsContentExtractor, ExtractedContent, Extractor, DEFAULT_CONTENT_SELECTORS};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{content_hash, derive_output_id, is_valid_output_id, OutputNaming};
pub use manifest::{load_manifest, ManifestError, ManifestStore, MANIFEST_FILENAME};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use source::{ContentSource, DocumentSource};
pub use sync::{ItemError, ItemReport, RunSummary, SyncOrchestrator};
pub use types::{
    FailureCategory, FailureKind, FetchError, FetchOutput, FetchResult, HttpClass,
    ResponseMetadata,
};
