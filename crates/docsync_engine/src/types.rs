use std::fmt;

/// Raw HTTP body plus what we learned about the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Converted document for one source, ready for the change decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub source_id: String,
    pub content: String,
    /// Hex SHA-256 of `content`.
    pub content_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        self.kind.category()
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    MissingContentType,
    ContentTooShort { min_bytes: usize, actual: usize },
    ConvertedTooShort { min_chars: usize, actual: usize },
    Decode,
    Network,
}

/// Error classes surfaced per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Connection failures and timeouts; retried.
    Network,
    /// Non-2xx status; retried.
    Http(HttpClass),
    /// Bad or implausible content; never retried.
    Content,
    /// Local write failures.
    FileSystem,
    /// Anything else that went wrong while fetching; never retried.
    Parsing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpClass {
    Client,
    Server,
    Other,
}

impl HttpClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

impl FailureKind {
    pub fn category(&self) -> FailureCategory {
        match self {
            FailureKind::Network | FailureKind::Timeout => FailureCategory::Network,
            FailureKind::HttpStatus(code) => FailureCategory::Http(HttpClass::from_status(*code)),
            FailureKind::TooLarge { .. }
            | FailureKind::UnsupportedContentType { .. }
            | FailureKind::MissingContentType
            | FailureKind::ContentTooShort { .. }
            | FailureKind::ConvertedTooShort { .. } => FailureCategory::Content,
            FailureKind::InvalidUrl
            | FailureKind::RedirectLimitExceeded
            | FailureKind::Decode => FailureCategory::Parsing,
        }
    }

    /// Only transient transport and status failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            FailureCategory::Network | FailureCategory::Http(_)
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => match HttpClass::from_status(*code) {
                HttpClass::Client => write!(f, "client error {code}"),
                HttpClass::Server => write!(f, "server error {code}"),
                HttpClass::Other => write!(f, "http error {code}"),
            },
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::MissingContentType => write!(f, "missing content type"),
            FailureKind::ContentTooShort { min_bytes, actual } => {
                write!(f, "content too short ({actual} bytes, need {min_bytes})")
            }
            FailureKind::ConvertedTooShort { min_chars, actual } => {
                write!(f, "converted content too short ({actual} chars, need {min_chars})")
            }
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCategory::Network => write!(f, "network"),
            FailureCategory::Http(HttpClass::Client) => write!(f, "http (client)"),
            FailureCategory::Http(HttpClass::Server) => write!(f, "http (server)"),
            FailureCategory::Http(HttpClass::Other) => write!(f, "http"),
            FailureCategory::Content => write!(f, "content"),
            FailureCategory::FileSystem => write!(f, "file system"),
            FailureCategory::Parsing => write!(f, "parsing"),
        }
    }
}
