//! Error types produced by the batch pipeline.
//!
//! Per-item failures ([`ItemError`], [`TransportError`]) are captured inside
//! result records and never abort a batch. Request-level failures
//! ([`BatchError`], [`ExportError`]) are converted into HTTP errors by
//! [`crate::error::AppError`].

use std::fmt;

use crate::utils::text::truncate_chars;

/// Longest transport/encoding detail carried into a user-facing reason.
pub const MAX_REASON_DETAIL: usize = 50;

/// Classification of an outbound call that never produced an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connection,
    Decode,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "Request timed out",
            Self::Connection => "Connection failed",
            Self::Decode => "Malformed response",
            Self::Other => "Request error",
        };
        f.write_str(label)
    }
}

/// Failure of the transport layer itself (timeout, refused connection, ...).
///
/// The detail message is truncated on construction so it can be shown to
/// users as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl AsRef<str>) -> Self {
        Self {
            kind,
            detail: truncate_chars(detail.as_ref(), MAX_REASON_DETAIL),
        }
    }

    pub fn timeout(detail: impl AsRef<str>) -> Self {
        Self::new(TransportErrorKind::Timeout, detail)
    }

    pub fn connection(detail: impl AsRef<str>) -> Self {
        Self::new(TransportErrorKind::Connection, detail)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // the kind alone says everything useful about a timeout
            TransportErrorKind::Timeout => write!(f, "{}", self.kind),
            _ if self.detail.is_empty() => write!(f, "{}", self.kind),
            _ => write!(f, "{}: {}", self.kind, self.detail),
        }
    }
}

/// Why a single work item failed. Rendered into the record's reason field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// Provider answered with an unexpected status code.
    #[error("{}", upstream_reason(.status, .message.as_deref()))]
    Upstream { status: u16, message: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Provider body could not be parsed.
    #[error("Unparseable API response: {0}")]
    Encoding(String),

    /// Provider accepted the request but returned no usable short link.
    #[error("Unexpected API response format")]
    MissingShortLink,

    #[error("Missing required parameter")]
    MissingParameter,

    /// Link id that would not stay a single path segment.
    #[error("Invalid link id")]
    InvalidLinkId,
}

impl ItemError {
    /// Rejection of a create call, with a hint for statuses users can act on.
    pub fn rejected(status: u16) -> Self {
        let hint = match status {
            400 => Some("invalid URL format"),
            401 => Some("invalid API key"),
            429 => Some("rate limit exceeded"),
            _ => None,
        };

        Self::Upstream {
            status,
            message: hint.map(|h| format!("HTTP {status}: {h}")),
        }
    }

    /// Rejection carrying whatever message the provider supplied.
    pub fn upstream(status: u16, message: Option<String>) -> Self {
        Self::Upstream {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    pub fn encoding(detail: impl AsRef<str>) -> Self {
        Self::Encoding(truncate_chars(detail.as_ref(), MAX_REASON_DETAIL))
    }
}

fn upstream_reason(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("HTTP {status}"),
    }
}

/// Request-level validation failures of the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Missing API key")]
    MissingCredential,

    #[error("No items to process")]
    EmptyInput,

    #[error("Too many items: {count} (max {max})")]
    TooManyItems { count: usize, max: usize },
}

/// Failures of the CSV and QR/archive exporters.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoExportableData,

    #[error("Generated archive is empty")]
    EmptyArchive,

    #[error("CSV encoding failed: {0}")]
    Csv(String),

    #[error("Archive assembly failed: {0}")]
    Archive(String),

    #[error("QR encoding failed: {0}")]
    Qr(String),
}
