//! DTOs for the shorten, lookup and update endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{BatchRecord, LinkChange, ResultSet, Summary};

/// Request to shorten a list of long URLs.
///
/// `api_key` may be omitted when the `X-API-Key` header is sent instead.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = 256))]
    pub api_key: Option<String>,

    #[serde(default)]
    pub urls: Vec<String>,
}

/// Request to look up (or resolve) a list of short links.
#[derive(Debug, Deserialize, Validate)]
pub struct LinksRequest {
    #[serde(default)]
    #[validate(length(max = 256))]
    pub api_key: Option<String>,

    #[serde(default)]
    pub links: Vec<String>,
}

/// Request to change the targets of existing links.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequest {
    #[serde(default)]
    #[validate(length(max = 256))]
    pub api_key: Option<String>,

    #[serde(default)]
    pub changes: Vec<LinkChange>,
}

/// Results of one batch in input order, with counts.
#[derive(Debug, Serialize)]
pub struct BatchResponse<R> {
    pub results: Vec<R>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<R: BatchRecord> BatchResponse<R> {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<R: BatchRecord> From<ResultSet<R>> for BatchResponse<R> {
    fn from(results: ResultSet<R>) -> Self {
        Self {
            summary: results.summary(),
            results: results.into_records(),
            message: None,
        }
    }
}
