//! Per-item result records, one type per batch operation.
//!
//! Every record shares the [`BatchRecord`] contract (a success flag) and is
//! never mutated after it has been appended to a [`super::ResultSet`]. The
//! serialized field names are the public wire contract consumed by the
//! browser front-end and sent back verbatim to the export endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::domain::entities::LinkIndexEntry;
use crate::domain::errors::ItemError;

/// Sentinel placed in lookup records whose address is not in the index.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Common success/failure contract shared by all record kinds.
pub trait BatchRecord {
    fn is_success(&self) -> bool;
}

/// Outcome of shortening one long URL.
///
/// `short` holds the short URL on success and the failure reason otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResult {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub success: bool,
}

impl ShortenResult {
    pub fn created(original: impl Into<String>, short_url: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            short: short_url.into(),
            success: true,
        }
    }

    pub fn failed(original: impl Into<String>, error: &ItemError) -> Self {
        Self {
            original: original.into(),
            short: error.to_string(),
            success: false,
        }
    }

    /// Short URL usable for QR rendering, if this record has one.
    pub fn short_url(&self) -> Option<&str> {
        let short = self.short.trim();
        (self.success && !short.is_empty()).then_some(short)
    }
}

impl BatchRecord for ShortenResult {
    fn is_success(&self) -> bool {
        self.success
    }
}

/// Visit count of a looked-up link, or the [`NOT_FOUND`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Views {
    Count(u64),
    Marker(String),
}

impl Views {
    pub fn not_found() -> Self {
        Self::Marker(NOT_FOUND.to_string())
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::Marker(String::new())
    }
}

impl fmt::Display for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Marker(marker) => f.write_str(marker),
        }
    }
}

/// Outcome of reverse-looking-up one short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub views: Views,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub success: bool,
}

impl LookupResult {
    pub fn found(link: impl Into<String>, entry: &LinkIndexEntry) -> Self {
        Self {
            link: link.into(),
            views: Views::Count(entry.visit_count),
            target: entry.target.clone(),
            created: entry.created_at.clone(),
            success: true,
        }
    }

    /// Miss keeps the success-shaped body with the sentinel in `views`.
    pub fn not_found(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            views: Views::not_found(),
            target: String::new(),
            created: String::new(),
            success: false,
        }
    }
}

impl BatchRecord for LookupResult {
    fn is_success(&self) -> bool {
        self.success
    }
}

/// Details of an existing link, resolved ahead of a target update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    #[serde(default)]
    pub link: String,
    #[serde(rename = "linkId", default, deserialize_with = "deserialize_link_id")]
    pub link_id: Option<String>,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub visit_count: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub success: bool,
}

impl ResolvedLink {
    pub fn found(link: impl Into<String>, entry: &LinkIndexEntry) -> Self {
        Self {
            link: link.into(),
            link_id: entry.id.clone(),
            target: entry.target.clone(),
            visit_count: entry.visit_count,
            created_at: entry.created_at.clone(),
            description: entry.description.clone(),
            success: true,
        }
    }

    pub fn not_found(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            link_id: None,
            target: NOT_FOUND.to_string(),
            visit_count: 0,
            created_at: String::new(),
            description: String::new(),
            success: false,
        }
    }
}

impl BatchRecord for ResolvedLink {
    fn is_success(&self) -> bool {
        self.success
    }
}

/// One requested destination change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkChange {
    #[serde(default, deserialize_with = "deserialize_link_id")]
    pub link_id: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub new_target: Option<String>,
}

/// Outcome of one destination change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub new_target: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateResult {
    pub fn updated(change: &LinkChange) -> Self {
        Self {
            short_url: change.short_url.clone(),
            new_target: change.new_target.clone(),
            success: true,
            message: Some("Updated".to_string()),
            error: None,
        }
    }

    pub fn failed(change: &LinkChange, error: &ItemError) -> Self {
        Self {
            short_url: change.short_url.clone(),
            new_target: change.new_target.clone(),
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }

    /// Message column value: confirmation on success, reason on failure.
    pub fn note(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}

impl BatchRecord for UpdateResult {
    fn is_success(&self) -> bool {
        self.success
    }
}

/// Provider ids are usually strings but some deployments return integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLinkId {
    Text(String),
    Number(i64),
}

pub(crate) fn deserialize_link_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLinkId>::deserialize(deserializer)?;
    Ok(raw
        .map(|id| match id {
            RawLinkId::Text(text) => text,
            RawLinkId::Number(number) => number.to_string(),
        })
        .filter(|id| !id.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shorten_failed_carries_reason() {
        let record = ShortenResult::failed("https://a.com", &ItemError::rejected(500));

        assert!(!record.success);
        assert_eq!(record.short, "HTTP 500");
        assert_eq!(record.short_url(), None);
    }

    #[test]
    fn test_lookup_not_found_serializes_sentinel() {
        let record = LookupResult::not_found("https://sv.link/missing");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["views"], "NOT_FOUND");
        assert_eq!(value["success"], false);
        assert_eq!(value["target"], "");
    }

    #[test]
    fn test_lookup_found_serializes_count() {
        let entry = LinkIndexEntry {
            visit_count: 10,
            target: "https://a.com".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(LookupResult::found("xyz", &entry)).unwrap();

        assert_eq!(value["views"], 10);
        assert_eq!(value["target"], "https://a.com");
    }

    #[test]
    fn test_link_change_accepts_numeric_id() {
        let change: LinkChange = serde_json::from_value(json!({
            "linkId": 42,
            "shortUrl": "https://sv.link/abc",
            "newTarget": "https://new.example.com"
        }))
        .unwrap();

        assert_eq!(change.link_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_link_change_treats_null_and_blank_id_as_missing() {
        let change: LinkChange =
            serde_json::from_value(json!({ "linkId": null, "newTarget": "https://x.com" }))
                .unwrap();
        assert_eq!(change.link_id, None);

        let change: LinkChange = serde_json::from_value(json!({ "linkId": " " })).unwrap();
        assert_eq!(change.link_id, None);
    }

    #[test]
    fn test_update_result_wire_shape() {
        let change = LinkChange {
            link_id: Some("id-1".to_string()),
            short_url: Some("https://sv.link/abc".to_string()),
            new_target: Some("https://new.com".to_string()),
        };
        let value = serde_json::to_value(UpdateResult::updated(&change)).unwrap();

        assert_eq!(value["shortUrl"], "https://sv.link/abc");
        assert_eq!(value["newTarget"], "https://new.com");
        assert_eq!(value["message"], "Updated");
        assert!(value.get("error").is_none());
    }
}
