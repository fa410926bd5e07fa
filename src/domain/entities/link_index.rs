//! Transient index of a provider account's links, keyed by address.

use serde::Deserialize;
use std::collections::HashMap;

use super::record::deserialize_link_id;

/// What the index knows about one existing link.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkIndexEntry {
    pub id: Option<String>,
    pub visit_count: u64,
    pub target: String,
    pub created_at: String,
    pub description: String,
}

/// Address -> entry map built for a single request and then dropped.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    entries: HashMap<String, LinkIndexEntry>,
    complete: bool,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Later pages win when the provider repeats an address.
    pub fn insert(&mut self, address: impl Into<String>, entry: LinkIndexEntry) {
        self.entries.insert(address.into(), entry);
    }

    pub fn get(&self, address: &str) -> Option<&LinkIndexEntry> {
        self.entries.get(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the listing was read until an empty page.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn mark_complete(&mut self) {
        self.complete = true;
    }
}

impl FromIterator<(String, LinkIndexEntry)> for LinkIndex {
    fn from_iter<T: IntoIterator<Item = (String, LinkIndexEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            complete: true,
        }
    }
}

/// One page of the provider's `GET /links` listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkPage {
    #[serde(default)]
    pub data: Vec<ListedLink>,
}

/// A link object as returned by the provider listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListedLink {
    #[serde(default, deserialize_with = "deserialize_link_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub visit_count: u64,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ListedLink {
    pub fn into_entry(self) -> (String, LinkIndexEntry) {
        let entry = LinkIndexEntry {
            id: self.id,
            visit_count: self.visit_count,
            target: self.target.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        };
        (self.address, entry)
    }
}
