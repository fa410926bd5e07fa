//! Request-scoped provider context.

use std::fmt;
use std::time::Duration;

/// Provider endpoints and limits, loaded once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// API root, e.g. `https://sv.link/api/v2`.
    pub base_url: String,
    /// Domain sent on create and used to recognise short-link references.
    pub domain: String,
    /// Per-call timeout. No retries are attempted.
    pub timeout: Duration,
    /// Listing page size used by the paginator.
    pub page_size: usize,
    /// Page-count ceiling bounding the paginator against a misbehaving provider.
    pub max_pages: usize,
    /// Pause between successive create calls.
    pub request_delay: Duration,
    /// Largest accepted input list.
    pub max_batch_size: usize,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://sv.link/api/v2".to_string(),
            domain: "sv.link".to_string(),
            timeout: Duration::from_secs(15),
            page_size: 100,
            max_pages: 20,
            request_delay: Duration::ZERO,
            max_batch_size: 500,
        }
    }
}

/// Everything one batch request needs: the caller's key plus settings.
///
/// Built per request and passed down explicitly; nothing is shared between
/// requests except the immutable settings.
#[derive(Clone)]
pub struct BatchContext {
    api_key: String,
    pub settings: ProviderSettings,
}

impl BatchContext {
    pub fn new(api_key: impl Into<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            settings,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for BatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchContext")
            .field("api_key", &"***")
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_trimmed() {
        let ctx = BatchContext::new("  key-123 \n", ProviderSettings::default());
        assert_eq!(ctx.api_key(), "key-123");
        assert!(ctx.has_api_key());

        let ctx = BatchContext::new("   ", ProviderSettings::default());
        assert!(!ctx.has_api_key());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let ctx = BatchContext::new("secret-key", ProviderSettings::default());
        let debug = format!("{ctx:?}");

        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("***"));
    }
}
