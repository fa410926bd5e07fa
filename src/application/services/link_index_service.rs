//! Builds the request-scoped [`LinkIndex`] by paging through the provider listing.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::context::BatchContext;
use crate::domain::entities::{LinkIndex, LinkPage};
use crate::domain::provider::LinkProvider;

/// Pages through `GET /links` and collects every link by address.
///
/// Paging stops at the first empty page, the first non-200 page, the first
/// transport or parse failure, or the configured page ceiling. Whatever has
/// been collected up to that point is returned; a partial index only shows
/// up as misses in the lookup results.
pub struct LinkIndexService<P: LinkProvider> {
    provider: Arc<P>,
}

impl<P: LinkProvider> LinkIndexService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn build(&self, ctx: &BatchContext) -> LinkIndex {
        let limit = ctx.settings.page_size.max(1);
        let max_pages = ctx.settings.max_pages.max(1);
        let mut index = LinkIndex::new();

        for page in 0..max_pages {
            let skip = page * limit;

            let response = match self.provider.list(ctx, skip, limit).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(page, error = %e, "Link listing failed, using partial index");
                    return index;
                }
            };

            if response.status != 200 {
                warn!(
                    page,
                    status = response.status,
                    "Link listing rejected, using partial index"
                );
                return index;
            }

            let listed: LinkPage = match response.json() {
                Ok(listed) => listed,
                Err(e) => {
                    warn!(page, error = %e, "Link listing unreadable, using partial index");
                    return index;
                }
            };

            if listed.data.is_empty() {
                index.mark_complete();
                debug!(pages = page, entries = index.len(), "Link index complete");
                return index;
            }

            for link in listed.data {
                let (address, entry) = link.into_entry();
                if !address.is_empty() {
                    index.insert(address, entry);
                }
            }

            debug!(page, skip, entries = index.len(), "Link listing page read");
        }

        warn!(
            max_pages,
            entries = index.len(),
            "Page ceiling reached, index may be partial"
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::ProviderSettings;
    use crate::domain::errors::TransportError;
    use crate::domain::provider::{MockLinkProvider, ProviderResponse};
    use mockall::Sequence;
    use serde_json::json;

    fn ctx(page_size: usize, max_pages: usize) -> BatchContext {
        BatchContext::new(
            "key",
            ProviderSettings {
                page_size,
                max_pages,
                ..Default::default()
            },
        )
    }

    fn page(addresses: &[&str]) -> ProviderResponse {
        let data: Vec<_> = addresses
            .iter()
            .map(|a| json!({ "id": format!("id-{a}"), "address": a, "visit_count": 1, "target": "https://t.com" }))
            .collect();
        ProviderResponse::new(200, json!({ "data": data }).to_string())
    }

    #[tokio::test]
    async fn test_pages_until_empty() {
        let mut mock = MockLinkProvider::new();
        let mut seq = Sequence::new();

        mock.expect_list()
            .withf(|_, skip, limit| *skip == 0 && *limit == 2)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(page(&["a", "b"])));
        mock.expect_list()
            .withf(|_, skip, _| *skip == 2)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(page(&["c"])));
        mock.expect_list()
            .withf(|_, skip, _| *skip == 4)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(page(&[])));

        let index = LinkIndexService::new(Arc::new(mock))
            .build(&ctx(2, 10))
            .await;

        assert_eq!(index.len(), 3);
        assert!(index.is_complete());
        assert_eq!(index.get("c").and_then(|e| e.id.as_deref()), Some("id-c"));
    }

    #[tokio::test]
    async fn test_stops_at_page_ceiling() {
        let mut mock = MockLinkProvider::new();
        mock.expect_list()
            .times(3)
            .returning(|_, skip, _| Ok(page(&[&format!("a{skip}")])));

        let index = LinkIndexService::new(Arc::new(mock))
            .build(&ctx(1, 3))
            .await;

        assert_eq!(index.len(), 3);
        assert!(!index.is_complete());
    }

    #[tokio::test]
    async fn test_non_200_page_keeps_partial_index() {
        let mut mock = MockLinkProvider::new();
        let mut seq = Sequence::new();

        mock.expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(page(&["a"])));
        mock.expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(ProviderResponse::new(401, "{}")));

        let index = LinkIndexService::new(Arc::new(mock))
            .build(&ctx(1, 10))
            .await;

        assert_eq!(index.len(), 1);
        assert!(index.get("a").is_some());
        assert!(!index.is_complete());
    }

    #[tokio::test]
    async fn test_transport_failure_returns_empty_index() {
        let mut mock = MockLinkProvider::new();
        mock.expect_list()
            .times(1)
            .returning(|_, _, _| Err(TransportError::timeout("deadline")));

        let index = LinkIndexService::new(Arc::new(mock))
            .build(&ctx(100, 20))
            .await;

        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_page_stops_paging() {
        let mut mock = MockLinkProvider::new();
        mock.expect_list()
            .times(1)
            .returning(|_, _, _| Ok(ProviderResponse::new(200, "<html>")));

        let index = LinkIndexService::new(Arc::new(mock))
            .build(&ctx(100, 20))
            .await;

        assert!(index.is_empty());
        assert!(!index.is_complete());
    }
}
