use std::sync::Arc;

use crate::application::services::{BatchService, ExportService};
use crate::domain::context::{BatchContext, ProviderSettings};
use crate::infrastructure::provider::SvLinkClient;

/// Shared handler state.
///
/// Holds only immutable services and settings; the caller's API key lives
/// in the per-request [`BatchContext`].
#[derive(Clone)]
pub struct AppState {
    pub batch_service: Arc<BatchService<SvLinkClient>>,
    pub export_service: ExportService,
    pub settings: Arc<ProviderSettings>,
}

impl AppState {
    pub fn new(client: Arc<SvLinkClient>, settings: ProviderSettings) -> Self {
        Self {
            batch_service: Arc::new(BatchService::new(client)),
            export_service: ExportService::new(),
            settings: Arc::new(settings),
        }
    }

    /// Builds the request-scoped context for one batch call.
    pub fn context(&self, api_key: impl Into<String>) -> BatchContext {
        BatchContext::new(api_key, self.settings.as_ref().clone())
    }
}
