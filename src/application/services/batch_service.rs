//! Batch orchestration for shorten, lookup, resolve and update runs.
//!
//! Every run is sequential: one provider call per item, in input order, and a
//! failing item becomes a failure record instead of aborting the batch. Only
//! request-level validation (missing key, empty or oversized input) is
//! returned as an error.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::services::link_index_service::LinkIndexService;
use crate::domain::context::BatchContext;
use crate::domain::entities::{
    BatchRecord, LinkChange, LinkIndex, LookupResult, ResolvedLink, ResultSet, ShortenResult,
    UpdateResult,
};
use crate::domain::errors::{BatchError, ItemError};
use crate::domain::provider::{LinkProvider, ProviderResponse};
use crate::utils::address::{ensure_scheme, extract_address};
use crate::utils::text::non_blank;

/// Fields checked, in order, for the short link in a create response.
const SHORT_LINK_FIELDS: [&str; 3] = ["shortUrl", "link", "id"];

/// Work handed to [`BatchService::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRequest {
    Shorten(Vec<String>),
    Lookup(Vec<String>),
    Resolve(Vec<String>),
    Update(Vec<LinkChange>),
}

/// Result set of a finished run, tagged by operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Shortened(ResultSet<ShortenResult>),
    LookedUp(ResultSet<LookupResult>),
    Resolved(ResultSet<ResolvedLink>),
    Updated(ResultSet<UpdateResult>),
}

/// Runs batches against a [`LinkProvider`].
pub struct BatchService<P: LinkProvider> {
    provider: Arc<P>,
    index: LinkIndexService<P>,
}

impl<P: LinkProvider> BatchService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            index: LinkIndexService::new(provider.clone()),
            provider,
        }
    }

    /// Dispatches a request to the matching operation.
    ///
    /// # Errors
    ///
    /// See the individual operations.
    pub async fn process(
        &self,
        ctx: &BatchContext,
        request: BatchRequest,
    ) -> Result<BatchOutcome, BatchError> {
        Ok(match request {
            BatchRequest::Shorten(urls) => BatchOutcome::Shortened(self.shorten(ctx, &urls).await?),
            BatchRequest::Lookup(links) => BatchOutcome::LookedUp(self.lookup(ctx, &links).await?),
            BatchRequest::Resolve(links) => BatchOutcome::Resolved(self.resolve(ctx, &links).await?),
            BatchRequest::Update(changes) => {
                BatchOutcome::Updated(self.update(ctx, &changes).await?)
            }
        })
    }

    /// Creates one short link per non-blank URL.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::MissingCredential`], [`BatchError::EmptyInput`]
    /// or [`BatchError::TooManyItems`] before any provider call is made.
    pub async fn shorten(
        &self,
        ctx: &BatchContext,
        urls: &[String],
    ) -> Result<ResultSet<ShortenResult>, BatchError> {
        let items = non_blank(urls);
        validate(ctx, urls.len(), items.len())?;

        let delay = ctx.settings.request_delay;
        let mut results = ResultSet::with_capacity(items.len());

        for (index, target) in items.into_iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let record = match self.provider.create(ctx, target).await {
                Ok(response) if response.status == 201 => match short_link(&response) {
                    Ok(link) => ShortenResult::created(target, ensure_scheme(&link)),
                    Err(e) => ShortenResult::failed(target, &e),
                },
                Ok(response) => ShortenResult::failed(target, &ItemError::rejected(response.status)),
                Err(e) => ShortenResult::failed(target, &ItemError::from(e)),
            };

            if !record.success {
                warn!(ordinal = index + 1, reason = %record.short, "Shorten failed");
            }
            results.push(record);
        }

        log_batch("shorten", &results);
        Ok(results)
    }

    /// Looks each short link up in a freshly built index.
    ///
    /// # Errors
    ///
    /// Same validation as [`Self::shorten`].
    pub async fn lookup(
        &self,
        ctx: &BatchContext,
        links: &[String],
    ) -> Result<ResultSet<LookupResult>, BatchError> {
        let items = non_blank(links);
        validate(ctx, links.len(), items.len())?;

        let index = self.index.build(ctx).await;
        let results = lookup_in_index(&index, &items, &ctx.settings.domain);

        log_batch("lookup", &results);
        Ok(results)
    }

    /// Like [`Self::lookup`] but returns the provider id and full details,
    /// which callers need before an update.
    ///
    /// # Errors
    ///
    /// Same validation as [`Self::shorten`].
    pub async fn resolve(
        &self,
        ctx: &BatchContext,
        links: &[String],
    ) -> Result<ResultSet<ResolvedLink>, BatchError> {
        let items = non_blank(links);
        validate(ctx, links.len(), items.len())?;

        let index = self.index.build(ctx).await;
        let results = resolve_in_index(&index, &items, &ctx.settings.domain);

        log_batch("resolve", &results);
        Ok(results)
    }

    /// Points existing links at new targets.
    ///
    /// A change without a link id or new target fails locally with
    /// [`ItemError::MissingParameter`]; the rest of the batch still runs.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::MissingCredential`], [`BatchError::EmptyInput`]
    /// or [`BatchError::TooManyItems`].
    pub async fn update(
        &self,
        ctx: &BatchContext,
        changes: &[LinkChange],
    ) -> Result<ResultSet<UpdateResult>, BatchError> {
        validate(ctx, changes.len(), changes.len())?;

        let mut results = ResultSet::with_capacity(changes.len());

        for (index, change) in changes.iter().enumerate() {
            let record = self.update_one(ctx, change).await;
            if !record.success {
                warn!(ordinal = index + 1, reason = record.note(), "Update failed");
            }
            results.push(record);
        }

        log_batch("update", &results);
        Ok(results)
    }

    async fn update_one(&self, ctx: &BatchContext, change: &LinkChange) -> UpdateResult {
        let id = change.link_id.as_deref();
        let target = change
            .new_target
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let (Some(id), Some(target)) = (id, target) else {
            return UpdateResult::failed(change, &ItemError::MissingParameter);
        };
        if matches!(id.trim(), "." | "..") {
            return UpdateResult::failed(change, &ItemError::InvalidLinkId);
        }

        let address = change
            .short_url
            .as_deref()
            .map(|url| extract_address(url, &ctx.settings.domain).to_string())
            .filter(|a| !a.is_empty());

        match self.provider.patch(ctx, id, target, address).await {
            Ok(response) if response.status == 200 => UpdateResult::updated(change),
            Ok(response) => UpdateResult::failed(
                change,
                &ItemError::upstream(response.status, provider_message(&response)),
            ),
            Err(e) => UpdateResult::failed(change, &ItemError::from(e)),
        }
    }
}

/// Credential first, then emptiness, then size.
fn validate(ctx: &BatchContext, received: usize, usable: usize) -> Result<(), BatchError> {
    if !ctx.has_api_key() {
        return Err(BatchError::MissingCredential);
    }
    if usable == 0 {
        return Err(BatchError::EmptyInput);
    }
    let max = ctx.settings.max_batch_size;
    if received > max {
        return Err(BatchError::TooManyItems {
            count: received,
            max,
        });
    }
    Ok(())
}

/// Builds lookup records against an already populated index.
pub fn lookup_in_index(index: &LinkIndex, links: &[&str], domain: &str) -> ResultSet<LookupResult> {
    links
        .iter()
        .map(|link| match index.get(extract_address(link, domain)) {
            Some(entry) => LookupResult::found(*link, entry),
            None => LookupResult::not_found(*link),
        })
        .collect::<Vec<_>>()
        .into()
}

/// Builds resolve records against an already populated index.
pub fn resolve_in_index(
    index: &LinkIndex,
    links: &[&str],
    domain: &str,
) -> ResultSet<ResolvedLink> {
    links
        .iter()
        .map(|link| match index.get(extract_address(link, domain)) {
            Some(entry) => ResolvedLink::found(*link, entry),
            None => ResolvedLink::not_found(*link),
        })
        .collect::<Vec<_>>()
        .into()
}

/// First non-empty `shortUrl`, `link` or `id` of a 201 body.
fn short_link(response: &ProviderResponse) -> Result<String, ItemError> {
    let body: Value = response.json()?;

    SHORT_LINK_FIELDS
        .iter()
        .filter_map(|field| match body.get(*field)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .find(|link| !link.is_empty())
        .ok_or(ItemError::MissingShortLink)
}

/// `message`, else `error`, from a rejected provider body.
fn provider_message(response: &ProviderResponse) -> Option<String> {
    let body: Value = serde_json::from_str(&response.body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|field| body.get(*field)?.as_str().map(str::to_string))
}

fn log_batch<R: BatchRecord>(mode: &str, results: &ResultSet<R>) {
    let summary = results.summary();
    info!(
        mode,
        total = summary.total,
        success = summary.success,
        failed = summary.failed,
        "Batch finished"
    );
}
