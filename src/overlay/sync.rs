//! Fire-and-forget overlay synchronization.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::fetch::{
    OverlayClient,
    TenantId,
};
use crate::locale::Locale;
use crate::provider::TranslationProvider;

/// Keeps a shared [`TranslationProvider`] enriched with tenant overlays.
///
/// Each locale change cancels the in-flight fetch and spawns a new one. Two
/// guards keep stale responses out of the dictionary: the per-attempt
/// cancellation token covers the I/O, and the provider epoch captured when
/// the attempt starts is re-checked under the state lock before merging, so
/// a slow earlier fetch can never clobber a newer locale's state.
///
/// Fetch failures are best-effort by contract: the base dictionary stays in
/// place and nothing is surfaced to the user.
#[derive(Debug)]
pub struct OverlaySync {
    /// Shared provider state, also handed to lookups elsewhere.
    provider: Arc<Mutex<TranslationProvider>>,

    /// Endpoint client.
    client: OverlayClient,

    /// Tenant the overlays are scoped to.
    tenant: TenantId,

    /// API path segment identifying the page/feature scope.
    api_path: String,

    /// Parent token; cancelled on shutdown/drop.
    root: CancellationToken,

    /// Token of the latest fetch attempt; superseded attempts are cancelled.
    current: CancellationToken,
}

impl OverlaySync {
    /// Create a sync handle around shared provider state.
    #[must_use]
    pub fn new(
        provider: Arc<Mutex<TranslationProvider>>,
        client: OverlayClient,
        tenant: TenantId,
        api_path: impl Into<String>,
    ) -> Self {
        let root = CancellationToken::new();
        let current = root.child_token();
        Self { provider, client, tenant, api_path: api_path.into(), root, current }
    }

    /// Handle to the shared provider state.
    #[must_use]
    pub fn provider(&self) -> Arc<Mutex<TranslationProvider>> {
        Arc::clone(&self.provider)
    }

    /// Switch the locale and start a best-effort overlay fetch for it.
    pub async fn set_locale(&mut self, locale: Locale) {
        {
            let mut provider = self.provider.lock().await;
            provider.set_locale(locale);
        }
        self.spawn_fetch().await;
    }

    /// Re-fetch the overlay for the current locale, superseding any
    /// in-flight attempt. Used when the tenant scope itself changed, never
    /// as a retry: a failed fetch stays failed until the next trigger.
    pub async fn refresh(&mut self) {
        self.spawn_fetch().await;
    }

    /// Cancel all outstanding work. Late responses can no longer write.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    /// Spawn a fetch task for the provider's current locale.
    async fn spawn_fetch(&mut self) {
        // Supersede the previous attempt.
        self.current.cancel();
        self.current = self.root.child_token();
        let token = self.current.clone();

        let (locale, epoch) = {
            let provider = self.provider.lock().await;
            (provider.locale(), provider.epoch())
        };

        let provider = Arc::clone(&self.provider);
        let client = self.client.clone();
        let tenant = self.tenant.clone();
        let api_path = self.api_path.clone();

        tokio::spawn(async move {
            let fetched = tokio::select! {
                () = token.cancelled() => return,
                result = client.fetch(&tenant, &api_path, locale) => result,
            };

            let entries = match fetched {
                Ok(Some(entries)) => entries,
                Ok(None) => return,
                Err(error) => {
                    tracing::debug!(%error, locale = %locale, "overlay fetch failed, keeping current dictionary");
                    return;
                }
            };

            if token.is_cancelled() {
                return;
            }

            let mut provider = provider.lock().await;
            // The epoch is authoritative: a locale switch that raced the
            // token check above must still win.
            if provider.epoch() != epoch {
                return;
            }
            provider.merge_overlay(entries);
        });
    }
}

impl Drop for OverlaySync {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
