//! HTTP client for the tenant static-translation endpoint.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::OverlayConfig;
use crate::locale::Locale;

/// Identifier of the tenant whose overlay is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    /// Wrap a tenant identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport-level overlay fetch failure.
///
/// Everything the endpoint can answer — including non-2xx statuses and
/// bodies that do not decode — is "no overlay", not an error.
#[derive(Error, Debug)]
pub enum OverlayFetchError {
    /// The request never produced a usable response.
    #[error("overlay request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Wire shape of the overlay endpoint response.
#[derive(Debug, Deserialize)]
struct OverlayResponse {
    /// Tenant message entries; absent means no overlay for this scope.
    messages: Option<HashMap<String, String>>,
}

/// HTTP client for `GET /api/tenant-static-translations/{apiPath}`.
#[derive(Debug, Clone)]
pub struct OverlayClient {
    /// Shared reqwest client (connection pool, timeout).
    http: reqwest::Client,

    /// Endpoint origin without a trailing slash.
    base_url: String,
}

impl OverlayClient {
    /// Build a client from overlay settings.
    ///
    /// # Errors
    /// Returns [`OverlayFetchError`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &OverlayConfig) -> Result<Self, OverlayFetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Fetch the overlay for one tenant/path/locale combination.
    ///
    /// `Ok(None)` covers every "no overlay" outcome: a non-2xx status, a
    /// missing `messages` field, or a body that does not decode. Only
    /// transport failures surface as errors, and callers treat those as
    /// best-effort too.
    ///
    /// # Errors
    /// Returns [`OverlayFetchError::Transport`] when the request cannot be
    /// sent or the connection drops.
    pub async fn fetch(
        &self,
        tenant: &TenantId,
        api_path: &str,
        locale: Locale,
    ) -> Result<Option<HashMap<String, String>>, OverlayFetchError> {
        let url = format!(
            "{}/api/tenant-static-translations/{}",
            self.base_url,
            api_path.trim_start_matches('/')
        );

        tracing::debug!(%tenant, api_path, locale = %locale, "fetching tenant overlay");

        let response = self
            .http
            .get(&url)
            .query(&[("tenantId", tenant.as_str()), ("lang", locale.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "overlay endpoint answered non-success, treating as no overlay");
            return Ok(None);
        }

        match response.json::<OverlayResponse>().await {
            Ok(body) => Ok(body.messages),
            Err(error) => {
                tracing::debug!(%error, "overlay body did not decode, treating as no overlay");
                Ok(None)
            }
        }
    }
}
