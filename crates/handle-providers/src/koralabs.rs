// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Handle.me indexer integration
//!
//! This module provides an implementation of the `HandleProvider` trait for the
//! Handle.me public API run by Kora Labs. The indexer is keyed by readable handle
//! name and returns the handle's `resolved_addresses` directly, so no metadata
//! standard detection is needed here.

use std::{fmt, sync::Arc, time::Duration};

use handle_provider::{
    DiagnosticSink, HandleProvider, ProviderError, ResolvedHandleData, TracingDiagnostics,
    absent_if_not_found, degrade_to_empty,
};
use handle_types::{HandleName, NetworkContext};
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    http::{self, USER_AGENT},
    non_empty_string::NonEmptyString,
};

// Handle.me API constants
const MAINNET_API_URL: &str = "https://api.handle.me";
const PREVIEW_API_URL: &str = "https://preview.api.handle.me";
const API_KEY_HEADER: &str = "HANDLE_ME_API_KEY";
const DEFAULT_KORALABS_TIMEOUT_SECONDS: u64 = 30;

/// Configuration for the Handle.me provider
#[derive(Debug, Clone)]
pub struct KoraLabsConfig {
    /// Network whose indexer is queried
    pub network: NetworkContext,
    /// Optional API key, sent as the `HANDLE_ME_API_KEY` header
    pub api_key: Option<NonEmptyString>,
    /// Base URL override; the network's public endpoint is used when unset
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for KoraLabsConfig {
    fn default() -> Self {
        Self::for_network(NetworkContext::Mainnet)
    }
}

impl KoraLabsConfig {
    /// Default configuration for a network, without an API key
    pub fn for_network(network: NetworkContext) -> Self {
        Self {
            network,
            api_key: None,
            base_url: None,
            timeout_seconds: DEFAULT_KORALABS_TIMEOUT_SECONDS,
        }
    }
}

/// Handle.me API provider implementation
pub struct KoraLabsProvider {
    client: Client,
    config: KoraLabsConfig,
    api_url: String,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl KoraLabsProvider {
    /// Create a new Handle.me provider
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL override is invalid, the timeout is outside
    /// `1..=300` seconds, or the HTTP client cannot be created
    pub fn new(config: KoraLabsConfig) -> Result<Self, ProviderError> {
        if let Some(base_url) = &config.base_url {
            http::validate_base_url(base_url)?;
        }
        http::validate_timeout(config.timeout_seconds)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(http::HttpError::Http)?;

        let api_url = Self::resolve_api_url(&config);

        Ok(Self {
            client,
            config,
            api_url,
            diagnostics: Arc::new(TracingDiagnostics),
        })
    }

    /// Create a provider for a network with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn for_network(network: NetworkContext) -> Result<Self, ProviderError> {
        Self::new(KoraLabsConfig::for_network(network))
    }

    /// Replace the sink that receives swallowed lookup failures
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Public API endpoint for a network
    pub const fn default_api_url(network: NetworkContext) -> &'static str {
        match network {
            NetworkContext::Mainnet => MAINNET_API_URL,
            NetworkContext::Preview => PREVIEW_API_URL,
        }
    }

    /// Network this provider targets
    pub fn network(&self) -> NetworkContext {
        self.config.network
    }

    /// Base URL requests are sent to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn resolve_api_url(config: &KoraLabsConfig) -> String {
        config
            .base_url
            .clone()
            .unwrap_or_else(|| Self::default_api_url(config.network).to_string())
    }

    /// Fetch the indexer record of a handle
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidEncoding`] when a hex handle cannot be decoded,
    /// [`ProviderError::NotFound`] when the indexer has no such handle, and a
    /// transport error when the request fails
    pub async fn get_handle(&self, handle: &HandleName) -> Result<ResolvedHandleData, ProviderError> {
        let name = handle.to_readable()?;
        let url = http::endpoint(&self.api_url, &["handles", &name])?;

        debug!(url = %url, handle = %name, "fetching handle from Handle.me");

        let mut request = self.client.get(url);
        if let Some(api_key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, api_key.as_str());
        }

        let record: Map<String, Value> =
            http::get_json(request, self.config.timeout_seconds, &name).await?;
        Ok(ResolvedHandleData::from_metadata(record))
    }
}

impl fmt::Debug for KoraLabsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KoraLabsProvider")
            .field("config", &self.config)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl HandleProvider for KoraLabsProvider {
    async fn get_cardano_address(&self, handle: &HandleName) -> Result<String, ProviderError> {
        let data = self.get_handle(handle).await?;
        data.resolved_addresses
            .ada
            .ok_or_else(|| ProviderError::NotFound {
                handle: handle.to_string(),
            })
    }

    async fn get_bitcoin_address(
        &self,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        absent_if_not_found(
            self.get_handle(handle)
                .await
                .map(|data| data.resolved_addresses.btc),
        )
    }

    async fn get_ethereum_address(
        &self,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        absent_if_not_found(
            self.get_handle(handle)
                .await
                .map(|data| data.resolved_addresses.eth),
        )
    }

    async fn get_all_data(&self, handle: &HandleName) -> Result<ResolvedHandleData, ProviderError> {
        let result = self.get_handle(handle).await;
        degrade_to_empty(result, self.name(), handle, self.diagnostics.as_ref())
    }

    fn name(&self) -> &'static str {
        "koralabs"
    }

    fn retarget(&mut self, network: NetworkContext) {
        if self.config.network != network {
            info!(
                from = %self.config.network,
                to = %network,
                "retargeting Handle.me provider"
            );
        }
        self.config.network = network;
        self.api_url = Self::resolve_api_url(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_api_url() {
        let provider = KoraLabsProvider::for_network(NetworkContext::Mainnet).unwrap();
        assert_eq!(provider.network(), NetworkContext::Mainnet);
        assert_eq!(provider.api_url(), "https://api.handle.me");
    }

    #[test]
    fn preview_api_url() {
        let provider = KoraLabsProvider::for_network(NetworkContext::Preview).unwrap();
        assert_eq!(provider.network(), NetworkContext::Preview);
        assert_eq!(provider.api_url(), "https://preview.api.handle.me");
    }

    #[test]
    fn retarget_switches_endpoint() {
        let mut provider = KoraLabsProvider::for_network(NetworkContext::Mainnet).unwrap();
        provider.retarget(NetworkContext::Preview);
        assert_eq!(provider.network(), NetworkContext::Preview);
        assert_eq!(provider.api_url(), PREVIEW_API_URL);
    }

    #[test]
    fn base_url_override_survives_retarget() {
        let config = KoraLabsConfig {
            base_url: Some("http://127.0.0.1:9000".to_string()),
            ..KoraLabsConfig::default()
        };
        let mut provider = KoraLabsProvider::new(config).unwrap();
        provider.retarget(NetworkContext::Preview);
        assert_eq!(provider.api_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = KoraLabsConfig {
            base_url: Some("not a url".to_string()),
            ..KoraLabsConfig::default()
        };
        assert!(matches!(
            KoraLabsProvider::new(config),
            Err(ProviderError::Configuration { .. })
        ));
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        for timeout_seconds in [0, 301] {
            let config = KoraLabsConfig {
                timeout_seconds,
                ..KoraLabsConfig::default()
            };
            assert!(matches!(
                KoraLabsProvider::new(config),
                Err(ProviderError::Configuration { .. })
            ));
        }
    }

    #[tokio::test]
    async fn undecodable_hex_handle_is_a_caller_error() {
        let provider = KoraLabsProvider::for_network(NetworkContext::Mainnet).unwrap();
        let result = provider.get_all_data(&HandleName::hex("papagoose")).await;
        assert!(matches!(result, Err(ProviderError::InvalidEncoding(_))));
    }
}
