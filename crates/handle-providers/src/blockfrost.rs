// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockfrost API integration
//!
//! This module provides an implementation of the `HandleProvider` trait for the
//! Blockfrost Cardano API. Blockfrost knows nothing about handles: lookups go
//! through the asset endpoints, keyed by the active handle policy id followed by the
//! hex asset name.
//!
//! The two metadata standards keep addresses in different places:
//!
//! - **Labeled (CIP-68)** assets carry `resolved_addresses` in `onchain_metadata`.
//! - **Legacy (CIP-25)** assets carry none, so the Cardano address is the holder
//!   reported by `/assets/{asset}/addresses`.

use std::{fmt, sync::Arc, time::Duration};

use handle_provider::{
    Chain, DiagnosticSink, HandleProvider, LookupFailure, ProviderError, ResolvedAddresses,
    ResolvedHandleData, TracingDiagnostics, absent_if_not_found, degrade_to_empty,
    merge_metadata,
};
use handle_types::{HandleName, NetworkContext, is_labeled};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    http::{self, USER_AGENT},
    non_empty_string::NonEmptyString,
};

// Blockfrost API constants
const PROJECT_ID_HEADER: &str = "project_id";
const DEFAULT_BLOCKFROST_TIMEOUT_SECONDS: u64 = 20;

/// Configuration for the Blockfrost provider
/// This type is always valid by construction.
#[derive(Debug, Clone)]
pub struct BlockfrostConfig {
    /// Network whose Blockfrost endpoint is queried
    pub network: NetworkContext,
    /// Blockfrost project id, sent as the `project_id` header
    pub project_id: NonEmptyString,
    /// Base URL override; the network's public endpoint is used when unset
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl BlockfrostConfig {
    /// Create a new `BlockfrostConfig` with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the project id is blank
    pub fn new(network: NetworkContext, project_id: impl Into<String>) -> Result<Self, String> {
        Ok(Self {
            network,
            project_id: NonEmptyString::new(project_id)?,
            base_url: None,
            timeout_seconds: DEFAULT_BLOCKFROST_TIMEOUT_SECONDS,
        })
    }
}

/// Asset record returned by `/assets/{asset}`
#[derive(Debug, Deserialize)]
pub struct BlockfrostAsset {
    /// Policy id followed by hex asset name
    #[serde(default)]
    pub asset: String,
    /// CIP-25 metadata or the CIP-68 datum, decoded by Blockfrost
    #[serde(default)]
    pub onchain_metadata: Option<Map<String, Value>>,
    /// Which standard `onchain_metadata` follows, e.g. `CIP68v1`
    #[serde(default)]
    pub onchain_metadata_standard: Option<String>,
    /// Off-chain token registry metadata
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl BlockfrostAsset {
    /// Merge both metadata sources into the common result shape
    ///
    /// Off-chain fields are applied after on-chain ones and win on collision.
    pub fn into_handle_data(self) -> ResolvedHandleData {
        ResolvedHandleData::from_metadata(merge_metadata(self.onchain_metadata, self.metadata))
    }

    /// Addresses stored in the on-chain metadata only
    pub fn into_onchain_addresses(self) -> ResolvedAddresses {
        self.onchain_metadata
            .map(|metadata| ResolvedHandleData::from_metadata(metadata).resolved_addresses)
            .unwrap_or_default()
    }
}

/// Holder record returned by `/assets/{asset}/addresses`
#[derive(Debug, Deserialize)]
pub struct BlockfrostAssetAddress {
    /// Bech32 address holding the asset
    pub address: String,
    /// Quantity held, as a decimal string
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Blockfrost API provider implementation
pub struct BlockfrostProvider {
    client: Client,
    config: BlockfrostConfig,
    api_url: String,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl BlockfrostProvider {
    /// Create a new Blockfrost provider
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL override is invalid, the timeout is outside
    /// `1..=300` seconds, or the HTTP client cannot be created
    pub fn new(config: BlockfrostConfig) -> Result<Self, ProviderError> {
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

    /// Replace the sink that receives swallowed lookup failures
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Public API endpoint for a network
    pub fn default_api_url(network: NetworkContext) -> String {
        format!("https://cardano-{}.blockfrost.io/api/v0", network.name())
    }

    /// Network this provider targets
    pub fn network(&self) -> NetworkContext {
        self.config.network
    }

    /// Base URL requests are sent to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn resolve_api_url(config: &BlockfrostConfig) -> String {
        config
            .base_url
            .clone()
            .unwrap_or_else(|| Self::default_api_url(config.network))
    }

    /// Asset identifier of a hex asset name under the active handle policy
    pub fn asset_id(&self, hex_name: &str) -> String {
        format!("{}{hex_name}", self.config.network.handle_policy_id())
    }

    /// Fetch the asset record of a handle
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when no such asset exists and a transport
    /// error when the request fails
    pub async fn get_asset(
        &self,
        asset_id: &str,
        handle: &HandleName,
    ) -> Result<BlockfrostAsset, ProviderError> {
        let url = http::endpoint(&self.api_url, &["assets", asset_id])?;
        debug!(url = %url, handle = %handle, "fetching asset from Blockfrost");

        let request = self
            .client
            .get(url)
            .header(PROJECT_ID_HEADER, self.config.project_id.as_str());
        Ok(http::get_json(request, self.config.timeout_seconds, handle.as_str()).await?)
    }

    /// Fetch the first address holding an asset
    ///
    /// Handles are unique, so the first holder is the only one. Returns `Ok(None)`
    /// when Blockfrost lists no holder.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when no such asset exists and a transport
    /// error when the request fails
    pub async fn get_holder_address(
        &self,
        asset_id: &str,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        let url = http::endpoint(&self.api_url, &["assets", asset_id, "addresses"])?;
        debug!(url = %url, handle = %handle, "fetching asset holders from Blockfrost");

        let request = self
            .client
            .get(url)
            .header(PROJECT_ID_HEADER, self.config.project_id.as_str());
        let holders: Vec<BlockfrostAssetAddress> =
            http::get_json(request, self.config.timeout_seconds, handle.as_str()).await?;

        Ok(holders.into_iter().next().map(|holder| holder.address))
    }

    /// Read one chain's address from a labeled asset's on-chain metadata
    ///
    /// Legacy assets store no per-chain addresses, so they always yield `None`.
    async fn labeled_address(
        &self,
        handle: &HandleName,
        chain: Chain,
    ) -> Result<Option<String>, ProviderError> {
        let hex_name = handle.to_hex(None)?;
        if !is_labeled(&hex_name) {
            debug!(handle = %handle, chain = %chain, "legacy handle has no linked addresses");
            return Ok(None);
        }

        let asset = self.get_asset(&self.asset_id(&hex_name), handle).await?;
        let addresses = asset.into_onchain_addresses();
        Ok(addresses.get(chain).map(ToString::to_string))
    }

    async fn fetch_all_data(&self, handle: &HandleName) -> Result<ResolvedHandleData, ProviderError> {
        let hex_name = handle.to_hex(None)?;
        let asset_id = self.asset_id(&hex_name);

        let mut data = self.get_asset(&asset_id, handle).await?.into_handle_data();

        if data.resolved_addresses.is_empty() {
            match self.get_holder_address(&asset_id, handle).await {
                Ok(address) => data.resolved_addresses.ada = address,
                Err(error) => self
                    .diagnostics
                    .lookup_failed(&LookupFailure::new(self.name(), handle, &error)),
            }
        }

        Ok(data)
    }
}

impl fmt::Debug for BlockfrostProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockfrostProvider")
            .field("config", &self.config)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl HandleProvider for BlockfrostProvider {
    async fn get_cardano_address(&self, handle: &HandleName) -> Result<String, ProviderError> {
        let hex_name = handle.to_hex(None)?;
        let asset_id = self.asset_id(&hex_name);

        if is_labeled(&hex_name) {
            let asset = self.get_asset(&asset_id, handle).await?;
            if let Some(address) = asset.into_onchain_addresses().ada {
                return Ok(address);
            }
            debug!(handle = %handle, "labeled handle has no on-chain ada address, using holder");
        }

        self.get_holder_address(&asset_id, handle)
            .await?
            .ok_or_else(|| ProviderError::NotFound {
                handle: handle.to_string(),
            })
    }

    async fn get_bitcoin_address(
        &self,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        absent_if_not_found(self.labeled_address(handle, Chain::Bitcoin).await)
    }

    async fn get_ethereum_address(
        &self,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        absent_if_not_found(self.labeled_address(handle, Chain::Ethereum).await)
    }

    async fn get_all_data(&self, handle: &HandleName) -> Result<ResolvedHandleData, ProviderError> {
        let result = self.fetch_all_data(handle).await;
        degrade_to_empty(result, self.name(), handle, self.diagnostics.as_ref())
    }

    fn name(&self) -> &'static str {
        "blockfrost"
    }

    fn retarget(&mut self, network: NetworkContext) {
        if self.config.network != network {
            info!(
                from = %self.config.network,
                to = %network,
                "retargeting Blockfrost provider"
            );
        }
        self.config.network = network;
        self.api_url = Self::resolve_api_url(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use handle_types::PolicyId;
    use serde_json::json;

    use super::*;

    fn provider(network: NetworkContext) -> BlockfrostProvider {
        BlockfrostProvider::new(BlockfrostConfig::new(network, "test_key").unwrap()).unwrap()
    }

    #[test]
    fn mainnet_api_url() {
        let provider = provider(NetworkContext::Mainnet);
        assert_eq!(provider.network(), NetworkContext::Mainnet);
        assert_eq!(
            provider.api_url(),
            "https://cardano-mainnet.blockfrost.io/api/v0"
        );
    }

    #[test]
    fn preview_api_url() {
        let provider = provider(NetworkContext::Preview);
        assert_eq!(provider.network(), NetworkContext::Preview);
        assert_eq!(
            provider.api_url(),
            "https://cardano-preview.blockfrost.io/api/v0"
        );
    }

    #[test]
    fn blank_project_id_is_rejected() {
        assert!(BlockfrostConfig::new(NetworkContext::Mainnet, "  ").is_err());
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        for timeout_seconds in [0, 301] {
            let mut config = BlockfrostConfig::new(NetworkContext::Mainnet, "test_key").unwrap();
            config.timeout_seconds = timeout_seconds;
            assert!(matches!(
                BlockfrostProvider::new(config),
                Err(ProviderError::Configuration { .. })
            ));
        }
    }

    #[test]
    fn asset_id_uses_active_policy() {
        let mut provider = provider(NetworkContext::Mainnet);
        assert_eq!(
            provider.asset_id("706f707a"),
            format!("{}706f707a", PolicyId::MAINNET)
        );

        provider.retarget(NetworkContext::Preview);
        assert_eq!(
            provider.asset_id("706f707a"),
            format!("{}706f707a", PolicyId::PREVIEW)
        );
        assert_eq!(
            provider.api_url(),
            "https://cardano-preview.blockfrost.io/api/v0"
        );
    }

    #[test]
    fn asset_merges_metadata_offchain_last() {
        let asset: BlockfrostAsset = serde_json::from_value(json!({
            "asset": "f0ff",
            "onchain_metadata": {
                "name": "$popz",
                "resolved_addresses": {"ada": "addr1onchain"}
            },
            "metadata": {"name": "popz (registry)", "ticker": "POPZ"}
        }))
        .unwrap();

        let data = asset.into_handle_data();
        assert_eq!(data.address(Chain::Cardano), Some("addr1onchain"));
        assert_eq!(data.metadata.get("name"), Some(&json!("popz (registry)")));
        assert_eq!(data.metadata.get("ticker"), Some(&json!("POPZ")));
    }

    #[test]
    fn asset_without_metadata_has_no_addresses() {
        let asset: BlockfrostAsset = serde_json::from_value(json!({
            "asset": "f0ff",
            "onchain_metadata": null,
            "metadata": null
        }))
        .unwrap();
        assert!(asset.into_onchain_addresses().is_empty());
    }
}
