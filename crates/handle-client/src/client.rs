// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Handle client facade
//!
//! [`HandleClient`] pairs a [`NetworkContext`] with a provider. It keeps the two in
//! step, answers policy-id questions for the active network and exposes the codec
//! helpers so callers need a single entry point.

use handle_provider::{Chain, HandleProvider, ProviderError, ResolvedHandleData};
use handle_providers::{ConfiguredProvider, KoraLabsProvider};
use handle_types::{
    AssetNameLabel, CodecError, HandleName, NetworkContext, PolicyId, encode, is_labeled,
    normalize,
};
use tracing::info;

use crate::{config::ClientConfig, error::ClientResult};

/// Entry point for resolving handles on one network
#[derive(Debug)]
pub struct HandleClient<P = KoraLabsProvider> {
    context: NetworkContext,
    provider: P,
}

impl HandleClient<KoraLabsProvider> {
    /// Create a client backed by the Handle.me indexer with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn with_default_provider(context: NetworkContext) -> ClientResult<Self> {
        Ok(Self::new(context, KoraLabsProvider::for_network(context)?))
    }
}

impl HandleClient<ConfiguredProvider> {
    /// Create a client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured provider cannot be built
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.network, config.build_provider()?))
    }
}

impl<P: HandleProvider> HandleClient<P> {
    /// Create a client, retargeting `provider` to `context`
    pub fn new(context: NetworkContext, mut provider: P) -> Self {
        provider.retarget(context);
        Self { context, provider }
    }

    /// Active network
    pub fn context(&self) -> NetworkContext {
        self.context
    }

    /// Switch the active network
    ///
    /// The provider is retargeted so both agree on the network afterwards.
    pub fn set_context(&mut self, context: NetworkContext) {
        if self.context != context {
            info!(
                from = %self.context,
                to = %context,
                provider = self.provider.name(),
                "switching network context"
            );
        }
        self.context = context;
        self.provider.retarget(context);
    }

    /// The provider lookups are delegated to
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Handle policy ids of any network
    pub fn policy_ids_by_context(&self, context: NetworkContext) -> &'static [PolicyId] {
        context.policy_ids()
    }

    /// Handle policy ids of the active network
    pub fn active_policy_ids(&self) -> &'static [PolicyId] {
        self.policy_ids_by_context(self.context)
    }

    /// Whether `policy_id` is a handle policy on the active network
    ///
    /// Comparison is case-insensitive. Anything that is not a 28-byte hex policy id
    /// is not a handle policy.
    pub fn is_handle_policy_id(&self, policy_id: &str) -> bool {
        policy_id
            .parse::<PolicyId>()
            .is_ok_and(|id| self.active_policy_ids().contains(&id))
    }

    /// See [`handle_types::is_labeled`]
    pub fn is_labeled(&self, hex_name: &str) -> bool {
        is_labeled(hex_name)
    }

    /// See [`handle_types::normalize`]
    pub fn normalize(&self, hex_name: &str) -> Result<String, CodecError> {
        normalize(hex_name)
    }

    /// See [`handle_types::encode`]
    pub fn encode(&self, readable: &str, label: Option<AssetNameLabel>) -> String {
        encode(readable, label)
    }

    /// Resolve the address a handle links for `chain`
    ///
    /// A missing Cardano address is an error, as with
    /// [`HandleProvider::get_cardano_address`]; the other chains yield `None`.
    pub async fn resolve_address(
        &self,
        handle: &HandleName,
        chain: Chain,
    ) -> Result<Option<String>, ProviderError> {
        match chain {
            Chain::Cardano => self.provider.get_cardano_address(handle).await.map(Some),
            Chain::Bitcoin => self.provider.get_bitcoin_address(handle).await,
            Chain::Ethereum => self.provider.get_ethereum_address(handle).await,
        }
    }

    /// Fetch everything the provider knows about a handle
    pub async fn resolve(&self, handle: &HandleName) -> Result<ResolvedHandleData, ProviderError> {
        self.provider.get_all_data(handle).await
    }
}
