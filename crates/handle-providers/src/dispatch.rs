// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Runtime provider selection
//!
//! `HandleProvider` uses `impl Future` returns and is therefore not object safe.
//! [`ConfiguredProvider`] wraps the concrete providers in an enum so a provider
//! chosen from configuration can still be used wherever a `HandleProvider` is
//! expected.

use std::{fmt::Display, str::FromStr, sync::Arc};

use handle_provider::{DiagnosticSink, HandleProvider, ProviderError, ResolvedHandleData};
use handle_types::{HandleName, NetworkContext};
use serde::{Deserialize, Serialize};

use crate::{BlockfrostProvider, KoraLabsProvider};

/// Provider backend enum for type-safe provider selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Handle.me indexer
    #[default]
    KoraLabs,
    /// Blockfrost ledger data API
    Blockfrost,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KoraLabs => write!(f, "koralabs"),
            Self::Blockfrost => write!(f, "blockfrost"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "koralabs" | "handle.me" | "handleme" => Ok(Self::KoraLabs),
            "blockfrost" => Ok(Self::Blockfrost),
            _ => Err(format!(
                "unknown provider '{s}', expected 'koralabs' or 'blockfrost'"
            )),
        }
    }
}

/// A provider picked at runtime
#[derive(Debug)]
pub enum ConfiguredProvider {
    /// Handle.me indexer
    KoraLabs(KoraLabsProvider),
    /// Blockfrost ledger data API
    Blockfrost(BlockfrostProvider),
}

impl ConfiguredProvider {
    /// Which backend this provider talks to
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::KoraLabs(_) => ProviderKind::KoraLabs,
            Self::Blockfrost(_) => ProviderKind::Blockfrost,
        }
    }

    /// Replace the sink that receives swallowed lookup failures
    #[must_use]
    pub fn with_diagnostics(self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        match self {
            Self::KoraLabs(provider) => Self::KoraLabs(provider.with_diagnostics(diagnostics)),
            Self::Blockfrost(provider) => {
                Self::Blockfrost(provider.with_diagnostics(diagnostics))
            }
        }
    }

    /// Base URL requests are sent to
    pub fn api_url(&self) -> &str {
        match self {
            Self::KoraLabs(provider) => provider.api_url(),
            Self::Blockfrost(provider) => provider.api_url(),
        }
    }
}

impl From<KoraLabsProvider> for ConfiguredProvider {
    fn from(provider: KoraLabsProvider) -> Self {
        Self::KoraLabs(provider)
    }
}

impl From<BlockfrostProvider> for ConfiguredProvider {
    fn from(provider: BlockfrostProvider) -> Self {
        Self::Blockfrost(provider)
    }
}

impl HandleProvider for ConfiguredProvider {
    async fn get_cardano_address(&self, handle: &HandleName) -> Result<String, ProviderError> {
        match self {
            Self::KoraLabs(provider) => provider.get_cardano_address(handle).await,
            Self::Blockfrost(provider) => provider.get_cardano_address(handle).await,
        }
    }

    async fn get_bitcoin_address(
        &self,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        match self {
            Self::KoraLabs(provider) => provider.get_bitcoin_address(handle).await,
            Self::Blockfrost(provider) => provider.get_bitcoin_address(handle).await,
        }
    }

    async fn get_ethereum_address(
        &self,
        handle: &HandleName,
    ) -> Result<Option<String>, ProviderError> {
        match self {
            Self::KoraLabs(provider) => provider.get_ethereum_address(handle).await,
            Self::Blockfrost(provider) => provider.get_ethereum_address(handle).await,
        }
    }

    async fn get_all_data(&self, handle: &HandleName) -> Result<ResolvedHandleData, ProviderError> {
        match self {
            Self::KoraLabs(provider) => provider.get_all_data(handle).await,
            Self::Blockfrost(provider) => provider.get_all_data(handle).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::KoraLabs(provider) => provider.name(),
            Self::Blockfrost(provider) => provider.name(),
        }
    }

    fn retarget(&mut self, network: NetworkContext) {
        match self {
            Self::KoraLabs(provider) => provider.retarget(network),
            Self::Blockfrost(provider) => provider.retarget(network),
        }
    }
}
