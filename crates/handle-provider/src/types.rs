// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Common data types for resolved handles

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which backends report a handle's linked addresses
pub const RESOLVED_ADDRESSES_KEY: &str = "resolved_addresses";

/// Chains a handle can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Cardano (`ada`)
    Cardano,
    /// Bitcoin (`btc`)
    Bitcoin,
    /// Ethereum (`eth`)
    Ethereum,
}

impl Chain {
    /// Key used for this chain inside `resolved_addresses`
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cardano => "ada",
            Self::Bitcoin => "btc",
            Self::Ethereum => "eth",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ada" | "cardano" => Ok(Self::Cardano),
            "btc" | "bitcoin" => Ok(Self::Bitcoin),
            "eth" | "ethereum" => Ok(Self::Ethereum),
            _ => Err(format!("unsupported chain: {s}. Supported chains are ada, btc, eth")),
        }
    }
}

/// Addresses a handle resolves to, keyed by chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddresses {
    /// Cardano address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ada: Option<String>,
    /// Bitcoin address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc: Option<String>,
    /// Ethereum address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth: Option<String>,
    /// Any other chain the backend reports
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl ResolvedAddresses {
    /// Address for one of the well-known chains
    pub fn get(&self, chain: Chain) -> Option<&str> {
        match chain {
            Chain::Cardano => self.ada.as_deref(),
            Chain::Bitcoin => self.btc.as_deref(),
            Chain::Ethereum => self.eth.as_deref(),
        }
    }

    /// Whether no address at all was resolved
    pub fn is_empty(&self) -> bool {
        self.ada.is_none() && self.btc.is_none() && self.eth.is_none() && self.other.is_empty()
    }
}

/// Everything a provider knows about a handle
///
/// The default value is the empty result aggregate lookups degrade to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHandleData {
    /// Linked addresses
    #[serde(default)]
    pub resolved_addresses: ResolvedAddresses,
    /// Every other metadata field returned by the backend
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl ResolvedHandleData {
    /// Build the result from a backend metadata object
    ///
    /// A `resolved_addresses` object is lifted into [`ResolvedAddresses`]; when it
    /// does not have the expected shape it stays in `metadata` untouched.
    pub fn from_metadata(mut metadata: Map<String, Value>) -> Self {
        let resolved_addresses = match metadata.remove(RESOLVED_ADDRESSES_KEY) {
            Some(value @ Value::Object(_)) => {
                match serde_json::from_value::<ResolvedAddresses>(value.clone()) {
                    Ok(addresses) => addresses,
                    Err(_) => {
                        metadata.insert(RESOLVED_ADDRESSES_KEY.to_string(), value);
                        ResolvedAddresses::default()
                    }
                }
            }
            Some(Value::Null) | None => ResolvedAddresses::default(),
            Some(other) => {
                metadata.insert(RESOLVED_ADDRESSES_KEY.to_string(), other);
                ResolvedAddresses::default()
            }
        };

        Self {
            resolved_addresses,
            metadata,
        }
    }

    /// Address for one of the well-known chains
    pub fn address(&self, chain: Chain) -> Option<&str> {
        self.resolved_addresses.get(chain)
    }

    /// Whether the lookup produced nothing
    pub fn is_empty(&self) -> bool {
        self.resolved_addresses.is_empty() && self.metadata.is_empty()
    }
}

/// Merge on-chain and off-chain metadata objects
///
/// On-chain fields are applied first and off-chain fields over them, so the
/// off-chain value wins when both sources carry the same key.
pub fn merge_metadata(
    onchain: Option<Map<String, Value>>,
    offchain: Option<Map<String, Value>>,
) -> Map<String, Value> {
    let mut merged = onchain.unwrap_or_default();
    if let Some(offchain) = offchain {
        merged.extend(offchain);
    }
    merged
}
