// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Cardano network contexts
//!
//! A [`NetworkContext`] selects the ledger environment a client or provider targets.
//! It decides which provider base URL is used and which policy identifiers are
//! recognized as handles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::policy::PolicyId;

/// Ledger environments handles can be resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkContext {
    /// Cardano mainnet - network magic 764824073
    #[default]
    Mainnet,
    /// Cardano preview testnet - network magic 2
    Preview,
}

impl NetworkContext {
    /// Returns the protocol magic identifying the network
    pub const fn network_magic(self) -> u64 {
        match self {
            Self::Mainnet => 764_824_073,
            Self::Preview => 2,
        }
    }

    /// Returns the lowercase name used in URLs and configuration
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Preview => "preview",
        }
    }

    /// Returns whether this is the production network
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Mainnet)
    }

    /// Returns the policy identifiers whose assets are handles on this network
    pub const fn policy_ids(self) -> &'static [PolicyId] {
        match self {
            Self::Mainnet => &[PolicyId::MAINNET],
            Self::Preview => &[PolicyId::PREVIEW],
        }
    }

    /// Returns the policy under which handles are currently minted on this network
    pub const fn handle_policy_id(self) -> PolicyId {
        match self {
            Self::Mainnet => PolicyId::MAINNET,
            Self::Preview => PolicyId::PREVIEW,
        }
    }

    /// Returns all supported networks
    pub const fn all() -> &'static [Self] {
        &[Self::Mainnet, Self::Preview]
    }
}

impl fmt::Display for NetworkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkContext {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(magic) = s.parse::<u64>() {
            return Self::try_from(magic);
        }

        match s.to_lowercase().as_str() {
            "mainnet" | "production" => Ok(Self::Mainnet),
            "preview" => Ok(Self::Preview),
            _ => Err(NetworkParseError::InvalidName(s.to_string())),
        }
    }
}

impl TryFrom<u64> for NetworkContext {
    type Error = NetworkParseError;

    fn try_from(magic: u64) -> Result<Self, Self::Error> {
        match magic {
            764_824_073 => Ok(Self::Mainnet),
            2 => Ok(Self::Preview),
            _ => Err(NetworkParseError::InvalidMagic(magic)),
        }
    }
}

impl Serialize for NetworkContext {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for NetworkContext {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NetworkVisitor;

        impl serde::de::Visitor<'_> for NetworkVisitor {
            type Value = NetworkContext;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    formatter,
                    "a network name (mainnet, preview) or network magic (764824073, 2)"
                )
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                NetworkContext::try_from(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Unsigned(value),
                        &"a supported network magic (764824073, 2)",
                    )
                })
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                let magic = u64::try_from(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Signed(value),
                        &"a supported network magic (764824073, 2)",
                    )
                })?;
                self.visit_u64(magic)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                NetworkContext::from_str(value).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Str(value),
                        &"a supported network name (mainnet, preview)",
                    )
                })
            }
        }

        deserializer.deserialize_any(NetworkVisitor)
    }
}

/// Error type for network context parsing
#[derive(Debug, thiserror::Error)]
pub enum NetworkParseError {
    /// Unknown network magic
    #[error("unsupported network magic: {0}. Supported values are 764824073 (mainnet) and 2 (preview)")]
    InvalidMagic(u64),
    /// Unknown network name
    #[error("unsupported network name: {0}. Supported names are mainnet and preview")]
    InvalidName(String),
}
