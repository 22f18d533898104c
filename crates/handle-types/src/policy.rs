// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Minting policy identifiers
//!
//! Only assets minted under a known policy are handles. The set of known policies
//! is fixed per [`NetworkContext`](crate::NetworkContext) and never changes at
//! runtime.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Length in bytes of a Cardano minting policy hash (Blake2b-224)
pub const POLICY_ID_LENGTH: usize = 28;

/// A Cardano minting policy hash
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolicyId([u8; POLICY_ID_LENGTH]);

impl PolicyId {
    /// Handle minting policy on mainnet
    pub const MAINNET: Self = Self([
        0xf0, 0xff, 0x48, 0xbb, 0xb7, 0xbb, 0xe9, 0xd5, 0x9a, 0x40, 0xf1, 0xce, 0x90, 0xe9, 0xe9,
        0xd0, 0xff, 0x50, 0x02, 0xec, 0x48, 0xf2, 0x32, 0xb4, 0x9c, 0xa0, 0xfb, 0x9a,
    ]);

    /// Handle minting policy on the preview testnet
    pub const PREVIEW: Self = Self([
        0x8d, 0x18, 0xd7, 0x86, 0xe9, 0x27, 0x76, 0xc8, 0x24, 0x60, 0x7f, 0xd8, 0xe1, 0x93, 0xec,
        0x53, 0x5c, 0x79, 0xdc, 0x61, 0xea, 0x24, 0x05, 0xdd, 0xf3, 0xb0, 0x9f, 0xe3,
    ]);

    /// Lowercase hex form, as used in asset identifiers
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyId({})", self.to_hex())
    }
}

impl FromStr for PolicyId {
    type Err = PolicyIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != POLICY_ID_LENGTH * 2 {
            return Err(PolicyIdParseError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; POLICY_ID_LENGTH];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| PolicyIdParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for PolicyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PolicyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Error type for policy id parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyIdParseError {
    /// Wrong number of hex characters
    #[error("policy id must be {expected} hex characters, got {0}", expected = POLICY_ID_LENGTH * 2)]
    InvalidLength(usize),
    /// Not hex
    #[error("policy id is not valid hex: {0}")]
    InvalidHex(String),
}
