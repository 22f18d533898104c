// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Handle name codec
//!
//! Handles live on chain as assets whose name is a byte string. Two metadata
//! standards coexist on the network:
//!
//! - **Legacy (CIP-25)**: the asset name is the raw UTF-8 bytes of the handle.
//! - **Labeled (CIP-68)**: the asset name is prefixed with the CIP-67 label 222,
//!   [`LABEL_PREFIX`], followed by the UTF-8 bytes of the handle.
//!
//! [`normalize`] accepts either encoding and returns the readable name, [`encode`]
//! produces the hex asset name with an optional label, and [`is_labeled`] tells the
//! two standards apart.
//!
//! # Examples
//!
//! ```rust
//! use handle_types::{AssetNameLabel, encode, is_labeled, normalize};
//!
//! let labeled = encode("popz", Some(AssetNameLabel::Nft));
//! assert_eq!(labeled, "000de140706f707a");
//! assert!(is_labeled(&labeled));
//! assert_eq!(normalize(&labeled).unwrap(), "popz");
//!
//! let legacy = encode("calvin", None);
//! assert_eq!(legacy, "63616c76696e");
//! assert!(!is_labeled(&legacy));
//! assert_eq!(normalize(&legacy).unwrap(), "calvin");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex_string::is_hex;

/// Hex prefix of CIP-68 user NFTs (CIP-67 label 222)
pub const LABEL_PREFIX: &str = "000de140";

/// Marker some callers put in front of a handle when displaying it
const DISPLAY_MARKER: char = '$';

/// Errors raised while converting handle names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum CodecError {
    /// Input was required to be a hex asset name but is not one
    #[error("invalid hex-encoded handle name '{input}': {reason}")]
    InvalidEncoding { input: String, reason: &'static str },

    /// Readable name with no characters after the display marker
    #[error("handle name is empty")]
    EmptyName,
}

impl CodecError {
    fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidEncoding {
            input: input.to_string(),
            reason,
        }
    }
}

/// CIP-67 asset name labels used by handle tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetNameLabel {
    /// Label 100, the reference token carrying the datum
    Reference,
    /// Label 222, the user-held NFT
    Nft,
    /// Label 333, fungible token
    FungibleToken,
    /// Label 444, rich fungible token
    RichFungibleToken,
}

impl AssetNameLabel {
    /// Returns the numeric CIP-67 label
    pub const fn number(self) -> u16 {
        match self {
            Self::Reference => 100,
            Self::Nft => 222,
            Self::FungibleToken => 333,
            Self::RichFungibleToken => 444,
        }
    }

    /// Returns the 4-byte hex prefix written in front of the asset name
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Reference => "000643b0",
            Self::Nft => LABEL_PREFIX,
            Self::FungibleToken => "0014df10",
            Self::RichFungibleToken => "001bc280",
        }
    }
}

impl fmt::Display for AssetNameLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Check whether a hex asset name follows the labeled (CIP-68) standard
///
/// This is a plain prefix test, case-insensitive like hex itself; nothing is decoded.
pub fn is_labeled(hex_name: &str) -> bool {
    hex_name
        .get(..LABEL_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LABEL_PREFIX))
}

fn strip_label(hex_name: &str) -> &str {
    if is_labeled(hex_name) {
        &hex_name[LABEL_PREFIX.len()..]
    } else {
        hex_name
    }
}

/// Encode a readable handle into its hex asset name
///
/// Every string is encodable. When `label` is given its prefix is prepended.
pub fn encode(readable: &str, label: Option<AssetNameLabel>) -> String {
    let name = hex::encode(readable.as_bytes());
    match label {
        Some(label) => format!("{}{name}", label.prefix()),
        None => name,
    }
}

/// Decode a hex asset name, labeled or legacy, into the readable handle
///
/// # Errors
///
/// Returns [`CodecError::InvalidEncoding`] when the input is empty, is not hex, is
/// a bare label with no name after it, or does not decode to UTF-8.
pub fn normalize(hex_name: &str) -> Result<String, CodecError> {
    if !is_hex(hex_name) {
        return Err(CodecError::invalid(
            hex_name,
            "a non-empty, even-length hex string is required",
        ));
    }

    let body = strip_label(hex_name);
    if body.is_empty() {
        return Err(CodecError::invalid(hex_name, "label is not followed by a name"));
    }

    let bytes = hex::decode(body).map_err(|_| CodecError::invalid(hex_name, "malformed hex"))?;
    String::from_utf8(bytes).map_err(|_| CodecError::invalid(hex_name, "name is not valid UTF-8"))
}

/// A handle as supplied by a caller, in one of its two representations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandleName {
    /// UTF-8 display form, without the `$` marker
    Readable(String),
    /// Hex asset name, with or without a label prefix
    HexEncoded(String),
}

impl HandleName {
    /// Wrap a readable handle, dropping a leading `$` display marker
    pub fn readable(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix(DISPLAY_MARKER) {
            Some(stripped) => Self::Readable(stripped.to_string()),
            None => Self::Readable(name),
        }
    }

    /// Wrap a hex asset name
    ///
    /// The value is not validated here; conversions report bad input.
    pub fn hex(value: impl Into<String>) -> Self {
        Self::HexEncoded(value.into())
    }

    /// The wrapped value as supplied
    pub fn as_str(&self) -> &str {
        match self {
            Self::Readable(value) | Self::HexEncoded(value) => value,
        }
    }

    /// Whether the readable form of this handle passes the hex validator
    ///
    /// Used in diagnostics: a readable name that looks like hex usually means the
    /// caller forgot to decode it. Hex values are judged by what they decode to,
    /// so a correctly encoded handle never looks hex.
    pub fn looks_hex(&self) -> bool {
        self.to_readable().is_ok_and(|name| is_hex(&name))
    }

    /// Whether this is a hex asset name carrying the CIP-68 label
    pub fn is_labeled(&self) -> bool {
        matches!(self, Self::HexEncoded(value) if is_labeled(value))
    }

    /// Resolve to the readable handle
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyName`] for an empty readable name and
    /// [`CodecError::InvalidEncoding`] when a hex value cannot be decoded.
    pub fn to_readable(&self) -> Result<String, CodecError> {
        match self {
            Self::Readable(name) if name.is_empty() => Err(CodecError::EmptyName),
            Self::Readable(name) => Ok(name.clone()),
            Self::HexEncoded(value) => normalize(value),
        }
    }

    /// Resolve to a lowercase hex asset name
    ///
    /// Readable names are encoded with `label`; hex values are returned as given,
    /// ignoring `label`, since they already carry whatever prefix they have.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyName`] for an empty readable name and
    /// [`CodecError::InvalidEncoding`] when a hex value is not valid hex.
    pub fn to_hex(&self, label: Option<AssetNameLabel>) -> Result<String, CodecError> {
        match self {
            Self::Readable(name) if name.is_empty() => Err(CodecError::EmptyName),
            Self::Readable(name) => Ok(encode(name, label)),
            Self::HexEncoded(value) if is_hex(value) => Ok(value.to_ascii_lowercase()),
            Self::HexEncoded(value) => Err(CodecError::invalid(
                value,
                "a non-empty, even-length hex string is required",
            )),
        }
    }
}

impl fmt::Display for HandleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
