// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for handle resolution
//!
//! This crate provides the leaf types every other crate in the workspace builds on:
//! the hex validator, the handle name codec, network contexts and the policy
//! identifiers that mark an asset as a handle.

pub mod codec;
pub mod hex_string;
pub mod network;
pub mod policy;

pub use codec::{
    AssetNameLabel, CodecError, HandleName, LABEL_PREFIX, encode, is_labeled, normalize,
};
pub use hex_string::is_hex;
pub use network::{NetworkContext, NetworkParseError};
pub use policy::{POLICY_ID_LENGTH, PolicyId, PolicyIdParseError};
