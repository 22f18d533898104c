// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Provider contract for handle resolution
//!
//! This crate defines the interface every handle data backend implements, along with
//! the shared result and error types the backends map their responses into.
//!
//! # Core Abstractions
//!
//! - **`HandleProvider` Trait**: async lookups of a handle's Cardano, Bitcoin and
//!   Ethereum addresses and of its full data bundle
//! - **Error Handling**: [`ProviderError`] separates caller mistakes (bad encoding)
//!   from backend answers (not found) and transport failures
//! - **Result Types**: [`ResolvedHandleData`] and [`ResolvedAddresses`]
//! - **Diagnostics**: [`DiagnosticSink`] receives the failures that aggregate lookups
//!   swallow, see [`degrade_to_empty`]

use handle_types::{CodecError, HandleName, NetworkContext};
use thiserror::Error;

pub mod diagnostics;
pub mod types;

pub use diagnostics::*;
pub use types::*;

/// Generic trait for handle data providers
///
/// Implementations issue the HTTP calls against their backend and map the answers
/// into the common shapes of this crate. The trait holds no shared helpers; those
/// are free functions implementations compose.
pub trait HandleProvider: Send + Sync {
    /// Resolve the Cardano address a handle points to
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when the handle does not exist, and a
    /// transport error when the backend cannot be reached.
    fn get_cardano_address(
        &self,
        handle: &HandleName,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;

    /// Resolve the Bitcoin address linked to a handle
    ///
    /// # Returns
    ///
    /// * `Ok(Some(address))` if the handle has a linked Bitcoin address
    /// * `Ok(None)` if the handle is unknown or has no Bitcoin address
    /// * `Err(error)` if the backend could not be queried
    fn get_bitcoin_address(
        &self,
        handle: &HandleName,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;

    /// Resolve the Ethereum address linked to a handle
    ///
    /// Follows the same conventions as [`HandleProvider::get_bitcoin_address`].
    fn get_ethereum_address(
        &self,
        handle: &HandleName,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;

    /// Fetch everything the backend knows about a handle
    ///
    /// Backend failures never surface here: they are reported to the provider's
    /// [`DiagnosticSink`] and the lookup resolves to an empty
    /// [`ResolvedHandleData`].
    ///
    /// # Errors
    ///
    /// Only [`ProviderError::InvalidEncoding`], when the handle itself cannot be
    /// converted into the form the backend needs.
    fn get_all_data(
        &self,
        handle: &HandleName,
    ) -> impl Future<Output = Result<ResolvedHandleData, ProviderError>> + Send;

    /// Get the name/identifier of this provider
    fn name(&self) -> &'static str;

    /// Point the provider at another network
    ///
    /// Network-bound providers recompute their base URL here. The default does
    /// nothing, for providers that are not tied to a network.
    fn retarget(&mut self, network: NetworkContext) {
        let _ = network;
    }
}

/// Common errors that can occur when resolving handles
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ProviderError {
    /// The handle could not be converted between its readable and hex forms
    #[error(transparent)]
    InvalidEncoding(#[from] CodecError),

    /// The backend has no asset for this handle
    #[error("Handle not found: {handle}")]
    NotFound { handle: String },

    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Backend answered with an unexpected status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ProviderError {
    /// Whether the error was raised by the caller's input rather than the backend
    pub fn is_invalid_encoding(&self) -> bool {
        matches!(self, Self::InvalidEncoding(_))
    }

    /// Whether the backend reported the handle as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Map a not-found answer to `None` for the optional address accessors
///
/// # Errors
///
/// Passes every other error through.
pub fn absent_if_not_found(
    result: Result<Option<String>, ProviderError>,
) -> Result<Option<String>, ProviderError> {
    match result {
        Err(error) if error.is_not_found() => Ok(None),
        other => other,
    }
}
