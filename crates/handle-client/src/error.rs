// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! Errors raised by the client facade itself. Provider failures are wrapped
//! unchanged so callers can still match on them.

use handle_provider::ProviderError;
use thiserror::Error;

/// Error types for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded from its sources
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A provider lookup failed
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ClientError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience type alias for client results
pub type ClientResult<T> = Result<T, ClientError>;
