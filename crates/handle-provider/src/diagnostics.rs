// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic side channel for degraded lookups
//!
//! Aggregate lookups do not fail when a backend does. Instead the failure is handed
//! to a [`DiagnosticSink`] and the caller receives an empty result. The sink is
//! injected into providers so tests can observe what would otherwise only show up
//! in logs.

use handle_types::HandleName;
use tracing::warn;

use crate::{ProviderError, ResolvedHandleData};

const UTF8_HINT: &str =
    "You may need to convert the handle name to UTF-8 before providing it to this function.";

/// A lookup failure that was swallowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    /// Provider that failed
    pub provider: &'static str,
    /// Handle value as the caller supplied it
    pub handle: String,
    /// Whether the supplied value passes the hex validator
    pub looks_hex: bool,
    /// Rendered error
    pub error: String,
}

impl LookupFailure {
    /// Describe a failed lookup of `handle`
    pub fn new(provider: &'static str, handle: &HandleName, error: &ProviderError) -> Self {
        Self {
            provider,
            handle: handle.as_str().to_string(),
            looks_hex: handle.looks_hex(),
            error: error.to_string(),
        }
    }

    /// Hint for the caller when the handle looks like it was passed in the wrong form
    pub fn hint(&self) -> Option<&'static str> {
        self.looks_hex.then_some(UTF8_HINT)
    }
}

/// Receiver for failures that aggregate lookups swallow
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    /// Called once per failed lookup
    fn lookup_failed(&self, failure: &LookupFailure);
}

/// Default sink that emits a `tracing` warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn lookup_failed(&self, failure: &LookupFailure) {
        warn!(
            provider = failure.provider,
            handle = %failure.handle,
            looks_hex = failure.looks_hex,
            hint = failure.hint().unwrap_or_default(),
            error = %failure.error,
            "Something went wrong while fetching this handle"
        );
    }
}

/// Apply the degrade-to-empty policy to an aggregate lookup
///
/// Encoding errors are the caller's and are returned. Every other error is reported
/// to `sink` and replaced by an empty [`ResolvedHandleData`].
///
/// # Errors
///
/// Returns [`ProviderError::InvalidEncoding`] unchanged.
pub fn degrade_to_empty(
    result: Result<ResolvedHandleData, ProviderError>,
    provider: &'static str,
    handle: &HandleName,
    sink: &dyn DiagnosticSink,
) -> Result<ResolvedHandleData, ProviderError> {
    match result {
        Ok(data) => Ok(data),
        Err(error) if error.is_invalid_encoding() => Err(error),
        Err(error) => {
            sink.lookup_failed(&LookupFailure::new(provider, handle, &error));
            Ok(ResolvedHandleData::default())
        }
    }
}
