// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP plumbing shared by the provider integrations
//!
//! Both backends are plain JSON-over-GET APIs. The helpers here build endpoint URLs,
//! execute a request under a timeout and map HTTP statuses onto [`HttpError`], which
//! converts into the provider-facing [`ProviderError`].

use std::time::Duration;

use handle_provider::ProviderError;
use reqwest::{RequestBuilder, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

/// User agent sent with every provider request
pub const USER_AGENT: &str = concat!("handle-resolver/", env!("CARGO_PKG_VERSION"));

const DEFAULT_RETRY_AFTER_SECONDS: u64 = 1;

/// Longest request timeout a provider accepts
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Errors raised while talking to a provider backend
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum HttpError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// API returned an error response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Endpoint URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },

    /// Configured timeout is outside `1..=MAX_TIMEOUT_SECONDS`
    #[error("Timeout must be between 1 and {MAX_TIMEOUT_SECONDS} seconds, got {0}")]
    InvalidTimeout(u64),
}

impl From<HttpError> for ProviderError {
    fn from(value: HttpError) -> Self {
        match value {
            HttpError::Http(error) if error.is_decode() => ProviderError::InvalidResponse {
                message: error.to_string(),
            },
            HttpError::Http(error) => ProviderError::Http {
                message: error.to_string(),
            },
            HttpError::NotFound { resource } => ProviderError::NotFound { handle: resource },
            HttpError::Api { status, message } => ProviderError::Api { status, message },
            HttpError::RateLimited {
                retry_after_seconds,
            } => ProviderError::RateLimitExceeded {
                retry_after_seconds,
            },
            HttpError::Unauthorized => ProviderError::Authentication {
                message: value.to_string(),
            },
            HttpError::InvalidUrl(message) => ProviderError::Configuration { message },
            HttpError::InvalidTimeout(_) => ProviderError::Configuration {
                message: value.to_string(),
            },
            HttpError::Timeout { seconds } => ProviderError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

/// Append path segments to a base URL, percent-encoding each segment
///
/// A trailing slash on the base is ignored.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, HttpError> {
    let mut url = Url::parse(base).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| HttpError::InvalidUrl(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Validate a base URL supplied through configuration
pub fn validate_base_url(base: &str) -> Result<(), HttpError> {
    endpoint(base, &[]).map(|_| ())
}

/// Validate a request timeout supplied through configuration
pub fn validate_timeout(seconds: u64) -> Result<(), HttpError> {
    if (1..=MAX_TIMEOUT_SECONDS).contains(&seconds) {
        Ok(())
    } else {
        Err(HttpError::InvalidTimeout(seconds))
    }
}

/// Send a GET request and decode its JSON body
///
/// `resource` names what was looked up and ends up in not-found errors. The whole
/// exchange, body included, is bounded by `timeout_seconds`.
pub async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    timeout_seconds: u64,
    resource: &str,
) -> Result<T, HttpError> {
    timeout(Duration::from_secs(timeout_seconds), fetch_json(request, resource))
        .await
        .map_err(|_| HttpError::Timeout {
            seconds: timeout_seconds,
        })?
}

async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    resource: &str,
) -> Result<T, HttpError> {
    let response = request.header("accept", "application/json").send().await?;

    match response.status() {
        status if status.is_success() => Ok(response.json().await?),
        StatusCode::NOT_FOUND => {
            debug!(resource, "provider reported resource as missing");
            Err(HttpError::NotFound {
                resource: resource.to_string(),
            })
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HttpError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => Err(HttpError::RateLimited {
            retry_after_seconds: retry_after(&response),
        }),
        status => {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Provider API error: {} - {}", status.as_u16(), error_text);
            Err(HttpError::Api {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let url = endpoint("https://api.handle.me", &["handles", "popz"]).unwrap();
        assert_eq!(url.as_str(), "https://api.handle.me/handles/popz");

        let url = endpoint(
            "https://cardano-mainnet.blockfrost.io/api/v0/",
            &["assets", "abc", "addresses"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cardano-mainnet.blockfrost.io/api/v0/assets/abc/addresses"
        );
    }

    #[test]
    fn endpoint_encodes_segments() {
        let url = endpoint("https://api.handle.me", &["handles", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.handle.me/handles/a%20b%2Fc");
    }

    #[test]
    fn endpoint_rejects_bad_base() {
        assert!(matches!(
            endpoint("not a url", &["x"]),
            Err(HttpError::InvalidUrl(_))
        ));
        assert!(validate_base_url("mailto:someone@example.com").is_err());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
    }

    #[test]
    fn timeout_bounds() {
        assert!(validate_timeout(1).is_ok());
        assert!(validate_timeout(MAX_TIMEOUT_SECONDS).is_ok());
        assert!(matches!(validate_timeout(0), Err(HttpError::InvalidTimeout(0))));
        assert!(validate_timeout(MAX_TIMEOUT_SECONDS + 1).is_err());

        let error: ProviderError = HttpError::InvalidTimeout(0).into();
        match error {
            ProviderError::Configuration { message } => {
                assert_eq!(message, "Timeout must be between 1 and 300 seconds, got 0");
            }
            other => panic!("Expected Configuration error, got: {other:?}"),
        }
    }

    #[test]
    fn errors_map_to_provider_errors() {
        let error: ProviderError = HttpError::NotFound {
            resource: "popz".to_string(),
        }
        .into();
        assert!(matches!(error, ProviderError::NotFound { ref handle } if handle == "popz"));

        let error: ProviderError = HttpError::Unauthorized.into();
        assert!(matches!(error, ProviderError::Authentication { .. }));

        let error: ProviderError = HttpError::RateLimited {
            retry_after_seconds: 7,
        }
        .into();
        assert!(matches!(
            error,
            ProviderError::RateLimitExceeded {
                retry_after_seconds: 7
            }
        ));

        let error: ProviderError = HttpError::Timeout { seconds: 2 }.into();
        assert!(matches!(error, ProviderError::Timeout { timeout_seconds: 2 }));

        let error: ProviderError = HttpError::InvalidUrl("bad".to_string()).into();
        assert!(matches!(error, ProviderError::Configuration { .. }));
    }
}
