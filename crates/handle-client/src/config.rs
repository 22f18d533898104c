// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration module
//!
//! This module loads the settings that pick a network and a provider backend, and
//! turns them into a ready [`ConfiguredProvider`].

use std::path::Path;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map, builder::DefaultState};
use handle_providers::{
    BlockfrostConfig, BlockfrostProvider, ConfiguredProvider, KoraLabsConfig, KoraLabsProvider,
    NonEmptyString, ProviderKind,
};
use handle_types::NetworkContext;
use serde::{Deserialize, Deserializer, Serialize, de};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

const CONFIG_FILE_STEM: &str = "handle-resolver";
const ENV_PREFIX: &str = "HANDLE";

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(u64);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> ClientResult<Self> {
        if seconds == 0 {
            return Err(ClientError::config("timeout must be greater than 0"));
        }
        if seconds > 300 {
            return Err(ClientError::config("timeout cannot exceed 300"));
        }
        Ok(Self(seconds))
    }

    /// Create a safe default timeout (30 seconds)
    pub const fn default_value() -> Self {
        Self(30)
    }

    /// Get the timeout in whole seconds
    pub fn seconds(&self) -> u64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self::default_value()
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network handles are resolved on
    pub network: NetworkContext,
    /// Backend used for lookups
    pub provider: ProviderKind,
    /// Handle.me API key or Blockfrost project id
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL override for the selected provider
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkContext::default(),
            provider: ProviderKind::default(),
            api_key: None,
            base_url: None,
            timeout_seconds: TimeoutSeconds::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration file (`handle-resolver.json` in `dir`)
    /// 3. Network-specific file (`handle-resolver.{network}.json` in `dir`)
    /// 4. Environment variables with `HANDLE_` prefix
    ///
    /// The network that selects the file in step 3 is read from steps 1, 2 and 4.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Load` if configuration cannot be loaded or is invalid.
    pub fn load_from(dir: &Path) -> ClientResult<Self> {
        Self::load_with_env(dir, None)
    }

    /// Same as [`ClientConfig::load_from`], reading `HANDLE_*` variables from `env`
    /// instead of the process environment when it is set
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Load` if configuration cannot be loaded or is invalid.
    pub fn load_with_env(dir: &Path, env: Option<Map<String, String>>) -> ClientResult<Self> {
        let base_file = dir.join(format!("{CONFIG_FILE_STEM}.json"));

        let network: NetworkContext = Self::builder()?
            .add_source(File::from(base_file.clone()).required(false))
            .add_source(Self::environment(env.clone()))
            .build()?
            .get("network")?;

        let network_file = dir.join(format!("{CONFIG_FILE_STEM}.{network}.json"));
        debug!(
            base = %base_file.display(),
            network = %network_file.display(),
            "loading client configuration"
        );

        Self::builder()?
            .add_source(File::from(base_file).required(false))
            .add_source(File::from(network_file).required(false))
            .add_source(Self::environment(env))
            .build()?
            .try_deserialize()
            .map_err(ClientError::from)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("network", NetworkContext::default().name())?
            .set_default("provider", ProviderKind::default().to_string())?
            .set_default("timeout_seconds", TimeoutSeconds::default().seconds())
    }

    fn environment(source: Option<Map<String, String>>) -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(source)
    }

    /// Build the provider this configuration selects
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` when Blockfrost is selected without a project
    /// id, when the key is blank, or when the base URL is invalid.
    pub fn build_provider(&self) -> ClientResult<ConfiguredProvider> {
        let api_key = self
            .api_key
            .clone()
            .map(NonEmptyString::new)
            .transpose()
            .map_err(|e| ClientError::config(format!("invalid api_key: {e}")))?;

        let provider = match self.provider {
            ProviderKind::KoraLabs => KoraLabsProvider::new(KoraLabsConfig {
                network: self.network,
                api_key,
                base_url: self.base_url.clone(),
                timeout_seconds: self.timeout_seconds.seconds(),
            })
            .map(ConfiguredProvider::from),
            ProviderKind::Blockfrost => {
                let project_id = api_key.ok_or_else(|| {
                    ClientError::config("the blockfrost provider requires api_key (project id)")
                })?;
                BlockfrostProvider::new(BlockfrostConfig {
                    network: self.network,
                    project_id,
                    base_url: self.base_url.clone(),
                    timeout_seconds: self.timeout_seconds.seconds(),
                })
                .map(ConfiguredProvider::from)
            }
        };

        provider.map_err(|e| ClientError::config(e.to_string()))
    }
}
