// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Handle resolver CLI
//!
//! Looks up a Cardano handle and prints the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use handle_client::{ClientConfig, HandleClient};
use handle_provider::Chain;
use handle_providers::ProviderKind;
use handle_types::{HandleName, NetworkContext};
use serde_json::{Map, Value, json};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "handle-resolve", version)]
#[command(about = "Resolve a Cardano handle to its linked addresses", long_about = None)]
struct Cli {
    /// Handle to resolve, e.g. `$calvin`
    handle: String,

    /// Treat HANDLE as a hex asset name instead of a readable name
    #[arg(long)]
    hex: bool,

    /// Network to resolve on (mainnet, preview)
    #[arg(short, long)]
    network: Option<NetworkContext>,

    /// Data provider (koralabs, blockfrost)
    #[arg(short, long)]
    provider: Option<ProviderKind>,

    /// Print only the address for this chain (ada, btc, eth)
    #[arg(short, long)]
    chain: Option<Chain>,

    /// Directory holding handle-resolver.json
    #[arg(long, env = "HANDLE_CONFIG_DIR", default_value = ".")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load_from(&cli.config_dir).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config_dir.display()
        )
    })?;
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }

    let client = HandleClient::from_config(&config)?;
    info!(
        network = %client.context(),
        provider = %client.provider().kind(),
        "resolving handle"
    );

    let handle = if cli.hex {
        HandleName::hex(cli.handle)
    } else {
        HandleName::readable(cli.handle)
    };

    let output = match cli.chain {
        Some(chain) => {
            let address = client.resolve_address(&handle, chain).await?;
            let mut output = Map::new();
            output.insert(chain.key().to_string(), json!(address));
            Value::Object(output)
        }
        None => serde_json::to_value(client.resolve(&handle).await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
