// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Cardano handle resolver client
//!
//! Resolves `$handle` names to the Cardano, Bitcoin and Ethereum addresses they
//! point to, through either the Handle.me indexer or Blockfrost.
//!
//! # Architecture
//!
//! - **Client Facade**: [`HandleClient`] - network context, policy ids, codec helpers
//!   and lookups behind one type
//! - **Configuration**: [`ClientConfig`] - layered loading with the `config` crate
//! - **Error Handling**: [`ClientError`]
//!
//! ```no_run
//! use handle_client::HandleClient;
//! use handle_types::{HandleName, NetworkContext};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HandleClient::with_default_provider(NetworkContext::Mainnet)?;
//! let data = client.resolve(&HandleName::readable("$calvin")).await?;
//! println!("{:?}", data.resolved_addresses.ada);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::HandleClient;
pub use config::{ClientConfig, TimeoutSeconds};
pub use error::{ClientError, ClientResult};
