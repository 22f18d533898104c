// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Handle data provider integrations
//!
//! This crate provides implementations of the `HandleProvider` trait for the services
//! that index Cardano handles, plus a runtime-selectable wrapper over them.
//!
//! # Architecture
//!
//! - **Provider Implementations**: [`koralabs`] (the Handle.me indexer) and
//!   [`blockfrost`] (general ledger data) - specific API integrations
//! - **Dispatch**: [`dispatch::ConfiguredProvider`] - picks a provider at runtime
//! - **HTTP Helpers**: [`http`] - request execution and status mapping shared by
//!   both providers
//! - **Validation Utilities**: [`non_empty_string::NonEmptyString`] - credentials that
//!   cannot be blank
//!
//! # Features
//!
//! - **Both Metadata Standards**: Blockfrost lookups read CIP-68 datums and fall back
//!   to asset holders for legacy CIP-25 handles
//! - **Degrade to Empty**: aggregate lookups report failures to a diagnostic sink
//!   instead of failing
//! - **Testing Support**: base URLs can be overridden, integration tests use wiremock

pub mod blockfrost;
pub mod dispatch;
pub mod http;
pub mod koralabs;
pub mod non_empty_string;

pub use blockfrost::*;
pub use dispatch::*;
pub use http::HttpError;
pub use koralabs::*;
pub use non_empty_string::NonEmptyString;
