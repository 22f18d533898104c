// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `BlockfrostProvider`
//!
//! These tests use wiremock to stand in for the Blockfrost API and cover both the
//! labeled (CIP-68) and legacy (CIP-25) lookup paths.

use handle_provider::{Chain, HandleProvider, ProviderError};
use handle_providers::{BlockfrostConfig, BlockfrostProvider};
use handle_types::{CodecError, HandleName, NetworkContext};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use fixtures::*;

const TEST_PROJECT_ID: &str = "mainnetTestProject";
const TEST_TIMEOUT_SECONDS: u64 = 5;

/// Create a test `BlockfrostConfig` pointing at the mock server
fn create_test_config(base_url: String, network: NetworkContext) -> BlockfrostConfig {
    let mut config = BlockfrostConfig::new(network, TEST_PROJECT_ID).unwrap();
    config.base_url = Some(base_url);
    config.timeout_seconds = TEST_TIMEOUT_SECONDS;
    config
}

fn create_provider(mock_server: &MockServer) -> BlockfrostProvider {
    BlockfrostProvider::new(create_test_config(mock_server.uri(), NetworkContext::Mainnet))
        .unwrap()
}

async fn mount_asset(
    mock_server: &MockServer,
    hex_name: &str,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(BlockfrostFixture::asset_path(MAINNET_POLICY, hex_name)))
        .and(header("project_id", TEST_PROJECT_ID))
        .respond_with(response)
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

async fn mount_holders(
    mock_server: &MockServer,
    hex_name: &str,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(BlockfrostFixture::addresses_path(MAINNET_POLICY, hex_name)))
        .and(header("project_id", TEST_PROJECT_ID))
        .respond_with(response)
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

fn ok_json(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn labeled_cardano_address_comes_from_datum() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::labeled_asset()), 1).await;
    mount_holders(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::holders()), 0).await;
    let provider = create_provider(&mock_server);

    let address = provider
        .get_cardano_address(&HandleName::hex(LABELED_HEX))
        .await
        .unwrap();
    assert_eq!(address, ADA_ADDRESS);
}

#[tokio::test]
async fn uppercase_hex_is_normalized_into_the_asset_id() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::labeled_asset()), 1).await;
    let provider = create_provider(&mock_server);

    let address = provider
        .get_cardano_address(&HandleName::hex(LABELED_HEX.to_uppercase()))
        .await
        .unwrap();
    assert_eq!(address, ADA_ADDRESS);
}

#[tokio::test]
async fn uppercase_labeled_hex_takes_the_labeled_path() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::labeled_asset()), 1).await;
    let provider = create_provider(&mock_server);

    let address = provider
        .get_bitcoin_address(&HandleName::hex("000DE140706F707A"))
        .await
        .unwrap();
    assert_eq!(address.as_deref(), Some(BTC_ADDRESS));
}

#[tokio::test]
async fn empty_name_fails_without_a_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let provider = create_provider(&mock_server);

    for handle in [HandleName::readable(""), HandleName::readable("$")] {
        assert!(matches!(
            provider.get_cardano_address(&handle).await,
            Err(ProviderError::InvalidEncoding(CodecError::EmptyName))
        ));
        assert!(matches!(
            provider.get_bitcoin_address(&handle).await,
            Err(ProviderError::InvalidEncoding(CodecError::EmptyName))
        ));
        assert!(matches!(
            provider.get_all_data(&handle).await,
            Err(ProviderError::InvalidEncoding(CodecError::EmptyName))
        ));
    }
}

#[tokio::test]
async fn labeled_without_datum_address_falls_back_to_holder() {
    let mock_server = MockServer::start().await;
    let asset = json!({
        "asset": format!("{MAINNET_POLICY}{LABELED_HEX}"),
        "onchain_metadata": {"name": "$popz"},
        "metadata": null
    });
    mount_asset(&mock_server, LABELED_HEX, ok_json(asset), 1).await;
    mount_holders(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::holders()), 1).await;
    let provider = create_provider(&mock_server);

    let address = provider
        .get_cardano_address(&HandleName::hex(LABELED_HEX))
        .await
        .unwrap();
    assert_eq!(address, HOLDER_ADDRESS);
}

#[tokio::test]
async fn legacy_cardano_address_is_the_holder() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LEGACY_HEX, ok_json(BlockfrostFixture::legacy_asset()), 0).await;
    mount_holders(&mock_server, LEGACY_HEX, ok_json(BlockfrostFixture::holders()), 2).await;
    let provider = create_provider(&mock_server);

    let from_readable = provider
        .get_cardano_address(&HandleName::readable("$popz"))
        .await
        .unwrap();
    let from_hex = provider
        .get_cardano_address(&HandleName::hex(LEGACY_HEX))
        .await
        .unwrap();

    assert_eq!(from_readable, HOLDER_ADDRESS);
    assert_eq!(from_hex, HOLDER_ADDRESS);
}

#[tokio::test]
async fn unknown_asset_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_holders(&mock_server, LEGACY_HEX, ResponseTemplate::new(404), 1).await;
    let provider = create_provider(&mock_server);

    let result = provider
        .get_cardano_address(&HandleName::readable(HANDLE))
        .await;
    assert!(matches!(result, Err(ProviderError::NotFound { .. })));
}

#[tokio::test]
async fn asset_without_holders_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_holders(&mock_server, LEGACY_HEX, ok_json(json!([])), 1).await;
    let provider = create_provider(&mock_server);

    let result = provider
        .get_cardano_address(&HandleName::hex(LEGACY_HEX))
        .await;
    match result {
        Err(ProviderError::NotFound { handle }) => assert_eq!(handle, LEGACY_HEX),
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[tokio::test]
async fn labeled_other_chains_come_from_datum() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::labeled_asset()), 2).await;
    let provider = create_provider(&mock_server);
    let handle = HandleName::hex(LABELED_HEX);

    assert_eq!(
        provider.get_bitcoin_address(&handle).await.unwrap().as_deref(),
        Some(BTC_ADDRESS)
    );
    assert_eq!(
        provider.get_ethereum_address(&handle).await.unwrap().as_deref(),
        Some(ETH_ADDRESS)
    );
}

#[tokio::test]
async fn legacy_handles_have_no_other_chains() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let provider = create_provider(&mock_server);

    for handle in [HandleName::readable(HANDLE), HandleName::hex(LEGACY_HEX)] {
        assert_eq!(provider.get_bitcoin_address(&handle).await.unwrap(), None);
        assert_eq!(provider.get_ethereum_address(&handle).await.unwrap(), None);
    }
}

#[tokio::test]
async fn unknown_labeled_asset_has_no_other_chains() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LABELED_HEX, ResponseTemplate::new(404), 1).await;
    let provider = create_provider(&mock_server);

    let result = provider
        .get_bitcoin_address(&HandleName::hex(LABELED_HEX))
        .await;
    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn rejected_project_id_is_an_authentication_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status_code": 403,
            "error": "Forbidden",
            "message": "Invalid project token."
        })))
        .mount(&mock_server)
        .await;
    let provider = create_provider(&mock_server);

    let result = provider
        .get_ethereum_address(&HandleName::hex(LABELED_HEX))
        .await;
    assert!(matches!(result, Err(ProviderError::Authentication { .. })));
}

#[tokio::test]
async fn all_data_for_labeled_handle() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::labeled_asset()), 1).await;
    mount_holders(&mock_server, LABELED_HEX, ok_json(BlockfrostFixture::holders()), 0).await;
    let sink = RecordingSink::shared();
    let provider = create_provider(&mock_server).with_diagnostics(sink.clone());

    let data = provider
        .get_all_data(&HandleName::hex(LABELED_HEX))
        .await
        .unwrap();

    assert_eq!(data.address(Chain::Cardano), Some(ADA_ADDRESS));
    assert_eq!(data.address(Chain::Ethereum), Some(ETH_ADDRESS));
    assert_eq!(data.metadata.get("name"), Some(&json!("$popz")));
    assert!(sink.failures().is_empty());
}

#[tokio::test]
async fn all_data_for_legacy_handle_merges_and_adds_holder() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LEGACY_HEX, ok_json(BlockfrostFixture::legacy_asset()), 1).await;
    mount_holders(&mock_server, LEGACY_HEX, ok_json(BlockfrostFixture::holders()), 1).await;
    let sink = RecordingSink::shared();
    let provider = create_provider(&mock_server).with_diagnostics(sink.clone());

    let data = provider
        .get_all_data(&HandleName::readable(HANDLE))
        .await
        .unwrap();

    assert_eq!(data.address(Chain::Cardano), Some(HOLDER_ADDRESS));
    assert_eq!(data.address(Chain::Bitcoin), None);
    // off-chain registry value wins
    assert_eq!(data.metadata.get("image"), Some(&json!("ipfs://QmPopzRegistry")));
    assert_eq!(
        data.metadata.get("description"),
        Some(&json!("The Handle Standard"))
    );
    assert_eq!(data.metadata.get("core"), Some(&json!({"og": 0, "prefix": "$"})));
    assert!(sink.failures().is_empty());
}

#[tokio::test]
async fn all_data_keeps_asset_when_holder_lookup_fails() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LEGACY_HEX, ok_json(BlockfrostFixture::legacy_asset()), 1).await;
    mount_holders(&mock_server, LEGACY_HEX, ResponseTemplate::new(500), 1).await;
    let sink = RecordingSink::shared();
    let provider = create_provider(&mock_server).with_diagnostics(sink.clone());

    let data = provider
        .get_all_data(&HandleName::hex(LEGACY_HEX))
        .await
        .unwrap();

    assert!(!data.is_empty());
    assert_eq!(data.address(Chain::Cardano), None);

    let failures = sink.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].provider, "blockfrost");
    assert!(failures[0].error.contains("500"));
}

#[tokio::test]
async fn all_data_degrades_on_server_error() {
    let mock_server = MockServer::start().await;
    mount_asset(
        &mock_server,
        LABELED_HEX,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
        1,
    )
    .await;
    let sink = RecordingSink::shared();
    let provider = create_provider(&mock_server).with_diagnostics(sink.clone());

    let data = provider
        .get_all_data(&HandleName::hex(LABELED_HEX))
        .await
        .unwrap();
    assert!(data.is_empty());

    let failures = sink.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].handle, LABELED_HEX);
    assert!(!failures[0].looks_hex);
    assert!(failures[0].hint().is_none());
}

#[tokio::test]
async fn all_data_degrades_on_unknown_asset() {
    let mock_server = MockServer::start().await;
    mount_asset(&mock_server, LEGACY_HEX, ResponseTemplate::new(404), 1).await;
    let sink = RecordingSink::shared();
    let provider = create_provider(&mock_server).with_diagnostics(sink.clone());

    let data = provider
        .get_all_data(&HandleName::readable(HANDLE))
        .await
        .unwrap();
    assert!(data.is_empty());
    assert_eq!(sink.failures().len(), 1);
}

#[tokio::test]
async fn all_data_rejects_non_hex_input() {
    let mock_server = MockServer::start().await;
    let sink = RecordingSink::shared();
    let provider = create_provider(&mock_server).with_diagnostics(sink.clone());

    let result = provider.get_all_data(&HandleName::hex("papagoose")).await;
    assert!(matches!(result, Err(ProviderError::InvalidEncoding(_))));
    assert!(sink.failures().is_empty());
}

#[tokio::test]
async fn preview_lookups_use_preview_policy() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BlockfrostFixture::addresses_path(PREVIEW_POLICY, LEGACY_HEX)))
        .respond_with(ok_json(BlockfrostFixture::holders()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut provider = create_provider(&mock_server);
    provider.retarget(NetworkContext::Preview);

    let address = provider
        .get_cardano_address(&HandleName::readable(HANDLE))
        .await
        .unwrap();
    assert_eq!(address, HOLDER_ADDRESS);
}
