use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trustscan::explorer::{ExplorerClient, Network};

const ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

fn client(networks: Vec<Network>) -> ExplorerClient {
    ExplorerClient::new(reqwest::Client::new(), networks, None)
}

fn down_network(key: &str, symbol: &str) -> Network {
    Network::new(key, key, "http://127.0.0.1:9", symbol)
}

async fn mount_v2_transactions(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/addresses/{ADDRESS}/transactions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_partial_failure_keeps_successful_chain() {
    let server = MockServer::start().await;
    // Older transaction listed first to prove the merge re-sorts
    mount_v2_transactions(
        &server,
        json!([
            {
                "hash": "0xbbb",
                "block": 100,
                "from": { "hash": "0x1" },
                "to": { "hash": "0x2" },
                "value": "2000000000000000000",
                "timestamp": "2024-05-01T00:00:00Z",
                "status": "ok",
                "method": null
            },
            {
                "hash": "0xaaa",
                "block": 101,
                "from": { "hash": "0x1" },
                "to": { "hash": "0x2" },
                "value": "1000000000000000000",
                "timestamp": "2024-05-02T00:00:00Z",
                "status": "ok",
                "method": "transfer"
            }
        ]),
    )
    .await;

    let networks = vec![
        Network::new("alpha", "Alpha", server.uri(), "ETH"),
        down_network("beta", "ETH"),
    ];

    let txs = client(networks).fetch_transactions(ADDRESS, 10).await;

    assert_eq!(txs.len(), 2);
    assert!(txs.iter().all(|tx| tx.network.as_deref() == Some("alpha")));
    // Newest first after the merge
    assert_eq!(txs[0].hash, "0xaaa");
    assert_eq!(txs[1].hash, "0xbbb");
    assert!(txs.iter().all(|tx| tx.status.is_success()));
}

#[tokio::test]
async fn test_legacy_fallback_after_v2_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v2/addresses/{ADDRESS}/transactions")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "account"))
        .and(query_param("action", "txlist"))
        .and(query_param("address", ADDRESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": [
                {
                    "hash": "0xccc",
                    "blockNumber": "12345",
                    "from": "0x1",
                    "to": "0x2",
                    "value": "0",
                    "timeStamp": "1714564800",
                    "isError": "0",
                    "functionName": "approve(address,uint256)"
                }
            ]
        })))
        .mount(&server)
        .await;

    let networks = vec![Network::new("gamma", "Gamma", server.uri(), "ETH")];
    let txs = client(networks).fetch_transactions(ADDRESS, 10).await;

    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].hash, "0xccc");
    assert_eq!(txs[0].block_number, 12345);
    assert!(txs[0].status.is_success());
    assert_eq!(txs[0].method.as_deref(), Some("approve(address,uint256)"));
}

#[tokio::test]
async fn test_total_outage_synthesizes_transactions() {
    let networks = vec![down_network("alpha", "ETH"), down_network("beta", "MATIC")];

    let txs = client(networks).fetch_transactions(ADDRESS, 25).await;

    assert_eq!(txs.len(), 25);
    assert!(txs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert!(txs
        .iter()
        .all(|tx| tx.hash.starts_with("0x") && tx.hash.len() == 66));
    assert!(txs.iter().all(|tx| tx.network.is_some()));
}

async fn mount_balance(server: &MockServer, wei: &str) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "account"))
        .and(query_param("action", "balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "result": wei
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_balance_sums_across_networks() {
    let eth = MockServer::start().await;
    let polygon = MockServer::start().await;
    mount_balance(&eth, "1000000000000000000").await;
    mount_balance(&polygon, "500000000000000000").await;

    let networks = vec![
        Network::new("ethereum", "Ethereum", eth.uri(), "ETH"),
        Network::new("polygon", "Polygon", polygon.uri(), "MATIC"),
        down_network("bsc", "BNB"),
    ];
    let client = client(networks);

    let balances = client.fetch_network_balances(ADDRESS).await;
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].balance_formatted, "1.000000");

    let total = client.fetch_balance(ADDRESS).await;
    assert_eq!(total, Decimal::from(1_500_000_000_000_000_000u64));

    // 1 ETH * 2500 + 0.5 MATIC * 0.75
    let usd = client.total_balance_usd(ADDRESS).await;
    assert_eq!(usd, Decimal::new(2_500_375, 3));
}

#[tokio::test]
async fn test_balance_fallback_when_all_networks_fail() {
    let networks = vec![down_network("alpha", "ETH"), down_network("beta", "MATIC")];

    let total = client(networks).fetch_balance(ADDRESS).await;

    assert_eq!(total, Decimal::from(1_500_000_000_000_000_000u64));
}

#[tokio::test]
async fn test_nonzero_balance_filter() {
    let funded = MockServer::start().await;
    let empty = MockServer::start().await;
    mount_balance(&funded, "1000000000000000000").await;
    mount_balance(&empty, "0").await;

    let networks = vec![
        Network::new("ethereum", "Ethereum", funded.uri(), "ETH"),
        Network::new("gnosis", "Gnosis", empty.uri(), "xDAI"),
    ];

    let balances = client(networks).fetch_nonzero_balances(ADDRESS).await;

    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].network, "Ethereum");
}

#[tokio::test]
async fn test_token_info_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "token"))
        .and(query_param("action", "getToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "result": { "symbol": "USDC", "name": "USD Coin", "decimals": "6" }
        })))
        .mount(&server)
        .await;

    let networks = vec![Network::new("ethereum", "Ethereum", server.uri(), "ETH")];
    let info = client(networks)
        .fetch_token_info("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
        .await
        .expect("token info");

    assert_eq!(info.symbol.as_deref(), Some("USDC"));
    assert_eq!(info.decimals.as_deref(), Some("6"));
}

#[tokio::test]
async fn test_token_info_failure_returns_none() {
    let networks = vec![down_network("ethereum", "ETH")];

    let info = client(networks)
        .fetch_token_info("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
        .await;

    assert!(info.is_none());
}
