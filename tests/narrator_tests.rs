use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trustscan::intelligence::narrator::local_analysis;
use trustscan::intelligence::Narrator;
use trustscan::models::{RiskLevel, Transaction, TxStatus};

fn make_txs(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| Transaction {
            hash: format!("0x{i:064x}"),
            block_number: i as u64,
            from_address: "0x1".into(),
            to_address: "0x2".into(),
            value: Decimal::from(1_000_000_000_000_000_000u64),
            timestamp: Utc::now(),
            status: TxStatus::Success,
            method: Some("transfer".into()),
            gas_used: None,
            gas_price: None,
            network: Some("ethereum".into()),
        })
        .collect()
}

#[tokio::test]
async fn test_remote_reply_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": "asi1-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "LOW|Active Trader|Healthy activity.|Insight one|Insight two"
                    }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let narrator = Narrator::new(
        reqwest::Client::new(),
        server.uri(),
        Some("test-key".into()),
        "asi1-mini",
    );

    let analysis = narrator.analyze(&make_txs(12), &[], Decimal::ZERO).await;

    assert_eq!(analysis.risk_level, RiskLevel::Low);
    assert_eq!(analysis.behavior_pattern, "Active Trader");
    assert_eq!(analysis.summary, "Healthy activity.");
    assert_eq!(analysis.key_insights, vec!["Insight one", "Insight two"]);
}

#[tokio::test]
async fn test_unstructured_remote_reply_degrades_gracefully() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "All looks fine to me." } }
            ]
        })))
        .mount(&server)
        .await;

    let narrator = Narrator::new(
        reqwest::Client::new(),
        server.uri(),
        Some("test-key".into()),
        "asi1-mini",
    );

    let analysis = narrator.analyze(&make_txs(3), &[], Decimal::ZERO).await;

    assert_eq!(analysis.risk_level, RiskLevel::Medium);
    assert_eq!(analysis.behavior_pattern, "General wallet activity");
    assert!(analysis.summary.starts_with("All looks fine to me."));
}

#[tokio::test]
async fn test_remote_error_falls_back_to_local() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let narrator = Narrator::new(
        reqwest::Client::new(),
        server.uri(),
        Some("test-key".into()),
        "asi1-mini",
    );
    let txs = make_txs(12);

    let analysis = narrator.analyze(&txs, &[], Decimal::ZERO).await;

    assert_eq!(analysis, local_analysis(&txs, &[]));
    assert_eq!(analysis.risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn test_empty_choices_falls_back_to_local() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let narrator = Narrator::new(
        reqwest::Client::new(),
        server.uri(),
        Some("test-key".into()),
        "asi1-mini",
    );
    let txs = make_txs(7);

    let analysis = narrator.analyze(&txs, &[], Decimal::ZERO).await;

    assert_eq!(analysis, local_analysis(&txs, &[]));
}
