use std::time::Instant;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::intelligence::classifier::{derive_token_transfers, unique_token_count};
use crate::intelligence::narrator::AiAnalysis;
use crate::intelligence::scorer::{calculate_trust_score, TrustScoreDetails};
use crate::models::wei_to_native;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainStats {
    pub successful_transactions: usize,
    pub failed_transactions: usize,
    pub total_eth_volume: String,
    pub unique_tokens: usize,
    pub has_recent_activity: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMetadata {
    pub transaction_count: usize,
    pub token_transfer_count: usize,
    pub balance_eth: String,
    pub analyzed_at: DateTime<Utc>,
    pub blockchain_stats: BlockchainStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub address: String,
    pub trust_score: TrustScoreDetails,
    pub ai_analysis: AiAnalysis,
    pub metadata: AnalyzeMetadata,
}

/// POST /api/analyze: run the full analysis pipeline for one address.
///
/// Validation failures reject immediately; everything past validation is
/// best-effort and always yields a complete result, even under total
/// upstream outage.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Option<Json<AnalyzeRequest>>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let address = match payload.and_then(|Json(req)| req.address) {
        Some(a) if !a.is_empty() => a,
        _ => {
            metrics::counter!("analyses_rejected_total").increment(1);
            return Err(AppError::BadRequest("Wallet address is required".into()));
        }
    };

    if !is_valid_address(&address) {
        metrics::counter!("analyses_rejected_total").increment(1);
        return Err(AppError::BadRequest("Invalid wallet address format".into()));
    }

    tracing::info!(address = %address, "Starting wallet analysis");
    let started = Instant::now();

    let (transactions, balance) = tokio::join!(
        state
            .explorer
            .fetch_transactions(&address, state.config.tx_fetch_limit),
        state.explorer.fetch_balance(&address),
    );
    let token_transfers = derive_token_transfers(&transactions, None);

    tracing::info!(
        transactions = transactions.len(),
        token_transfers = token_transfers.len(),
        balance = %wei_to_native(balance).round_dp(4),
        "Fetched multi-chain wallet data"
    );

    let now = Utc::now();
    let trust_score = calculate_trust_score(&transactions, &token_transfers, balance, now);
    let ai_analysis = state
        .narrator
        .analyze(&transactions, &token_transfers, balance)
        .await;

    let successful = transactions
        .iter()
        .filter(|tx| tx.status.is_success())
        .count();
    let total_volume: Decimal = transactions.iter().map(|tx| tx.value).sum();
    let recent_cutoff = now - Duration::days(30);
    let has_recent_activity = transactions.iter().any(|tx| tx.timestamp > recent_cutoff);

    metrics::counter!("analyses_total").increment(1);
    metrics::histogram!("analysis_latency_seconds").record(started.elapsed().as_secs_f64());

    tracing::info!(
        address = %address,
        score = trust_score.total_score,
        risk = %trust_score.risk_level,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Wallet analysis completed"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        metadata: AnalyzeMetadata {
            transaction_count: transactions.len(),
            token_transfer_count: token_transfers.len(),
            balance_eth: format!("{:.4}", wei_to_native(balance)),
            analyzed_at: now,
            blockchain_stats: BlockchainStats {
                successful_transactions: successful,
                failed_transactions: transactions.len() - successful,
                total_eth_volume: format!("{:.4}", wei_to_native(total_volume)),
                unique_tokens: unique_token_count(&token_transfers),
                has_recent_activity,
            },
        },
        trust_score,
        ai_analysis,
        address,
    }))
}

/// GET /api/analyze: static liveness/version payload.
pub async fn info() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Wallet trust analysis API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["POST /api/analyze - Analyze wallet trust score"],
    }))
}

/// Addresses must be `0x` followed by exactly 40 hex digits.
fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
