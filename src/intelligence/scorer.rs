use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::intelligence::classifier::unique_token_count;
use crate::models::{wei_to_native, RiskLevel, TokenTransfer, Transaction};

/// Per-component contribution to the trust score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub transaction_volume: i64,
    pub success_rate: i64,
    pub wallet_age: i64,
    pub token_diversity: i64,
    pub activity_consistency: i64,
    /// Non-positive: penalties subtract from the total.
    pub risk_factors: i64,
}

/// Aggregated trust-scoring output for a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustScoreDetails {
    pub total_score: i64,
    pub breakdown: ScoreBreakdown,
    pub risk_level: RiskLevel,
    pub score_category: String,
}

/// Compute the 0-100 trust score for a wallet.
///
/// Pure and deterministic: identical inputs and `now` produce identical
/// output. `balance_wei` is the combined multi-chain balance in wei.
///
/// Component caps: volume 25, success rate 25, wallet age 20, token
/// diversity 15, consistency 10. Three independent +5 penalties apply
/// for a high failure ratio, a dusty-but-busy wallet, and near-zero
/// history. The weights are behavior-compatibility constants, not tuned
/// values.
pub fn calculate_trust_score(
    transactions: &[Transaction],
    token_transfers: &[TokenTransfer],
    balance_wei: Decimal,
    now: DateTime<Utc>,
) -> TrustScoreDetails {
    let tx_count = transactions.len() as i64;
    let successful = transactions
        .iter()
        .filter(|tx| tx.status.is_success())
        .count() as i64;
    let failed = tx_count - successful;
    let unique_tokens = unique_token_count(token_transfers) as i64;
    let balance_native = wei_to_native(balance_wei);

    let volume_score = (tx_count / 2).min(25);

    let success_score = if tx_count > 0 {
        successful * 25 / tx_count
    } else {
        0
    };

    let days_since_first = transactions
        .iter()
        .map(|tx| tx.timestamp)
        .min()
        .map(|first| (now - first).num_days().max(0))
        .unwrap_or(0);
    let age_score = (days_since_first / 30).min(20);

    let diversity_score = (unique_tokens * 3).min(15);

    let consistency_score = tx_count.min(10);

    let mut risk_penalty = 0;
    // failed > 30% of all transactions
    if failed * 10 > tx_count * 3 {
        risk_penalty += 5;
    }
    // dust balance on a busy wallet
    if balance_native < Decimal::new(1, 2) && tx_count > 50 {
        risk_penalty += 5;
    }
    if tx_count < 5 {
        risk_penalty += 5;
    }

    let raw = volume_score + success_score + age_score + diversity_score + consistency_score
        - risk_penalty;
    let total_score = raw.clamp(0, 100);

    TrustScoreDetails {
        total_score,
        breakdown: ScoreBreakdown {
            transaction_volume: volume_score,
            success_rate: success_score,
            wallet_age: age_score,
            token_diversity: diversity_score,
            activity_consistency: consistency_score,
            risk_factors: -risk_penalty,
        },
        risk_level: risk_level_for(total_score),
        score_category: category_for(total_score).to_string(),
    }
}

/// Risk level is a monotonic function of the total score alone.
pub fn risk_level_for(total_score: i64) -> RiskLevel {
    if total_score >= 70 {
        RiskLevel::Low
    } else if total_score >= 40 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Human label for a total score, same thresholds every caller sees.
pub fn category_for(total_score: i64) -> &'static str {
    if total_score >= 80 {
        "Highly Trusted"
    } else if total_score >= 60 {
        "Trusted"
    } else if total_score >= 40 {
        "Moderately Trusted"
    } else if total_score >= 20 {
        "Low Trust"
    } else {
        "High Risk"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
