use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::intelligence::classifier::unique_token_count;
use crate::models::{wei_to_native, RiskLevel, TokenTransfer, Transaction};

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You are a blockchain analyst expert. Analyze wallet behavior \
and provide insights in a structured format.";

/// Narrative assessment of a wallet. Produced either by the completion
/// API or by the local fallback; both paths populate every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub key_insights: Vec<String>,
    pub behavior_pattern: String,
}

#[derive(Debug, Error)]
enum NarratorError {
    #[error("completion API key not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Wallet-behavior narrator backed by a chat-completion API.
///
/// The remote call is strictly best-effort: a missing key, transport
/// error, or malformed reply all degrade to a deterministic local
/// analysis of the same inputs, so `analyze` never fails.
#[derive(Debug, Clone)]
pub struct Narrator {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl Narrator {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        }
    }

    /// Produce the four-field narrative for a wallet.
    pub async fn analyze(
        &self,
        transactions: &[Transaction],
        token_transfers: &[TokenTransfer],
        balance_wei: Decimal,
    ) -> AiAnalysis {
        match self
            .remote_analysis(transactions, token_transfers, balance_wei)
            .await
        {
            Ok(analysis) => {
                tracing::debug!("Completion API analysis generated");
                analysis
            }
            Err(e) => {
                metrics::counter!("narrator_fallbacks_total").increment(1);
                tracing::warn!(error = %e, "Completion API unavailable, using local analysis");
                local_analysis(transactions, token_transfers)
            }
        }
    }

    async fn remote_analysis(
        &self,
        transactions: &[Transaction],
        token_transfers: &[TokenTransfer],
        balance_wei: Decimal,
    ) -> Result<AiAnalysis, NarratorError> {
        let api_key = self.api_key.as_deref().ok_or(NarratorError::MissingApiKey)?;

        let prompt = build_prompt(transactions, token_transfers, balance_wei);
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
        });

        let resp: ChatCompletionResponse = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .timeout(COMPLETION_TIMEOUT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let reply = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| NarratorError::Unexpected("no choices in completion reply".into()))?;

        Ok(parse_reply(&reply))
    }
}

/// Summarize the fetched data for the completion request. The reply is
/// expected back as `RISK_LEVEL|PATTERN|SUMMARY|INSIGHT1|INSIGHT2|...`.
fn build_prompt(
    transactions: &[Transaction],
    token_transfers: &[TokenTransfer],
    balance_wei: Decimal,
) -> String {
    let tx_count = transactions.len();
    let successful = transactions
        .iter()
        .filter(|tx| tx.status.is_success())
        .count();
    let failed = tx_count - successful;
    let unique_tokens = unique_token_count(token_transfers);
    let balance = wei_to_native(balance_wei);

    let recent = transactions
        .iter()
        .take(5)
        .map(|tx| {
            format!(
                "- {}: {:.4} ETH ({})",
                tx.method.as_deref().unwrap_or("transfer"),
                wei_to_native(tx.value),
                if tx.status.is_success() {
                    "Success"
                } else {
                    "Failed"
                },
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze this wallet behavior data:\n\n\
Transaction Summary:\n\
- Total transactions: {tx_count}\n\
- Successful: {successful}\n\
- Failed: {failed}\n\
- Unique tokens interacted: {unique_tokens}\n\
- Current balance: {balance:.4} ETH\n\n\
Recent Transactions:\n\
{recent}\n\n\
Provide a concise analysis focusing on:\n\
1. Overall behavior pattern (DeFi user, trader, holder, etc.)\n\
2. Risk assessment (LOW/MEDIUM/HIGH)\n\
3. Key insights about wallet activity\n\
4. Brief summary (2-3 sentences)\n\n\
Format as: RISK_LEVEL|PATTERN|SUMMARY|INSIGHT1|INSIGHT2|INSIGHT3"
    )
}

/// Parse a pipe-delimited completion reply. A reply without the expected
/// shape degrades to a generic result carrying the raw text.
fn parse_reply(reply: &str) -> AiAnalysis {
    let parts: Vec<&str> = reply.split('|').collect();

    if parts.len() >= 4 {
        return AiAnalysis {
            risk_level: RiskLevel::from_api_str(parts[0].trim()).unwrap_or(RiskLevel::Medium),
            behavior_pattern: parts[1].trim().to_string(),
            summary: parts[2].trim().to_string(),
            key_insights: parts[3..]
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        };
    }

    let truncated: String = reply.chars().take(200).collect();
    AiAnalysis {
        summary: format!("{truncated}..."),
        risk_level: RiskLevel::Medium,
        key_insights: vec![
            "AI analysis completed".into(),
            "Wallet behavior assessed".into(),
        ],
        behavior_pattern: "General wallet activity".into(),
    }
}

/// Deterministic analysis computed from the same inputs as the prompt.
pub fn local_analysis(
    transactions: &[Transaction],
    token_transfers: &[TokenTransfer],
) -> AiAnalysis {
    let tx_count = transactions.len();
    let successful = transactions
        .iter()
        .filter(|tx| tx.status.is_success())
        .count();
    let success_rate = if tx_count > 0 {
        Decimal::from(successful as u64 * 100) / Decimal::from(tx_count as u64)
    } else {
        Decimal::ZERO
    };
    let unique_tokens = unique_token_count(token_transfers);

    let risk_level = if success_rate >= Decimal::from(90) && tx_count >= 10 {
        RiskLevel::Low
    } else if success_rate < Decimal::from(70) || tx_count < 5 {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };

    let behavior_pattern = if unique_tokens > 5 {
        "DeFi Enthusiast"
    } else if tx_count > 100 {
        "Active Trader"
    } else if tx_count < 10 {
        "Casual User"
    } else {
        "Standard Wallet"
    };

    let token_insight = if unique_tokens > 0 {
        format!("Interacted with {unique_tokens} tokens")
    } else {
        "Primarily ETH transactions".to_string()
    };

    let key_insights = vec![
        format!("Success rate: {success_rate:.1}%"),
        format!("{tx_count} total transactions"),
        token_insight,
    ];

    let closing = match risk_level {
        RiskLevel::Low => "Demonstrates consistent and reliable activity.",
        RiskLevel::Medium => "Exhibits moderate activity levels with standard patterns.",
        RiskLevel::High => "Shows some irregular patterns that warrant attention.",
    };

    let summary = format!(
        "This wallet shows {} behavior with {tx_count} transactions and a {success_rate:.1}% \
success rate. {closing}",
        behavior_pattern.to_lowercase(),
    );

    AiAnalysis {
        summary,
        risk_level,
        key_insights,
        behavior_pattern: behavior_pattern.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
