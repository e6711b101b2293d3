use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status of an on-chain transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
}

impl TxStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Success => write!(f, "success"),
            TxStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A transaction record normalized from whichever explorer API shape
/// produced it. Lives only for the duration of one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub block_number: u64,
    pub from_address: String,
    pub to_address: String,
    /// Value in wei.
    pub value: Decimal,
    pub timestamp: DateTime<Utc>,
    pub status: TxStatus,
    pub method: Option<String>,
    pub gas_used: Option<String>,
    pub gas_price: Option<String>,
    /// Key of the network the transaction was observed on.
    pub network: Option<String>,
}

/// A token-transfer-like event derived from transaction metadata.
///
/// The symbol is a heuristic placeholder (`TOKEN_n`) with no relation to
/// real on-chain token identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub from_address: String,
    pub to_address: String,
    pub token_symbol: String,
    pub value: Decimal,
    pub timestamp: DateTime<Utc>,
    pub network: Option<String>,
}
