use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TxStatus};

// ---------------------------------------------------------------------------
// v2 API (item-list shape)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct V2TransactionsPage {
    #[serde(default)]
    pub items: Vec<V2Transaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2AddressRef {
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct V2Transaction {
    pub hash: String,
    #[serde(default)]
    pub block: Option<u64>,
    #[serde(default)]
    pub from: Option<V2AddressRef>,
    #[serde(default)]
    pub to: Option<V2AddressRef>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    #[serde(default)]
    pub gas_price: Option<String>,
}

impl V2Transaction {
    /// Normalize into the internal record. Missing fields degrade to
    /// empty/zero values rather than dropping the transaction.
    pub fn into_transaction(self, network: &str) -> Transaction {
        Transaction {
            hash: self.hash,
            block_number: self.block.unwrap_or(0),
            from_address: self.from.map(|a| a.hash).unwrap_or_default(),
            to_address: self.to.map(|a| a.hash).unwrap_or_default(),
            value: parse_wei(self.value.as_deref()),
            timestamp: parse_iso_timestamp(self.timestamp.as_deref()),
            status: if self.status.as_deref() == Some("ok") {
                TxStatus::Success
            } else {
                TxStatus::Failed
            },
            method: self.method,
            gas_used: self.gas_used,
            gas_price: self.gas_price,
            network: Some(network.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Legacy API (query-parameter shape)
// ---------------------------------------------------------------------------

/// Etherscan-style envelope: `status` is "1" on success and `result`
/// carries the payload (a list, a token record, or a bare string).
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> LegacyEnvelope<T> {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("1")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTransaction {
    pub hash: String,
    #[serde(default, rename = "blockNumber")]
    pub block_number: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "timeStamp")]
    pub time_stamp: Option<String>,
    #[serde(default, rename = "isError")]
    pub is_error: Option<String>,
    #[serde(default, rename = "functionName")]
    pub function_name: Option<String>,
    #[serde(default, rename = "gasUsed")]
    pub gas_used: Option<String>,
    #[serde(default, rename = "gasPrice")]
    pub gas_price: Option<String>,
}

impl LegacyTransaction {
    pub fn into_transaction(self, network: &str) -> Transaction {
        Transaction {
            hash: self.hash,
            block_number: self
                .block_number
                .and_then(|b| b.parse().ok())
                .unwrap_or(0),
            from_address: self.from.unwrap_or_default(),
            to_address: self.to.unwrap_or_default(),
            value: parse_wei(self.value.as_deref()),
            timestamp: parse_unix_timestamp(self.time_stamp.as_deref()),
            status: if self.is_error.as_deref() == Some("0") {
                TxStatus::Success
            } else {
                TxStatus::Failed
            },
            method: self.function_name,
            gas_used: self.gas_used,
            gas_price: self.gas_price,
            network: Some(network.to_string()),
        }
    }
}

/// Token metadata from the `getToken` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<String>,
}

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

fn parse_wei(value: Option<&str>) -> Decimal {
    value
        .and_then(|v| v.parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

fn parse_iso_timestamp(ts: Option<&str>) -> DateTime<Utc> {
    ts.and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

/// Legacy `timeStamp` is unix seconds encoded as a decimal string.
fn parse_unix_timestamp(ts: Option<&str>) -> DateTime<Utc> {
    ts.and_then(|t| t.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}
