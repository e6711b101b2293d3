pub mod balance;
pub mod transaction;

pub use balance::NetworkBalance;
pub use transaction::{TokenTransfer, Transaction, TxStatus};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wei per native unit (10^18).
const WEI_PER_NATIVE: u64 = 1_000_000_000_000_000_000;

/// Convert a raw wei amount to native units (ETH-equivalent).
pub fn wei_to_native(wei: Decimal) -> Decimal {
    wei / Decimal::from(WEI_PER_NATIVE)
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parse a free-form risk label, e.g. from a completion-API reply.
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Some(RiskLevel::Low),
            "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH" => Some(RiskLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
