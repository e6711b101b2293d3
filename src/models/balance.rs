use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Native-asset balance on one network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkBalance {
    /// Display name of the network, e.g. "Ethereum".
    pub network: String,
    /// Native-asset symbol, e.g. "ETH".
    pub symbol: String,
    /// Raw balance in wei-equivalent units.
    pub balance: Decimal,
    /// Balance in native units, formatted to 6 decimal places.
    pub balance_formatted: String,
    /// Approximate USD value from the static price table.
    pub balance_usd: Decimal,
}
