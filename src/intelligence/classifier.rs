use std::collections::HashSet;

use crate::models::{TokenTransfer, Transaction};

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Scan a fetched transaction list for token-like activity.
///
/// A transaction counts as token-like when its method name mentions
/// transfer/swap/approve/Token, or when it moves zero value to a non-zero
/// destination. Matches receive placeholder `TOKEN_n` symbols keyed by
/// scan position: this is an estimate derived from transaction metadata,
/// not an authoritative transfer log, and the symbols carry no real
/// token identity.
pub fn derive_token_transfers(
    transactions: &[Transaction],
    limit: Option<usize>,
) -> Vec<TokenTransfer> {
    let mut transfers = Vec::new();

    for (index, tx) in transactions.iter().enumerate() {
        if !is_token_like(tx) {
            continue;
        }

        transfers.push(TokenTransfer {
            from_address: tx.from_address.clone(),
            to_address: tx.to_address.clone(),
            token_symbol: format!("TOKEN_{}", index + 1),
            value: tx.value,
            timestamp: tx.timestamp,
            network: tx.network.clone(),
        });

        if limit.is_some_and(|l| transfers.len() >= l) {
            break;
        }
    }

    tracing::debug!(
        scanned = transactions.len(),
        matched = transfers.len(),
        "Classified token-like transactions"
    );
    transfers
}

fn is_token_like(tx: &Transaction) -> bool {
    let method_match = tx.method.as_deref().is_some_and(|m| {
        m.contains("transfer") || m.contains("swap") || m.contains("approve") || m.contains("Token")
    });

    method_match || (tx.value.is_zero() && tx.to_address != ZERO_ADDRESS)
}

/// Number of distinct placeholder symbols in a transfer list.
pub fn unique_token_count(transfers: &[TokenTransfer]) -> usize {
    transfers
        .iter()
        .map(|t| t.token_symbol.as_str())
        .collect::<HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
