//! Turns raw transaction details into the typed entries the history list shows.
//!
//! Classification looks only at the wallet's own lamport delta. Any near-zero
//! change is reported as a signing operation, whatever its on-chain purpose, so
//! the resulting kind is a best-effort label rather than a decoded instruction.

use crate::blockchain::explorer::Explorer;
use crate::models::{
    lamports_to_sol, ClassifiedTransaction, ConfirmationStatus, TransactionDetail, TransactionKind,
    NATIVE_UNIT,
};
use chrono::DateTime;

/// Deltas smaller than this (in SOL) count as "no balance change".
pub const SIGN_DEAD_ZONE: f64 = 0.000001;

pub const NO_TRANSFER_LABEL: &str = "No transfer";
pub const UNKNOWN_DATE_LABEL: &str = "Unknown date";

/// Classify one transaction for `wallet_address`.
///
/// Returns `None` when the wallet is not among the transaction's account keys.
pub fn classify(
    detail: &TransactionDetail,
    wallet_address: &str,
    status: Option<ConfirmationStatus>,
    explorer: &Explorer,
) -> Option<ClassifiedTransaction> {
    let index = detail
        .account_keys
        .iter()
        .position(|key| key == wallet_address)?;

    let delta = balance_delta(detail, index);
    let (kind, title, display_amount) = describe_delta(delta);

    Some(ClassifiedTransaction {
        signature: detail.signature.clone(),
        kind,
        title,
        display_amount,
        amount: delta,
        timestamp: format_timestamp(detail.block_time),
        block_time: detail.block_time,
        status: status.unwrap_or_default().to_string(),
        explorer_url: explorer.transaction_url(&detail.signature),
    })
}

/// Change of the account at `index`, in SOL. Missing entries count as zero.
pub fn balance_delta(detail: &TransactionDetail, index: usize) -> f64 {
    let pre = detail.pre_balances.get(index).copied().unwrap_or(0);
    let post = detail.post_balances.get(index).copied().unwrap_or(0);

    if post >= pre {
        lamports_to_sol(post - pre)
    } else {
        -lamports_to_sol(pre - post)
    }
}

fn describe_delta(delta: f64) -> (TransactionKind, String, String) {
    if delta.abs() < SIGN_DEAD_ZONE {
        (
            TransactionKind::Sign,
            "Message Signed".to_string(),
            NO_TRANSFER_LABEL.to_string(),
        )
    } else if delta > 0.0 {
        (
            TransactionKind::Receive,
            format!("Received {}", NATIVE_UNIT),
            format!("+{:.4} {}", delta, NATIVE_UNIT),
        )
    } else {
        (
            TransactionKind::Send,
            format!("Sent {}", NATIVE_UNIT),
            format!("{:.4} {}", delta, NATIVE_UNIT),
        )
    }
}

pub fn format_timestamp(block_time: Option<i64>) -> String {
    block_time
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE_LABEL.to_string())
}
