// Domain records shared by the refresh pipeline, the wallet actions and the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Display unit of the native balance.
pub const NATIVE_UNIT: &str = "SOL";

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Rounds to the nearest lamport; callers validate `sol` beforehand.
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}

/// Balance rendered the way every screen shows it.
pub fn format_balance(sol: f64) -> String {
    format!("{:.4}", sol)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processed => write!(f, "processed"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}

/// One entry of `getSignaturesForAddress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub signature: String,
    pub block_time: Option<i64>,
    pub confirmation_status: Option<ConfirmationStatus>,
}

/// The subset of a fetched transaction the classifier needs.
///
/// `account_keys` holds the static keys followed by any keys loaded from
/// address lookup tables, so balance indexes line up with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub signature: String,
    pub block_time: Option<i64>,
    pub account_keys: Vec<String>,
    pub pre_balances: Vec<u64>,
    pub post_balances: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Send,
    Receive,
    Sign,
    /// Never produced by the balance-delta heuristic.
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub signature: String,
    pub kind: TransactionKind,
    pub title: String,
    pub display_amount: String,
    /// Signed balance change of the wallet, in SOL.
    pub amount: f64,
    pub timestamp: String,
    pub block_time: Option<i64>,
    pub status: String,
    pub explorer_url: String,
}

/// Everything the dashboard screen renders, published after every state change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub address: Option<String>,
    pub balance: f64,
    pub transactions: Vec<ClassifiedTransaction>,
    pub is_refreshing: bool,
    pub is_loading_balance: bool,
    pub is_loading_history: bool,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    pub fn formatted_balance(&self) -> String {
        format_balance(self.balance)
    }
}
