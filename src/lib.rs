pub mod api;
pub mod blockchain;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod models;
pub mod service;
pub mod session;
pub mod state;
pub mod validation;
pub mod wallet;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use api::error::ApiError;
pub use api::response::ApiResponse;
pub use api::route::create_router;
pub use blockchain::{ChainRpc, ClientError, Explorer, SolanaClient};
pub use dashboard::{Dashboard, RefreshOutcome};
pub use models::{ClassifiedTransaction, DashboardSnapshot, TransactionKind};
pub use session::{ConnectionState, SessionWatcher};
pub use validation::{validate_amount, validate_solana_address, validate_transfer};
pub use wallet::{WalletError, WalletSdk};
