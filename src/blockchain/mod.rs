pub mod classifier;
pub mod client;
pub mod explorer;
pub mod history;
pub mod models;

// Re-exports for convenience
pub use client::{ChainRpc, ClientError, SolanaClient};
pub use explorer::Explorer;
pub use history::fetch_history;
