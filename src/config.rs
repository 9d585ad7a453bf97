// Configuration for the dashboard service:
// - RPC endpoint and cluster
// - Redirect URL handed to the wallet SDK
// - History page size
// - Database and server address

use dotenv::dotenv;
use solana_sdk::commitment_config::CommitmentConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub solana_rpc_url: String,
    pub solana_cluster: String,
    pub solana_commitment_level: String,
    pub rpc_timeout_secs: u64,
    pub history_page_size: usize,
    pub redirect_url: String,
    pub explorer_base_url: String,
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub wallet_keypair_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solana_rpc_url: "https://api.devnet.solana.com".to_string(),
            solana_cluster: "devnet".to_string(),
            solana_commitment_level: "confirmed".to_string(),
            rpc_timeout_secs: 30,
            history_page_size: 10,
            redirect_url: "walletdemo://callback".to_string(),
            explorer_base_url: "https://explorer.solana.com".to_string(),
            database_url: "sqlite:wallet.db".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            wallet_keypair_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let solana_rpc_url = env::var("SOLANA_RPC_URL").unwrap_or(defaults.solana_rpc_url);
        let solana_cluster = env::var("SOLANA_CLUSTER").unwrap_or(defaults.solana_cluster);
        let solana_commitment_level = env::var("SOLANA_COMMITMENT_LEVEL")
            .unwrap_or(defaults.solana_commitment_level);
        let rpc_timeout_secs = env::var("RPC_TIMEOUT_SECS")
            .map(|v| v.parse().unwrap_or(defaults.rpc_timeout_secs))
            .unwrap_or(defaults.rpc_timeout_secs);
        let history_page_size = env::var("HISTORY_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size: &usize| *size > 0)
            .unwrap_or(defaults.history_page_size);
        let redirect_url = env::var("REDIRECT_URL").unwrap_or(defaults.redirect_url);
        let explorer_base_url = env::var("EXPLORER_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.explorer_base_url);
        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.server_port);
        let wallet_keypair_path = env::var("WALLET_KEYPAIR_PATH").ok().map(PathBuf::from);

        Self {
            solana_rpc_url,
            solana_cluster,
            solana_commitment_level,
            rpc_timeout_secs,
            history_page_size,
            redirect_url,
            explorer_base_url,
            database_url,
            server_host,
            server_port,
            wallet_keypair_path,
        }
    }

    /// Unknown levels fall back to "confirmed".
    pub fn commitment(&self) -> CommitmentConfig {
        match self.solana_commitment_level.as_str() {
            "processed" => CommitmentConfig::processed(),
            "confirmed" => CommitmentConfig::confirmed(),
            "finalized" => CommitmentConfig::finalized(),
            _ => CommitmentConfig::confirmed(),
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
