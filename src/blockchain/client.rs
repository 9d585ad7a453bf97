use crate::blockchain::models::extract_transaction_detail;
use crate::config::Config;
use crate::models::{ConfirmationStatus, SignatureRecord, TransactionDetail};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_client::rpc_response::RpcConfirmedTransactionStatusWithSignature;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::{TransactionConfirmationStatus, UiTransactionEncoding};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    RpcError(#[from] solana_client::client_error::ClientError),

    #[error("Invalid signature: {0}")]
    SignatureError(String),

    #[error("Invalid public key: {0}")]
    PubkeyError(String),
}

/// Read-only chain queries the dashboard depends on.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Balance in lamports.
    async fn get_balance(&self, address: &str) -> Result<u64, ClientError>;

    /// Most recent first, at most `limit` entries.
    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, ClientError>;

    /// `Ok(None)` when the node returned a record that carries no balance metadata.
    async fn get_transaction(&self, signature: &str) -> Result<Option<TransactionDetail>, ClientError>;
}

pub struct SolanaClient {
    rpc_client: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaClient {
    pub fn new(config: &Config) -> Self {
        let rpc_url = &config.solana_rpc_url;
        let commitment = config.commitment();

        info!("Initializing Solana client with RPC endpoint: {}, commitment: {:?}", rpc_url, commitment);

        let rpc_client = RpcClient::new_with_timeout_and_commitment(
            rpc_url.clone(),
            config.rpc_timeout(),
            commitment,
        );

        Self {
            rpc_client,
            commitment,
        }
    }
}

fn parse_pubkey(address: &str) -> Result<Pubkey, ClientError> {
    Pubkey::from_str(address).map_err(|_| ClientError::PubkeyError(address.to_string()))
}

fn to_signature_record(status: RpcConfirmedTransactionStatusWithSignature) -> SignatureRecord {
    let confirmation_status = status.confirmation_status.map(|s| match s {
        TransactionConfirmationStatus::Processed => ConfirmationStatus::Processed,
        TransactionConfirmationStatus::Confirmed => ConfirmationStatus::Confirmed,
        TransactionConfirmationStatus::Finalized => ConfirmationStatus::Finalized,
    });

    SignatureRecord {
        signature: status.signature,
        block_time: status.block_time,
        confirmation_status,
    }
}

#[async_trait]
impl ChainRpc for SolanaClient {
    async fn get_balance(&self, address: &str) -> Result<u64, ClientError> {
        let pubkey = parse_pubkey(address)?;
        let lamports = self.rpc_client.get_balance(&pubkey).await?;
        debug!("Balance for {}: {} lamports", address, lamports);
        Ok(lamports)
    }

    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, ClientError> {
        let pubkey = parse_pubkey(address)?;

        let signatures = self
            .rpc_client
            .get_signatures_for_address_with_config(
                &pubkey,
                GetConfirmedSignaturesForAddress2Config {
                    before: None,
                    until: None,
                    limit: Some(limit),
                    commitment: Some(self.commitment),
                },
            )
            .await?;

        Ok(signatures.into_iter().map(to_signature_record).collect())
    }

    async fn get_transaction(&self, signature_str: &str) -> Result<Option<TransactionDetail>, ClientError> {
        let signature = Signature::from_str(signature_str)
            .map_err(|_| ClientError::SignatureError(signature_str.to_string()))?;

        // Parsed encoding lists lookup-table keys inline with the static keys
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::JsonParsed),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };

        let tx = self
            .rpc_client
            .get_transaction_with_config(&signature, config)
            .await?;

        Ok(extract_transaction_detail(signature_str, &tx))
    }
}
