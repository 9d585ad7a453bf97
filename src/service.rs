// User-initiated wallet flows: connect, disconnect, sign, send, receive.
// Each flow checks the connection and validates input before touching the network.

use crate::blockchain::explorer::Explorer;
use crate::dashboard::Dashboard;
use crate::models::sol_to_lamports;
use crate::validation::{validate_message, validate_transfer, ValidationError};
use crate::wallet::{ActionOptions, SignedMessage, TransferPayload, WalletError, WalletSdk};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

pub const SUBMISSION_FALLBACK: &str = "Transaction failed. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Please connect your wallet first")]
    NotConnected,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Submission(String),
}

impl From<WalletError> for ActionError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::NotConnected => ActionError::NotConnected,
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    ActionError::Submission(SUBMISSION_FALLBACK.to_string())
                } else {
                    ActionError::Submission(message)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendReceipt {
    pub signature: String,
    pub amount: f64,
    pub recipient: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiveInfo {
    pub address: String,
    pub explorer_url: String,
}

pub struct WalletActions {
    wallet: Arc<dyn WalletSdk>,
    dashboard: Arc<Dashboard>,
    explorer: Explorer,
    options: ActionOptions,
}

impl WalletActions {
    pub fn new(
        wallet: Arc<dyn WalletSdk>,
        dashboard: Arc<Dashboard>,
        explorer: Explorer,
        options: ActionOptions,
    ) -> Self {
        Self {
            wallet,
            dashboard,
            explorer,
            options,
        }
    }

    pub fn wallet(&self) -> &Arc<dyn WalletSdk> {
        &self.wallet
    }

    fn connected_address(&self) -> Result<String, ActionError> {
        let connection = self.wallet.connection();
        let address = connection.borrow().address().map(str::to_string);
        address.ok_or(ActionError::NotConnected)
    }

    pub async fn connect(&self) -> Result<String, ActionError> {
        let address = self.wallet.connect(&self.options).await.map_err(|e| {
            error!("Wallet connect failed: {}", e);
            ActionError::from(e)
        })?;
        info!("Connected smart wallet {}", address);
        Ok(address)
    }

    pub async fn disconnect(&self) -> Result<(), ActionError> {
        self.wallet.disconnect(&self.options).await?;
        info!("Wallet disconnected");
        Ok(())
    }

    pub async fn sign_message(&self, message: &str) -> Result<SignedMessage, ActionError> {
        self.connected_address()?;
        validate_message(message)?;

        let signed = self
            .wallet
            .sign_message(message, &self.options)
            .await
            .map_err(|e| {
                error!("Message signing failed: {}", e);
                ActionError::from(e)
            })?;
        info!("Message signed: {}", signed.signature);
        Ok(signed)
    }

    /// Validate and submit a transfer. The dashboard is refreshed afterwards
    /// so the new balance and history entry show up.
    pub async fn send(&self, recipient: &str, amount: &str) -> Result<SendReceipt, ActionError> {
        self.connected_address()?;

        let available = self.dashboard.snapshot().balance;
        let amount = validate_transfer(recipient, amount, available)?;
        let recipient = recipient.trim().to_string();

        let payload = TransferPayload {
            recipient: recipient.clone(),
            lamports: sol_to_lamports(amount),
        };

        let signature = self
            .wallet
            .sign_and_send_transaction(&payload, &self.options)
            .await
            .map_err(|e| {
                error!("Transaction submission failed: {}", e);
                ActionError::from(e)
            })?;

        info!("Sent {} SOL to {}: {}", amount, recipient, signature);

        let dashboard = self.dashboard.clone();
        tokio::spawn(async move {
            dashboard.refresh().await;
        });

        Ok(SendReceipt {
            explorer_url: self.explorer.transaction_url(&signature),
            signature,
            amount,
            recipient,
        })
    }

    pub fn receive(&self) -> Result<ReceiveInfo, ActionError> {
        let address = self.connected_address()?;
        Ok(ReceiveInfo {
            explorer_url: self.explorer.address_url(&address),
            address,
        })
    }
}
