//! Boundary to the passkey wallet SDK.
//!
//! The SDK performs passkey authentication, signing and fee sponsorship out of
//! process and hands control back through `redirect_url`. Every operation
//! settles into a single `Result`; [`Callbacks`] adapts that result to the
//! success/failure callback style for callers that want it.

pub mod keypair;

use crate::session::ConnectionState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

pub use keypair::KeypairWallet;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Request was rejected by the user")]
    Rejected,

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("{0}")]
    Sdk(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Options passed to every SDK call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOptions {
    /// Custom URI scheme the external browser/biometric step returns to.
    pub redirect_url: String,
}

impl ActionOptions {
    pub fn new(redirect_url: impl Into<String>) -> Self {
        Self { redirect_url: redirect_url.into() }
    }
}

/// A native transfer from the connected smart wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    pub recipient: String,
    pub lamports: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    pub message: String,
    pub signature: String,
}

#[async_trait]
pub trait WalletSdk: Send + Sync {
    /// Current connection state; the SDK is its only writer.
    fn connection(&self) -> watch::Receiver<ConnectionState>;

    /// True while any SDK request is outstanding.
    fn is_loading(&self) -> bool;

    /// Resolves with the smart-wallet address.
    async fn connect(&self, options: &ActionOptions) -> Result<String, WalletError>;

    async fn disconnect(&self, options: &ActionOptions) -> Result<(), WalletError>;

    async fn sign_message(
        &self,
        message: &str,
        options: &ActionOptions,
    ) -> Result<SignedMessage, WalletError>;

    /// Resolves with the transaction signature.
    async fn sign_and_send_transaction(
        &self,
        payload: &TransferPayload,
        options: &ActionOptions,
    ) -> Result<String, WalletError>;
}

type SuccessCallback<T> = Box<dyn FnOnce(&T) + Send>;
type FailureCallback = Box<dyn FnOnce(&WalletError) + Send>;

/// `onSuccess`/`onFail` style over an already settled result.
pub struct Callbacks<T> {
    on_success: Option<SuccessCallback<T>>,
    on_fail: Option<FailureCallback>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self { on_success: None, on_fail: None }
    }
}

impl<T> Callbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, f: impl FnOnce(&T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_fail(mut self, f: impl FnOnce(&WalletError) + Send + 'static) -> Self {
        self.on_fail = Some(Box::new(f));
        self
    }

    /// Invoke the matching callback, then hand the result back unchanged.
    pub fn settle(self, result: Result<T, WalletError>) -> Result<T, WalletError> {
        match &result {
            Ok(value) => {
                if let Some(f) = self.on_success {
                    f(value);
                }
            }
            Err(e) => {
                if let Some(f) = self.on_fail {
                    f(e);
                }
            }
        }
        result
    }
}
