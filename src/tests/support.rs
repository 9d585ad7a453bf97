//! Fakes for the chain RPC and the wallet SDK shared by the test modules.

use crate::blockchain::client::{ChainRpc, ClientError};
use crate::blockchain::explorer::Explorer;
use crate::models::{ConfirmationStatus, SignatureRecord, TransactionDetail};
use crate::session::ConnectionState;
use crate::wallet::{ActionOptions, SignedMessage, TransferPayload, WalletError, WalletSdk};
use async_trait::async_trait;
use solana_client::client_error::ClientErrorKind;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;

pub const WALLET: &str = "9ii1FEiWSgDzXAbwj2oTmJXzkfCw78mnHwPQv9WQ5iTn";
pub const OTHER: &str = "AhAkbf3cGD6HkFod2rBEE8mie8ks9p7vuss6WGkUFAM9";
pub const THIRD: &str = "FwKc3s5x7SguXzNPPJP7AV2UUhCF4rnEQCFdA2Q8NGCi";

pub fn explorer() -> Explorer {
    Explorer::new("https://explorer.solana.com", "devnet")
}

pub fn rpc_failure(message: &str) -> ClientError {
    ClientError::RpcError(ClientErrorKind::Custom(message.to_string()).into())
}

pub fn signature(sig: &str) -> SignatureRecord {
    SignatureRecord {
        signature: sig.to_string(),
        block_time: Some(1_700_000_000),
        confirmation_status: Some(ConfirmationStatus::Finalized),
    }
}

/// A two-account transaction where `wallet` moves from `pre` to `post` lamports.
pub fn transfer_detail(sig: &str, wallet: &str, pre: u64, post: u64) -> TransactionDetail {
    TransactionDetail {
        signature: sig.to_string(),
        block_time: Some(1_700_000_000),
        account_keys: vec![wallet.to_string(), THIRD.to_string()],
        pre_balances: vec![pre, 5_000_000_000],
        post_balances: vec![post, 5_000_000_000],
    }
}

enum DetailBehavior {
    Found(TransactionDetail),
    Missing,
    Fail,
}

/// In-memory chain. Every call yields to the scheduler before answering so
/// concurrent callers interleave.
#[derive(Default)]
pub struct FakeRpc {
    balances: HashMap<String, u64>,
    signatures: HashMap<String, Vec<SignatureRecord>>,
    details: HashMap<String, (DetailBehavior, Duration)>,
    balance_delay: Duration,
    fail_signatures: bool,
    pub balance_calls: AtomicUsize,
    pub signature_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, address: &str, lamports: u64) -> Self {
        self.balances.insert(address.to_string(), lamports);
        self
    }

    pub fn with_balance_delay(mut self, delay: Duration) -> Self {
        self.balance_delay = delay;
        self
    }

    pub fn with_signatures(mut self, address: &str, sigs: &[&str]) -> Self {
        self.signatures
            .insert(address.to_string(), sigs.iter().map(|s| signature(s)).collect());
        self
    }

    pub fn failing_signatures(mut self) -> Self {
        self.fail_signatures = true;
        self
    }

    pub fn with_detail(self, detail: TransactionDetail) -> Self {
        self.with_delayed_detail(detail, Duration::ZERO)
    }

    pub fn with_delayed_detail(mut self, detail: TransactionDetail, delay: Duration) -> Self {
        self.details
            .insert(detail.signature.clone(), (DetailBehavior::Found(detail), delay));
        self
    }

    pub fn failing_detail(mut self, sig: &str) -> Self {
        self.details
            .insert(sig.to_string(), (DetailBehavior::Fail, Duration::ZERO));
        self
    }

    pub fn missing_detail(mut self, sig: &str) -> Self {
        self.details
            .insert(sig.to_string(), (DetailBehavior::Missing, Duration::ZERO));
        self
    }
}

#[async_trait]
impl ChainRpc for FakeRpc {
    async fn get_balance(&self, address: &str) -> Result<u64, ClientError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if !self.balance_delay.is_zero() {
            tokio::time::sleep(self.balance_delay).await;
        }
        self.balances
            .get(address)
            .copied()
            .ok_or_else(|| rpc_failure("balance unavailable"))
    }

    async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>, ClientError> {
        self.signature_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_signatures {
            return Err(rpc_failure("connection refused"));
        }
        Ok(self
            .signatures
            .get(address)
            .map(|sigs| sigs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_transaction(&self, signature: &str) -> Result<Option<TransactionDetail>, ClientError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match self.details.get(signature) {
            Some((behavior, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                match behavior {
                    DetailBehavior::Found(detail) => Ok(Some(detail.clone())),
                    DetailBehavior::Missing => Ok(None),
                    DetailBehavior::Fail => Err(rpc_failure("transaction fetch failed")),
                }
            }
            None => Ok(None),
        }
    }
}

/// Wallet SDK double that connects to [`WALLET`] and records submissions.
pub struct FakeWallet {
    state: watch::Sender<ConnectionState>,
    send_result: Mutex<Result<String, WalletError>>,
    pub submitted: Mutex<Vec<TransferPayload>>,
    pub sign_calls: AtomicUsize,
}

impl FakeWallet {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            state,
            send_result: Mutex::new(Ok("5fakeSignature".to_string())),
            submitted: Mutex::new(Vec::new()),
            sign_calls: AtomicUsize::new(0),
        }
    }

    pub fn connected() -> Self {
        let wallet = Self::new();
        wallet.state.send_replace(ConnectionState::Connected { address: WALLET.to_string() });
        wallet
    }

    pub fn fail_sends_with(&self, error: WalletError) {
        *self.send_result.lock().unwrap() = Err(error);
    }

    pub fn submission_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletSdk for FakeWallet {
    fn connection(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    fn is_loading(&self) -> bool {
        false
    }

    async fn connect(&self, _options: &ActionOptions) -> Result<String, WalletError> {
        self.state.send_replace(ConnectionState::Connecting);
        self.state.send_replace(ConnectionState::Connected { address: WALLET.to_string() });
        Ok(WALLET.to_string())
    }

    async fn disconnect(&self, _options: &ActionOptions) -> Result<(), WalletError> {
        self.state.send_replace(ConnectionState::Disconnected);
        Ok(())
    }

    async fn sign_message(
        &self,
        message: &str,
        _options: &ActionOptions,
    ) -> Result<SignedMessage, WalletError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SignedMessage {
            message: message.to_string(),
            signature: "5fakeMessageSignature".to_string(),
        })
    }

    async fn sign_and_send_transaction(
        &self,
        payload: &TransferPayload,
        _options: &ActionOptions,
    ) -> Result<String, WalletError> {
        self.submitted.lock().unwrap().push(payload.clone());
        self.send_result.lock().unwrap().clone()
    }
}
