//! Development wallet backed by a local keypair.
//!
//! Stands in for the hosted passkey portal on devnet: connect resolves
//! immediately, signing happens in process, and transfers are plain system
//! transfers paid by the keypair itself (no paymaster).

use super::{ActionOptions, SignedMessage, TransferPayload, WalletError, WalletSdk};
use crate::config::Config;
use crate::session::ConnectionState;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct KeypairWallet {
    keypair: Keypair,
    rpc_client: RpcClient,
    state: watch::Sender<ConnectionState>,
    loading: AtomicBool,
}

/// Marks the wallet busy for the lifetime of one request.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, config: &Config) -> Self {
        let rpc_client = RpcClient::new_with_timeout_and_commitment(
            config.solana_rpc_url.clone(),
            config.rpc_timeout(),
            config.commitment(),
        );
        let (state, _) = watch::channel(ConnectionState::Disconnected);

        info!("Keypair wallet ready for {}", keypair.pubkey());

        Self {
            keypair,
            rpc_client,
            state,
            loading: AtomicBool::new(false),
        }
    }

    /// Loads `WALLET_KEYPAIR_PATH` when set, otherwise generates an ephemeral keypair.
    pub fn from_config(config: &Config) -> Result<Self, WalletError> {
        let keypair = match &config.wallet_keypair_path {
            Some(path) => load_keypair(path)?,
            None => {
                warn!("WALLET_KEYPAIR_PATH not set, using an ephemeral keypair");
                Keypair::new()
            }
        };
        Ok(Self::new(keypair, config))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn require_connected(&self) -> Result<(), WalletError> {
        if self.state.borrow().is_connected() {
            Ok(())
        } else {
            Err(WalletError::NotConnected)
        }
    }
}

fn load_keypair(path: &Path) -> Result<Keypair, WalletError> {
    read_keypair_file(path)
        .map_err(|e| WalletError::Sdk(format!("Failed to read keypair {}: {}", path.display(), e)))
}

#[async_trait]
impl WalletSdk for KeypairWallet {
    fn connection(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    async fn connect(&self, options: &ActionOptions) -> Result<String, WalletError> {
        let _loading = LoadingGuard::start(&self.loading);
        debug!("Connecting keypair wallet (redirect {})", options.redirect_url);

        self.state.send_replace(ConnectionState::Connecting);
        let address = self.keypair.pubkey().to_string();
        self.state.send_replace(ConnectionState::Connected { address: address.clone() });

        Ok(address)
    }

    async fn disconnect(&self, options: &ActionOptions) -> Result<(), WalletError> {
        debug!("Disconnecting keypair wallet (redirect {})", options.redirect_url);
        self.state.send_replace(ConnectionState::Disconnected);
        Ok(())
    }

    async fn sign_message(
        &self,
        message: &str,
        _options: &ActionOptions,
    ) -> Result<SignedMessage, WalletError> {
        self.require_connected()?;
        let _loading = LoadingGuard::start(&self.loading);

        let signature = self.keypair.sign_message(message.as_bytes());
        Ok(SignedMessage {
            message: message.to_string(),
            signature: signature.to_string(),
        })
    }

    async fn sign_and_send_transaction(
        &self,
        payload: &TransferPayload,
        _options: &ActionOptions,
    ) -> Result<String, WalletError> {
        self.require_connected()?;
        let _loading = LoadingGuard::start(&self.loading);

        let recipient = Pubkey::from_str(&payload.recipient)
            .map_err(|_| WalletError::Sdk(format!("Invalid recipient: {}", payload.recipient)))?;
        let payer = self.keypair.pubkey();

        let instruction = system_instruction::transfer(&payer, &recipient, payload.lamports);
        let blockhash = self
            .rpc_client
            .get_latest_blockhash()
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer),
            &[&self.keypair],
            blockhash,
        );

        let signature = self
            .rpc_client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        info!("Sent {} lamports to {}: {}", payload.lamports, recipient, signature);
        Ok(signature.to_string())
    }
}
