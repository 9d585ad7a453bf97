//! Wallet connection state and the task that keeps the dashboard in step with it.

use crate::dashboard::Dashboard;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected { address: String },
}

impl ConnectionState {
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Connected { address } => Some(address),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }
}

/// Follows connection changes: entering `Connected` points the dashboard at the
/// address and starts a refresh, entering `Disconnected` clears it.
pub struct SessionWatcher {
    dashboard: Arc<Dashboard>,
    connection: watch::Receiver<ConnectionState>,
}

impl SessionWatcher {
    pub fn new(dashboard: Arc<Dashboard>, connection: watch::Receiver<ConnectionState>) -> Self {
        Self { dashboard, connection }
    }

    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("Starting session watcher");

        // the state at startup counts as a transition
        let initial = self.connection.borrow_and_update().clone();
        self.apply(&initial);

        loop {
            tokio::select! {
                changed = self.connection.changed() => {
                    if changed.is_err() {
                        info!("Wallet connection channel closed, stopping session watcher");
                        break;
                    }
                    let state = self.connection.borrow_and_update().clone();
                    self.apply(&state);
                }
                _ = shutdown.cancelled() => {
                    info!("Shutting down session watcher");
                    break;
                }
            }
        }
    }

    fn apply(&self, state: &ConnectionState) {
        match state {
            ConnectionState::Connected { address } => {
                if self.dashboard.address().as_deref() == Some(address.as_str()) {
                    return;
                }
                info!("Wallet connected: {}", address);
                self.dashboard.set_address(Some(address.clone()));

                let dashboard = self.dashboard.clone();
                tokio::spawn(async move {
                    let outcome = dashboard.refresh().await;
                    debug!("Connection-triggered refresh finished: {:?}", outcome);
                });
            }
            ConnectionState::Connecting => debug!("Wallet connecting"),
            ConnectionState::Disconnected => {
                if self.dashboard.address().is_some() {
                    info!("Wallet disconnected, clearing dashboard");
                }
                self.dashboard.set_address(None);
            }
        }
    }
}
