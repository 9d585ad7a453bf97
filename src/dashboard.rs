//! Refresh coordination for the wallet dashboard.
//!
//! The dashboard owns the balance and transaction list for the connected
//! address and is their only writer. Readers observe [`DashboardSnapshot`]s
//! through a `watch` channel.

use crate::blockchain::client::ChainRpc;
use crate::blockchain::explorer::Explorer;
use crate::blockchain::history::fetch_history;
use crate::models::{lamports_to_sol, DashboardSnapshot};
use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    Completed,
    /// Another refresh was in flight; this request did nothing.
    AlreadyRunning,
    /// No wallet connected; derived state was cleared.
    NoAddress,
}

pub struct Dashboard {
    client: Arc<dyn ChainRpc>,
    explorer: Explorer,
    page_size: usize,
    refreshing: AtomicBool,
    snapshot: watch::Sender<DashboardSnapshot>,
}

/// Releases the refresh gate however the refresh ends.
struct RefreshGuard<'a> {
    dashboard: &'a Dashboard,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.dashboard.snapshot.send_modify(|snap| {
            snap.is_refreshing = false;
            snap.is_loading_balance = false;
            snap.is_loading_history = false;
        });
        self.dashboard.refreshing.store(false, Ordering::Release);
    }
}

impl Dashboard {
    pub fn new(client: Arc<dyn ChainRpc>, explorer: Explorer, page_size: usize) -> Self {
        let (snapshot, _) = watch::channel(DashboardSnapshot::default());
        Self {
            client,
            explorer,
            page_size,
            refreshing: AtomicBool::new(false),
            snapshot,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn address(&self) -> Option<String> {
        self.snapshot.borrow().address.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// Switch the tracked address. Derived state from the previous address is
    /// dropped; `None` clears everything.
    pub fn set_address(&self, address: Option<String>) {
        self.snapshot.send_if_modified(|snap| {
            if snap.address == address {
                return false;
            }
            info!("Dashboard address changed: {:?} -> {:?}", snap.address, address);
            snap.address = address;
            snap.balance = 0.0;
            snap.transactions.clear();
            snap.last_refreshed_at = None;
            true
        });
    }

    /// Run a refresh for the current address.
    ///
    /// Balance and history are fetched concurrently and fail independently:
    /// a failing branch degrades to zero or an empty list and is only logged.
    /// If the address is switched mid-cycle, another cycle runs for the new
    /// address before the gate is released.
    pub async fn refresh(&self) -> RefreshOutcome {
        let mut address = match self.address() {
            Some(address) => address,
            None => {
                self.set_address(None);
                return RefreshOutcome::NoAddress;
            }
        };

        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Refresh already in progress, ignoring request");
            return RefreshOutcome::AlreadyRunning;
        }
        let _guard = RefreshGuard { dashboard: self };

        loop {
            self.snapshot.send_modify(|snap| {
                snap.is_refreshing = true;
                snap.is_loading_balance = true;
                snap.is_loading_history = true;
            });

            debug!("Refreshing dashboard for {}", address);

            tokio::join!(
                self.refresh_balance(&address),
                self.refresh_history(&address)
            );

            let mut switched_to = None;
            self.snapshot.send_if_modified(|snap| match snap.address.as_deref() {
                Some(current) if current == address => {
                    snap.last_refreshed_at = Some(Utc::now());
                    true
                }
                current => {
                    switched_to = current.map(str::to_string);
                    false
                }
            });

            match switched_to {
                Some(next) => {
                    info!("Address switched to {} during refresh, refreshing again", next);
                    address = next;
                }
                None => return RefreshOutcome::Completed,
            }
        }
    }

    async fn refresh_balance(&self, address: &str) {
        let balance = match self.client.get_balance(address).await {
            Ok(lamports) => lamports_to_sol(lamports),
            Err(e) => {
                warn!("Failed to fetch balance for {}: {}", address, e);
                0.0
            }
        };

        self.snapshot.send_modify(|snap| {
            snap.is_loading_balance = false;
            // a disconnect or account switch while this was in flight wins
            if snap.address.as_deref() == Some(address) {
                snap.balance = balance;
            }
        });
    }

    async fn refresh_history(&self, address: &str) {
        let transactions =
            match fetch_history(self.client.as_ref(), address, self.page_size, &self.explorer).await {
                Ok(transactions) => transactions,
                Err(e) => {
                    warn!("Failed to fetch transaction history for {}: {}", address, e);
                    Vec::new()
                }
            };

        self.snapshot.send_modify(|snap| {
            snap.is_loading_history = false;
            if snap.address.as_deref() == Some(address) {
                snap.transactions = transactions;
            }
        });
    }
}
