//! Wallet connection lifecycle.
//!
//! [`ConnectionState`] owns the injected [`WalletProvider`] and derives a
//! [`ConnectionStatus`] purely from what the provider reports:
//!
//! ```text
//! Checking ──check──▶ NoProvider
//!     │
//!     └──check──▶ Locked ◀──────┐
//!                   │  ▲         │
//!           connect │  │ (no     │ disconnect / accounts emptied
//!                   ▼  │ accts)  │
//!                Unlocked ──connect──▶ Connected { address, chain_id }
//! ```
//!
//! Only one request (check, connect, disconnect, refresh, switch) runs at a
//! time per instance. Requests issued while another is in flight are
//! ignored and return the current status. Provider events
//! (`accountsChanged`, `chainChanged`) apply immediately.

use std::cell::{Cell, RefCell};

use alloy_primitives::Address;
use log::{debug, info, warn};

use crate::core::error::{ConnectionError, WalletError};
use crate::core::provider::WalletProvider;
use crate::models::{ConnectionStatus, Network};

/// Marks a request as in flight; clears the flag when dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Connection state machine for one browser session.
pub struct ConnectionState<P> {
    provider: P,
    status: RefCell<ConnectionStatus>,
    in_flight: Cell<bool>,
}

impl<P: WalletProvider> ConnectionState<P> {
    /// Create a state machine in [`ConnectionStatus::Checking`].
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            status: RefCell::new(ConnectionStatus::Checking),
            in_flight: Cell::new(false),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    /// Whether a request is currently awaiting the provider.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    fn set_status(&self, next: ConnectionStatus) {
        let mut current = self.status.borrow_mut();
        if *current != next {
            debug!("wallet status: {:?} -> {:?}", *current, next);
            *current = next;
        }
    }

    fn ignored(&self, request: &str) -> ConnectionStatus {
        debug!("wallet {request} ignored: another request is in flight");
        self.status()
    }

    /// Non-prompting detection: NoProvider, Locked or Unlocked. Never Connected.
    async fn detect(&self) -> ConnectionStatus {
        if !self.provider.has_provider() {
            return ConnectionStatus::NoProvider;
        }
        match self.provider.get_accounts().await {
            Ok(accounts) if accounts.is_empty() => ConnectionStatus::Locked,
            Ok(_) => ConnectionStatus::Unlocked,
            Err(e) => {
                warn!("wallet account query failed, assuming locked: {e}");
                ConnectionStatus::Locked
            }
        }
    }

    /// Initial detection of the injected wallet.
    pub async fn check(&self) -> ConnectionStatus {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return self.ignored("check");
        };
        let next = self.detect().await;
        self.set_status(next);
        self.status()
    }

    /// Re-query the provider and recompute the status.
    ///
    /// A connected session stays connected (same address and chain) as long
    /// as the wallet still exposes accounts.
    pub async fn refresh(&self) -> ConnectionStatus {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return self.ignored("refresh");
        };

        if !self.provider.has_provider() {
            self.set_status(ConnectionStatus::NoProvider);
            return self.status();
        }

        let accounts = self.provider.get_accounts().await;
        let next = match (accounts, self.status()) {
            (Ok(accounts), ConnectionStatus::Connected { address, chain_id })
                if !accounts.is_empty() =>
            {
                ConnectionStatus::Connected { address, chain_id }
            }
            (Ok(accounts), _) if accounts.is_empty() => ConnectionStatus::Locked,
            (Ok(_), _) => ConnectionStatus::Unlocked,
            (Err(e), _) => {
                warn!("wallet refresh failed, assuming locked: {e}");
                ConnectionStatus::Locked
            }
        };
        self.set_status(next);
        self.status()
    }

    /// Request account access and establish a session.
    ///
    /// On rejection the status is left as it was.
    pub async fn connect(&self) -> Result<ConnectionStatus, ConnectionError> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Ok(self.ignored("connect"));
        };

        match self.status() {
            ConnectionStatus::Checking => {
                debug!("wallet connect ignored: detection has not finished");
                return Ok(ConnectionStatus::Checking);
            }
            ConnectionStatus::NoProvider => return Err(ConnectionError::NoProvider),
            connected @ ConnectionStatus::Connected { .. } => return Ok(connected),
            _ => {}
        }
        if !self.provider.has_provider() {
            self.set_status(ConnectionStatus::NoProvider);
            return Err(ConnectionError::NoProvider);
        }

        let accounts = self.provider.request_accounts().await.map_err(|e| {
            warn!("wallet connection rejected: {e}");
            ConnectionError::ConnectionRejected(e.reason())
        })?;
        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| ConnectionError::ConnectionRejected(WalletError::NoAccount.reason()))?;

        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ConnectionError::ProviderQueryFailed(e.reason()))?;

        info!("wallet connected: {address} on chain {chain_id}");
        self.set_status(ConnectionStatus::Connected { address, chain_id });
        Ok(self.status())
    }

    /// Drop the session and re-derive the status from the provider.
    ///
    /// The result is `Locked` or `Unlocked` depending on what the wallet
    /// still exposes; it is never `Connected`.
    pub async fn disconnect(&self) -> ConnectionStatus {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return self.ignored("disconnect");
        };
        if !self.status().is_connected() {
            return self.status();
        }

        info!("wallet disconnected");
        let next = self.detect().await;
        self.set_status(next);
        self.status()
    }

    /// Ask the wallet to switch to a registered network.
    pub async fn switch_network(&self, chain_id: u64) -> Result<ConnectionStatus, ConnectionError> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Ok(self.ignored("switch"));
        };

        if !Network::is_supported(chain_id) {
            return Err(ConnectionError::UnsupportedNetwork(chain_id));
        }
        if !self.provider.has_provider() {
            return Err(ConnectionError::NoProvider);
        }

        self.provider.switch_chain(chain_id).await.map_err(|e| {
            warn!("network switch to {chain_id} failed: {e}");
            ConnectionError::ProviderQueryFailed(e.reason())
        })?;
        self.apply_chain_changed(chain_id);
        Ok(self.status())
    }

    /// Handle a `chainChanged` event. Only a connected session records it.
    pub fn apply_chain_changed(&self, new_chain_id: u64) {
        if let ConnectionStatus::Connected { chain_id, .. } = &mut *self.status.borrow_mut() {
            debug!("wallet chain changed: {chain_id} -> {new_chain_id}");
            *chain_id = new_chain_id;
        }
    }

    /// Handle an `accountsChanged` event.
    pub fn apply_accounts_changed(&self, accounts: &[Address]) {
        let next = match (self.status(), accounts.first()) {
            (ConnectionStatus::Connected { .. }, None) => ConnectionStatus::Locked,
            (ConnectionStatus::Connected { chain_id, .. }, Some(address)) => {
                ConnectionStatus::Connected {
                    address: *address,
                    chain_id,
                }
            }
            (ConnectionStatus::Unlocked, None) => ConnectionStatus::Locked,
            (ConnectionStatus::Locked, Some(_)) => ConnectionStatus::Unlocked,
            (current, _) => current,
        };
        self.set_status(next);
    }
}
