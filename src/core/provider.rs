//! Wallet provider capability.
//!
//! Everything the dashboard needs from an injected wallet, expressed as a
//! trait so the connection state machine and transfer flow can run against
//! a mock outside the browser. The browser implementation lives in
//! [`crate::core::wallet`].

use alloy_primitives::{Address, TxHash, U256};

use crate::core::error::WalletError;
use crate::models::TransactionRequest;

/// Capabilities exposed by an EIP-1193 style wallet.
///
/// Futures are not `Send`: providers wrap browser handles and run on the
/// single wasm thread.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Whether a wallet object is injected at all.
    fn has_provider(&self) -> bool;

    /// Accounts already authorized for this origin. Never prompts.
    async fn get_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Ask the user to authorize accounts. May prompt and may be rejected.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    async fn get_chain_id(&self) -> Result<u64, WalletError>;

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError>;

    /// Native balance in wei.
    async fn get_balance(&self, owner: Address) -> Result<U256, WalletError>;

    /// ERC-20 `balanceOf(owner)` in the token's base units.
    async fn get_token_balance(&self, token: Address, owner: Address)
        -> Result<U256, WalletError>;
}

#[cfg(test)]
pub mod mock {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    /// In-memory provider with switchable failure modes.
    pub struct MockProvider {
        pub installed: bool,
        pub accounts: RefCell<Vec<Address>>,
        /// Account authorized by `request_accounts` when none is exposed yet.
        pub grant: Cell<Option<Address>>,
        pub chain_id: Cell<u64>,
        pub reject_requests: Cell<bool>,
        pub fail_queries: Cell<bool>,
        pub fail_chain_query: Cell<bool>,
        pub fail_send: Cell<bool>,
        /// Yield once inside `request_accounts` so concurrent callers interleave.
        pub yield_on_request: Cell<bool>,
        pub balances: RefCell<HashMap<Address, U256>>,
        pub token_balances: RefCell<HashMap<(Address, Address), U256>>,
        pub account_queries: Cell<usize>,
        pub account_requests: Cell<usize>,
        pub switched: RefCell<Vec<u64>>,
        pub sent: RefCell<Vec<TransactionRequest>>,
    }

    impl MockProvider {
        pub fn installed() -> Self {
            Self {
                installed: true,
                accounts: RefCell::new(Vec::new()),
                grant: Cell::new(None),
                chain_id: Cell::new(1),
                reject_requests: Cell::new(false),
                fail_queries: Cell::new(false),
                fail_chain_query: Cell::new(false),
                fail_send: Cell::new(false),
                yield_on_request: Cell::new(false),
                balances: RefCell::new(HashMap::new()),
                token_balances: RefCell::new(HashMap::new()),
                account_queries: Cell::new(0),
                account_requests: Cell::new(0),
                switched: RefCell::new(Vec::new()),
                sent: RefCell::new(Vec::new()),
            }
        }

        pub fn absent() -> Self {
            Self {
                installed: false,
                ..Self::installed()
            }
        }

        pub fn with_accounts(self, accounts: &[Address]) -> Self {
            *self.accounts.borrow_mut() = accounts.to_vec();
            self
        }

        pub fn with_grant(self, account: Address) -> Self {
            self.grant.set(Some(account));
            self
        }

        pub fn with_chain(self, chain_id: u64) -> Self {
            self.chain_id.set(chain_id);
            self
        }

        pub fn set_accounts(&self, accounts: &[Address]) {
            *self.accounts.borrow_mut() = accounts.to_vec();
        }
    }

    impl WalletProvider for MockProvider {
        fn has_provider(&self) -> bool {
            self.installed
        }

        async fn get_accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.account_queries.set(self.account_queries.get() + 1);
            if self.fail_queries.get() {
                return Err(WalletError::RequestRejected("provider unavailable".into()));
            }
            Ok(self.accounts.borrow().clone())
        }

        async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
            self.account_requests.set(self.account_requests.get() + 1);
            if self.yield_on_request.get() {
                tokio::task::yield_now().await;
            }
            if self.reject_requests.get() {
                return Err(WalletError::RequestRejected("User rejected the request.".into()));
            }
            if self.accounts.borrow().is_empty()
                && let Some(account) = self.grant.get()
            {
                self.accounts.borrow_mut().push(account);
            }
            Ok(self.accounts.borrow().clone())
        }

        async fn get_chain_id(&self) -> Result<u64, WalletError> {
            if self.fail_chain_query.get() {
                return Err(WalletError::InvalidResponse("chain id unavailable".into()));
            }
            Ok(self.chain_id.get())
        }

        async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
            if self.reject_requests.get() {
                return Err(WalletError::RequestRejected("User rejected the request.".into()));
            }
            self.switched.borrow_mut().push(chain_id);
            self.chain_id.set(chain_id);
            Ok(())
        }

        async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError> {
            if self.fail_send.get() {
                return Err(WalletError::RequestRejected("insufficient funds for gas".into()));
            }
            self.sent.borrow_mut().push(*tx);
            Ok(TxHash::with_last_byte(self.sent.borrow().len() as u8))
        }

        async fn get_balance(&self, owner: Address) -> Result<U256, WalletError> {
            if self.fail_queries.get() {
                return Err(WalletError::RequestRejected("provider unavailable".into()));
            }
            Ok(self.balances.borrow().get(&owner).copied().unwrap_or_default())
        }

        async fn get_token_balance(
            &self,
            token: Address,
            owner: Address,
        ) -> Result<U256, WalletError> {
            self.token_balances
                .borrow()
                .get(&(token, owner))
                .copied()
                .ok_or_else(|| WalletError::InvalidResponse("execution reverted".into()))
        }
    }
}
