//! UI components built with Leptos.
//!
//! - [`wallet`] - Connection status and connect/disconnect controls
//! - [`network`] - Current network and switching between registered networks
//! - [`balance`] - Native and token balances of the connected account
//! - [`send`] - Native transfer form
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod balance;
pub mod icons;
pub mod network;
pub mod send;
pub mod wallet;

pub use balance::BalancePanel;
pub use network::NetworkSwitcher;
pub use send::SendForm;
pub use wallet::WalletPanel;
