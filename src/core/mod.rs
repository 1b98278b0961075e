//! Core business logic for the wallet dashboard.
//!
//! This module provides:
//! - [`amount`] fixed-point conversion between base units and decimal text
//! - [`validate_transfer_request`] and `build_transfer` for the send form
//! - [`ConnectionState`] wallet connection lifecycle over a `WalletProvider`
//! - [`wallet`] the browser EIP-1193 provider
//! - [`balance`] reads (with token selection) and [`transfer`] sends through the provider

pub mod amount;
pub mod balance;
mod connection;
pub mod error;
mod provider;
pub mod transfer;
mod validate;
pub mod wallet;

pub use connection::ConnectionState;
pub use validate::validate_transfer_request;
