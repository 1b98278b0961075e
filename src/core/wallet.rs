//! Wallet connection logic using web-sys.
//!
//! Provides MetaMask (EIP-1193) wallet connectivity through
//! direct JavaScript interop via Reflect API. [`Eip1193Provider`] is the
//! browser implementation of [`WalletProvider`].

use std::str::FromStr;

use alloy_primitives::{Address, TxHash, U256};
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;

use crate::core::error::WalletError;
use crate::core::provider::WalletProvider;
use crate::models::TransactionRequest;
use crate::utils::dom;

/// Function selector of ERC-20 `balanceOf(address)`.
const BALANCE_OF_SELECTOR: &str = "70a08231";

/// Get the window.ethereum object injected by MetaMask.
fn get_ethereum() -> Result<Object, WalletError> {
    let window = dom::window().ok_or(WalletError::NoWindow)?;
    Reflect::get(&window, &"ethereum".into())
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
        .ok_or(WalletError::NotInstalled)
}

/// Best-effort message from a rejected provider promise.
///
/// EIP-1193 errors are objects carrying `code` and `message`.
fn js_error_message(error: &JsValue) -> String {
    Reflect::get(error, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}

/// Helper to call ethereum.request({ method, params })
async fn ethereum_request(method: &str, params: Option<Value>) -> Result<JsValue, WalletError> {
    let ethereum = get_ethereum()?;

    let args = Object::new();
    Reflect::set(&args, &"method".into(), &method.into())
        .map_err(|_| WalletError::RequestCreationFailed)?;

    if let Some(params) = params {
        let js_params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|_| WalletError::RequestCreationFailed)?;
        Reflect::set(&args, &"params".into(), &js_params)
            .map_err(|_| WalletError::RequestCreationFailed)?;
    }

    let request = Reflect::get(&ethereum, &"request".into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)?;

    let promise: Promise = request
        .call1(&ethereum, &args)
        .map_err(|_| WalletError::RequestCreationFailed)?
        .into();

    log::debug!("ethereum.request {method}");
    JsFuture::from(promise)
        .await
        .map_err(|e| WalletError::RequestRejected(js_error_message(&e)))
}

/// Check if MetaMask (or compatible wallet) is installed
pub fn is_available() -> bool {
    get_ethereum().is_ok()
}

// ============================================================================
// Response decoding
// ============================================================================

/// Parse a hex chain id such as `"0x89"`.
pub fn parse_chain_id(hex_str: &str) -> Option<u64> {
    u64::from_str_radix(hex_str.trim_start_matches("0x"), 16).ok()
}

/// Parse a hex quantity. An empty `"0x"` result (no contract code) reads as zero.
pub fn parse_quantity(hex_str: &str) -> Result<U256, WalletError> {
    let digits = hex_str.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|_| WalletError::InvalidResponse(format!("bad quantity {hex_str}")))
}

/// Encode a value as an RPC hex quantity.
fn to_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Calldata for `balanceOf(owner)`.
pub fn balance_of_calldata(owner: Address) -> String {
    format!("0x{}{:0>64}", BALANCE_OF_SELECTOR, hex::encode(owner))
}

fn parse_accounts(value: &JsValue) -> Result<Vec<Address>, WalletError> {
    Array::from(value)
        .iter()
        .map(|entry| {
            let text = entry
                .as_string()
                .ok_or_else(|| WalletError::InvalidResponse("account is not a string".into()))?;
            Address::from_str(&text)
                .map_err(|_| WalletError::InvalidResponse(format!("bad account {text}")))
        })
        .collect()
}

fn expect_string(value: JsValue, what: &str) -> Result<String, WalletError> {
    value
        .as_string()
        .ok_or_else(|| WalletError::InvalidResponse(format!("{what} is not a string")))
}

// ============================================================================
// Provider
// ============================================================================

/// The injected `window.ethereum` wallet.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eip1193Provider;

impl WalletProvider for Eip1193Provider {
    fn has_provider(&self) -> bool {
        is_available()
    }

    async fn get_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let result = ethereum_request("eth_accounts", None).await?;
        parse_accounts(&result)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let result = ethereum_request("eth_requestAccounts", None).await?;
        parse_accounts(&result)
    }

    async fn get_chain_id(&self) -> Result<u64, WalletError> {
        let result = ethereum_request("eth_chainId", None).await?;
        let hex_str = expect_string(result, "chain id")?;
        parse_chain_id(&hex_str)
            .ok_or_else(|| WalletError::InvalidResponse(format!("bad chain id {hex_str}")))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let params = json!([{ "chainId": format!("0x{:x}", chain_id) }]);
        ethereum_request("wallet_switchEthereumChain", Some(params)).await?;
        Ok(())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError> {
        let params = json!([{
            "from": tx.from.to_string(),
            "to": tx.to.to_string(),
            "value": to_quantity(tx.value),
        }]);
        let result = ethereum_request("eth_sendTransaction", Some(params)).await?;
        let hash = expect_string(result, "transaction hash")?;
        TxHash::from_str(&hash)
            .map_err(|_| WalletError::InvalidResponse(format!("bad transaction hash {hash}")))
    }

    async fn get_balance(&self, owner: Address) -> Result<U256, WalletError> {
        let params = json!([owner.to_string(), "latest"]);
        let result = ethereum_request("eth_getBalance", Some(params)).await?;
        parse_quantity(&expect_string(result, "balance")?)
    }

    async fn get_token_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<U256, WalletError> {
        let params = json!([
            { "to": token.to_string(), "data": balance_of_calldata(owner) },
            "latest"
        ]);
        let result = ethereum_request("eth_call", Some(params)).await?;
        parse_quantity(&expect_string(result, "balanceOf result")?)
    }
}

// ============================================================================
// Event Listeners
// ============================================================================

fn subscribe(event: &str, closure: &Closure<dyn Fn(JsValue)>) -> Result<(), WalletError> {
    let ethereum = get_ethereum()?;

    let on_fn = Reflect::get(&ethereum, &"on".into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)?;

    on_fn
        .call2(&ethereum, &event.into(), closure.as_ref())
        .map_err(|_| WalletError::RequestCreationFailed)?;
    Ok(())
}

/// Register a callback for when the exposed accounts change.
///
/// An empty list means the wallet locked or revoked access.
///
/// # Note
/// The closure is intentionally leaked using `forget()` since this is a
/// single-page application where the listener should persist for the
/// entire lifetime of the page.
pub fn on_accounts_changed(callback: impl Fn(Vec<Address>) + 'static) -> Result<(), WalletError> {
    let closure = Closure::wrap(Box::new(move |accounts: JsValue| match parse_accounts(&accounts) {
        Ok(accounts) => callback(accounts),
        Err(e) => log::warn!("ignoring accountsChanged event: {e}"),
    }) as Box<dyn Fn(JsValue)>);

    subscribe("accountsChanged", &closure)?;
    closure.forget();
    Ok(())
}

/// Register a callback for when the connected chain changes.
///
/// # Note
/// The closure is intentionally leaked using `forget()`, see
/// [`on_accounts_changed`].
pub fn on_chain_changed(callback: impl Fn(u64) + 'static) -> Result<(), WalletError> {
    let closure = Closure::wrap(Box::new(move |chain_id: JsValue| {
        match chain_id.as_string().as_deref().and_then(parse_chain_id) {
            Some(id) => callback(id),
            None => log::warn!("ignoring chainChanged event: {:?}", chain_id),
        }
    }) as Box<dyn Fn(JsValue)>);

    subscribe("chainChanged", &closure)?;
    closure.forget();
    Ok(())
}
