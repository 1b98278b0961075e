//! Native and ERC-20 balance reads.

use alloy_primitives::{Address, U256};
use log::warn;

use crate::config::NATIVE_DECIMALS;
use crate::core::amount::{format_optional_base_units, u256_to_biguint};
use crate::core::error::WalletError;
use crate::core::provider::WalletProvider;
use crate::models::{
    network_symbol, token_by_address, tokens_for_network, BalanceSnapshot, ConnectionStatus,
    Token, TokenAddress,
};

/// Balance of one registry token, or the error reading it.
#[derive(Clone, Debug, PartialEq)]
pub struct BalanceEntry {
    pub token: &'static Token,
    pub result: Result<U256, WalletError>,
}

impl BalanceEntry {
    /// Human-readable amount. An unreadable balance shows as `"0"`.
    pub fn display(&self) -> String {
        let raw = self.result.as_ref().ok().map(|raw| u256_to_biguint(*raw));
        format_optional_base_units(raw.as_ref(), self.token.decimals)
    }
}

/// A native balance and the session it was read for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountBalance {
    pub address: Address,
    pub chain_id: u64,
    pub snapshot: BalanceSnapshot,
}

impl AccountBalance {
    /// The snapshot, if it belongs to the account and chain `status` is
    /// connected to. A read for another session is never reused.
    pub fn current(&self, status: &ConnectionStatus) -> Option<&BalanceSnapshot> {
        match status {
            ConnectionStatus::Connected { address, chain_id }
                if *address == self.address && *chain_id == self.chain_id =>
            {
                Some(&self.snapshot)
            }
            _ => None,
        }
    }
}

/// Tokens picked for balance display, in the order they were picked.
///
/// Starts empty. Entries for tokens the current chain does not list are
/// kept but ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSelection {
    selected: Vec<TokenAddress>,
}

impl TokenSelection {
    /// Every token registered on `chain_id`, in registry order.
    pub fn all(chain_id: u64) -> Self {
        Self {
            selected: tokens_for_network(chain_id).iter().map(|t| t.address).collect(),
        }
    }

    pub fn contains(&self, address: TokenAddress) -> bool {
        self.selected.contains(&address)
    }

    /// Select `address` if unselected, otherwise unselect it.
    pub fn toggle(&mut self, address: TokenAddress) {
        if let Some(pos) = self.selected.iter().position(|a| *a == address) {
            self.selected.remove(pos);
        } else {
            self.selected.push(address);
        }
    }

    pub fn select_all(&mut self, chain_id: u64) {
        *self = Self::all(chain_id);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected tokens listed on `chain_id`, in selection order.
    pub fn tokens_on(&self, chain_id: u64) -> Vec<&'static Token> {
        self.selected
            .iter()
            .filter_map(|address| token_by_address(chain_id, *address))
            .collect()
    }

    /// `"N of M tokens selected"` for `chain_id`.
    pub fn summary(&self, chain_id: u64) -> String {
        format!(
            "{} of {} tokens selected",
            self.tokens_on(chain_id).len(),
            tokens_for_network(chain_id).len()
        )
    }
}

/// Native balance of `owner`, tagged with the chain's currency symbol.
pub async fn fetch_native_balance<P: WalletProvider>(
    provider: &P,
    owner: Address,
    chain_id: u64,
) -> Result<BalanceSnapshot, WalletError> {
    let raw = provider.get_balance(owner).await?;
    Ok(BalanceSnapshot::new(raw, NATIVE_DECIMALS, network_symbol(chain_id)))
}

/// Balances of the selected tokens on `chain_id`, in selection order.
///
/// A failed read is kept in its entry rather than failing the whole list.
pub async fn fetch_token_balances<P: WalletProvider>(
    provider: &P,
    owner: Address,
    chain_id: u64,
    selection: &TokenSelection,
) -> Vec<BalanceEntry> {
    let mut entries = Vec::new();
    for token in selection.tokens_on(chain_id) {
        let result = match token.contract() {
            Some(contract) => provider.get_token_balance(contract, owner).await,
            None => provider.get_balance(owner).await,
        };
        if let Err(e) = &result {
            warn!("balance of {} on chain {chain_id} failed: {e}", token.symbol);
        }
        entries.push(BalanceEntry { token, result });
    }
    entries
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use num_bigint::BigUint;

    use super::*;
    use crate::core::provider::mock::MockProvider;

    const OWNER: Address = address!("2222222222222222222222222222222222222222");
    const OTHER: Address = address!("3333333333333333333333333333333333333333");
    const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
    const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

    fn snapshot() -> BalanceSnapshot {
        BalanceSnapshot::new(U256::from(10u64.pow(18)), 18, "ETH")
    }

    #[tokio::test]
    async fn test_native_balance_snapshot() {
        let provider = MockProvider::installed();
        provider
            .balances
            .borrow_mut()
            .insert(OWNER, U256::from(1_500_000_000_000_000_000u64));

        let snapshot = fetch_native_balance(&provider, OWNER, 137).await.unwrap();
        assert_eq!(snapshot.symbol, "MATIC");
        assert_eq!(snapshot.decimals, 18);
        assert_eq!(snapshot.raw, BigUint::from(1_500_000_000_000_000_000u64));
    }

    #[tokio::test]
    async fn test_native_balance_error_propagates() {
        let provider = MockProvider::installed();
        provider.fail_queries.set(true);
        assert!(fetch_native_balance(&provider, OWNER, 1).await.is_err());
    }

    #[test]
    fn test_account_balance_only_applies_to_its_session() {
        let balance = AccountBalance {
            address: OWNER,
            chain_id: 1,
            snapshot: snapshot(),
        };

        let same = ConnectionStatus::Connected {
            address: OWNER,
            chain_id: 1,
        };
        assert_eq!(balance.current(&same), Some(&snapshot()));

        // a chain switch or account change invalidates the read
        let other_chain = ConnectionStatus::Connected {
            address: OWNER,
            chain_id: 137,
        };
        let other_account = ConnectionStatus::Connected {
            address: OTHER,
            chain_id: 1,
        };
        assert_eq!(balance.current(&other_chain), None);
        assert_eq!(balance.current(&other_account), None);
        assert_eq!(balance.current(&ConnectionStatus::Unlocked), None);
    }

    #[test]
    fn test_token_selection_toggle_and_summary() {
        let mut selection = TokenSelection::default();
        assert_eq!(selection.summary(1), "0 of 6 tokens selected");

        selection.toggle(TokenAddress::Contract(DAI));
        selection.toggle(TokenAddress::Native);
        assert!(selection.contains(TokenAddress::Native));
        assert_eq!(selection.summary(1), "2 of 6 tokens selected");

        // selection order is kept
        let symbols: Vec<_> = selection.tokens_on(1).iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, ["DAI", "ETH"]);

        selection.toggle(TokenAddress::Contract(DAI));
        assert!(!selection.contains(TokenAddress::Contract(DAI)));
        assert_eq!(selection.summary(1), "1 of 6 tokens selected");
    }

    #[test]
    fn test_token_selection_all_and_clear() {
        let mut selection = TokenSelection::default();
        selection.select_all(137);
        assert_eq!(selection.summary(137), "5 of 5 tokens selected");

        // mainnet contracts are not listed on Polygon
        assert_eq!(selection.tokens_on(1).len(), 1);

        selection.clear();
        assert!(selection.tokens_on(137).is_empty());
        assert_eq!(selection.summary(56), "0 of 0 tokens selected");
    }

    #[tokio::test]
    async fn test_token_balances_for_selection() {
        let provider = MockProvider::installed();
        provider
            .balances
            .borrow_mut()
            .insert(OWNER, U256::from(2_000_000_000_000_000_000u64));
        provider
            .token_balances
            .borrow_mut()
            .insert((USDT, OWNER), U256::from(1_234_560u64));

        let entries = fetch_token_balances(&provider, OWNER, 1, &TokenSelection::all(1)).await;
        assert_eq!(entries.len(), 6);

        assert!(entries[0].token.is_native());
        assert_eq!(entries[0].display(), "2");

        let usdt = entries
            .iter()
            .find(|e| e.token.symbol == "USDT")
            .unwrap();
        assert_eq!(usdt.display(), "1.23456");
        assert_eq!(
            Some(usdt.token),
            token_by_address(1, TokenAddress::Contract(USDT))
        );

        // tokens without a mocked balance surface their error individually
        let dai = entries.iter().find(|e| e.token.symbol == "DAI").unwrap();
        assert!(dai.result.is_err());
        assert_eq!(dai.display(), "0");
    }

    #[tokio::test]
    async fn test_token_balances_skip_unselected_tokens() {
        let provider = MockProvider::installed();
        provider
            .token_balances
            .borrow_mut()
            .insert((USDT, OWNER), U256::from(5_000_000u64));

        let mut selection = TokenSelection::default();
        assert!(fetch_token_balances(&provider, OWNER, 1, &selection).await.is_empty());

        selection.toggle(TokenAddress::Contract(USDT));
        let entries = fetch_token_balances(&provider, OWNER, 1, &selection).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].token.symbol, "USDT");
        assert_eq!(entries[0].display(), "5");
    }

    #[tokio::test]
    async fn test_token_balances_unknown_chain_is_empty() {
        let provider = MockProvider::installed();
        let selection = TokenSelection::all(1);
        assert!(fetch_token_balances(&provider, OWNER, 56, &selection).await.is_empty());
    }
}
