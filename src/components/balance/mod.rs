//! Balance panel component.
//!
//! Reads the native balance of the connected account, plus the balances of
//! the tokens the user picked, whenever the account, chain, selection or
//! balance epoch changes.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::BALANCE_DISPLAY_PLACES;
use crate::core::amount::format_fixed;
use crate::core::balance::{
    fetch_native_balance, fetch_token_balances, AccountBalance, BalanceEntry, TokenSelection,
};
use crate::models::{tokens_for_network, ConnectionStatus};

stylance::import_crate_style!(css, "src/components/balance/balance.module.css");

#[component]
pub fn BalancePanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let selection = RwSignal::new(TokenSelection::default());
    let (entries, set_entries) = signal(Vec::<BalanceEntry>::new());
    let (native_loading, set_native_loading) = signal(false);
    let (tokens_loading, set_tokens_loading) = signal(false);
    let (native_error, set_native_error) = signal::<Option<String>>(None);

    let chain_id = Memo::new(move |_| ctx.status.with(|s| s.chain_id()));

    // Native balance
    Effect::new(move || {
        ctx.balance_epoch.track();
        let status = ctx.status.get();
        ctx.native_balance.set(None);
        set_native_error.set(None);
        let ConnectionStatus::Connected { address, chain_id } = status else {
            set_native_loading.set(false);
            return;
        };

        set_native_loading.set(true);
        let connection = ctx.connection();
        spawn_local(async move {
            let native = fetch_native_balance(connection.provider(), address, chain_id).await;

            // Drop results for a session that changed while reading.
            if ctx.status.get_untracked() != status {
                return;
            }
            match native {
                Ok(snapshot) => ctx.native_balance.set(Some(AccountBalance {
                    address,
                    chain_id,
                    snapshot,
                })),
                Err(e) => set_native_error.set(Some(e.to_string())),
            }
            set_native_loading.set(false);
        });
    });

    // Selected token balances
    Effect::new(move || {
        ctx.balance_epoch.track();
        let status = ctx.status.get();
        let selected = selection.get();
        set_entries.set(Vec::new());
        let ConnectionStatus::Connected { address, chain_id } = status else {
            set_tokens_loading.set(false);
            return;
        };

        set_tokens_loading.set(true);
        let connection = ctx.connection();
        spawn_local(async move {
            let tokens =
                fetch_token_balances(connection.provider(), address, chain_id, &selected).await;
            if ctx.status.get_untracked() != status || selection.get_untracked() != selected {
                return;
            }
            set_entries.set(tokens);
            set_tokens_loading.set(false);
        });
    });

    on_cleanup(move || ctx.native_balance.set(None));

    let native_view = move || match ctx.current_balance() {
        Some(b) => format!(
            "{} {}",
            format_fixed(&b.raw, b.decimals, BALANCE_DISPLAY_PLACES),
            b.symbol
        ),
        None if native_loading.get() => "Loading...".to_string(),
        None => "—".to_string(),
    };

    let selector = move || {
        let Some(chain_id) = chain_id.get() else {
            return None;
        };
        let tokens = tokens_for_network(chain_id);
        if tokens.is_empty() {
            return Some(
                view! {
                    <p class=css::muted>"No tokens available for the current network."</p>
                }
                .into_any(),
            );
        }

        let options = tokens
            .iter()
            .map(|token| {
                let address = token.address;
                let picked = move || selection.with(|s| s.contains(address));
                let class_name = move || {
                    if picked() {
                        format!("{} {}", css::option, css::optionSelected)
                    } else {
                        css::option.to_string()
                    }
                };
                view! {
                    <button
                        class=class_name
                        title=format!("{} ({})", token.name, token.address)
                        on:click=move |_| selection.update(|s| s.toggle(address))
                    >
                        <span class=css::tokenIcon>{token.icon}</span>
                        <span class=css::symbol>{token.symbol}</span>
                        <span class=css::tokenName>{token.name}</span>
                        <Show when=picked>
                            <Icon icon=ic::CHECK />
                        </Show>
                    </button>
                }
            })
            .collect_view();

        Some(
            view! {
                <div class=css::selector>
                    <div class=css::selectorHeader>
                        <span class=css::muted>
                            {move || selection.with(|s| s.summary(chain_id))}
                        </span>
                        <button
                            class=css::linkButton
                            on:click=move |_| selection.update(|s| s.select_all(chain_id))
                        >
                            "Select All"
                        </button>
                        <button
                            class=css::linkButton
                            on:click=move |_| selection.update(TokenSelection::clear)
                        >
                            "Clear All"
                        </button>
                    </div>
                    <div class=css::options>{options}</div>
                </div>
            }
            .into_any(),
        )
    };

    let rows = move || {
        entries
            .get()
            .into_iter()
            .map(|entry| {
                let failure = entry.result.as_ref().err().map(|e| e.to_string());
                let amount_class = if failure.is_some() {
                    css::amountFailed
                } else {
                    css::amount
                };
                view! {
                    <li class=css::row>
                        <span class=css::tokenIcon>{entry.token.icon}</span>
                        <span class=css::symbol title=entry.token.name>{entry.token.symbol}</span>
                        <span class=amount_class title=failure>
                            {entry.display()}
                        </span>
                    </li>
                }
            })
            .collect_view()
    };

    let loading = move || native_loading.get() || tokens_loading.get();

    view! {
        <section class=css::panel>
            <div class=css::title>
                <Icon icon=ic::COINS />
                <span>"Balances"</span>
                <button
                    class=css::refresh
                    title="Refresh balances"
                    disabled=loading
                    on:click=move |_| ctx.refresh_balances()
                >
                    <Icon icon=ic::REFRESH />
                </button>
            </div>
            <div class=css::native>{native_view}</div>
            {move || native_error.get().map(|message| view! {
                <p class=css::error>{message}</p>
            })}
            {selector}
            <ul class=css::list>{rows}</ul>
            <Show when=move || tokens_loading.get()>
                <p class=css::muted>"Loading token balances..."</p>
            </Show>
        </section>
    }
}
