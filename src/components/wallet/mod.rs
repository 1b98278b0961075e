//! Wallet panel component.
//!
//! Shows what the injected wallet reports and offers the action that fits:
//! install, connect, or disconnect.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::WALLET_INSTALL_URL;
use crate::models::{network_name, ConnectionStatus};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/wallet/wallet.module.css");

/// Wallet connection panel.
#[component]
pub fn WalletPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let pending = ctx.pending;

    let connect = move |_: leptos::ev::MouseEvent| ctx.connect();
    let disconnect = move |_: leptos::ev::MouseEvent| ctx.disconnect();
    let refresh = move |_: leptos::ev::MouseEvent| ctx.refresh();
    let install = move |_: leptos::ev::MouseEvent| dom::open_in_new_tab(WALLET_INSTALL_URL);

    let connect_label = move || if pending.get() { "Connecting..." } else { "Connect Wallet" };

    let body = move || match ctx.status.get() {
        ConnectionStatus::Checking => view! {
            <p class=css::muted>"Checking for wallet..."</p>
        }
        .into_any(),

        ConnectionStatus::NoProvider => view! {
            <h2 class=css::heading>"No Wallet Found"</h2>
            <p class=css::muted>
                "Install a browser wallet such as MetaMask to use this dashboard."
            </p>
            <button class=css::primary on:click=install>
                "Install MetaMask"
                <Icon icon=ic::EXTERNAL_LINK />
            </button>
        }
        .into_any(),

        status @ (ConnectionStatus::Locked | ConnectionStatus::Unlocked) => {
            let hint = if status == ConnectionStatus::Locked {
                "Your wallet is locked. Unlock it and connect to continue."
            } else {
                "Connect your wallet to view balances and send transactions."
            };
            view! {
                <h2 class=css::heading>
                    <Icon icon=ic::LOCK />
                    "Wallet Detected"
                </h2>
                <p class=css::muted>{hint}</p>
                <div class=css::actions>
                    <button class=css::primary on:click=connect disabled=move || pending.get()>
                        {connect_label}
                    </button>
                    <button
                        class=css::secondary
                        on:click=refresh
                        disabled=move || pending.get()
                        title="Refresh status"
                    >
                        <Icon icon=ic::REFRESH />
                    </button>
                </div>
            }
            .into_any()
        }

        status @ ConnectionStatus::Connected { .. } => {
            let full_address = status
                .address()
                .map(|a| a.to_string())
                .unwrap_or_default();
            let network = status.chain_id().map(network_name).unwrap_or_default();
            view! {
                <h2 class=css::heading>
                    <Icon icon=ic::CHECK />
                    "Wallet Connected!"
                </h2>
                <div class=css::account>
                    <span class=css::accountIcon><Icon icon=ic::USER /></span>
                    <span class=css::address title=full_address>{status.display_name()}</span>
                    <span class=css::network>{network}</span>
                </div>
                <button class=css::secondary on:click=disconnect disabled=move || pending.get()>
                    <Icon icon=ic::LOG_OUT />
                    "Disconnect"
                </button>
            }
            .into_any()
        }
    };

    view! {
        <section class=css::panel>
            <div class=css::title>
                <Icon icon=ic::WALLET />
                <span>"Wallet"</span>
            </div>
            {body}
            {move || ctx.error.get().map(|message| view! {
                <p class=css::error>
                    <Icon icon=ic::ALERT />
                    {message}
                </p>
            })}
        </section>
    }
}
