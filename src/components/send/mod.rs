//! Native transfer form.
//!
//! Validates on submit, hands the transaction to the wallet and links the
//! resulting hash on the network's block explorer.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::BALANCE_DISPLAY_PLACES;
use crate::core::amount::{format_base_units, format_fixed};
use crate::core::transfer::send_native;
use crate::core::validate_transfer_request;
use crate::models::{explorer_tx_url, network_symbol, TransferRequest};

stylance::import_crate_style!(css, "src/components/send/send.module.css");

/// A submitted transaction and its explorer link.
#[derive(Clone, Debug, PartialEq)]
struct Submitted {
    hash: String,
    url: String,
}

fn input_value(ev: &ev::Event) -> String {
    ev.target()
        .map(|t| t.unchecked_into::<web_sys::HtmlInputElement>().value())
        .unwrap_or_default()
}

#[component]
pub fn SendForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let (recipient, set_recipient) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (sending, set_sending) = signal(false);
    let (submitted, set_submitted) = signal::<Option<Submitted>>(None);

    let connected = Memo::new(move |_| ctx.status.with(|s| s.is_connected()));
    let symbol = Memo::new(move |_| {
        ctx.status
            .with(|s| s.chain_id().map(network_symbol).unwrap_or("ETH"))
    });

    let available = move || {
        ctx.current_balance().map(|b| {
            format!(
                "Available: {} {}",
                format_fixed(&b.raw, b.decimals, BALANCE_DISPLAY_PLACES),
                b.symbol
            )
        })
    };

    let fill_max = move |_: ev::MouseEvent| {
        if let Some(b) = ctx.current_balance_untracked() {
            set_amount.set(format_base_units(&b.raw, b.decimals));
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }

        let status = ctx.status.get_untracked();
        let mut request = TransferRequest::new(recipient.get_untracked(), amount.get_untracked());
        request.balance = ctx.current_balance_untracked();

        if let Err(e) = validate_transfer_request(&status, &request) {
            set_error.set(Some(e.to_string()));
            return;
        }
        let Some(chain_id) = status.chain_id() else {
            return;
        };

        set_error.set(None);
        set_submitted.set(None);
        set_sending.set(true);
        let connection = ctx.connection();
        spawn_local(async move {
            match send_native(connection.provider(), &status, &request).await {
                Ok(hash) => {
                    let hash = hash.to_string();
                    set_submitted.set(Some(Submitted {
                        url: explorer_tx_url(chain_id, &hash),
                        hash,
                    }));
                    set_recipient.set(String::new());
                    set_amount.set(String::new());
                    ctx.refresh_balances();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_sending.set(false);
        });
    };

    let form = move || {
        view! {
            <form class=css::form on:submit=on_submit>
                <label class=css::field>
                    <span class=css::label>"Recipient Address"</span>
                    <input
                        type="text"
                        class=css::input
                        placeholder="0x..."
                        autocomplete="off"
                        spellcheck="false"
                        prop:value=recipient
                        on:input=move |ev| set_recipient.set(input_value(&ev))
                    />
                </label>

                <label class=css::field>
                    <span class=css::label>
                        {move || format!("Amount ({})", symbol.get())}
                    </span>
                    <div class=css::amountRow>
                        <input
                            type="text"
                            inputmode="decimal"
                            class=css::input
                            placeholder="0.0"
                            autocomplete="off"
                            prop:value=amount
                            on:input=move |ev| set_amount.set(input_value(&ev))
                        />
                        <button type="button" class=css::max on:click=fill_max>
                            "Max"
                        </button>
                    </div>
                    <span class=css::hint>{available}</span>
                </label>

                <button type="submit" class=css::submit disabled=move || sending.get()>
                    <Icon icon=ic::SEND />
                    {move || if sending.get() { "Sending..." } else { "Send" }}
                </button>
            </form>
        }
    };

    view! {
        <section class=css::panel>
            <div class=css::title>
                <Icon icon=ic::SEND />
                <span>{move || format!("Send {}", symbol.get())}</span>
            </div>

            <Show
                when=move || connected.get()
                fallback=|| view! {
                    <p class=css::muted>"Please connect your wallet to send transactions."</p>
                }
            >
                {form}
            </Show>

            {move || error.get().map(|message| view! {
                <p class=css::error>
                    <Icon icon=ic::ALERT />
                    {message}
                </p>
            })}

            {move || submitted.get().map(|tx| view! {
                <div class=css::success>
                    <Icon icon=ic::CHECK />
                    <span>"Transaction submitted"</span>
                    <code class=css::hash>{tx.hash}</code>
                    <a class=css::link href=tx.url target="_blank" rel="noopener noreferrer">
                        "View on explorer"
                        <Icon icon=ic::EXTERNAL_LINK />
                    </a>
                </div>
            })}
        </section>
    }
}
