//! Network switcher component.
//!
//! Lists every registered network and asks the wallet to switch on click.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::NETWORKS;
use crate::models::{network_name, Network};

stylance::import_crate_style!(css, "src/components/network/network.module.css");

#[component]
pub fn NetworkSwitcher() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let pending = ctx.pending;
    let current = Memo::new(move |_| ctx.status.with(|s| s.chain_id()));

    let current_label = move || match current.get() {
        Some(id) => format!("{} ({})", network_name(id), id),
        None => "—".to_string(),
    };

    let supported = move || current.get().is_some_and(Network::is_supported);
    let badge = move || {
        if supported() {
            view! { <span class=css::badgeSupported>"supported"</span> }.into_any()
        } else {
            view! { <span class=css::badgeUnsupported>"unsupported"</span> }.into_any()
        }
    };

    let options = NETWORKS
        .iter()
        .map(|network| {
            let id = network.id;
            let is_current = move || current.get() == Some(id);
            let class_name = move || {
                if is_current() {
                    format!("{} {}", css::option, css::optionActive)
                } else {
                    css::option.to_string()
                }
            };
            view! {
                <button
                    class=class_name
                    disabled=move || pending.get() || is_current()
                    on:click=move |_| ctx.switch_network(id)
                >
                    <span class=css::optionIcon>{network.icon}</span>
                    <span>{network.name}</span>
                    {network.is_testnet.then(|| view! {
                        <span class=css::testnet>"testnet"</span>
                    })}
                </button>
            }
        })
        .collect_view();

    view! {
        <section class=css::panel>
            <div class=css::title>
                <Icon icon=ic::NETWORK />
                <span>"Network"</span>
                <span class=css::current>{current_label}</span>
                {badge}
            </div>
            <div class=css::options>{options}</div>
        </section>
    }
}
