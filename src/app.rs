//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] definition, and the
//! wiring between the wallet state machine and Leptos signals.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::{BalancePanel, NetworkSwitcher, SendForm, WalletPanel};
use crate::config::{APP_NAME, APP_VERSION, NETWORKS};
use crate::core::balance::AccountBalance;
use crate::core::error::ConnectionError;
use crate::core::wallet::{self, Eip1193Provider};
use crate::core::ConnectionState;
use crate::models::{BalanceSnapshot, ConnectionStatus};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/app.module.css");

type Connection = Rc<ConnectionState<Eip1193Provider>>;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// The [`ConnectionState`] is the single source of truth for the wallet
/// session. `status` mirrors it after every request or provider event so
/// components can react to changes.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos handles.
#[derive(Clone, Copy)]
pub struct AppContext {
    connection: StoredValue<Connection, LocalStorage>,

    /// Mirror of the connection status.
    pub status: RwSignal<ConnectionStatus>,

    /// Whether a wallet request is awaiting the user or the provider.
    pub pending: RwSignal<bool>,

    /// Message of the last failed wallet request, cleared on the next one.
    pub error: RwSignal<Option<String>>,

    /// Last native balance read, tagged with the session it belongs to.
    pub native_balance: RwSignal<Option<AccountBalance>>,

    /// Bumped to force the balance panel to re-read balances.
    pub balance_epoch: RwSignal<u32>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            connection: StoredValue::new_local(Rc::new(ConnectionState::new(Eip1193Provider))),
            status: RwSignal::new(ConnectionStatus::Checking),
            pending: RwSignal::new(false),
            error: RwSignal::new(None),
            native_balance: RwSignal::new(None),
            balance_epoch: RwSignal::new(0),
        }
    }

    /// Shared handle to the wallet state machine.
    pub fn connection(&self) -> Connection {
        self.connection.get_value()
    }

    /// Copy the state machine's status into the signals.
    fn sync(&self) {
        let connection = self.connection();
        let status = connection.status();
        if self.status.get_untracked() != status {
            self.status.set(status);
        }
        self.pending.set(connection.is_busy());
    }

    /// Run one wallet request in the background, then publish its outcome.
    fn run<F, Fut>(&self, task: F)
    where
        F: FnOnce(Connection) -> Fut + 'static,
        Fut: Future<Output = Result<(), ConnectionError>> + 'static,
    {
        let ctx = *self;
        let connection = self.connection();
        ctx.error.set(None);
        ctx.pending.set(true);
        spawn_local(async move {
            let result = task(connection).await;
            if let Err(e) = &result {
                log::warn!("wallet request failed ({:?}): {e}", e.kind());
            }
            ctx.error.set(result.err().map(|e| e.to_string()));
            ctx.sync();
        });
    }

    /// Detect the injected wallet without prompting.
    pub fn check(&self) {
        self.run(|c| async move {
            c.check().await;
            Ok(())
        });
    }

    /// Re-query the wallet, keeping an existing session when possible.
    pub fn refresh(&self) {
        self.run(|c| async move {
            c.refresh().await;
            Ok(())
        });
    }

    /// Prompt the wallet for account access.
    pub fn connect(&self) {
        self.run(|c| async move { c.connect().await.map(|_| ()) });
    }

    pub fn disconnect(&self) {
        self.run(|c| async move {
            c.disconnect().await;
            Ok(())
        });
    }

    /// Ask the wallet to move to `chain_id`.
    pub fn switch_network(&self, chain_id: u64) {
        self.run(move |c| async move { c.switch_network(chain_id).await.map(|_| ()) });
    }

    /// Native balance of the current session, `None` while unknown.
    ///
    /// A read made for another account or chain is never returned.
    pub fn current_balance(&self) -> Option<BalanceSnapshot> {
        let status = self.status.get();
        self.native_balance
            .with(|b| b.as_ref().and_then(|b| b.current(&status)).cloned())
    }

    /// Untracked [`Self::current_balance`], for event handlers.
    pub fn current_balance_untracked(&self) -> Option<BalanceSnapshot> {
        let status = self.status.get_untracked();
        self.native_balance
            .with_untracked(|b| b.as_ref().and_then(|b| b.current(&status)).cloned())
    }

    /// Invalidate the cached balances.
    pub fn refresh_balances(&self) {
        self.balance_epoch.update(|n| *n = n.wrapping_add(1));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Network Notice
// ============================================================================

/// What to show about the connected network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkNotice {
    Hidden,
    /// Full banner with the supported networks.
    Warning { chain_id: u64 },
    /// Dismissed banner, reduced to a one-line reminder.
    Reminder,
}

impl NetworkNotice {
    /// Notice for `status` given whether the user dismissed the banner.
    pub fn for_status(status: &ConnectionStatus, dismissed: bool) -> Self {
        match status.chain_id() {
            Some(chain_id) if status.network().is_none() => {
                if dismissed {
                    Self::Reminder
                } else {
                    Self::Warning { chain_id }
                }
            }
            _ => Self::Hidden,
        }
    }
}

/// `"Supported networks: A, B, C +N more"`.
fn supported_networks_hint() -> String {
    const SHOWN: usize = 3;
    let names: Vec<&str> = NETWORKS.iter().take(SHOWN).map(|n| n.name).collect();
    let mut hint = format!("Supported networks: {}", names.join(", "));
    if NETWORKS.len() > SHOWN {
        hint.push_str(&format!(" +{} more", NETWORKS.len() - SHOWN));
    }
    hint
}

// ============================================================================
// Setup
// ============================================================================

/// Forward `accountsChanged` and `chainChanged` into the state machine.
fn setup_wallet_events(ctx: AppContext) {
    if !wallet::is_available() {
        return;
    }

    let ctx_for_accounts = ctx;
    if let Err(e) = wallet::on_accounts_changed(move |accounts| {
        ctx_for_accounts.connection().apply_accounts_changed(&accounts);
        ctx_for_accounts.sync();
    }) {
        log::warn!("accountsChanged listener not installed: {e}");
    }

    let ctx_for_chain = ctx;
    if let Err(e) = wallet::on_chain_changed(move |chain_id| {
        ctx_for_chain.connection().apply_chain_changed(chain_id);
        ctx_for_chain.sync();
    }) {
        log::warn!("chainChanged listener not installed: {e}");
    }
}

// ============================================================================
// App Component
// ============================================================================

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Subscribes to wallet events and runs the initial wallet check
/// - Renders the dashboard panels
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    setup_wallet_events(ctx);
    ctx.check();

    let connected = Memo::new(move |_| ctx.status.with(|s| s.is_connected()));
    let warning_dismissed = RwSignal::new(false);
    let notice = Memo::new(move |_| {
        ctx.status
            .with(|s| NetworkNotice::for_status(s, warning_dismissed.get()))
    });

    let notice_view = move || match notice.get() {
        NetworkNotice::Hidden => None,
        NetworkNotice::Warning { chain_id } => Some(
            view! {
                <div class=css::warning>
                    <div class=css::warningBody>
                        <strong>"Unsupported Network Detected"</strong>
                        <p>
                            {format!(
                                "You're connected to an unsupported network (Chain ID: {chain_id}). \
                                 Please switch to a supported network to use this application."
                            )}
                        </p>
                        <p class=css::muted>{supported_networks_hint()}</p>
                    </div>
                    <button
                        class=css::dismiss
                        title="Dismiss warning"
                        on:click=move |_| warning_dismissed.set(true)
                    >
                        "×"
                    </button>
                </div>
            }
            .into_any(),
        ),
        NetworkNotice::Reminder => Some(
            view! {
                <div class=css::reminder>
                    "You're still on an unsupported network."
                    <button class=css::linkButton on:click=move |_| warning_dismissed.set(false)>
                        "Show warning again"
                    </button>
                </div>
            }
            .into_any(),
        ),
    };

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class=css::crash>
                    <h1 class=css::crashTitle>"Something went wrong"</h1>
                    <p class=css::muted>
                        "An unexpected error occurred. Please try reloading the page."
                    </p>
                    <details class=css::crashDetails>
                        <summary>"Error details"</summary>
                        <ul>
                            {move || errors.get()
                                .into_iter()
                                .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                .collect::<Vec<_>>()
                            }
                        </ul>
                    </details>
                    <button class=css::button on:click=move |_| dom::reload()>
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <main class=css::page>
                <header class=css::header>
                    <h1 class=css::title>{APP_NAME}</h1>
                    <span class=css::muted>{format!("v{APP_VERSION}")}</span>
                </header>

                <WalletPanel />

                {notice_view}

                <Show when=move || connected.get()>
                    <NetworkSwitcher />
                    <BalancePanel />
                </Show>

                <SendForm />
            </main>
        </ErrorBoundary>
    }
}
