//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowUpRight as Send, LuCircleAlert as Alert, LuCircleCheck as Check, LuCoins as Coins,
        LuExternalLink as ExternalLink, LuGlobe as Network, LuLock as Lock, LuLogOut as LogOut,
        LuRefreshCw as Refresh, LuUser as User, LuWallet as Wallet,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowRepeat as Refresh, BsBoxArrowRight as LogOut, BsBoxArrowUpRight as ExternalLink,
        BsCheckCircleFill as Check, BsCoin as Coins, BsExclamationTriangleFill as Alert,
        BsGlobe as Network, BsLockFill as Lock, BsPerson as User, BsSend as Send,
        BsWallet2 as Wallet,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(WALLET, Wallet);
themed_icon!(USER, User);
themed_icon!(LOCK, Lock);
themed_icon!(LOG_OUT, LogOut);
themed_icon!(REFRESH, Refresh);
themed_icon!(NETWORK, Network);
themed_icon!(COINS, Coins);
themed_icon!(SEND, Send);
themed_icon!(CHECK, Check);
themed_icon!(ALERT, Alert);
themed_icon!(EXTERNAL_LINK, ExternalLink);
