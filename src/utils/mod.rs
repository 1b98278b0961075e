//! Utility modules for web, DOM, and logging operations.
//!
//! Provides:
//! - [`dom`] - Browser window helpers
//! - [`logging`] - `log` backend writing to the browser console

pub mod dom;
pub mod logging;
