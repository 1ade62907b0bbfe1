//! # Core Navigation Engine
//!
//! Everything needed to walk a menu, independent of what the entries do.
//!
//! ```text
//!      menu.json ──► MenuTree ─────┐
//!                                   ▼
//!   "user.Create" ─► ActionTable ─► Navigator ◄──► Console (stdin/stdout)
//!                                   │
//!                                   ▼
//!                          Outcome (exit / input closed)
//! ```
//!
//! ## Modules
//!
//! - [`menu`]: `MenuEntry` / `MenuTree`: the validated, read-only hierarchy
//! - [`action`]: the `Action` trait and the name → action `ActionTable`
//! - [`navigator`]: the selection loop
//! - [`console`]: line-oriented input/output
//! - [`config`]: settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod console;
pub mod menu;
pub mod navigator;

// Re-export commonly used types for convenience
pub use action::{Action, ActionTable, Control};
pub use console::{Console, LineConsole};
pub use menu::{MenuEntry, MenuTree};
pub use navigator::{Navigator, Outcome};
