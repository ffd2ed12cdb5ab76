#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Command registry, key bindings and their resolution chain.
//!
//! Every view owns a [`Commands`] table and a [`KeyBindings`] table. Lookups
//! start at a window and walk up through its ancestors until a match is
//! found, so a child view can shadow a command or binding of the root view
//! without touching it.
//!
//! Handlers reach the editor only through [`CommandEditorOps`], which keeps
//! this crate independent of the window tree and scheduler implementation.

pub mod builtins;
mod commands;
mod error;
mod exec;
mod keys;
mod ops;
mod text;

pub use commands::{Command, CommandAlias, CommandContext, CommandDef, CommandHandler, Commands};
pub use error::{CommandError, CommandResult};
pub use exec::{MAX_DISPATCH_DEPTH, alert, execute_command, get_command, get_key_binding_command};
pub use keys::KeyBindings;
pub use ops::CommandEditorOps;
pub use text::{CommandCategory, LocalizedText, Message};

/// Name of the command the dispatcher uses to report errors to the user.
pub const ALERT: &str = "alert";

#[cfg(test)]
mod testing;
