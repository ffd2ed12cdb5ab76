#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Plugin bridge: event fan-out to plugin processes and command intake from
//! them.
//!
//! Plugins talk to the host over a pair of byte streams (normally the
//! child's stdio) carrying one JSON message per line. A plugin can subscribe
//! to event kinds, trigger events and post commands. It has no way to touch
//! the window tree except through the commands it posts.

mod bridge;
mod codec;
mod error;
mod protocol;

pub use bridge::{CommandSink, OUTBOUND_CAPACITY, PluginBridge, PluginId, PluginInfo, discover};
pub use codec::JsonLines;
pub use error::{Result, RpcError};
pub use protocol::{HostMessage, PluginMessage};
