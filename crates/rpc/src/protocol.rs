//! Wire messages exchanged with plugins.

use serde::{Deserialize, Serialize};
use wisp_events::{EnqueuedCommand, Event, EventKind};

/// Host to plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
	/// An event of a kind the plugin subscribed to.
	Event { event: Event },
	/// The host is exiting; the plugin should exit too.
	Shutdown,
}

/// Plugin to host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PluginMessage {
	Hello { name: String, version: String },
	Subscribe { kinds: Vec<EventKind> },
	/// Publishes an event through the host's registry, exactly as if the
	/// editor had triggered it.
	Trigger { event: Event },
	/// Appends a command to the host's command queue.
	PostCommand {
		name: String,
		#[serde(default)]
		args: Vec<String>,
	},
}

impl PluginMessage {
	pub fn post_command(command: EnqueuedCommand) -> Self {
		Self::PostCommand {
			name: command.name,
			args: command.args,
		}
	}
}
