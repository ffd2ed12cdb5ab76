use std::path::PathBuf;

use thiserror::Error;

/// Errors raised on a plugin channel.
#[derive(Debug, Error)]
pub enum RpcError {
	/// Reading from or writing to the plugin stream failed.
	#[error("plugin I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// A line was not a valid message.
	#[error("malformed plugin message: {0}")]
	Codec(#[from] serde_json::Error),
	/// The peer or the host side of the channel has gone away.
	#[error("plugin channel closed")]
	Closed,
	/// The plugin executable could not be started.
	#[error("failed to spawn plugin {path}: {source}")]
	Spawn {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type Result<T> = std::result::Result<T, RpcError>;
