use std::path::PathBuf;

use thiserror::Error;
use wisp_primitives::{Docking, WindowId};
use wisp_registry::CommandError;

/// Structural failures of the window tree.
///
/// None of these leave the tree partially modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
	/// A non-floating sibling already holds the requested slot.
	#[error("window {parent} already has a {docking} child")]
	DockingOccupied { parent: WindowId, docking: Docking },
	/// No window with this id is attached to the tree.
	#[error("window {0} does not exist")]
	UnknownWindow(WindowId),
	/// The root window lives as long as the editor.
	#[error("the root window cannot be removed")]
	RootRemoval,
	/// `child` is not a direct child of `parent`.
	#[error("window {child} is not a child of {parent}")]
	NotAChild { parent: WindowId, child: WindowId },
	/// No view factory is registered under this name.
	#[error("unknown view factory \"{0}\"")]
	UnknownViewFactory(String),
}

impl From<WindowError> for CommandError {
	fn from(error: WindowError) -> Self {
		CommandError::Failed(error.to_string())
	}
}

/// Errors raised while loading [`EditorConfig`](crate::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The file exists but could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file is not valid TOML or does not match the schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A value parsed but is not acceptable.
	#[error("invalid value for '{key}': {reason}")]
	InvalidValue {
		/// Dotted path of the offending key.
		key: String,
		/// Why the value was rejected.
		reason: String,
	},
}

pub type Result<T, E = WindowError> = std::result::Result<T, E>;
