//! Event kinds and payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wisp_primitives::{DocumentId, Key, KeyboardMode, Language, ParseEnumError, ViewId, WindowId};

/// One command line queued for execution: a name plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnqueuedCommand {
	pub name: String,
	#[serde(default)]
	pub args: Vec<String>,
}

impl EnqueuedCommand {
	pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			name: name.into(),
			args: args.into_iter().map(Into::into).collect(),
		}
	}

	/// Splits a command line on whitespace; the first token is the name.
	///
	/// Returns `None` for a blank line.
	pub fn parse_line(line: &str) -> Option<Self> {
		let mut tokens = line.split_whitespace();
		let name = tokens.next()?;
		Some(Self::new(name, tokens))
	}
}

impl fmt::Display for EnqueuedCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)?;
		for arg in &self.args {
			write!(f, " {arg}")?;
		}
		Ok(())
	}
}

/// Discriminant of [`Event`]; each kind has its own listener table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
	CommandBatchSubmitted,
	DocumentCreated,
	DocumentCursorMoved,
	EditorKeyboardModeChanged,
	EditorLanguageChanged,
	TerminalKeyPressed,
	TerminalMetaKeyPressed,
	TerminalResized,
	ViewActivated,
	ViewCreated,
	WindowCreated,
	WindowResized,
}

impl EventKind {
	pub const ALL: [EventKind; 12] = [
		Self::CommandBatchSubmitted,
		Self::DocumentCreated,
		Self::DocumentCursorMoved,
		Self::EditorKeyboardModeChanged,
		Self::EditorLanguageChanged,
		Self::TerminalKeyPressed,
		Self::TerminalMetaKeyPressed,
		Self::TerminalResized,
		Self::ViewActivated,
		Self::ViewCreated,
		Self::WindowCreated,
		Self::WindowResized,
	];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::CommandBatchSubmitted => "command_batch_submitted",
			Self::DocumentCreated => "document_created",
			Self::DocumentCursorMoved => "document_cursor_moved",
			Self::EditorKeyboardModeChanged => "editor_keyboard_mode_changed",
			Self::EditorLanguageChanged => "editor_language_changed",
			Self::TerminalKeyPressed => "terminal_key_pressed",
			Self::TerminalMetaKeyPressed => "terminal_meta_key_pressed",
			Self::TerminalResized => "terminal_resized",
			Self::ViewActivated => "view_activated",
			Self::ViewCreated => "view_created",
			Self::WindowCreated => "window_created",
			Self::WindowResized => "window_resized",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EventKind {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| ParseEnumError::new("event kind", s))
	}
}

/// A state-change notification with its typed payload.
///
/// Payloads carry identifiers rather than references so that an event can
/// cross the plugin boundary unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
	CommandBatchSubmitted { commands: Vec<EnqueuedCommand> },
	DocumentCreated { document: DocumentId },
	DocumentCursorMoved { document: DocumentId, col: u32, row: u32 },
	EditorKeyboardModeChanged { mode: KeyboardMode },
	EditorLanguageChanged { language: Language },
	TerminalKeyPressed { key: Key },
	TerminalMetaKeyPressed { key: Key },
	TerminalResized { width: u16, height: u16 },
	ViewActivated { view: ViewId },
	ViewCreated { view: ViewId },
	WindowCreated { window: WindowId },
	WindowResized { window: WindowId },
}

impl Event {
	pub const fn kind(&self) -> EventKind {
		match self {
			Self::CommandBatchSubmitted { .. } => EventKind::CommandBatchSubmitted,
			Self::DocumentCreated { .. } => EventKind::DocumentCreated,
			Self::DocumentCursorMoved { .. } => EventKind::DocumentCursorMoved,
			Self::EditorKeyboardModeChanged { .. } => EventKind::EditorKeyboardModeChanged,
			Self::EditorLanguageChanged { .. } => EventKind::EditorLanguageChanged,
			Self::TerminalKeyPressed { .. } => EventKind::TerminalKeyPressed,
			Self::TerminalMetaKeyPressed { .. } => EventKind::TerminalMetaKeyPressed,
			Self::TerminalResized { .. } => EventKind::TerminalResized,
			Self::ViewActivated { .. } => EventKind::ViewActivated,
			Self::ViewCreated { .. } => EventKind::ViewCreated,
			Self::WindowCreated { .. } => EventKind::WindowCreated,
			Self::WindowResized { .. } => EventKind::WindowResized,
		}
	}
}
