//! Keyboard modes and interface languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a textual enum value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseEnumError {
	/// What was being parsed, e.g. `"docking"`.
	pub kind: &'static str,
	/// The rejected input.
	pub value: String,
}

impl ParseEnumError {
	pub fn new(kind: &'static str, value: &str) -> Self {
		Self {
			kind,
			value: value.to_string(),
		}
	}
}

/// Selects which key binding table is consulted for a key press.
///
/// The mode set is fixed; `All` bindings apply regardless of the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardMode {
	/// Typing letters runs commands.
	Command,
	/// Typing letters edits content.
	#[default]
	Edit,
	/// Bindings that apply in every mode (function keys, Ctrl chords, arrows).
	All,
}

impl KeyboardMode {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Command => "command",
			Self::Edit => "edit",
			Self::All => "all",
		}
	}
}

impl fmt::Display for KeyboardMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for KeyboardMode {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"command" => Ok(Self::Command),
			"edit" => Ok(Self::Edit),
			"all" => Ok(Self::All),
			_ => Err(ParseEnumError::new("keyboard mode", s)),
		}
	}
}

/// Interface language used for command descriptions and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	#[default]
	En,
	Fr,
}

impl Language {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::En => "en",
			Self::Fr => "fr",
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Language {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"en" => Ok(Self::En),
			"fr" => Ok(Self::Fr),
			_ => Err(ParseEnumError::new("language", s)),
		}
	}
}
