//! Key presses and their textual names.
//!
//! Key bindings are keyed by the canonical name produced by [`Key`]'s
//! `Display` impl (`Ctrl+Q`, `Alt+X`, `F5`, `Shift+Tab`). Parsing accepts the
//! same names case-insensitively, plus a few aliases (`esc`, `return`,
//! `control`, `meta`, `pgup`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod modifiers;

pub use modifiers::Modifiers;

/// The non-modifier part of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	Char(char),
	Enter,
	Escape,
	Backspace,
	Tab,
	Delete,
	Insert,
	Home,
	End,
	PageUp,
	PageDown,
	Up,
	Down,
	Left,
	Right,
	/// Function key `F1`..`F12`.
	F(u8),
}

impl KeyCode {
	fn from_name(name: &str) -> Option<Self> {
		let lower = name.to_ascii_lowercase();
		let code = match lower.as_str() {
			"space" => Self::Char(' '),
			"enter" | "return" => Self::Enter,
			"esc" | "escape" => Self::Escape,
			"backspace" => Self::Backspace,
			"tab" => Self::Tab,
			"del" | "delete" => Self::Delete,
			"ins" | "insert" => Self::Insert,
			"home" => Self::Home,
			"end" => Self::End,
			"pgup" | "pageup" => Self::PageUp,
			"pgdn" | "pagedown" => Self::PageDown,
			"up" => Self::Up,
			"down" => Self::Down,
			"left" => Self::Left,
			"right" => Self::Right,
			other => {
				let n = other.strip_prefix('f')?.parse::<u8>().ok()?;
				if !(1..=12).contains(&n) {
					return None;
				}
				Self::F(n)
			}
		};
		Some(code)
	}
}

/// Errors produced when parsing a key name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
	/// The input was empty or ended with a modifier.
	#[error("missing key in '{0}'")]
	MissingKey(String),
	/// A `+`-separated prefix was not a modifier name.
	#[error("unknown modifier '{0}'")]
	UnknownModifier(String),
	/// The final segment was neither a single character nor a named key.
	#[error("unknown key '{0}'")]
	UnknownKey(String),
}

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// An unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c), Modifiers::NONE)
	}

	/// A Ctrl chord. Letters are stored lowercase.
	pub fn ctrl(c: char) -> Self {
		Self::new(KeyCode::Char(c.to_ascii_lowercase()), Modifiers::CTRL)
	}

	/// An Alt chord. Letters are stored lowercase, like [`Key::ctrl`], so
	/// the key survives a trip through its name.
	pub fn alt(c: char) -> Self {
		Self::new(KeyCode::Char(c.to_ascii_lowercase()), Modifiers::ALT)
	}

	/// Alt is reported by terminals as the meta key.
	pub fn is_meta(&self) -> bool {
		self.modifiers.alt
	}

	/// The character this key types into the key buffer, if any.
	pub fn printable_char(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
			_ => None,
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.modifiers.write_prefix(f)?;
		match self.code {
			KeyCode::Char(' ') => f.write_str("Space"),
			KeyCode::Char(c) if self.modifiers.ctrl || self.modifiers.alt => {
				write!(f, "{}", c.to_ascii_uppercase())
			}
			KeyCode::Char(c) => write!(f, "{c}"),
			KeyCode::Enter => f.write_str("Enter"),
			KeyCode::Escape => f.write_str("Esc"),
			KeyCode::Backspace => f.write_str("Backspace"),
			KeyCode::Tab => f.write_str("Tab"),
			KeyCode::Delete => f.write_str("Delete"),
			KeyCode::Insert => f.write_str("Insert"),
			KeyCode::Home => f.write_str("Home"),
			KeyCode::End => f.write_str("End"),
			KeyCode::PageUp => f.write_str("PageUp"),
			KeyCode::PageDown => f.write_str("PageDown"),
			KeyCode::Up => f.write_str("Up"),
			KeyCode::Down => f.write_str("Down"),
			KeyCode::Left => f.write_str("Left"),
			KeyCode::Right => f.write_str("Right"),
			KeyCode::F(n) => write!(f, "F{n}"),
		}
	}
}

impl FromStr for Key {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (prefix, name) = if s == "+" {
			("", "+")
		} else if let Some(prefix) = s.strip_suffix("++") {
			(prefix, "+")
		} else {
			s.rsplit_once('+').unwrap_or(("", s))
		};
		if name.is_empty() {
			return Err(KeyParseError::MissingKey(s.to_string()));
		}

		let mut modifiers = Modifiers::NONE;
		for token in prefix.split('+').filter(|t| !t.is_empty()) {
			modifiers = modifiers
				.with_token(token)
				.ok_or_else(|| KeyParseError::UnknownModifier(token.to_string()))?;
		}

		let mut chars = name.chars();
		let code = match (chars.next(), chars.next()) {
			(Some(c), None) if modifiers.ctrl || modifiers.alt => KeyCode::Char(c.to_ascii_lowercase()),
			(Some(c), None) => KeyCode::Char(c),
			_ => KeyCode::from_name(name).ok_or_else(|| KeyParseError::UnknownKey(name.to_string()))?,
		};
		Ok(Self { code, modifiers })
	}
}

impl TryFrom<String> for Key {
	type Error = KeyParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Key> for String {
	fn from(key: Key) -> Self {
		key.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ctrl_chords_display_uppercase() {
		assert_eq!(Key::ctrl('q').to_string(), "Ctrl+Q");
		assert_eq!(Key::new(KeyCode::Char('x'), Modifiers::ALT).to_string(), "Alt+X");
		assert_eq!(Key::new(KeyCode::Tab, Modifiers::SHIFT).to_string(), "Shift+Tab");
		assert_eq!(Key::char(' ').to_string(), "Space");
	}

	#[test]
	fn parsing_is_case_insensitive_for_names() {
		assert_eq!("ctrl+q".parse::<Key>(), Ok(Key::ctrl('q')));
		assert_eq!("CONTROL+Q".parse::<Key>(), Ok(Key::ctrl('q')));
		assert_eq!("esc".parse::<Key>().map(|k| k.code), Ok(KeyCode::Escape));
		assert_eq!("f5".parse::<Key>().map(|k| k.code), Ok(KeyCode::F(5)));
		assert_eq!(
			"meta+Enter".parse::<Key>(),
			Ok(Key::new(KeyCode::Enter, Modifiers::ALT))
		);
	}

	#[test]
	fn plain_characters_keep_their_case() {
		assert_eq!("A".parse::<Key>(), Ok(Key::char('A')));
		assert_eq!("a".parse::<Key>(), Ok(Key::char('a')));
	}

	#[test]
	fn plus_key_parses() {
		assert_eq!("+".parse::<Key>(), Ok(Key::char('+')));
		assert_eq!(
			"Ctrl++".parse::<Key>(),
			Ok(Key::new(KeyCode::Char('+'), Modifiers::CTRL))
		);
	}

	#[test]
	fn malformed_names_are_rejected() {
		assert!(matches!("".parse::<Key>(), Err(KeyParseError::MissingKey(_))));
		assert!(matches!("Ctrl+".parse::<Key>(), Err(KeyParseError::MissingKey(_))));
		assert!(matches!("Hyper+A".parse::<Key>(), Err(KeyParseError::UnknownModifier(_))));
		assert!(matches!("F13".parse::<Key>(), Err(KeyParseError::UnknownKey(_))));
	}

	#[test]
	fn display_is_canonical_for_parse() {
		for name in ["Ctrl+Q", "Alt+Shift+Left", "F12", "PageDown", "Space", "Ctrl+Alt+Delete"] {
			let key: Key = name.parse().expect("valid key name");
			assert_eq!(key.to_string(), name);
		}
	}

	#[test]
	fn alt_chords_survive_the_wire() {
		let key = Key::alt('X');
		assert_eq!(key, Key::new(KeyCode::Char('x'), Modifiers::ALT));
		let json = serde_json::to_string(&key).unwrap();
		assert_eq!(json, "\"Alt+X\"");
		assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), key);
	}

	#[test]
	fn alt_keys_are_meta() {
		assert!(Key::new(KeyCode::Char('x'), Modifiers::ALT).is_meta());
		assert!(!Key::ctrl('x').is_meta());
	}

	#[test]
	fn only_unmodified_chars_are_printable() {
		assert_eq!(Key::char('a').printable_char(), Some('a'));
		assert_eq!(Key::ctrl('a').printable_char(), None);
		assert_eq!(Key::new(KeyCode::Enter, Modifiers::NONE).printable_char(), None);
	}
}
