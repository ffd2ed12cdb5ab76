//! Per-view key binding tables.

use rustc_hash::FxHashMap as HashMap;
use wisp_primitives::{Key, KeyboardMode};

/// Maps `(mode, key)` to a command name.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
	by_mode: HashMap<KeyboardMode, HashMap<Key, String>>,
}

impl KeyBindings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `key` in `mode` to `command`; an empty command name removes the
	/// binding. Returns true if an existing binding was replaced or removed.
	pub fn set(&mut self, mode: KeyboardMode, key: Key, command: impl Into<String>) -> bool {
		let command = command.into();
		if command.is_empty() {
			return self.remove(mode, &key).is_some();
		}
		tracing::trace!(%mode, %key, %command, "keybind.set");
		self.by_mode.entry(mode).or_default().insert(key, command).is_some()
	}

	pub fn remove(&mut self, mode: KeyboardMode, key: &Key) -> Option<String> {
		self.by_mode.get_mut(&mode)?.remove(key)
	}

	/// Looks up `key` in exactly `mode`; no fallback to `All`.
	pub fn get(&self, mode: KeyboardMode, key: &Key) -> Option<&str> {
		self.by_mode.get(&mode)?.get(key).map(String::as_str)
	}

	/// Looks up `key` in `mode`, then in the `All` table.
	pub fn resolve(&self, mode: KeyboardMode, key: &Key) -> Option<&str> {
		self.get(mode, key).or_else(|| match mode {
			KeyboardMode::All => None,
			_ => self.get(KeyboardMode::All, key),
		})
	}

	pub fn len(&self) -> usize {
		self.by_mode.values().map(HashMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests {
	use wisp_primitives::Modifiers;

	use super::*;

	#[test]
	fn all_mode_applies_to_every_mode() {
		let mut keys = KeyBindings::new();
		keys.set(KeyboardMode::All, Key::ctrl('s'), "save");
		assert_eq!(keys.resolve(KeyboardMode::Command, &Key::ctrl('s')), Some("save"));
		assert_eq!(keys.resolve(KeyboardMode::Edit, &Key::ctrl('s')), Some("save"));
		assert_eq!(keys.get(KeyboardMode::Edit, &Key::ctrl('s')), None);
	}

	#[test]
	fn mode_binding_wins_over_all() {
		let mut keys = KeyBindings::new();
		keys.set(KeyboardMode::All, Key::char('x'), "cut");
		keys.set(KeyboardMode::Command, Key::char('x'), "delete");
		assert_eq!(keys.resolve(KeyboardMode::Command, &Key::char('x')), Some("delete"));
		assert_eq!(keys.resolve(KeyboardMode::Edit, &Key::char('x')), Some("cut"));
	}

	#[test]
	fn empty_command_removes_binding() {
		let mut keys = KeyBindings::new();
		let key = Key::new(wisp_primitives::KeyCode::F(1), Modifiers::NONE);
		assert!(!keys.set(KeyboardMode::Edit, key, "help"));
		assert!(keys.set(KeyboardMode::Edit, key, "doc"));
		assert!(keys.set(KeyboardMode::Edit, key, ""));
		assert!(keys.is_empty());
		assert!(!keys.set(KeyboardMode::Edit, key, ""));
	}
}
