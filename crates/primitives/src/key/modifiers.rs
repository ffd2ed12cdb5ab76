//! Key modifier flags (Ctrl, Alt, Shift).

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	pub ctrl: bool,
	/// Alt doubles as the terminal meta key.
	pub alt: bool,
	pub shift: bool,
}

impl Modifiers {
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	pub const CTRL: Self = Self {
		ctrl: true,
		alt: false,
		shift: false,
	};

	pub const ALT: Self = Self {
		ctrl: false,
		alt: true,
		shift: false,
	};

	pub const SHIFT: Self = Self {
		ctrl: false,
		alt: false,
		shift: true,
	};

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift
	}

	/// Applies a modifier token from a key name (`ctrl`, `control`, `alt`,
	/// `meta`, `shift`; case-insensitive). Returns `None` for anything else.
	pub(crate) fn with_token(self, token: &str) -> Option<Self> {
		match token.to_ascii_lowercase().as_str() {
			"ctrl" | "control" => Some(self.ctrl()),
			"alt" | "meta" => Some(self.alt()),
			"shift" => Some(self.shift()),
			_ => None,
		}
	}

	/// Writes the canonical `Ctrl+Alt+Shift+` prefix.
	pub(crate) fn write_prefix(self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.ctrl {
			f.write_str("Ctrl+")?;
		}
		if self.alt {
			f.write_str("Alt+")?;
		}
		if self.shift {
			f.write_str("Shift+")?;
		}
		Ok(())
	}
}
