//! Localized strings and command categories.

use std::fmt;

use wisp_primitives::Language;

/// A string available in English and optionally French.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedText {
	pub en: &'static str,
	pub fr: Option<&'static str>,
}

impl LocalizedText {
	pub const fn en(text: &'static str) -> Self {
		Self { en: text, fr: None }
	}

	pub const fn fr(self, text: &'static str) -> Self {
		Self {
			en: self.en,
			fr: Some(text),
		}
	}

	/// Returns the text for `language`, falling back to English.
	pub fn get(&self, language: Language) -> &'static str {
		match language {
			Language::En => self.en,
			Language::Fr => self.fr.unwrap_or(self.en),
		}
	}
}

/// Grouping used when listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CommandCategory {
	#[default]
	Unknown,
	/// Window management.
	Window,
	/// Commands that manage other commands, such as `alias` and `keybind`.
	Commands,
	/// Diagnostics.
	Debug,
}

impl CommandCategory {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "unknown",
			Self::Window => "window",
			Self::Commands => "commands",
			Self::Debug => "debug",
		}
	}
}

impl fmt::Display for CommandCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// User-facing messages produced by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message<'a> {
	CommandNotFound { name: &'a str },
	AliasNotFound { alias: &'a str, target: &'a str },
	AliasFor { target: &'a str },
	DispatchTooDeep { name: &'a str },
	ViewDirty { title: &'a str },
	ViewDisabled { title: &'a str },
}

impl Message<'_> {
	pub fn render(&self, language: Language) -> String {
		match (*self, language) {
			(Self::CommandNotFound { name }, Language::En) => format!("Command \"{name}\" is not registered"),
			(Self::CommandNotFound { name }, Language::Fr) => format!("La commande \"{name}\" n'est pas enregistrée"),
			(Self::AliasNotFound { alias, target }, Language::En) => {
				format!("\"{alias}\" is an alias to command \"{target}\" but this command is not registered")
			}
			(Self::AliasNotFound { alias, target }, Language::Fr) => {
				format!("\"{alias}\" est un alias vers la commande \"{target}\" mais cette commande n'est pas enregistrée")
			}
			(Self::AliasFor { target }, Language::En) => format!("Alias for \"{target}\""),
			(Self::AliasFor { target }, Language::Fr) => format!("Alias pour \"{target}\""),
			(Self::DispatchTooDeep { name }, Language::En) => format!("Command \"{name}\" nests too deeply"),
			(Self::DispatchTooDeep { name }, Language::Fr) => format!("La commande \"{name}\" s'imbrique trop profondément"),
			(Self::ViewDirty { title }, Language::En) => format!("View \"{title}\" is not saved"),
			(Self::ViewDirty { title }, Language::Fr) => format!("La vue \"{title}\" n'est pas sauvegardée"),
			(Self::ViewDisabled { title }, Language::En) => format!("View \"{title}\" cannot be activated"),
			(Self::ViewDisabled { title }, Language::Fr) => format!("La vue \"{title}\" ne peut pas être activée"),
		}
	}
}
