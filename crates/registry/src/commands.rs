//! Command definitions, aliases and the per-view command table.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use wisp_primitives::{Language, WindowId};

use crate::{CommandCategory, CommandEditorOps, CommandError, CommandResult, LocalizedText, Message};

/// Function signature for command handlers.
pub type CommandHandler = fn(&mut CommandContext<'_>) -> CommandResult;

/// A native command: metadata plus the handler that implements it.
#[derive(Clone, Copy)]
pub struct CommandDef {
	pub name: &'static str,
	pub category: CommandCategory,
	pub short_desc: LocalizedText,
	/// Shown to the user when the command is invoked with bad arguments.
	pub long_desc: LocalizedText,
	pub handler: CommandHandler,
}

impl fmt::Debug for CommandDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandDef")
			.field("name", &self.name)
			.field("category", &self.category)
			.finish_non_exhaustive()
	}
}

/// A command that forwards to another command by name.
///
/// The target is looked up on every invocation, so replacing the target
/// command changes what every existing alias does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAlias {
	pub name: String,
	pub target: String,
}

impl CommandAlias {
	pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			target: target.into(),
		}
	}
}

#[derive(Debug, Clone)]
pub enum Command {
	Native(CommandDef),
	Alias(CommandAlias),
}

impl Command {
	pub fn name(&self) -> &str {
		match self {
			Self::Native(def) => def.name,
			Self::Alias(alias) => &alias.name,
		}
	}

	/// Aliases report [`CommandCategory::Unknown`]; resolve the target for
	/// its category.
	pub fn category(&self) -> CommandCategory {
		match self {
			Self::Native(def) => def.category,
			Self::Alias(_) => CommandCategory::Unknown,
		}
	}

	pub fn short_desc(&self, language: Language) -> String {
		match self {
			Self::Native(def) => def.short_desc.get(language).to_string(),
			Self::Alias(alias) => Message::AliasFor { target: &alias.target }.render(language),
		}
	}

	pub fn long_desc(&self, language: Language) -> String {
		match self {
			Self::Native(def) => def.long_desc.get(language).to_string(),
			Self::Alias(alias) => Message::AliasFor { target: &alias.target }.render(language),
		}
	}
}

impl From<CommandDef> for Command {
	fn from(def: CommandDef) -> Self {
		Self::Native(def)
	}
}

impl From<&CommandDef> for Command {
	fn from(def: &CommandDef) -> Self {
		Self::Native(*def)
	}
}

impl From<CommandAlias> for Command {
	fn from(alias: CommandAlias) -> Self {
		Self::Alias(alias)
	}
}

/// Commands registered on one view, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Commands {
	by_name: HashMap<String, Arc<Command>>,
}

impl Commands {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts `command`, replacing any command of the same name.
	///
	/// Returns true if an existing command was overwritten. Registration
	/// always succeeds so that plugins can override built-ins.
	pub fn register(&mut self, command: impl Into<Command>) -> bool {
		let command = command.into();
		let name = command.name().to_string();
		let overwritten = self.by_name.insert(name.clone(), Arc::new(command)).is_some();
		if overwritten {
			tracing::debug!(command = %name, "command.overridden");
		}
		overwritten
	}

	pub fn get(&self, name: &str) -> Option<Arc<Command>> {
		self.by_name.get(name).cloned()
	}

	pub fn remove(&mut self, name: &str) -> Option<Arc<Command>> {
		self.by_name.remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.by_name.contains_key(name)
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

/// Context handed to a command handler.
pub struct CommandContext<'a> {
	pub editor: &'a mut dyn CommandEditorOps,
	/// Window the command was resolved from.
	pub window: WindowId,
	pub args: &'a [String],
	/// Definition of the running command.
	pub command: &'a CommandDef,
}

impl CommandContext<'_> {
	pub fn language(&self) -> Language {
		self.editor.language()
	}

	/// Fails with [`CommandError::InvalidArguments`] unless exactly `count`
	/// arguments were given.
	pub fn expect_args(&self, count: usize) -> CommandResult {
		if self.args.len() == count {
			Ok(())
		} else {
			Err(CommandError::InvalidArguments)
		}
	}

	/// Parses argument `index`, mapping a missing or malformed value to
	/// [`CommandError::InvalidArguments`].
	pub fn parse_arg<T: std::str::FromStr>(&self, index: usize) -> Result<T, CommandError> {
		self.args
			.get(index)
			.and_then(|arg| arg.parse().ok())
			.ok_or(CommandError::InvalidArguments)
	}

	/// Runs another command inline, resolved from this command's window.
	pub fn execute(&mut self, name: &str, args: &[String]) {
		crate::execute_command(&mut *self.editor, Some(self.window), name, args);
	}

	/// Runs another command inline, resolved from `window`.
	pub fn execute_at(&mut self, window: WindowId, name: &str, args: &[String]) {
		crate::execute_command(&mut *self.editor, Some(window), name, args);
	}

	pub fn alert(&mut self, message: impl Into<String>) {
		crate::alert(&mut *self.editor, self.window, message.into());
	}
}
