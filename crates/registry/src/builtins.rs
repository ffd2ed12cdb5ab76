//! Commands registered on the root view at start-up.

use crate::{CommandAlias, CommandDef, Commands};

macro_rules! command {
	($static:ident, $name:literal, $category:ident, $handler:path, short: $short:expr, long: $long:expr $(,)?) => {
		pub static $static: $crate::CommandDef = $crate::CommandDef {
			name: $name,
			category: $crate::CommandCategory::$category,
			short_desc: $short,
			long_desc: $long,
			handler: $handler,
		};
	};
}

mod commands;
mod debug;
mod window;

pub use commands::{ALIAS, KEYBIND, KEYBOARD_MODE, LANGUAGE, SHOW_COMMAND_WINDOW};
pub use debug::LOG_WINDOW_TREE;
pub use window::{
	ADD_STATUS_BAR, ALERT, DOC, EDITOR_BOOTSTRAP_UI, HELP, NEW, OPEN, QUIT, SHELL, WINDOW_ACTIVATE, WINDOW_CLOSE,
	WINDOW_NEW,
};

/// Every native built-in.
pub fn defs() -> impl Iterator<Item = &'static CommandDef> {
	window::DEFS
		.iter()
		.chain(commands::DEFS)
		.chain(debug::DEFS)
		.copied()
}

/// Registers the built-ins plus the `q` alias for `quit`.
pub fn register_builtins(commands: &mut Commands) {
	for def in defs() {
		commands.register(def);
	}
	commands.register(CommandAlias::new("q", "quit"));
}
