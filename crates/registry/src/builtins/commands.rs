//! Commands that manage other commands and editor-wide state.

use wisp_primitives::{Docking, Key, KeyboardMode, Language, WindowId};

use crate::{CommandAlias, CommandContext, CommandDef, CommandError, CommandResult, LocalizedText};

command!(
	ALIAS,
	"alias",
	Commands,
	cmd_alias,
	short: LocalizedText::en("Binds an alias to another command").fr("Lie un alias à une autre commande"),
	long: LocalizedText::en(
		"Usage: alias <window|global> <alias> <name>\nBinds an alias to another command. The alias can either be local to the window or global."
	),
);

command!(
	KEYBIND,
	"keybind",
	Commands,
	cmd_keybind,
	short: LocalizedText::en("Binds a keyboard mapping to a command").fr("Lie une touche à une commande"),
	long: LocalizedText::en(
		"Usage: keybind <window|global> <command|edit|all> <key> <command>\nBinds a keyboard mapping to a command. The binding can be to the active view for view-specific key binding or to the root view for global key bindings."
	),
);

command!(
	SHOW_COMMAND_WINDOW,
	"show_command_window",
	Commands,
	cmd_show_command_window,
	short: LocalizedText::en("Shows the interactive command window"),
	long: LocalizedText::en(
		"Usage: show_command_window\nThis command exists so it can be bound to a key to pop up the interactive command window."
	),
);

command!(
	KEYBOARD_MODE,
	"keyboard_mode",
	Commands,
	cmd_keyboard_mode,
	short: LocalizedText::en("Changes the keyboard mode").fr("Change le mode du clavier"),
	long: LocalizedText::en("Usage: keyboard_mode <command|edit>\nSwitches between command and edit mode."),
);

command!(
	LANGUAGE,
	"language",
	Commands,
	cmd_language,
	short: LocalizedText::en("Changes the interface language").fr("Change la langue de l'interface"),
	long: LocalizedText::en("Usage: language <en|fr>\nChanges the language used for messages and descriptions.")
		.fr("Usage: language <en|fr>\nChange la langue des messages et des descriptions."),
);

pub(super) static DEFS: &[&CommandDef] = &[&ALIAS, &KEYBIND, &SHOW_COMMAND_WINDOW, &KEYBOARD_MODE, &LANGUAGE];

/// Maps the `window|global` scope argument to the window to register on.
fn scope(ctx: &CommandContext<'_>, arg: &str) -> Result<WindowId, CommandError> {
	match arg {
		"window" => Ok(ctx.window),
		"global" => Ok(ctx.editor.root_window()),
		_ => Err(CommandError::InvalidArguments),
	}
}

fn unknown_window(window: WindowId) -> CommandError {
	CommandError::Failed(format!("window {window} does not exist"))
}

fn cmd_alias(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(3)?;
	let window = scope(ctx, &ctx.args[0])?;
	let alias = CommandAlias::new(ctx.args[1].as_str(), ctx.args[2].as_str());
	ctx.editor
		.commands_mut(window)
		.ok_or_else(|| unknown_window(window))?
		.register(alias);
	Ok(())
}

fn cmd_keybind(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(4)?;
	let window = scope(ctx, &ctx.args[0])?;
	let mode: KeyboardMode = ctx.parse_arg(1)?;
	let key: Key = ctx.parse_arg(2)?;
	let command = ctx.args[3].clone();
	ctx.editor
		.key_bindings_mut(window)
		.ok_or_else(|| unknown_window(window))?
		.set(mode, key, command);
	Ok(())
}

fn cmd_show_command_window(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(0)?;
	let window = ctx.editor.new_child_window(ctx.window, Docking::Floating, "command", &[])?;
	ctx.editor.activate_window(window)
}

fn cmd_keyboard_mode(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(1)?;
	let mode: KeyboardMode = ctx.parse_arg(0)?;
	if mode == KeyboardMode::All {
		return Err(CommandError::InvalidArguments);
	}
	ctx.editor.set_keyboard_mode(mode);
	Ok(())
}

fn cmd_language(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(1)?;
	let language: Language = ctx.parse_arg(0)?;
	ctx.editor.set_language(language);
	Ok(())
}
