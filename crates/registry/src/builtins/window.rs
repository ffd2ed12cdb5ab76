//! Window management commands and the document entry points.

use std::collections::BTreeSet;

use wisp_events::EnqueuedCommand;
use wisp_primitives::{Docking, WindowId};

use crate::{CommandContext, CommandDef, CommandResult, LocalizedText, Message, get_command};

command!(
	ALERT,
	"alert",
	Window,
	cmd_alert,
	short: LocalizedText::en("Shows a modal message").fr("Affiche un message"),
	long: LocalizedText::en("Usage: alert <message>\nPrints a message in an infobar that dismisses itself.")
		.fr("Usage: alert <message>\nAffiche un message dans une barre qui disparaît d'elle-même."),
);

command!(
	ADD_STATUS_BAR,
	"add_status_bar",
	Window,
	cmd_add_status_bar,
	short: LocalizedText::en("Adds the standard status bar").fr("Ajoute la barre d'état standard"),
	long: LocalizedText::en(
		"Usage: add_status_bar\nAdds the standard status bar to the active window. This command exists so it can be overridden by a plugin, so it can create its own status bar."
	),
);

command!(
	EDITOR_BOOTSTRAP_UI,
	"editor_bootstrap_ui",
	Window,
	cmd_editor_bootstrap_ui,
	short: LocalizedText::en("Bootstraps the editor's UI"),
	long: LocalizedText::en(
		"Usage: editor_bootstrap_ui\nBootstraps the editor's UI by adding the status bar to the root window. This command is run once at start-up."
	),
);

command!(
	HELP,
	"help",
	Window,
	cmd_help,
	short: LocalizedText::en("Prints help").fr("Affiche l'aide"),
	long: LocalizedText::en("Usage: help [command]\nPrints general help or help for a particular command."),
);

command!(
	NEW,
	"new",
	Window,
	cmd_new,
	short: LocalizedText::en("Creates a new buffer").fr("Crée un nouveau tampon"),
	long: LocalizedText::en("Usage: new\nCreates a new empty buffer in the active window."),
);

command!(
	OPEN,
	"open",
	Window,
	cmd_open,
	short: LocalizedText::en("Opens a file in a new buffer").fr("Ouvre un fichier dans un nouveau tampon"),
	long: LocalizedText::en("Usage: open <path>\nOpens a file in a new buffer."),
);

command!(
	QUIT,
	"quit",
	Window,
	cmd_quit,
	short: LocalizedText::en("Quits").fr("Quitte"),
	long: LocalizedText::en("Usage: quit\nQuits the editor once every view is saved."),
);

command!(
	SHELL,
	"shell",
	Window,
	cmd_shell,
	short: LocalizedText::en("Opens a shell process"),
	long: LocalizedText::en("Usage: shell [args...]\nOpens a shell process in a new buffer."),
);

command!(
	DOC,
	"doc",
	Window,
	cmd_doc,
	short: LocalizedText::en("Searches documentation"),
	long: LocalizedText::en(
		"Usage: doc [symbol...]\nUses the 'doc' tool to get documentation about the given symbol."
	),
);

command!(
	WINDOW_NEW,
	"window_new",
	Window,
	cmd_window_new,
	short: LocalizedText::en("Creates a child window"),
	long: LocalizedText::en(
		"Usage: window_new <parent-id> <fill|floating|left|right|top|bottom> <view> [args...]\nCreates a window docked in its parent, hosting a view built by the named view factory."
	),
);

command!(
	WINDOW_CLOSE,
	"window_close",
	Window,
	cmd_window_close,
	short: LocalizedText::en("Closes a window").fr("Ferme une fenêtre"),
	long: LocalizedText::en("Usage: window_close <id>\nCloses a window and every window docked in it."),
);

command!(
	WINDOW_ACTIVATE,
	"window_activate",
	Window,
	cmd_window_activate,
	short: LocalizedText::en("Activates a window").fr("Active une fenêtre"),
	long: LocalizedText::en("Usage: window_activate <id>\nGives the keyboard focus to a window."),
);

pub(super) static DEFS: &[&CommandDef] = &[
	&ALERT,
	&ADD_STATUS_BAR,
	&EDITOR_BOOTSTRAP_UI,
	&HELP,
	&NEW,
	&OPEN,
	&QUIT,
	&SHELL,
	&DOC,
	&WINDOW_NEW,
	&WINDOW_CLOSE,
	&WINDOW_ACTIVATE,
];

fn cmd_alert(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(1)?;
	tracing::info!(message = %ctx.args[0], "alert.shown");
	let root = ctx.editor.root_window();
	ctx.editor.new_child_window(root, Docking::Floating, "infobar_alert", ctx.args)?;
	ctx.editor.post_draw();
	Ok(())
}

fn cmd_add_status_bar(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(0)?;
	ctx.editor.new_child_window(ctx.window, Docking::Bottom, "status_root", &[])?;
	Ok(())
}

fn cmd_editor_bootstrap_ui(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(0)?;
	let root = ctx.editor.root_window();
	ctx.execute_at(root, "add_status_bar", &[]);
	Ok(())
}

fn cmd_help(ctx: &mut CommandContext<'_>) -> CommandResult {
	let language = ctx.language();
	let text = match ctx.args {
		[] => {
			let mut names = BTreeSet::new();
			let mut current = Some(ctx.window);
			while let Some(window) = current {
				if let Some(commands) = ctx.editor.commands(window) {
					names.extend(commands.names().into_iter().map(str::to_string));
				}
				current = ctx.editor.parent(window);
			}
			names.into_iter().collect::<Vec<_>>().join(" ")
		}
		[name] => match get_command(&*ctx.editor, Some(ctx.window), name) {
			Some(command) => format!("{name}: {}", command.long_desc(language)),
			None => Message::CommandNotFound { name }.render(language),
		},
		_ => return Err(crate::CommandError::InvalidArguments),
	};
	ctx.alert(text);
	Ok(())
}

fn open_document(ctx: &mut CommandContext<'_>, args: &[String]) -> CommandResult {
	let window = ctx.editor.new_child_window(ctx.window, Docking::Fill, "document", args)?;
	ctx.editor.activate_window(window)
}

fn cmd_new(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(0)?;
	open_document(ctx, &[])
}

fn cmd_open(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(1)?;
	tracing::info!(path = %ctx.args[0], "document.open");
	let args = ctx.args;
	open_document(ctx, args)
}

fn cmd_quit(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(0)?;
	let root = ctx.editor.root_window();
	if let Some(title) = ctx.editor.first_dirty_view(root) {
		let message = Message::ViewDirty { title: &title }.render(ctx.language());
		ctx.alert(message);
		return Ok(());
	}
	ctx.editor.request_quit();
	// Wakes the loop so it reaches the branch that checks the quit flag.
	ctx.editor.post_draw();
	Ok(())
}

fn cmd_shell(ctx: &mut CommandContext<'_>) -> CommandResult {
	// No shell view yet; the request is only logged.
	tracing::info!(args = ?ctx.args, "shell.requested");
	Ok(())
}

fn cmd_doc(ctx: &mut CommandContext<'_>) -> CommandResult {
	let args = std::iter::once("doc".to_string()).chain(ctx.args.iter().cloned());
	ctx.editor.post_command(EnqueuedCommand::new("shell", args));
	Ok(())
}

fn cmd_window_new(ctx: &mut CommandContext<'_>) -> CommandResult {
	if ctx.args.len() < 3 {
		return Err(crate::CommandError::InvalidArguments);
	}
	let parent: WindowId = ctx.parse_arg(0)?;
	let docking: Docking = ctx.parse_arg(1)?;
	let args = ctx.args;
	ctx.editor.new_child_window(parent, docking, &args[2], &args[3..])?;
	Ok(())
}

fn cmd_window_close(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(1)?;
	let window: WindowId = ctx.parse_arg(0)?;
	ctx.editor.close_window(window)?;
	ctx.editor.post_draw();
	Ok(())
}

fn cmd_window_activate(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(1)?;
	let window: WindowId = ctx.parse_arg(0)?;
	ctx.editor.activate_window(window)
}
