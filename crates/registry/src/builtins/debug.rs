use crate::{CommandContext, CommandDef, CommandResult, LocalizedText};

command!(
	LOG_WINDOW_TREE,
	"log_window_tree",
	Debug,
	cmd_log_window_tree,
	short: LocalizedText::en("Logs the window tree").fr("Journalise l'arbre des fenêtres"),
	long: LocalizedText::en(
		"Usage: log_window_tree\nLogs the window tree in the log file; only useful with --verbose."
	)
	.fr("Usage: log_window_tree\nJournalise l'arbre des fenêtres ; utile seulement avec --verbose."),
);

pub(super) static DEFS: &[&CommandDef] = &[&LOG_WINDOW_TREE];

fn cmd_log_window_tree(ctx: &mut CommandContext<'_>) -> CommandResult {
	ctx.expect_args(0)?;
	let root = ctx.editor.root_window();
	let tree = ctx.editor.window_tree(root);
	tracing::info!("window.tree\n{tree}");
	Ok(())
}
