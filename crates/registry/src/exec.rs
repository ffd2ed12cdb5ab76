//! Command resolution and dispatch.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use wisp_primitives::{Key, KeyboardMode, WindowId};

use crate::{ALERT, Command, CommandDef, CommandContext, CommandEditorOps, CommandError, Message};

/// Upper bound on alias hops and error reports chained by one dispatch.
pub const MAX_DISPATCH_DEPTH: usize = 16;

/// Finds `name` starting at `window` (the active window if `None`) and
/// walking up to the root.
pub fn get_command(editor: &dyn CommandEditorOps, window: Option<WindowId>, name: &str) -> Option<Arc<Command>> {
	let mut current = Some(window.unwrap_or_else(|| editor.active_window()));
	while let Some(id) = current {
		if let Some(command) = editor.commands(id).and_then(|commands| commands.get(name)) {
			return Some(command);
		}
		current = editor.parent(id);
	}
	None
}

/// Finds the command bound to `key`, starting at `window` (the active window
/// if `None`) and walking up to the root. Each view's `mode` table is checked
/// before its `All` table.
pub fn get_key_binding_command(
	editor: &dyn CommandEditorOps,
	window: Option<WindowId>,
	mode: KeyboardMode,
	key: &Key,
) -> Option<String> {
	let mut current = Some(window.unwrap_or_else(|| editor.active_window()));
	while let Some(id) = current {
		if let Some(command) = editor.key_bindings(id).and_then(|keys| keys.resolve(mode, key)) {
			return Some(command.to_string());
		}
		current = editor.parent(id);
	}
	None
}

/// Resolves and runs `name` with `args`.
///
/// Never fails: a missing command, bad arguments or a handler error becomes
/// an `alert`, and a panicking handler is logged.
pub fn execute_command(editor: &mut dyn CommandEditorOps, window: Option<WindowId>, name: &str, args: &[String]) {
	let window = window.unwrap_or_else(|| editor.active_window());
	dispatch(editor, window, name, args, 0);
}

/// Shows `message` through the `alert` command resolved from `window`.
pub fn alert(editor: &mut dyn CommandEditorOps, window: WindowId, message: String) {
	dispatch(editor, window, ALERT, &[message], 0);
}

fn dispatch(editor: &mut dyn CommandEditorOps, window: WindowId, name: &str, args: &[String], depth: usize) {
	if depth > MAX_DISPATCH_DEPTH {
		tracing::error!(command = name, depth, "command.depth_exceeded");
		let message = Message::DispatchTooDeep { name }.render(editor.language());
		// `alert` itself may be part of the chain, so bypass resolution.
		run_native(editor, window, &crate::builtins::ALERT, &[message]);
		return;
	}

	let Some(command) = get_command(&*editor, Some(window), name) else {
		tracing::debug!(command = name, "command.not_found");
		report(editor, window, name, CommandError::NotFound(name.to_string()), depth);
		return;
	};

	match &*command {
		Command::Native(def) => {
			tracing::debug!(command = name, %window, args = args.len(), "command.execute");
			let mut ctx = CommandContext {
				editor: &mut *editor,
				window,
				args,
				command: def,
			};
			match catch_unwind(AssertUnwindSafe(|| (def.handler)(&mut ctx))) {
				Ok(Ok(())) => {}
				Ok(Err(error)) => {
					tracing::debug!(command = name, %error, "command.failed");
					report(editor, window, name, error, depth);
				}
				Err(_) => tracing::error!(command = name, "command.panicked"),
			}
		}
		Command::Alias(alias) => {
			// Resolve the target now, not when the alias was bound.
			if get_command(&*editor, Some(window), &alias.target).is_none() {
				let message = Message::AliasNotFound {
					alias: &alias.name,
					target: &alias.target,
				}
				.render(editor.language());
				dispatch(editor, window, ALERT, &[message], depth + 1);
				return;
			}
			tracing::trace!(alias = %alias.name, target = %alias.target, "command.alias");
			dispatch(editor, window, &alias.target, args, depth + 1);
		}
	}
}

fn run_native(editor: &mut dyn CommandEditorOps, window: WindowId, def: &CommandDef, args: &[String]) {
	let mut ctx = CommandContext {
		editor,
		window,
		args,
		command: def,
	};
	match catch_unwind(AssertUnwindSafe(|| (def.handler)(&mut ctx))) {
		Ok(Ok(())) => {}
		Ok(Err(error)) => tracing::error!(command = def.name, %error, "command.failed"),
		Err(_) => tracing::error!(command = def.name, "command.panicked"),
	}
}

fn report(editor: &mut dyn CommandEditorOps, window: WindowId, name: &str, error: CommandError, depth: usize) {
	if name == ALERT {
		// Reporting through `alert` again would recurse.
		tracing::error!(%error, "command.alert_failed");
		return;
	}
	let language = editor.language();
	let message = match error {
		CommandError::NotFound(missing) => Message::CommandNotFound { name: &missing }.render(language),
		CommandError::InvalidArguments => match get_command(&*editor, Some(window), name) {
			Some(command) => command.long_desc(language),
			None => CommandError::InvalidArguments.to_string(),
		},
		CommandError::Failed(message) => message,
	};
	dispatch(editor, window, ALERT, &[message], depth + 1);
}

#[cfg(test)]
mod tests;
