use pretty_assertions::assert_eq;
use wisp_events::EnqueuedCommand;
use wisp_primitives::{Key, KeyboardMode};

use super::*;
use crate::testing::{FakeEditor, ROOT};
use crate::{CommandAlias, CommandCategory, CommandDef, CommandResult, LocalizedText};

fn args(list: &[&str]) -> Vec<String> {
	list.iter().map(|s| s.to_string()).collect()
}

fn record(ctx: &mut CommandContext<'_>, marker: &str) -> CommandResult {
	let mut line = vec![marker.to_string()];
	line.extend(ctx.args.iter().cloned());
	ctx.editor.post_command(EnqueuedCommand::new("ran", line));
	Ok(())
}

fn def(name: &'static str, handler: crate::CommandHandler) -> CommandDef {
	CommandDef {
		name,
		category: CommandCategory::Debug,
		short_desc: LocalizedText::en("test command"),
		long_desc: LocalizedText::en("Usage: test command"),
		handler,
	}
}

fn ran(editor: &FakeEditor) -> Vec<Vec<String>> {
	editor
		.posted
		.iter()
		.filter(|c| c.name == "ran")
		.map(|c| c.args.clone())
		.collect()
}

#[test]
fn root_command_is_reachable_from_descendants() {
	let mut editor = FakeEditor::new();
	let child = editor.add_window(ROOT);
	let grandchild = editor.add_window(child);
	editor
		.commands_mut(ROOT)
		.expect("root")
		.register(def("greet", |ctx| record(ctx, "root")));

	execute_command(&mut editor, Some(grandchild), "greet", &[]);
	assert_eq!(ran(&editor), [args(&["root"])]);
}

#[test]
fn child_command_shadows_root_command() {
	let mut editor = FakeEditor::new();
	let child = editor.add_window(ROOT);
	editor
		.commands_mut(ROOT)
		.expect("root")
		.register(def("greet", |ctx| record(ctx, "root")));
	editor
		.commands_mut(child)
		.expect("child")
		.register(def("greet", |ctx| record(ctx, "child")));

	execute_command(&mut editor, Some(child), "greet", &[]);
	execute_command(&mut editor, Some(ROOT), "greet", &[]);
	assert_eq!(ran(&editor), [args(&["child"]), args(&["root"])]);
}

#[test]
fn missing_window_defaults_to_active_window() {
	let mut editor = FakeEditor::new();
	let child = editor.add_window(ROOT);
	editor.active = child;
	editor
		.commands_mut(child)
		.expect("child")
		.register(def("greet", |ctx| record(ctx, "active")));

	execute_command(&mut editor, None, "greet", &[]);
	assert_eq!(ran(&editor), [args(&["active"])]);
}

#[test]
fn alias_resolves_target_at_call_time() {
	let mut editor = FakeEditor::new();
	let commands = editor.commands_mut(ROOT).expect("root");
	commands.register(CommandAlias::new("a", "b"));
	commands.register(def("b", |ctx| record(ctx, "old")));
	assert!(commands.register(def("b", |ctx| record(ctx, "new"))));

	execute_command(&mut editor, Some(ROOT), "a", &args(&["x"]));
	assert_eq!(ran(&editor), [args(&["new", "x"])]);
}

#[test]
fn alias_to_missing_command_alerts_with_both_names() {
	let mut editor = FakeEditor::new();
	editor
		.commands_mut(ROOT)
		.expect("root")
		.register(CommandAlias::new("foo", "nowhere"));

	execute_command(&mut editor, Some(ROOT), "foo", &[]);
	let alerts = editor.alerts();
	assert_eq!(alerts.len(), 1);
	assert!(alerts[0].contains("foo") && alerts[0].contains("nowhere"), "{}", alerts[0]);
}

#[test]
fn unknown_command_alerts_not_found() {
	let mut editor = FakeEditor::new();
	execute_command(&mut editor, None, "frobnicate", &[]);
	assert_eq!(editor.alerts(), ["Command \"frobnicate\" is not registered"]);
}

#[test]
fn invalid_arguments_alert_long_description() {
	let mut editor = FakeEditor::new();
	execute_command(&mut editor, None, "alias", &args(&["window"]));
	let alerts = editor.alerts();
	assert_eq!(alerts.len(), 1);
	assert!(alerts[0].starts_with("Usage: alias"), "{}", alerts[0]);
}

#[test]
fn missing_alert_command_does_not_recurse() {
	let mut editor = FakeEditor::bare();
	execute_command(&mut editor, None, "anything", &[]);
	assert!(editor.created.is_empty());
}

#[test]
fn alert_aliased_to_missing_target_terminates() {
	let mut editor = FakeEditor::bare();
	editor
		.commands_mut(ROOT)
		.expect("root")
		.register(CommandAlias::new("alert", "gone"));
	execute_command(&mut editor, None, "anything", &[]);
	assert_eq!(editor.alerts(), ["Command \"alert\" nests too deeply"]);
}

#[test]
fn alias_cycle_terminates() {
	let mut editor = FakeEditor::new();
	let commands = editor.commands_mut(ROOT).expect("root");
	commands.register(CommandAlias::new("ping", "pong"));
	commands.register(CommandAlias::new("pong", "ping"));

	execute_command(&mut editor, None, "ping", &[]);
	assert!(!editor.quit);
	assert_eq!(editor.alerts(), ["Command \"pong\" nests too deeply"]);
}

#[test]
fn alert_alias_cycle_still_alerts() {
	let mut editor = FakeEditor::new();
	let commands = editor.commands_mut(ROOT).expect("root");
	commands.register(CommandAlias::new(ALERT, "shout"));
	commands.register(CommandAlias::new("shout", ALERT));

	execute_command(&mut editor, None, "missing", &[]);
	assert_eq!(editor.alerts().len(), 1);
}

#[test]
fn panicking_handler_is_contained() {
	let mut editor = FakeEditor::new();
	editor
		.commands_mut(ROOT)
		.expect("root")
		.register(def("boom", |_| panic!("handler failure")));

	execute_command(&mut editor, None, "boom", &[]);
	execute_command(&mut editor, None, "quit", &[]);
	assert!(editor.quit);
}

#[test]
fn key_binding_walks_ancestors_and_checks_all_mode() {
	let mut editor = FakeEditor::new();
	let child = editor.add_window(ROOT);
	editor
		.key_bindings_mut(ROOT)
		.expect("root")
		.set(KeyboardMode::All, Key::ctrl('q'), "quit");
	editor
		.key_bindings_mut(child)
		.expect("child")
		.set(KeyboardMode::Command, Key::char('x'), "cut");

	assert_eq!(
		get_key_binding_command(&editor, Some(child), KeyboardMode::Command, &Key::ctrl('q')).as_deref(),
		Some("quit")
	);
	assert_eq!(
		get_key_binding_command(&editor, Some(child), KeyboardMode::Command, &Key::char('x')).as_deref(),
		Some("cut")
	);
	assert_eq!(
		get_key_binding_command(&editor, Some(child), KeyboardMode::Edit, &Key::char('x')),
		None
	);
	assert_eq!(
		get_key_binding_command(&editor, Some(ROOT), KeyboardMode::Command, &Key::char('x')),
		None
	);
}

#[test]
fn lookup_stops_at_the_root() {
	let editor = FakeEditor::bare();
	assert!(get_command(&editor, Some(ROOT), "quit").is_none());
	assert!(get_command(&editor, Some(wisp_primitives::WindowId(404)), "quit").is_none());
}
