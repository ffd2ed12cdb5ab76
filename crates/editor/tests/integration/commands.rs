use pretty_assertions::assert_eq;
use wisp_editor::TerminalEvent;
use wisp_events::EnqueuedCommand;
use wisp_primitives::{Docking, Key, KeyCode, Modifiers};
use wisp_registry::CommandEditorOps;

use crate::common::{Settled, scheduler, settle};

fn cmd(line: &str) -> EnqueuedCommand {
	EnqueuedCommand::parse_line(line).unwrap()
}

#[tokio::test(start_paused = true)]
async fn alias_forwards_to_quit() {
	let (mut scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("alias window foo quit")).await);
	assert_eq!(settle(&mut scheduler).await, Settled::Idle);

	assert!(handles.commands.post(cmd("foo")).await);
	assert_eq!(settle(&mut scheduler).await, Settled::Quit);
}

#[tokio::test(start_paused = true)]
async fn alias_reports_dirty_views_like_quit() {
	let (mut scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("open draft.md")).await);
	settle(&mut scheduler).await;
	let doc = scheduler.editor().active_window();
	scheduler
		.editor_mut()
		.tree_mut()
		.view_mut(doc)
		.unwrap()
		.set_dirty(true);

	assert!(handles.commands.post(cmd("alias global foo quit")).await);
	assert!(handles.commands.post(cmd("foo")).await);
	assert_eq!(settle(&mut scheduler).await, Settled::Idle);
	assert!(!scheduler.editor().is_quitting());
}

#[tokio::test(start_paused = true)]
async fn ctrl_q_binding_quits_in_command_mode() {
	let (mut scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("keybind global command Ctrl+Q quit")).await);
	assert!(handles.commands.post(cmd("keyboard_mode command")).await);
	handles
		.terminal
		.send(TerminalEvent::Key(Key::ctrl('q')))
		.await
		.unwrap();

	assert_eq!(settle(&mut scheduler).await, Settled::Quit);
}

#[tokio::test(start_paused = true)]
async fn typed_command_line_runs_on_enter() {
	let (mut scheduler, handles) = scheduler();
	for ch in "new".chars() {
		handles.terminal.send(TerminalEvent::Key(Key::char(ch))).await.unwrap();
	}
	handles
		.terminal
		.send(TerminalEvent::Key(Key::new(KeyCode::Enter, Modifiers::NONE)))
		.await
		.unwrap();
	settle(&mut scheduler).await;

	let editor = scheduler.editor();
	let root = editor.root_window();
	assert!(editor.tree().child_at(root, Docking::Fill).is_some());
	assert_eq!(editor.key_buffer(), "");
}

#[tokio::test(start_paused = true)]
async fn status_bar_shows_active_window_and_mode() {
	let (mut scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("editor_bootstrap_ui")).await);
	assert!(handles.commands.post(cmd("open notes.txt")).await);
	settle(&mut scheduler).await;

	let screen = scheduler.terminal().screen();
	let status = &screen[23];
	assert!(status.starts_with("notes.txt"), "{status:?}");
	assert!(status[15..].starts_with("edit"), "{status:?}");
	assert!(screen[0].starts_with("notes.txt"), "{:?}", screen[0]);
}

#[tokio::test(start_paused = true)]
async fn unknown_command_alerts() {
	let (mut scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("frobnicate")).await);
	settle(&mut scheduler).await;

	let screen = scheduler.terminal().screen();
	assert!(
		screen.iter().any(|row| row.contains("Alert: Command \"frobnicate\" is not registered")),
		"{screen:#?}"
	);
}

#[tokio::test(start_paused = true)]
async fn wrong_argument_count_alerts_long_description() {
	let (mut scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("window_close")).await);
	settle(&mut scheduler).await;

	let tree = scheduler.editor().tree();
	let alert = tree
		.children(tree.root())
		.iter()
		.filter_map(|id| tree.view(*id))
		.map(|view| view.title())
		.next()
		.unwrap();
	assert!(alert.starts_with("Alert: Usage: window_close <id>"), "{alert}");
}
