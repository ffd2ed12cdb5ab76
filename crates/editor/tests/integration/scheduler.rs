use std::time::Duration;

use tokio::time::Instant;
use wisp_editor::{EditorConfig, Step, TerminalEvent};
use wisp_events::EnqueuedCommand;
use wisp_primitives::{KeyboardMode, Rect};
use wisp_registry::CommandEditorOps;

use crate::common::{Settled, scheduler, scheduler_with, settle};

fn cmd(line: &str) -> EnqueuedCommand {
	EnqueuedCommand::parse_line(line).unwrap()
}

#[tokio::test(start_paused = true)]
async fn start_up_draws_one_frame() {
	let (mut scheduler, _handles) = scheduler();
	assert_eq!(settle(&mut scheduler).await, Settled::Idle);
	assert_eq!(scheduler.draw_count(), 1);
	assert_eq!(scheduler.screen(), Rect::new(0, 0, 80, 24));
}

#[tokio::test(start_paused = true)]
async fn draw_signals_within_the_window_coalesce() {
	let (mut scheduler, _handles) = scheduler();
	settle(&mut scheduler).await;
	let before = scheduler.draw_count();

	for _ in 0..25 {
		scheduler.editor_mut().post_draw();
	}
	assert_eq!(settle(&mut scheduler).await, Settled::Idle);
	assert_eq!(scheduler.draw_count(), before + 1);
	assert!(!scheduler.draw_pending());
}

#[tokio::test(start_paused = true)]
async fn later_signals_do_not_push_the_timer_back() {
	let (mut scheduler, _handles) = scheduler_with(EditorConfig {
		draw_debounce_ms: 5,
		..EditorConfig::default()
	});
	settle(&mut scheduler).await;
	let before = scheduler.draw_count();

	scheduler.editor_mut().post_draw();
	let armed = Instant::now();
	assert_eq!(scheduler.step().await, Step::Continue);
	assert!(scheduler.draw_pending());

	tokio::time::advance(Duration::from_millis(3)).await;
	scheduler.editor_mut().post_draw();
	assert_eq!(scheduler.step().await, Step::Continue);
	assert_eq!(scheduler.draw_count(), before);

	assert_eq!(scheduler.step().await, Step::Continue);
	assert_eq!(scheduler.draw_count(), before + 1);
	assert_eq!(armed.elapsed(), Duration::from_millis(5));
}

#[tokio::test(start_paused = true)]
async fn expired_timer_draws_ahead_of_pending_commands() {
	let (mut scheduler, handles) = scheduler_with(EditorConfig {
		draw_debounce_ms: 5,
		..EditorConfig::default()
	});
	settle(&mut scheduler).await;
	let before = scheduler.draw_count();

	scheduler.editor_mut().post_draw();
	assert_eq!(scheduler.step().await, Step::Continue);
	assert!(scheduler.draw_pending());

	assert!(handles.commands.post(cmd("keyboard_mode command")).await);
	tokio::time::advance(Duration::from_millis(6)).await;

	assert_eq!(scheduler.step().await, Step::Continue);
	assert_eq!(scheduler.draw_count(), before + 1);
	assert_eq!(scheduler.editor().keyboard_mode(), KeyboardMode::Edit);

	assert_eq!(scheduler.step().await, Step::Continue);
	assert_eq!(scheduler.editor().keyboard_mode(), KeyboardMode::Command);
}

#[tokio::test(start_paused = true)]
async fn expired_timer_quits_despite_pending_commands() {
	let (mut scheduler, handles) = scheduler_with(EditorConfig {
		draw_debounce_ms: 5,
		..EditorConfig::default()
	});
	settle(&mut scheduler).await;

	scheduler.editor_mut().request_quit();
	scheduler.editor_mut().post_draw();
	assert_eq!(scheduler.step().await, Step::Continue);

	for _ in 0..3 {
		assert!(handles.commands.post(cmd("keyboard_mode command")).await);
	}
	tokio::time::advance(Duration::from_millis(6)).await;
	assert_eq!(scheduler.step().await, Step::Quit);
}

#[tokio::test(start_paused = true)]
async fn quit_waits_for_queued_commands() {
	let (mut scheduler, handles) = scheduler();
	settle(&mut scheduler).await;

	assert!(handles.commands.post(cmd("quit")).await);
	assert!(handles.commands.post(cmd("new")).await);
	assert_eq!(settle(&mut scheduler).await, Settled::Quit);

	let editor = scheduler.editor();
	assert_ne!(editor.active_window(), editor.root_window());
}

#[tokio::test(start_paused = true)]
async fn run_returns_zero_on_quit() {
	let (scheduler, handles) = scheduler();
	assert!(handles.commands.post(cmd("quit")).await);
	assert_eq!(scheduler.run().await, 0);
}

#[tokio::test(start_paused = true)]
async fn resize_applies_ahead_of_queued_commands() {
	let (mut scheduler, handles) = scheduler();
	settle(&mut scheduler).await;

	assert!(handles.commands.post(cmd("editor_bootstrap_ui")).await);
	handles
		.terminal
		.send(TerminalEvent::Resize { width: 100, height: 30 })
		.await
		.unwrap();

	assert_eq!(scheduler.step().await, Step::Continue);
	assert_eq!(scheduler.screen(), Rect::new(0, 0, 100, 30));
	let root = scheduler.editor().root_window();
	assert!(scheduler.editor().tree().children(root).is_empty());

	settle(&mut scheduler).await;
	let screen = scheduler.terminal().screen();
	assert_eq!(screen.len(), 24);
	let frame = scheduler.terminal().frames.last().unwrap();
	assert_eq!(frame[0].area, Rect::new(0, 0, 100, 30));
}

#[tokio::test(start_paused = true)]
async fn terminal_errors_become_alerts() {
	let (mut scheduler, handles) = scheduler();
	handles
		.terminal
		.send(TerminalEvent::Error("input closed".into()))
		.await
		.unwrap();
	settle(&mut scheduler).await;

	let tree = scheduler.editor().tree();
	let titles: Vec<_> = tree
		.children(tree.root())
		.iter()
		.filter_map(|id| tree.view(*id).map(|view| view.title()))
		.collect();
	assert_eq!(titles, vec!["Alert: input closed".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn alerts_dismiss_themselves() {
	let (mut scheduler, handles) = scheduler_with(EditorConfig {
		alert_dismiss_secs: 2,
		..EditorConfig::default()
	});
	assert!(handles.commands.post(cmd("alert hello")).await);
	settle(&mut scheduler).await;
	let root = scheduler.editor().root_window();
	assert_eq!(scheduler.editor().tree().children(root).len(), 1);

	tokio::time::sleep(Duration::from_secs(3)).await;
	settle(&mut scheduler).await;
	assert!(scheduler.editor().tree().children(root).is_empty());
}

#[tokio::test(start_paused = true)]
async fn panicking_listener_does_not_stop_the_loop() {
	let (mut scheduler, handles) = scheduler();
	let _listener = handles.events.register_window_created(|_| panic!("listener failure"));

	assert!(handles.commands.post(cmd("new")).await);
	assert!(handles.commands.post(cmd("quit")).await);
	assert_eq!(settle(&mut scheduler).await, Settled::Quit);
}
