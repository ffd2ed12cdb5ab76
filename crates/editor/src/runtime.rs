//! The scheduler: one control thread merging every input source.
//!
//! Each turn waits on, in priority order: terminal input, deferred event
//! listeners, the command queue, draw-ready signals and the draw debounce
//! timer. Draw signals are coalesced: the first one arms the timer, later
//! ones are absorbed, and the timer expiry drains them and draws once. The
//! quit flag is only honoured at that expiry, so commands queued ahead of
//! the quit still run.
//!
//! The select is biased, so a steady stream of commands would keep the timer
//! branch from ever being polled. An expired deadline is therefore checked
//! before the select on every turn: once the debounce window has passed, the
//! next turn draws (or quits) whatever else is ready.

use std::io;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use wisp_events::{DeferredEvents, EventRegistry};
use wisp_primitives::Rect;
use wisp_registry::CommandEditorOps;

use crate::editor::Editor;
use crate::queue::{CommandReceiver, CommandSender, command_queue};
use crate::terminal::{Terminal, TerminalEvent};
use crate::EditorConfig;

/// Terminal input buffered before the backend blocks.
pub const TERMINAL_EVENT_CAPACITY: usize = 64;

/// Producer handles handed out by [`Scheduler::new`].
#[derive(Debug, Clone)]
pub struct SchedulerHandles {
	pub commands: CommandSender,
	pub terminal: mpsc::Sender<TerminalEvent>,
	pub events: EventRegistry,
}

/// Outcome of one loop turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	Continue,
	Quit,
}

pub struct Scheduler<T> {
	editor: Editor,
	terminal: T,
	commands: CommandReceiver,
	terminal_events: mpsc::Receiver<TerminalEvent>,
	deferred: DeferredEvents,
	draws: mpsc::UnboundedReceiver<()>,
	debounce: Duration,
	draw_deadline: Option<Instant>,
	draw_count: u64,
}

impl<T: Terminal> Scheduler<T> {
	/// Builds the editor and lays the root window out to the terminal size.
	pub fn new(config: EditorConfig, terminal: T) -> (Self, SchedulerHandles) {
		let (events, deferred) = EventRegistry::new();
		let (commands_tx, commands) = command_queue(config.command_queue_capacity);
		let (terminal_tx, terminal_events) = mpsc::channel(TERMINAL_EVENT_CAPACITY);
		let (draws_tx, draws) = mpsc::unbounded_channel();
		let debounce = config.draw_debounce();

		let mut editor = Editor::new(config, events.clone(), commands_tx.clone(), draws_tx);
		match terminal.size() {
			Ok((width, height)) => editor.resize(width, height),
			Err(error) => tracing::warn!(%error, "terminal.size"),
		}

		let scheduler = Self {
			editor,
			terminal,
			commands,
			terminal_events,
			deferred,
			draws,
			debounce,
			draw_deadline: None,
			draw_count: 0,
		};
		let handles = SchedulerHandles {
			commands: commands_tx,
			terminal: terminal_tx,
			events,
		};
		(scheduler, handles)
	}

	pub fn editor(&self) -> &Editor {
		&self.editor
	}

	pub fn editor_mut(&mut self) -> &mut Editor {
		&mut self.editor
	}

	pub fn terminal(&self) -> &T {
		&self.terminal
	}

	/// Frames drawn so far.
	pub fn draw_count(&self) -> u64 {
		self.draw_count
	}

	/// True while a redraw is armed but not yet performed.
	pub fn draw_pending(&self) -> bool {
		self.draw_deadline.is_some()
	}

	/// Runs a single loop turn.
	pub async fn step(&mut self) -> Step {
		if let Some(deadline) = self.draw_deadline
			&& Instant::now() >= deadline
		{
			return self.on_draw_timer();
		}

		let deadline = self.draw_deadline.unwrap_or_else(Instant::now);
		tokio::select! {
			biased;

			Some(event) = self.terminal_events.recv() => {
				self.editor.on_terminal_event(event);
			}
			Some(deferred) = self.deferred.recv() => {
				let kind = deferred.event().kind();
				let panicked = deferred.run();
				tracing::trace!(%kind, panicked, "event.delivered");
				// Listeners may have touched views.
				self.editor.post_draw();
			}
			Some(item) = self.commands.recv() => {
				self.editor.on_queue_item(item);
			}
			Some(()) = self.draws.recv() => {
				if self.draw_deadline.is_none() {
					self.draw_deadline = Some(Instant::now() + self.debounce);
				}
			}
			() = tokio::time::sleep_until(deadline), if self.draw_deadline.is_some() => {
				return self.on_draw_timer();
			}
			else => {
				tracing::warn!("scheduler.inputs_closed");
				return Step::Quit;
			}
		}
		Step::Continue
	}

	/// Debounce expiry: honours a pending quit, otherwise draws one frame
	/// for every signal received since the timer was armed.
	fn on_draw_timer(&mut self) -> Step {
		if self.editor.is_quitting() {
			tracing::info!("scheduler.quit");
			return Step::Quit;
		}
		while self.draws.try_recv().is_ok() {}
		self.draw_deadline = None;
		if let Err(error) = self.draw() {
			tracing::error!(%error, "scheduler.draw_failed");
		}
		Step::Continue
	}

	/// Loops until quit; returns the process exit code.
	pub async fn run(mut self) -> i32 {
		tracing::debug!("scheduler.start");
		while self.step().await == Step::Continue {}
		0
	}

	/// Renders every window and hands the frame to the terminal.
	pub fn draw(&mut self) -> io::Result<()> {
		let surfaces = self.editor.render();
		self.draw_count += 1;
		tracing::trace!(surfaces = surfaces.len(), frame = self.draw_count, "scheduler.draw");
		self.terminal.draw(&surfaces)
	}

	/// Root rectangle, for diagnostics.
	pub fn screen(&self) -> Rect {
		let root = self.editor.root_window();
		self.editor.tree().rect(root).unwrap_or(Rect::ZERO)
	}
}
