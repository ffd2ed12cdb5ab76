//! Editor state owned by the control thread.

use std::time::Duration;

use tokio::sync::mpsc;
use wisp_events::{EnqueuedCommand, EventListener, EventRegistry};
use wisp_primitives::{Docking, DocumentId, Key, KeyCode, KeyboardMode, Language, Rect, WindowId};
use wisp_registry::{
	CommandAlias, CommandEditorOps, CommandError, Commands, KeyBindings, Message, builtins, execute_command,
	get_key_binding_command,
};

use crate::queue::{CommandSender, QueueItem};
use crate::terminal::{Surface, TerminalEvent};
use crate::tree::WindowTree;
use crate::view::{self, RenderContext, View, ViewFactories};
use crate::{EditorConfig, WindowError};


/// Sending half of the draw-ready signal.
pub type DrawSender = mpsc::UnboundedSender<()>;

/// The window tree, the active-window stack and the modal state.
///
/// Only the scheduler's control thread touches an `Editor`; other threads
/// reach it through the command queue and the event bus.
#[derive(Debug)]
pub struct Editor {
	tree: WindowTree,
	/// Most recently activated first; never empty.
	active: Vec<WindowId>,
	factories: ViewFactories,
	events: EventRegistry,
	sender: CommandSender,
	draws: DrawSender,
	config: EditorConfig,
	language: Language,
	mode: KeyboardMode,
	key_buffer: String,
	quit: bool,
	next_document: u64,
	listeners: Vec<EventListener>,
}

impl Editor {
	/// Builds the root window with the built-in commands and the configured
	/// aliases and key bindings.
	pub fn new(config: EditorConfig, events: EventRegistry, sender: CommandSender, draws: DrawSender) -> Self {
		let mut root = view::root_view();
		bootstrap_root(&config, &mut root);

		let mut factories = ViewFactories::new();
		view::register_default_factories(&mut factories);

		let tree = WindowTree::new(events.clone(), root);
		let active = vec![tree.root()];

		let batch_sender = sender.clone();
		let listeners = vec![events.register_command_batch_submitted(move |commands| {
			for command in commands {
				batch_sender.post_nowait(command);
			}
		})];

		Self {
			tree,
			active,
			factories,
			events,
			sender,
			draws,
			language: config.language,
			mode: config.keyboard_mode,
			config,
			key_buffer: String::new(),
			quit: false,
			next_document: 0,
			listeners,
		}
	}

	pub fn tree(&self) -> &WindowTree {
		&self.tree
	}

	pub fn tree_mut(&mut self) -> &mut WindowTree {
		&mut self.tree
	}

	pub fn events(&self) -> &EventRegistry {
		&self.events
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn sender(&self) -> &CommandSender {
		&self.sender
	}

	pub fn factories_mut(&mut self) -> &mut ViewFactories {
		&mut self.factories
	}

	/// Active-window stack, most recent first.
	pub fn active_windows(&self) -> &[WindowId] {
		&self.active
	}

	/// Characters typed since the last `Enter`.
	pub fn key_buffer(&self) -> &str {
		&self.key_buffer
	}

	pub fn is_quitting(&self) -> bool {
		self.quit
	}

	/// Gives the document view in `window` a fresh document id.
	pub(crate) fn allocate_document(&mut self, window: WindowId) {
		let document = DocumentId(self.next_document);
		self.next_document += 1;
		if let Some(view) = self.tree.view_mut(window) {
			view.set_document(document);
			tracing::debug!(%window, %document, "document.created");
			self.events.trigger_document_created(document);
		}
	}

	/// Applies a terminal resize, bypassing the command queue.
	pub fn resize(&mut self, width: u16, height: u16) {
		tracing::debug!(width, height, "terminal.resized");
		self.events.trigger_terminal_resized(width, height);
		let root = self.tree.root();
		let _ = self.tree.set_rect(root, Rect::new(0, 0, width, height));
		self.post_draw();
	}

	pub fn on_terminal_event(&mut self, event: TerminalEvent) {
		match event {
			TerminalEvent::Key(key) => {
				if key.is_meta() {
					self.events.trigger_terminal_meta_key_pressed(key);
				} else {
					self.events.trigger_terminal_key_pressed(key);
				}
				self.sender.post_nowait(key);
			}
			TerminalEvent::Resize { width, height } => self.resize(width, height),
			TerminalEvent::Error(message) => {
				tracing::warn!(%message, "terminal.error");
				self.post_command(EnqueuedCommand::new(wisp_registry::ALERT, [message]));
			}
		}
	}

	pub fn on_queue_item(&mut self, item: QueueItem) {
		match item {
			QueueItem::Command(command) => {
				execute_command(self, None, &command.name, &command.args);
			}
			QueueItem::Key(key) => self.on_key(key),
		}
	}

	/// Translates a dequeued key press.
	///
	/// `Enter` runs the key buffer as a command line. Otherwise a binding
	/// reachable from the active window wins; unbound printable keys extend
	/// the buffer and an unbound `Backspace` shortens it.
	pub fn on_key(&mut self, key: Key) {
		if key.code == KeyCode::Enter && key.modifiers.is_empty() {
			let line = std::mem::take(&mut self.key_buffer);
			if let Some(command) = EnqueuedCommand::parse_line(&line) {
				tracing::debug!(%command, "editor.submit");
				execute_command(self, None, &command.name, &command.args);
			}
			self.post_draw();
			return;
		}

		if let Some(name) = get_key_binding_command(&*self, None, self.mode, &key) {
			tracing::debug!(%key, command = %name, "editor.key_bound");
			execute_command(self, None, &name, &[]);
			return;
		}

		if let Some(ch) = key.printable_char() {
			self.key_buffer.push(ch);
			self.post_draw();
		} else if key.code == KeyCode::Backspace && self.key_buffer.pop().is_some() {
			self.post_draw();
		} else {
			tracing::trace!(%key, "editor.key_ignored");
		}
	}

	/// Renders every window into surfaces, in paint order.
	pub fn render(&mut self) -> Vec<Surface> {
		let active_title = self.tree.view(self.active_window()).map(View::title).unwrap_or_default();
		let order = self.tree.draw_order();
		let mut surfaces = Vec::with_capacity(order.len());
		for id in order {
			let format = self.tree.default_format(id);
			let Some(window) = self.tree.get_mut(id) else {
				continue;
			};
			let (area, border) = (window.rect(), window.border());
			let ctx = RenderContext {
				format,
				active_title: &active_title,
				key_buffer: &self.key_buffer,
			};
			let buffer = window.view_mut().render(&ctx).clone();
			surfaces.push(Surface {
				window: id,
				area,
				border,
				format,
				buffer,
			});
		}
		surfaces
	}

	fn push_active(&mut self, window: WindowId) {
		self.active.retain(|id| *id != window);
		self.active.insert(0, window);
	}
}

impl Drop for Editor {
	fn drop(&mut self) {
		for listener in self.listeners.drain(..) {
			let _ = listener.close();
		}
	}
}

fn bootstrap_root(config: &EditorConfig, root: &mut View) {
	let commands = root.commands_mut();
	builtins::register_builtins(commands);
	for (alias, target) in &config.aliases {
		commands.register(CommandAlias::new(alias.as_str(), target.as_str()));
	}
	let keys = root.key_bindings_mut();
	match config.key_bindings() {
		Ok(bindings) => {
			for (mode, key, command) in bindings {
				keys.set(mode, key, command);
			}
		}
		Err(error) => tracing::warn!(%error, "config.key_bindings"),
	}
}

impl CommandEditorOps for Editor {
	fn language(&self) -> Language {
		self.language
	}

	fn set_language(&mut self, language: Language) {
		self.language = language;
		self.events.trigger_editor_language_changed(language);
		self.post_draw();
	}

	fn keyboard_mode(&self) -> KeyboardMode {
		self.mode
	}

	fn set_keyboard_mode(&mut self, mode: KeyboardMode) {
		self.mode = mode;
		self.events.trigger_editor_keyboard_mode_changed(mode);
		self.post_draw();
	}

	fn active_window(&self) -> WindowId {
		self.active.first().copied().unwrap_or_else(|| self.tree.root())
	}

	fn root_window(&self) -> WindowId {
		self.tree.root()
	}

	fn parent(&self, window: WindowId) -> Option<WindowId> {
		self.tree.parent(window)
	}

	fn children(&self, window: WindowId) -> Vec<WindowId> {
		self.tree.children(window).to_vec()
	}

	fn commands(&self, window: WindowId) -> Option<&Commands> {
		self.tree.view(window).map(View::commands)
	}

	fn commands_mut(&mut self, window: WindowId) -> Option<&mut Commands> {
		self.tree.view_mut(window).map(View::commands_mut)
	}

	fn key_bindings(&self, window: WindowId) -> Option<&KeyBindings> {
		self.tree.view(window).map(View::key_bindings)
	}

	fn key_bindings_mut(&mut self, window: WindowId) -> Option<&mut KeyBindings> {
		self.tree.view_mut(window).map(View::key_bindings_mut)
	}

	fn new_child_window(
		&mut self,
		parent: WindowId,
		docking: Docking,
		factory: &str,
		args: &[String],
	) -> Result<WindowId, CommandError> {
		self.tree.check_slot(parent, docking)?;
		let view = self.factories.build(factory, &self.events, args)?;
		let id = self.tree.new_child_window(parent, view, docking)?;
		view::run_attach_hook(self, id);
		self.post_draw();
		Ok(id)
	}

	fn close_window(&mut self, window: WindowId) -> Result<(), CommandError> {
		let previous = self.active_window();
		let removed = self.tree.remove(window)?;
		self.active.retain(|id| !removed.contains(id));
		if self.active.is_empty() {
			self.active.push(self.tree.root());
		}
		let current = self.active_window();
		if current != previous
			&& let Some(view) = self.tree.view(current)
		{
			self.events.trigger_view_activated(view.id());
		}
		self.post_draw();
		Ok(())
	}

	fn activate_window(&mut self, window: WindowId) -> Result<(), CommandError> {
		let view = self.tree.view(window).ok_or(WindowError::UnknownWindow(window))?;
		if view.is_disabled() {
			let title = view.title();
			return Err(CommandError::Failed(
				Message::ViewDisabled { title: &title }.render(self.language),
			));
		}
		let view_id = view.id();
		self.push_active(window);
		tracing::debug!(%window, "window.activated");
		self.events.trigger_view_activated(view_id);
		self.post_draw();
		Ok(())
	}

	fn first_dirty_view(&self, window: WindowId) -> Option<String> {
		self.tree
			.subtree(window)
			.into_iter()
			.filter_map(|id| self.tree.view(id))
			.find(|view| view.is_dirty())
			.map(View::title)
	}

	fn window_tree(&self, window: WindowId) -> String {
		self.tree.tree(window)
	}

	fn post_command(&mut self, command: EnqueuedCommand) {
		tracing::trace!(%command, "command.post");
		self.sender.post_nowait(command);
	}

	fn schedule_command(&mut self, delay: Duration, command: EnqueuedCommand) {
		tracing::trace!(%command, ?delay, "command.schedule");
		self.sender.post_after(delay, command);
	}

	fn post_draw(&mut self) {
		let _ = self.draws.send(());
	}

	fn request_quit(&mut self) {
		tracing::info!("editor.quit_requested");
		self.quit = true;
	}
}
