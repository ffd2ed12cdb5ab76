//! In-memory [`CommandEditorOps`] used by the unit tests.

use std::collections::BTreeMap;
use std::time::Duration;

use wisp_events::EnqueuedCommand;
use wisp_primitives::{Docking, KeyboardMode, Language, WindowId};

use crate::{CommandEditorOps, CommandError, Commands, KeyBindings, builtins};

#[derive(Default)]
struct FakeWindow {
	parent: Option<WindowId>,
	commands: Commands,
	keys: KeyBindings,
	dirty: Option<String>,
	disabled: bool,
}

pub(crate) struct Created {
	pub parent: WindowId,
	pub docking: Docking,
	pub factory: String,
	pub args: Vec<String>,
}

pub(crate) struct FakeEditor {
	windows: BTreeMap<WindowId, FakeWindow>,
	next_id: u64,
	pub active: WindowId,
	pub language: Language,
	pub mode: KeyboardMode,
	pub created: Vec<Created>,
	pub posted: Vec<EnqueuedCommand>,
	pub scheduled: Vec<(Duration, EnqueuedCommand)>,
	pub closed: Vec<WindowId>,
	pub quit: bool,
	pub draws: usize,
}

pub(crate) const ROOT: WindowId = WindowId(0);

impl FakeEditor {
	/// A root window with the built-in commands registered.
	pub fn new() -> Self {
		let mut root = FakeWindow::default();
		builtins::register_builtins(&mut root.commands);
		let mut windows = BTreeMap::new();
		windows.insert(ROOT, root);
		Self {
			windows,
			next_id: 1,
			active: ROOT,
			language: Language::En,
			mode: KeyboardMode::Edit,
			created: Vec::new(),
			posted: Vec::new(),
			scheduled: Vec::new(),
			closed: Vec::new(),
			quit: false,
			draws: 0,
		}
	}

	/// A root with no commands at all, not even `alert`.
	pub fn bare() -> Self {
		let mut editor = Self::new();
		editor.windows.insert(ROOT, FakeWindow::default());
		editor
	}

	pub fn add_window(&mut self, parent: WindowId) -> WindowId {
		let id = WindowId(self.next_id);
		self.next_id += 1;
		self.windows.insert(
			id,
			FakeWindow {
				parent: Some(parent),
				..FakeWindow::default()
			},
		);
		id
	}

	pub fn mark_dirty(&mut self, window: WindowId, title: &str) {
		if let Some(w) = self.windows.get_mut(&window) {
			w.dirty = Some(title.to_string());
		}
	}

	pub fn disable(&mut self, window: WindowId) {
		if let Some(w) = self.windows.get_mut(&window) {
			w.disabled = true;
		}
	}

	/// Messages shown through the built-in `alert`.
	pub fn alerts(&self) -> Vec<&str> {
		self.created
			.iter()
			.filter(|c| c.factory == "infobar_alert")
			.filter_map(|c| c.args.first().map(String::as_str))
			.collect()
	}

	/// Names of commands posted to the queue.
	pub fn posted_names(&self) -> Vec<&str> {
		self.posted.iter().map(|c| c.name.as_str()).collect()
	}
}

impl CommandEditorOps for FakeEditor {
	fn language(&self) -> Language {
		self.language
	}

	fn set_language(&mut self, language: Language) {
		self.language = language;
	}

	fn keyboard_mode(&self) -> KeyboardMode {
		self.mode
	}

	fn set_keyboard_mode(&mut self, mode: KeyboardMode) {
		self.mode = mode;
	}

	fn active_window(&self) -> WindowId {
		self.active
	}

	fn root_window(&self) -> WindowId {
		ROOT
	}

	fn parent(&self, window: WindowId) -> Option<WindowId> {
		self.windows.get(&window)?.parent
	}

	fn children(&self, window: WindowId) -> Vec<WindowId> {
		self.windows
			.iter()
			.filter(|(_, w)| w.parent == Some(window))
			.map(|(id, _)| *id)
			.collect()
	}

	fn commands(&self, window: WindowId) -> Option<&Commands> {
		self.windows.get(&window).map(|w| &w.commands)
	}

	fn commands_mut(&mut self, window: WindowId) -> Option<&mut Commands> {
		self.windows.get_mut(&window).map(|w| &mut w.commands)
	}

	fn key_bindings(&self, window: WindowId) -> Option<&KeyBindings> {
		self.windows.get(&window).map(|w| &w.keys)
	}

	fn key_bindings_mut(&mut self, window: WindowId) -> Option<&mut KeyBindings> {
		self.windows.get_mut(&window).map(|w| &mut w.keys)
	}

	fn new_child_window(
		&mut self,
		parent: WindowId,
		docking: Docking,
		factory: &str,
		args: &[String],
	) -> Result<WindowId, CommandError> {
		if !self.windows.contains_key(&parent) {
			return Err(CommandError::Failed(format!("window {parent} does not exist")));
		}
		self.created.push(Created {
			parent,
			docking,
			factory: factory.to_string(),
			args: args.to_vec(),
		});
		Ok(self.add_window(parent))
	}

	fn close_window(&mut self, window: WindowId) -> Result<(), CommandError> {
		if window == ROOT || self.windows.remove(&window).is_none() {
			return Err(CommandError::Failed(format!("cannot close window {window}")));
		}
		self.closed.push(window);
		Ok(())
	}

	fn activate_window(&mut self, window: WindowId) -> Result<(), CommandError> {
		match self.windows.get(&window) {
			Some(w) if w.disabled => Err(CommandError::Failed("disabled".into())),
			Some(_) => {
				self.active = window;
				Ok(())
			}
			None => Err(CommandError::Failed(format!("window {window} does not exist"))),
		}
	}

	fn first_dirty_view(&self, window: WindowId) -> Option<String> {
		if let Some(title) = self.windows.get(&window)?.dirty.clone() {
			return Some(title);
		}
		self.children(window)
			.into_iter()
			.find_map(|child| self.first_dirty_view(child))
	}

	fn window_tree(&self, window: WindowId) -> String {
		format!("- {window}\n")
	}

	fn post_command(&mut self, command: EnqueuedCommand) {
		self.posted.push(command);
	}

	fn schedule_command(&mut self, delay: Duration, command: EnqueuedCommand) {
		self.scheduled.push((delay, command));
	}

	fn post_draw(&mut self) {
		self.draws += 1;
	}

	fn request_quit(&mut self) {
		self.quit = true;
	}
}
