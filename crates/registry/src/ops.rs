use std::time::Duration;

use wisp_events::EnqueuedCommand;
use wisp_primitives::{Docking, KeyboardMode, Language, WindowId};

use crate::{CommandError, Commands, KeyBindings};

/// Editor operations available to command handlers.
///
/// Implemented by the scheduler's editor state. Handlers only run on the
/// control thread, so nothing here needs to be thread-safe.
pub trait CommandEditorOps {
	fn language(&self) -> Language;
	/// Changes the language and publishes `editor-language-changed`.
	fn set_language(&mut self, language: Language);
	fn keyboard_mode(&self) -> KeyboardMode;
	/// Changes the mode and publishes `editor-keyboard-mode-changed`.
	fn set_keyboard_mode(&mut self, mode: KeyboardMode);

	/// Most recently activated window.
	fn active_window(&self) -> WindowId;
	fn root_window(&self) -> WindowId;
	/// `None` for the root or an unknown window.
	fn parent(&self, window: WindowId) -> Option<WindowId>;
	fn children(&self, window: WindowId) -> Vec<WindowId>;
	/// Command table of the view hosted by `window`.
	fn commands(&self, window: WindowId) -> Option<&Commands>;
	fn commands_mut(&mut self, window: WindowId) -> Option<&mut Commands>;
	fn key_bindings(&self, window: WindowId) -> Option<&KeyBindings>;
	fn key_bindings_mut(&mut self, window: WindowId) -> Option<&mut KeyBindings>;

	/// Creates a child window hosting a view built by the named factory.
	fn new_child_window(
		&mut self,
		parent: WindowId,
		docking: Docking,
		factory: &str,
		args: &[String],
	) -> Result<WindowId, CommandError>;
	/// Detaches `window` and its subtree.
	fn close_window(&mut self, window: WindowId) -> Result<(), CommandError>;
	/// Focuses `window`; fails if its view is disabled.
	fn activate_window(&mut self, window: WindowId) -> Result<(), CommandError>;
	/// Title of the first unsaved view at or below `window`.
	fn first_dirty_view(&self, window: WindowId) -> Option<String>;
	/// Debug dump of the subtree rooted at `window`.
	fn window_tree(&self, window: WindowId) -> String;

	/// Appends a command at the end of the queue without blocking.
	fn post_command(&mut self, command: EnqueuedCommand);
	/// Posts `command` once `delay` has elapsed.
	fn schedule_command(&mut self, delay: Duration, command: EnqueuedCommand);
	/// Signals that the screen needs redrawing.
	fn post_draw(&mut self);
	/// Raises the quit flag; the loop stops at its next draw turn.
	fn request_quit(&mut self);
}
