//! Views: the content hosted by a window, and the factories that build them.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use wisp_events::{EventListener, EventRegistry};
use wisp_primitives::{BorderStyle, Buffer, CellFormat, Color, DocumentId, NaturalSize, ViewId, WindowId};
use wisp_registry::{Commands, KeyBindings};

use crate::{Editor, WindowError};

mod factories;

pub use factories::{UNTITLED, register_default_factories, root_view};

/// Format used by the built-in static views unless they override it.
pub const STATIC_FORMAT: CellFormat = CellFormat::new(Color::Red, Color::Black);

/// Builds a view from `window_new` arguments.
pub type ViewFactory = fn(&EventRegistry, &[String]) -> Result<View, WindowError>;

/// Runs once the view's window has been inserted in the tree.
pub type AttachHook = fn(&mut Editor, WindowId);

/// What a view draws besides its background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
	/// Draws its title on the first row.
	Static,
	/// A text document; the text itself is rendered by the document layer.
	Document { path: Option<PathBuf> },
	/// Shows the pending key buffer.
	CommandPrompt,
	/// Shows the title of the active window's view.
	ActiveWindowName,
}

/// Per-frame inputs a view may need to draw itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
	pub format: CellFormat,
	pub active_title: &'a str,
	pub key_buffer: &'a str,
}

/// Content behind a window.
///
/// Owns its own command and key binding tables, which shadow those of the
/// ancestors' views.
#[derive(Debug)]
pub struct View {
	id: ViewId,
	kind: ViewKind,
	title: Arc<Mutex<String>>,
	commands: Commands,
	key_bindings: KeyBindings,
	disabled: bool,
	dirty: bool,
	natural_size: NaturalSize,
	border: BorderStyle,
	format: Option<CellFormat>,
	buffer: Buffer,
	document: Option<DocumentId>,
	listeners: Vec<EventListener>,
	on_attach: Option<AttachHook>,
}

impl View {
	pub fn new(title: impl Into<String>, kind: ViewKind, natural_size: NaturalSize) -> Self {
		Self {
			id: ViewId(0),
			kind,
			title: Arc::new(Mutex::new(title.into())),
			commands: Commands::new(),
			key_bindings: KeyBindings::new(),
			disabled: false,
			dirty: false,
			natural_size,
			border: BorderStyle::None,
			format: None,
			buffer: Buffer::new(0, 0),
			document: None,
			listeners: Vec::new(),
			on_attach: None,
		}
	}

	/// A view that cannot be activated and only shows its title.
	pub fn static_disabled(title: impl Into<String>, natural_size: NaturalSize) -> Self {
		Self::new(title, ViewKind::Static, natural_size)
			.disabled(true)
			.with_format(STATIC_FORMAT)
	}

	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	pub fn with_format(mut self, format: CellFormat) -> Self {
		self.format = Some(format);
		self
	}

	/// Clears the own format so the parent's applies.
	pub fn inherit_format(mut self) -> Self {
		self.format = None;
		self
	}

	pub fn with_border(mut self, border: BorderStyle) -> Self {
		self.border = border;
		self
	}

	pub fn on_attach(mut self, hook: AttachHook) -> Self {
		self.on_attach = Some(hook);
		self
	}

	/// Ties `listener` to the view's lifetime in the tree.
	pub fn own_listener(&mut self, listener: EventListener) {
		self.listeners.push(listener);
	}

	pub fn id(&self) -> ViewId {
		self.id
	}

	pub(crate) fn set_id(&mut self, id: ViewId) {
		self.id = id;
	}

	pub fn kind(&self) -> &ViewKind {
		&self.kind
	}

	pub fn title(&self) -> String {
		self.title.lock().clone()
	}

	pub fn set_title(&self, title: impl Into<String>) {
		*self.title.lock() = title.into();
	}

	/// Shared handle listeners use to retitle the view.
	pub fn title_handle(&self) -> Arc<Mutex<String>> {
		Arc::clone(&self.title)
	}

	pub fn commands(&self) -> &Commands {
		&self.commands
	}

	pub fn commands_mut(&mut self) -> &mut Commands {
		&mut self.commands
	}

	pub fn key_bindings(&self) -> &KeyBindings {
		&self.key_bindings
	}

	pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
		&mut self.key_bindings
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled
	}

	/// True when the view holds unsaved changes.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn set_dirty(&mut self, dirty: bool) {
		self.dirty = dirty;
	}

	pub fn natural_size(&self) -> NaturalSize {
		self.natural_size
	}

	/// Border the hosting window is created with.
	pub fn border(&self) -> BorderStyle {
		self.border
	}

	/// The view's own format, without inheritance.
	pub fn format(&self) -> Option<CellFormat> {
		self.format.filter(|format| !format.is_empty())
	}

	pub fn buffer(&self) -> &Buffer {
		&self.buffer
	}

	pub fn document(&self) -> Option<DocumentId> {
		self.document
	}

	pub(crate) fn set_document(&mut self, document: DocumentId) {
		self.document = Some(document);
	}

	pub(crate) fn attach_hook(&self) -> Option<AttachHook> {
		self.on_attach
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Reallocates the buffer for a new client size.
	pub(crate) fn resize(&mut self, width: u16, height: u16) {
		if self.buffer.width() != width || self.buffer.height() != height {
			self.buffer = Buffer::new(width, height);
		}
	}

	/// Redraws the buffer.
	pub fn render(&mut self, ctx: &RenderContext<'_>) -> &Buffer {
		self.buffer.fill(ctx.format);
		match &self.kind {
			ViewKind::ActiveWindowName => {
				self.buffer.draw_str(0, 0, ctx.active_title, ctx.format);
			}
			ViewKind::CommandPrompt => {
				let x = self.buffer.draw_str(0, 0, "> ", ctx.format);
				self.buffer.draw_str(x, 0, ctx.key_buffer, ctx.format);
			}
			ViewKind::Static | ViewKind::Document { .. } => {
				let title = self.title.lock().clone();
				self.buffer.draw_str(0, 0, &title, ctx.format);
			}
		}
		&self.buffer
	}

	/// Unregisters every listener the view owns.
	pub(crate) fn close(&mut self) {
		for listener in self.listeners.drain(..) {
			if let Err(error) = listener.close() {
				tracing::warn!(view = %self.id, %error, "view.close_listener");
			}
		}
	}
}

/// View factories by name.
#[derive(Debug, Default, Clone)]
pub struct ViewFactories {
	factories: HashMap<String, ViewFactory>,
}

impl ViewFactories {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `factory`; returns true if it replaced one.
	pub fn register(&mut self, name: impl Into<String>, factory: ViewFactory) -> bool {
		self.factories.insert(name.into(), factory).is_some()
	}

	pub fn build(&self, name: &str, events: &EventRegistry, args: &[String]) -> Result<View, WindowError> {
		let factory = self
			.factories
			.get(name)
			.ok_or_else(|| WindowError::UnknownViewFactory(name.to_string()))?;
		factory(events, args)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.factories.contains_key(name)
	}

	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<_> = self.factories.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

/// Runs the attach hook of the view hosted by `window`, if any.
pub(crate) fn run_attach_hook(editor: &mut Editor, window: WindowId) {
	let hook = editor.tree().view(window).and_then(View::attach_hook);
	if let Some(hook) = hook {
		tracing::trace!(%window, "view.attach");
		hook(editor, window);
	}
}
