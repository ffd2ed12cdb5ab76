//! Listener tables, listener handles and the deferred run queue.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use tokio::sync::mpsc;
use wisp_primitives::{DocumentId, Key, KeyboardMode, Language, ViewId, WindowId};

use crate::{EnqueuedCommand, Event, EventError, EventKind, Result};

type Callback = Arc<dyn Fn(&Event) + Send + Sync>;

/// Identifies one registered listener.
///
/// Carries its event kind so that removal goes straight to the right table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId {
	pub kind: EventKind,
	pub seq: u64,
}

impl fmt::Display for ListenerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.kind, self.seq)
	}
}

struct Slot {
	seq: u64,
	callback: Callback,
}

#[derive(Default)]
struct Tables {
	by_kind: HashMap<EventKind, Vec<Slot>>,
	next_seq: u64,
}

impl Tables {
	fn remove(&mut self, id: ListenerId) -> Result<()> {
		let slots = self
			.by_kind
			.get_mut(&id.kind)
			.ok_or(EventError::ListenerAlreadyRemoved(id))?;
		let pos = slots
			.iter()
			.position(|slot| slot.seq == id.seq)
			.ok_or(EventError::ListenerAlreadyRemoved(id))?;
		slots.remove(pos);
		Ok(())
	}
}

/// Handle returned by every `register_*` call.
///
/// Dropping the handle does not unregister; call [`EventListener::close`].
pub struct EventListener {
	id: ListenerId,
	tables: Weak<Mutex<Tables>>,
}

impl EventListener {
	pub fn id(&self) -> ListenerId {
		self.id
	}

	/// Unregisters the listener.
	///
	/// A second call fails with [`EventError::ListenerAlreadyRemoved`] and
	/// changes nothing. A snapshot taken by a trigger just before the close
	/// may still invoke the callback once.
	pub fn close(&self) -> Result<()> {
		let tables = self
			.tables
			.upgrade()
			.ok_or(EventError::ListenerAlreadyRemoved(self.id))?;
		let result = tables.lock().remove(self.id);
		tracing::trace!(listener = %self.id, ok = result.is_ok(), "event.unregister");
		result
	}
}

impl fmt::Debug for EventListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventListener").field("id", &self.id).finish()
	}
}

/// A triggered event paired with the listeners that were registered at
/// trigger time.
pub struct DeferredEvent {
	event: Event,
	listeners: Vec<Callback>,
}

impl DeferredEvent {
	pub fn event(&self) -> &Event {
		&self.event
	}

	/// Invokes every snapshotted listener in registration order.
	///
	/// A panicking listener is logged and skipped; the remaining listeners
	/// still run. Returns the number of listeners that panicked.
	pub fn run(self) -> usize {
		let kind = self.event.kind();
		let mut panicked = 0;
		for callback in &self.listeners {
			if catch_unwind(AssertUnwindSafe(|| callback(&self.event))).is_err() {
				panicked += 1;
				tracing::error!(%kind, "event.listener_panicked");
			}
		}
		panicked
	}
}

impl fmt::Debug for DeferredEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeferredEvent")
			.field("event", &self.event)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

/// Consumer side of the deferred run queue. Owned by the scheduler.
#[derive(Debug)]
pub struct DeferredEvents {
	rx: mpsc::UnboundedReceiver<DeferredEvent>,
}

impl DeferredEvents {
	pub async fn recv(&mut self) -> Option<DeferredEvent> {
		self.rx.recv().await
	}

	pub fn try_recv(&mut self) -> Option<DeferredEvent> {
		self.rx.try_recv().ok()
	}

	/// Runs every queued event, including ones queued by the listeners being
	/// run. Returns the number of events processed.
	pub fn drain(&mut self) -> usize {
		let mut count = 0;
		while let Some(deferred) = self.try_recv() {
			deferred.run();
			count += 1;
		}
		count
	}
}

/// Per-kind listener tables plus the producer side of the deferred queue.
///
/// Cheap to clone; clones share the same tables and queue. Registration and
/// triggering are safe from any thread, the lock is held only while a table
/// is mutated or copied.
#[derive(Clone)]
pub struct EventRegistry {
	tables: Arc<Mutex<Tables>>,
	deferred: mpsc::UnboundedSender<DeferredEvent>,
}

impl fmt::Debug for EventRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let tables = self.tables.lock();
		f.debug_struct("EventRegistry")
			.field("listeners", &tables.by_kind.values().map(Vec::len).sum::<usize>())
			.field("next_seq", &tables.next_seq)
			.finish()
	}
}

impl EventRegistry {
	/// Creates a registry and the queue its triggers feed.
	pub fn new() -> (Self, DeferredEvents) {
		let (tx, rx) = mpsc::unbounded_channel();
		let registry = Self {
			tables: Arc::new(Mutex::new(Tables::default())),
			deferred: tx,
		};
		(registry, DeferredEvents { rx })
	}

	/// Registers an untyped listener for `kind`.
	pub fn register<F>(&self, kind: EventKind, callback: F) -> EventListener
	where
		F: Fn(&Event) + Send + Sync + 'static,
	{
		let mut tables = self.tables.lock();
		let seq = tables.next_seq;
		tables.next_seq += 1;
		tables.by_kind.entry(kind).or_default().push(Slot {
			seq,
			callback: Arc::new(callback),
		});
		drop(tables);

		let id = ListenerId { kind, seq };
		tracing::trace!(listener = %id, "event.register");
		EventListener {
			id,
			tables: Arc::downgrade(&self.tables),
		}
	}

	/// Unregisters by id, for holders that kept only the [`ListenerId`].
	pub fn unregister(&self, id: ListenerId) -> Result<()> {
		self.tables.lock().remove(id)
	}

	pub fn listener_count(&self, kind: EventKind) -> usize {
		self.tables.lock().by_kind.get(&kind).map_or(0, Vec::len)
	}

	/// Queues `event` for every listener currently registered for its kind.
	///
	/// Nothing runs until the owner of [`DeferredEvents`] drains the queue.
	pub fn trigger(&self, event: Event) {
		let kind = event.kind();
		let listeners: Vec<Callback> = self
			.tables
			.lock()
			.by_kind
			.get(&kind)
			.map(|slots| slots.iter().map(|slot| slot.callback.clone()).collect())
			.unwrap_or_default();
		tracing::trace!(%kind, listeners = listeners.len(), "event.trigger");
		if listeners.is_empty() {
			return;
		}
		if self.deferred.send(DeferredEvent { event, listeners }).is_err() {
			tracing::debug!(%kind, "event.queue_closed");
		}
	}
}

macro_rules! typed_events {
	($($kind:ident => $register:ident, $trigger:ident ($($field:ident : $ty:ty),*);)*) => {
		impl EventRegistry {
			$(
				#[doc = concat!("Registers a listener for [`Event::", stringify!($kind), "`].")]
				pub fn $register<F>(&self, callback: F) -> EventListener
				where
					F: Fn($($ty),*) + Send + Sync + 'static,
				{
					self.register(EventKind::$kind, move |event| {
						if let Event::$kind { $($field),* } = event {
							callback($($field.clone()),*);
						}
					})
				}

				#[doc = concat!("Queues an [`Event::", stringify!($kind), "`].")]
				pub fn $trigger(&self, $($field: $ty),*) {
					self.trigger(Event::$kind { $($field),* });
				}
			)*
		}
	};
}

typed_events! {
	CommandBatchSubmitted => register_command_batch_submitted, trigger_command_batch_submitted(commands: Vec<EnqueuedCommand>);
	DocumentCreated => register_document_created, trigger_document_created(document: DocumentId);
	DocumentCursorMoved => register_document_cursor_moved, trigger_document_cursor_moved(document: DocumentId, col: u32, row: u32);
	EditorKeyboardModeChanged => register_editor_keyboard_mode_changed, trigger_editor_keyboard_mode_changed(mode: KeyboardMode);
	EditorLanguageChanged => register_editor_language_changed, trigger_editor_language_changed(language: Language);
	TerminalKeyPressed => register_terminal_key_pressed, trigger_terminal_key_pressed(key: Key);
	TerminalMetaKeyPressed => register_terminal_meta_key_pressed, trigger_terminal_meta_key_pressed(key: Key);
	TerminalResized => register_terminal_resized, trigger_terminal_resized(width: u16, height: u16);
	ViewActivated => register_view_activated, trigger_view_activated(view: ViewId);
	ViewCreated => register_view_created, trigger_view_created(view: ViewId);
	WindowCreated => register_window_created, trigger_window_created(window: WindowId);
	WindowResized => register_window_resized, trigger_window_resized(window: WindowId);
}
