#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Event bus shared by the editor core and plugins.
//!
//! Publishing never runs listeners inline. [`EventRegistry::trigger`] takes a
//! snapshot of the listeners registered for the event's kind and hands it to
//! a [`DeferredEvents`] queue, which the scheduler drains on the control
//! thread. Listeners therefore never observe a half-finished mutation of the
//! state that triggered them, and may freely register, unregister or trigger
//! from inside their own callback.

mod error;
mod event;
mod registry;

pub use error::{EventError, Result};
pub use event::{EnqueuedCommand, Event, EventKind};
pub use registry::{DeferredEvent, DeferredEvents, EventListener, EventRegistry, ListenerId};
