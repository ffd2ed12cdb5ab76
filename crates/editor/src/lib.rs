#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Window tree, views and the scheduler that drives them.
//!
//! A [`Scheduler`] owns the [`Editor`] (window tree, active-window stack,
//! modal state) and is the only place command handlers run. Everything
//! else talks to it through a [`CommandSender`], the terminal event channel
//! or the event bus.

mod config;
mod editor;
mod error;
pub mod queue;
pub mod runtime;
pub mod terminal;
pub mod tree;
pub mod view;

pub use config::{EditorConfig, PluginsConfig};
pub use editor::{DrawSender, Editor};
pub use error::{ConfigError, Result, WindowError};
pub use queue::{CommandReceiver, CommandSender, QueueItem, command_queue};
pub use runtime::{Scheduler, SchedulerHandles, Step};
pub use terminal::{Surface, Terminal, TerminalEvent};
pub use tree::{Window, WindowTree};
pub use view::{View, ViewFactories, ViewFactory, ViewKind};
