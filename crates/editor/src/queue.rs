//! The bounded command queue feeding the scheduler.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};
use wisp_events::EnqueuedCommand;
use wisp_primitives::Key;
use wisp_rpc::CommandSink;

/// One unit of work for the control thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
	Command(EnqueuedCommand),
	/// A key press, translated only when dequeued so that it sees the
	/// active window left by the commands ahead of it.
	Key(Key),
}

impl From<EnqueuedCommand> for QueueItem {
	fn from(command: EnqueuedCommand) -> Self {
		Self::Command(command)
	}
}

impl From<Key> for QueueItem {
	fn from(key: Key) -> Self {
		Self::Key(key)
	}
}

/// Items [`CommandSender::post_nowait`] could not fit into the channel.
type Overflow = Arc<Mutex<VecDeque<QueueItem>>>;

/// Creates the queue. `capacity` is clamped to at least one slot.
pub fn command_queue(capacity: usize) -> (CommandSender, CommandReceiver) {
	let (tx, rx) = mpsc::channel(capacity.max(1));
	let overflow = Overflow::default();
	(
		CommandSender {
			tx,
			overflow: overflow.clone(),
		},
		CommandReceiver { rx, overflow },
	)
}

/// Producer handle for the command queue.
///
/// Returned booleans are `false` once the scheduler is gone.
#[derive(Debug, Clone)]
pub struct CommandSender {
	tx: mpsc::Sender<QueueItem>,
	overflow: Overflow,
}

impl CommandSender {
	/// Enqueues `item`, waiting while the queue is full.
	pub async fn post(&self, item: impl Into<QueueItem>) -> bool {
		self.tx.send(item.into()).await.is_ok()
	}

	/// Enqueues `item` from a plain OS thread, blocking while the queue is full.
	///
	/// Must not be called from inside the async runtime.
	pub fn blocking_post(&self, item: impl Into<QueueItem>) -> bool {
		self.tx.blocking_send(item.into()).is_ok()
	}

	/// Enqueues `item` without ever blocking the caller.
	///
	/// Used on the control thread, which is also the consumer. A full channel
	/// spills into an overflow list, and while that list is non-empty every
	/// later item joins its tail, so items posted this way are received in
	/// the order they were posted.
	pub fn post_nowait(&self, item: impl Into<QueueItem>) {
		let item = item.into();
		let mut overflow = self.overflow.lock();
		if !overflow.is_empty() {
			overflow.push_back(item);
			return;
		}
		match self.tx.try_send(item) {
			Ok(()) => {}
			Err(TrySendError::Closed(item)) => tracing::debug!(?item, "queue.closed"),
			Err(TrySendError::Full(item)) => {
				tracing::debug!(?item, "queue.full");
				overflow.push_back(item);
			}
		}
	}

	/// Enqueues `command` once `delay` has elapsed.
	pub fn post_after(&self, delay: Duration, command: EnqueuedCommand) {
		let Ok(handle) = Handle::try_current() else {
			tracing::warn!(%command, "queue.no_runtime");
			return;
		};
		let tx = self.tx.clone();
		handle.spawn(async move {
			tokio::time::sleep(delay).await;
			let _ = tx.send(command.into()).await;
		});
	}

	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

/// Consumer half, owned by the scheduler.
///
/// The channel is read before the overflow: overflow items were only
/// spilled once the channel was already full of earlier ones.
#[derive(Debug)]
pub struct CommandReceiver {
	rx: mpsc::Receiver<QueueItem>,
	overflow: Overflow,
}

impl CommandReceiver {
	/// Waits for the next item. Cancel safe.
	pub async fn recv(&mut self) -> Option<QueueItem> {
		if let Ok(item) = self.try_recv() {
			return Some(item);
		}
		match self.rx.recv().await {
			Some(item) => Some(item),
			None => self.overflow.lock().pop_front(),
		}
	}

	pub fn try_recv(&mut self) -> Result<QueueItem, TryRecvError> {
		let mut overflow = self.overflow.lock();
		match self.rx.try_recv() {
			Ok(item) => Ok(item),
			Err(error) => overflow.pop_front().ok_or(error),
		}
	}

	/// Items waiting in the channel and the overflow together.
	pub fn len(&self) -> usize {
		self.rx.len() + self.overflow.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl CommandSink for CommandSender {
	async fn post(&self, command: EnqueuedCommand) -> bool {
		CommandSender::post(self, command).await
	}
}
