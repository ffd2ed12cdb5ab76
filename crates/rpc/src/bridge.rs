//! Plugin lifecycle: attach, message pumps, subscriptions and detach.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::process::{Child, Command};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use wisp_events::{EnqueuedCommand, EventKind, EventListener, EventRegistry};

use crate::{HostMessage, JsonLines, PluginMessage, Result, RpcError};

/// Destination for commands posted by plugins.
///
/// Posting applies back-pressure: the future completes once the command is
/// queued. Returns false if the host queue is gone.
pub trait CommandSink: Clone + Send + Sync + 'static {
	fn post(&self, command: EnqueuedCommand) -> impl Future<Output = bool> + Send;
}

impl CommandSink for mpsc::Sender<EnqueuedCommand> {
	async fn post(&self, command: EnqueuedCommand) -> bool {
		self.send(command).await.is_ok()
	}
}

/// Host messages buffered per plugin. A plugin that falls this far behind
/// on reading its input is detached.
pub const OUTBOUND_CAPACITY: usize = 256;

/// Host-assigned plugin identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginId(pub u64);

impl fmt::Display for PluginId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "plugin-{}", self.0)
	}
}

/// Snapshot of a live plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
	pub id: PluginId,
	pub name: String,
	pub version: Option<String>,
	pub subscriptions: Vec<EventKind>,
}

struct Plugin {
	info: PluginInfo,
	outbound: mpsc::Sender<HostMessage>,
	listeners: Vec<EventListener>,
	child: Option<Child>,
}

struct Shared<S> {
	events: EventRegistry,
	sink: S,
	plugins: Mutex<HashMap<PluginId, Plugin>>,
	next_id: AtomicU64,
}

impl<S: CommandSink> Shared<S> {
	/// Removes the plugin and unregisters every listener it owned.
	///
	/// Safe to call repeatedly; only the first call has an effect.
	fn detach(&self, id: PluginId, reason: &str) {
		let Some(mut plugin) = self.plugins.lock().remove(&id) else {
			return;
		};
		for listener in plugin.listeners.drain(..) {
			if let Err(error) = listener.close() {
				tracing::debug!(plugin = %id, %error, "plugin.listener_close");
			}
		}
		if let Some(child) = plugin.child.as_mut() {
			let _ = child.start_kill();
		}
		tracing::info!(plugin = %id, name = %plugin.info.name, reason, "plugin.detached");
	}

	fn subscribe(self: &Arc<Self>, id: PluginId, kinds: Vec<EventKind>) {
		let mut plugins = self.plugins.lock();
		let Some(plugin) = plugins.get_mut(&id) else {
			return;
		};
		for kind in kinds {
			if plugin.info.subscriptions.contains(&kind) {
				continue;
			}
			let outbound = plugin.outbound.clone();
			let shared = Arc::downgrade(self);
			let listener = self.events.register(kind, move |event| {
				let message = HostMessage::Event { event: event.clone() };
				match outbound.try_send(message) {
					Ok(()) => {}
					Err(TrySendError::Full(_)) => forward_failed(&shared, id, "outbound queue full"),
					Err(TrySendError::Closed(_)) => forward_failed(&shared, id, "outbound queue closed"),
				}
			});
			plugin.info.subscriptions.push(kind);
			plugin.listeners.push(listener);
			tracing::debug!(plugin = %id, %kind, "plugin.subscribe");
		}
	}

	/// Returns false when the plugin should be detached.
	async fn handle(self: &Arc<Self>, id: PluginId, message: PluginMessage) -> bool {
		match message {
			PluginMessage::Hello { name, version } => {
				tracing::info!(plugin = %id, %name, %version, "plugin.hello");
				if let Some(plugin) = self.plugins.lock().get_mut(&id) {
					plugin.info.name = name;
					plugin.info.version = Some(version);
				}
				true
			}
			PluginMessage::Subscribe { kinds } => {
				self.subscribe(id, kinds);
				true
			}
			PluginMessage::Trigger { event } => {
				tracing::trace!(plugin = %id, kind = %event.kind(), "plugin.trigger");
				self.events.trigger(event);
				true
			}
			PluginMessage::PostCommand { name, args } => {
				tracing::debug!(plugin = %id, command = %name, "plugin.post_command");
				self.sink.post(EnqueuedCommand { name, args }).await
			}
		}
	}
}

fn forward_failed<S: CommandSink>(shared: &Weak<Shared<S>>, id: PluginId, reason: &str) {
	if let Some(shared) = shared.upgrade() {
		shared.detach(id, reason);
	}
}

async fn read_loop<S, R>(shared: Arc<Shared<S>>, id: PluginId, reader: R)
where
	S: CommandSink,
	R: AsyncRead + Unpin + Send,
{
	let mut reader = BufReader::new(reader);
	let mut codec = JsonLines::new();
	let reason = loop {
		match codec.read_message::<PluginMessage>(&mut reader).await {
			Ok(Some(message)) => {
				if !shared.handle(id, message).await {
					break "host queue closed".to_string();
				}
			}
			Ok(None) => break "end of stream".to_string(),
			Err(error) => {
				tracing::warn!(plugin = %id, %error, "plugin.read_failed");
				break error.to_string();
			}
		}
	};
	shared.detach(id, &reason);
}

async fn write_loop<S, W>(shared: Weak<Shared<S>>, id: PluginId, mut writer: W, mut rx: mpsc::Receiver<HostMessage>)
where
	S: CommandSink,
	W: AsyncWrite + Unpin + Send,
{
	let mut codec = JsonLines::new();
	while let Some(message) = rx.recv().await {
		let last = message == HostMessage::Shutdown;
		if let Err(error) = codec.write_message(&mut writer, &message).await {
			tracing::warn!(plugin = %id, %error, "plugin.write_failed");
			if let Some(shared) = shared.upgrade() {
				shared.detach(id, "write failed");
			}
			return;
		}
		if last {
			return;
		}
	}
}

/// Connects plugins to the event registry and the host command queue.
///
/// Cheap to clone. Plugin I/O runs on tasks spawned on the given runtime
/// handle; nothing here blocks the control thread.
pub struct PluginBridge<S> {
	shared: Arc<Shared<S>>,
	handle: Handle,
}

impl<S> Clone for PluginBridge<S> {
	fn clone(&self) -> Self {
		Self {
			shared: self.shared.clone(),
			handle: self.handle.clone(),
		}
	}
}

impl<S: CommandSink> PluginBridge<S> {
	pub fn new(events: EventRegistry, sink: S, handle: Handle) -> Self {
		Self {
			shared: Arc::new(Shared {
				events,
				sink,
				plugins: Mutex::new(HashMap::default()),
				next_id: AtomicU64::new(1),
			}),
			handle,
		}
	}

	/// The registry plugin triggers feed into.
	pub fn events(&self) -> &EventRegistry {
		&self.shared.events
	}

	/// Registers a plugin speaking over `reader`/`writer` and starts its
	/// message pumps.
	pub fn attach<R, W>(&self, name: &str, reader: R, writer: W) -> PluginId
	where
		R: AsyncRead + Unpin + Send + 'static,
		W: AsyncWrite + Unpin + Send + 'static,
	{
		self.attach_inner(name, reader, writer, None)
	}

	fn attach_inner<R, W>(&self, name: &str, reader: R, writer: W, child: Option<Child>) -> PluginId
	where
		R: AsyncRead + Unpin + Send + 'static,
		W: AsyncWrite + Unpin + Send + 'static,
	{
		let id = PluginId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
		let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
		self.shared.plugins.lock().insert(
			id,
			Plugin {
				info: PluginInfo {
					id,
					name: name.to_string(),
					version: None,
					subscriptions: Vec::new(),
				},
				outbound: tx,
				listeners: Vec::new(),
				child,
			},
		);
		tracing::info!(plugin = %id, name, "plugin.attached");

		self.handle
			.spawn(write_loop(Arc::downgrade(&self.shared), id, writer, rx));
		self.handle.spawn(read_loop(self.shared.clone(), id, reader));
		id
	}

	/// Starts the executable at `path` with piped stdio and attaches it.
	///
	/// The child's stderr is forwarded to the log line by line.
	pub fn spawn_process(&self, path: &Path) -> Result<PluginId> {
		let _guard = self.handle.enter();
		let mut child = Command::new(path)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true)
			.spawn()
			.map_err(|source| RpcError::Spawn {
				path: path.to_path_buf(),
				source,
			})?;
		let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
			return Err(RpcError::Closed);
		};
		let name = path
			.file_name()
			.map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

		if let Some(stderr) = child.stderr.take() {
			let name = name.clone();
			self.handle.spawn(async move {
				let mut lines = BufReader::new(stderr).lines();
				while let Ok(Some(line)) = lines.next_line().await {
					tracing::debug!(plugin = %name, "plugin.stderr: {line}");
				}
			});
		}

		Ok(self.attach_inner(&name, stdout, stdin, Some(child)))
	}

	/// Sends `Shutdown` to every live plugin.
	pub fn shutdown(&self) {
		let plugins = self.shared.plugins.lock();
		for plugin in plugins.values() {
			if plugin.outbound.try_send(HostMessage::Shutdown).is_err() {
				tracing::debug!(plugin = %plugin.info.id, "plugin.shutdown_dropped");
			}
		}
		tracing::info!(plugins = plugins.len(), "plugin.shutdown");
	}

	/// Detaches a plugin as if its stream had closed.
	pub fn detach(&self, id: PluginId) {
		self.shared.detach(id, "detached by host");
	}

	pub fn plugins(&self) -> Vec<PluginInfo> {
		let mut plugins: Vec<PluginInfo> = self.shared.plugins.lock().values().map(|p| p.info.clone()).collect();
		plugins.sort_by_key(|p| p.id);
		plugins
	}

	pub fn plugin_count(&self) -> usize {
		self.shared.plugins.lock().len()
	}
}

/// Lists plugin executables in `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
	let entries = match std::fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
		Err(error) => return Err(error.into()),
	};
	let mut found = Vec::new();
	for entry in entries {
		let entry = entry?;
		let metadata = entry.metadata()?;
		if metadata.is_file() && is_executable(&metadata) {
			found.push(entry.path());
		}
	}
	found.sort();
	tracing::debug!(dir = %dir.display(), count = found.len(), "plugin.discover");
	Ok(found)
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
	use std::os::unix::fs::PermissionsExt;
	metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
	true
}
