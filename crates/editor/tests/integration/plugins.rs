use tokio::io::{BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::runtime::Handle;
use wisp_editor::{CommandSender, SchedulerHandles};
use wisp_events::{EnqueuedCommand, Event, EventKind};
use wisp_primitives::{DocumentId, Docking};
use wisp_registry::CommandEditorOps;
use wisp_rpc::{HostMessage, JsonLines, PluginBridge, PluginMessage};

use crate::common::{Settled, scheduler, settle};

struct Plugin {
	reader: BufReader<ReadHalf<DuplexStream>>,
	writer: WriteHalf<DuplexStream>,
	codec: JsonLines,
}

impl Plugin {
	fn attach(bridge: &PluginBridge<CommandSender>) -> Self {
		let (host, plugin) = tokio::io::duplex(16 * 1024);
		let (host_read, host_write) = tokio::io::split(host);
		bridge.attach("test", host_read, host_write);
		let (reader, writer) = tokio::io::split(plugin);
		Self {
			reader: BufReader::new(reader),
			writer,
			codec: JsonLines::new(),
		}
	}

	async fn send(&mut self, message: PluginMessage) {
		self.codec.write_message(&mut self.writer, &message).await.unwrap();
	}

	async fn recv(&mut self) -> Option<HostMessage> {
		self.codec.read_message(&mut self.reader).await.unwrap()
	}
}

fn bridge(handles: &SchedulerHandles) -> PluginBridge<CommandSender> {
	PluginBridge::new(handles.events.clone(), handles.commands.clone(), Handle::current())
}

#[tokio::test(start_paused = true)]
async fn plugin_sees_windows_created_by_its_commands() {
	let (mut scheduler, handles) = scheduler();
	let bridge = bridge(&handles);
	let mut plugin = Plugin::attach(&bridge);

	plugin
		.send(PluginMessage::Subscribe {
			kinds: vec![EventKind::WindowCreated],
		})
		.await;
	plugin
		.send(PluginMessage::post_command(EnqueuedCommand::new("new", Vec::<String>::new())))
		.await;
	settle(&mut scheduler).await;

	let root = scheduler.editor().root_window();
	let doc = scheduler.editor().tree().child_at(root, Docking::Fill).unwrap();
	assert_eq!(
		plugin.recv().await,
		Some(HostMessage::Event {
			event: Event::WindowCreated { window: doc }
		})
	);
}

#[tokio::test(start_paused = true)]
async fn plugin_triggers_reach_native_listeners() {
	let (mut scheduler, handles) = scheduler();
	let bridge = bridge(&handles);
	let mut plugin = Plugin::attach(&bridge);

	assert!(
		handles
			.commands
			.post(EnqueuedCommand::new("editor_bootstrap_ui", Vec::<String>::new()))
			.await
	);
	settle(&mut scheduler).await;

	plugin
		.send(PluginMessage::Trigger {
			event: Event::DocumentCursorMoved {
				document: DocumentId(0),
				col: 5,
				row: 2,
			},
		})
		.await;
	settle(&mut scheduler).await;

	let tree = scheduler.editor().tree();
	let status = tree.child_at(tree.root(), Docking::Bottom).unwrap();
	let position = tree.child_at(status, Docking::Right).unwrap();
	assert_eq!(tree.view(position).unwrap().title(), "5,2");
}

#[tokio::test(start_paused = true)]
async fn plugin_can_quit_the_editor() {
	let (mut scheduler, handles) = scheduler();
	let bridge = bridge(&handles);
	let mut plugin = Plugin::attach(&bridge);

	plugin
		.send(PluginMessage::PostCommand {
			name: "quit".into(),
			args: vec![],
		})
		.await;
	assert_eq!(settle(&mut scheduler).await, Settled::Quit);

	bridge.shutdown();
	assert_eq!(plugin.recv().await, Some(HostMessage::Shutdown));
}
