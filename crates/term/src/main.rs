#![cfg_attr(test, allow(unused_crate_dependencies))]
//! `wisp`: runs the editor on the controlling terminal.

mod backend;
mod cli;
mod input;
mod logging;

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::runtime::Handle;
use wisp_editor::{CommandSender, EditorConfig, Scheduler};
use wisp_rpc::PluginBridge;

use crate::backend::CrosstermTerminal;
use crate::cli::Cli;

/// Time given to plugins to read `Shutdown` before the runtime stops.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	logging::init(cli.verbose)?;

	let config = load_config(cli.config.as_deref())?;
	let plugin_dir = if cli.no_plugin || !config.plugins.enabled {
		None
	} else {
		config.plugin_dir()
	};

	let terminal = CrosstermTerminal::enter().context("preparing the terminal")?;
	let (scheduler, handles) = Scheduler::new(config, terminal);
	input::spawn(handles.terminal.clone()).context("starting the input thread")?;

	let bridge = PluginBridge::new(handles.events.clone(), handles.commands.clone(), Handle::current());
	if let Some(dir) = plugin_dir {
		start_plugins(&bridge, &dir);
	}

	let commands = handles.commands.clone();
	let startup = cli.startup_commands();
	tokio::spawn(async move {
		for command in startup {
			if !commands.post(command).await {
				break;
			}
		}
	});

	let code = scheduler.run().await;
	tracing::info!(code, "wisp.exit");
	if bridge.plugin_count() > 0 {
		bridge.shutdown();
		tokio::time::sleep(SHUTDOWN_GRACE).await;
	}
	Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
	let Some(path) = path.map(Path::to_path_buf).or_else(EditorConfig::default_path) else {
		tracing::debug!("config.no_config_dir");
		return Ok(EditorConfig::default());
	};
	EditorConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

/// Spawns every executable in `dir`. Failures are logged and skipped.
fn start_plugins(bridge: &PluginBridge<CommandSender>, dir: &Path) {
	let paths = match wisp_rpc::discover(dir) {
		Ok(paths) => paths,
		Err(error) => {
			tracing::warn!(dir = %dir.display(), %error, "plugin.discover_failed");
			return;
		}
	};
	for path in paths {
		match bridge.spawn_process(&path) {
			Ok(id) => tracing::info!(plugin = %id, path = %path.display(), "plugin.started"),
			Err(error) => tracing::warn!(path = %path.display(), %error, "plugin.spawn_failed"),
		}
	}
}
