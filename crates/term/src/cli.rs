//! CLI schema for the wisp binary.

use std::path::PathBuf;

use clap::Parser;
use wisp_events::EnqueuedCommand;

#[derive(Parser, Debug)]
#[command(name = "wisp")]
#[command(about = "A terminal editor with out-of-process plugins")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Treat each argument as a command line to run at start-up
	#[arg(short = 'c', requires = "args")]
	pub commands: bool,

	/// Do not start plugins
	#[arg(long)]
	pub no_plugin: bool,

	/// Write a debug log to wisp.log in the working directory
	#[arg(long)]
	pub verbose: bool,

	/// Configuration file (defaults to <config dir>/wisp/config.toml)
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Files to open, or commands with -c
	pub args: Vec<String>,
}

impl Cli {
	/// Commands posted before the loop starts, in order.
	///
	/// `editor_bootstrap_ui` comes first and `log_window_tree` last. In
	/// between: each argument as a command line with `-c`, otherwise an
	/// `open` per argument, or `new` when there are none.
	pub fn startup_commands(&self) -> Vec<EnqueuedCommand> {
		let no_args: [&str; 0] = [];
		let mut commands = vec![EnqueuedCommand::new("editor_bootstrap_ui", no_args)];
		if self.commands {
			commands.extend(self.args.iter().filter_map(|line| EnqueuedCommand::parse_line(line)));
		} else if self.args.is_empty() {
			commands.push(EnqueuedCommand::new("new", no_args));
		} else {
			commands.extend(self.args.iter().map(|path| EnqueuedCommand::new("open", [path.as_str()])));
		}
		commands.push(EnqueuedCommand::new("log_window_tree", no_args));
		commands
	}
}
