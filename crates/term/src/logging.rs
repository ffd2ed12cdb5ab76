//! Log setup for the host binary.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log file written in the working directory with `--verbose`.
pub const LOG_FILE: &str = "wisp.log";

/// Installs the global subscriber.
///
/// Without `verbose` nothing is installed and every event is discarded, so
/// no output can reach the terminal the editor draws on.
pub fn init(verbose: bool) -> anyhow::Result<()> {
	if !verbose {
		return Ok(());
	}
	let path = Path::new(LOG_FILE);
	let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

	let file_layer = tracing_subscriber::fmt::layer()
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true);

	tracing_subscriber::registry()
		.with(filter)
		.with(file_layer)
		.try_init()
		.context("installing the log subscriber")?;
	tracing::info!(pid = std::process::id(), "wisp.start");
	Ok(())
}
