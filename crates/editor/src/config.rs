//! Editor configuration loaded from `config.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use wisp_primitives::{Key, KeyboardMode, Language};

use crate::ConfigError;

/// Tunables and start-up bindings for the editor.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	/// Queued commands and keys before producers block.
	pub command_queue_capacity: usize,
	/// Delay between the first draw request and the redraw.
	pub draw_debounce_ms: u64,
	/// Lifetime of an alert infobar.
	pub alert_dismiss_secs: u64,
	pub language: Language,
	pub keyboard_mode: KeyboardMode,
	/// Key name to command name, per mode, bound on the root view.
	pub keys: BTreeMap<KeyboardMode, BTreeMap<String, String>>,
	/// Alias name to target command, registered on the root view.
	pub aliases: BTreeMap<String, String>,
	pub plugins: PluginsConfig,
}

/// `[plugins]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsConfig {
	pub enabled: bool,
	/// Overrides `<config_dir>/wisp/plugins`.
	pub dir: Option<PathBuf>,
}

impl Default for PluginsConfig {
	fn default() -> Self {
		Self { enabled: true, dir: None }
	}
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			command_queue_capacity: 500,
			draw_debounce_ms: 5,
			alert_dismiss_secs: 5,
			language: Language::default(),
			keyboard_mode: KeyboardMode::default(),
			keys: BTreeMap::new(),
			aliases: BTreeMap::new(),
			plugins: PluginsConfig::default(),
		}
	}
}

impl EditorConfig {
	/// `<config_dir>/wisp/config.toml`, if the platform has a config directory.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("wisp").join("config.toml"))
	}

	/// Loads and validates `path`. A missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = match std::fs::read_to_string(path) {
			Ok(text) => text,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "config.missing");
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(ConfigError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		let config = Self::from_toml(&text)?;
		tracing::debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}

	/// Parses and validates a TOML document.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.command_queue_capacity == 0 {
			return Err(invalid("command_queue_capacity", "must be at least 1"));
		}
		if self.keyboard_mode == KeyboardMode::All {
			return Err(invalid("keyboard_mode", "expected 'command' or 'edit'"));
		}
		self.key_bindings().map(|_| ())
	}

	pub fn draw_debounce(&self) -> Duration {
		Duration::from_millis(self.draw_debounce_ms)
	}

	pub fn alert_dismiss(&self) -> Duration {
		Duration::from_secs(self.alert_dismiss_secs)
	}

	/// Parsed `[keys.<mode>]` entries in a stable order.
	pub fn key_bindings(&self) -> Result<Vec<(KeyboardMode, Key, String)>, ConfigError> {
		let mut out = Vec::new();
		for (mode, table) in &self.keys {
			for (name, command) in table {
				let key = name
					.parse::<Key>()
					.map_err(|error| invalid(&format!("keys.{mode}.{name}"), &error.to_string()))?;
				out.push((*mode, key, command.clone()));
			}
		}
		Ok(out)
	}

	/// Directory scanned for plugin executables.
	pub fn plugin_dir(&self) -> Option<PathBuf> {
		self.plugins
			.dir
			.clone()
			.or_else(|| dirs::config_dir().map(|dir| dir.join("wisp").join("plugins")))
	}
}

fn invalid(key: &str, reason: &str) -> ConfigError {
	ConfigError::InvalidValue {
		key: key.to_string(),
		reason: reason.to_string(),
	}
}
