//! Built-in view factories.

use std::path::PathBuf;

use wisp_events::{EnqueuedCommand, EventRegistry};
use wisp_primitives::{BorderStyle, CellFormat, Color, NaturalSize, WindowId};
use wisp_registry::CommandEditorOps;

use super::{View, ViewFactories, ViewKind};
use crate::{Editor, WindowError};

/// Title of a document view with no backing file.
pub const UNTITLED: &str = "New document";

pub fn register_default_factories(factories: &mut ViewFactories) {
	factories.register("root", root);
	factories.register("document", document);
	factories.register("command", command);
	factories.register("infobar_alert", infobar_alert);
	factories.register("status_root", status_root);
	factories.register("status_name", status_name);
	factories.register("status_mode", status_mode);
	factories.register("status_position", status_position);
}

/// The view hosted by the root window.
pub fn root_view() -> View {
	View::new("Root", ViewKind::Static, NaturalSize::UNBOUNDED)
}

fn root(_: &EventRegistry, _: &[String]) -> Result<View, WindowError> {
	Ok(root_view())
}

fn document(_: &EventRegistry, args: &[String]) -> Result<View, WindowError> {
	let path = args.first().map(PathBuf::from);
	let title = path.as_ref().map_or_else(|| UNTITLED.to_string(), |path| path.display().to_string());
	Ok(View::new(title, ViewKind::Document { path }, NaturalSize::UNBOUNDED).on_attach(attach_document))
}

fn attach_document(editor: &mut Editor, window: WindowId) {
	editor.allocate_document(window);
}

fn command(_: &EventRegistry, _: &[String]) -> Result<View, WindowError> {
	Ok(View::new("Command", ViewKind::CommandPrompt, NaturalSize::cells(32, 3)).with_border(BorderStyle::Single))
}

fn status_root(_: &EventRegistry, _: &[String]) -> Result<View, WindowError> {
	let format = CellFormat::new(Color::Red, Color::LightGray);
	Ok(View::static_disabled("Status Root", NaturalSize::cells(1, 1))
		.with_format(format)
		.on_attach(attach_status_root))
}

fn attach_status_root(editor: &mut Editor, window: WindowId) {
	let id = window.to_string();
	let batch = [("left", "status_name"), ("right", "status_position"), ("fill", "status_mode")]
		.into_iter()
		.map(|(docking, factory)| EnqueuedCommand::new("window_new", [id.as_str(), docking, factory]))
		.collect();
	editor.events().trigger_command_batch_submitted(batch);
}

fn status_name(_: &EventRegistry, _: &[String]) -> Result<View, WindowError> {
	Ok(View::new("Status Name", ViewKind::ActiveWindowName, NaturalSize::cells(15, 1)).disabled(true))
}

fn status_mode(events: &EventRegistry, _: &[String]) -> Result<View, WindowError> {
	let mut view = View::static_disabled("Status Mode", NaturalSize::cells(10, 1))
		.inherit_format()
		.on_attach(attach_status_mode);
	let title = view.title_handle();
	view.own_listener(events.register_editor_keyboard_mode_changed(move |mode| {
		*title.lock() = mode.to_string();
	}));
	Ok(view)
}

fn attach_status_mode(editor: &mut Editor, window: WindowId) {
	let mode = editor.keyboard_mode();
	if let Some(view) = editor.tree().view(window) {
		view.set_title(mode.to_string());
	}
}

fn status_position(events: &EventRegistry, _: &[String]) -> Result<View, WindowError> {
	let mut view = View::static_disabled("Status Position", NaturalSize::cells(15, 1)).inherit_format();
	let title = view.title_handle();
	view.own_listener(events.register_document_cursor_moved(move |_, col, row| {
		*title.lock() = format!("{col},{row}");
	}));
	Ok(view)
}

fn infobar_alert(_: &EventRegistry, args: &[String]) -> Result<View, WindowError> {
	let title = format!("Alert: {}", args.first().map_or("", String::as_str));
	let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
	Ok(View::static_disabled(title, NaturalSize::cells(width, 1)).on_attach(attach_infobar_alert))
}

fn attach_infobar_alert(editor: &mut Editor, window: WindowId) {
	let delay = editor.config().alert_dismiss();
	editor.schedule_command(delay, EnqueuedCommand::new("window_close", [window.to_string()]));
}
