//! Terminal input: a dedicated OS thread reading crossterm events.

use std::io;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use wisp_editor::TerminalEvent;
use wisp_primitives::{Key, KeyCode, Modifiers};

/// Starts the input thread.
///
/// Events are forwarded with `blocking_send`, so a full terminal channel
/// stalls reading rather than dropping input. The thread ends when the
/// scheduler drops its receiver or after a read error has been reported.
pub fn spawn(tx: mpsc::Sender<TerminalEvent>) -> io::Result<JoinHandle<()>> {
	thread::Builder::new().name("wisp-input".into()).spawn(move || {
		loop {
			let (event, fatal) = match event::read() {
				Ok(event) => match translate(event) {
					Some(event) => (event, false),
					None => continue,
				},
				Err(error) => {
					tracing::error!(%error, "input.read_failed");
					(TerminalEvent::Error(error.to_string()), true)
				}
			};
			if tx.blocking_send(event).is_err() || fatal {
				break;
			}
		}
		tracing::debug!("input.stopped");
	})
}

/// Maps a crossterm event to a terminal event. Mouse, focus and paste
/// events are dropped.
pub fn translate(event: Event) -> Option<TerminalEvent> {
	match event {
		Event::Key(key) => translate_key(key).map(TerminalEvent::Key),
		Event::Resize(width, height) => Some(TerminalEvent::Resize { width, height }),
		_ => None,
	}
}

/// Only presses count; repeats and releases are ignored.
pub fn translate_key(event: KeyEvent) -> Option<Key> {
	use crossterm::event::KeyCode as Ct;

	if event.kind != KeyEventKind::Press {
		return None;
	}
	let mut modifiers = Modifiers {
		ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
		alt: event.modifiers.contains(KeyModifiers::ALT),
		shift: event.modifiers.contains(KeyModifiers::SHIFT),
	};
	let code = match event.code {
		Ct::Char(c) => {
			// Shift is already folded into the character; chords are lowercase.
			modifiers.shift = false;
			if modifiers.ctrl || modifiers.alt {
				KeyCode::Char(c.to_ascii_lowercase())
			} else {
				KeyCode::Char(c)
			}
		}
		Ct::Enter => KeyCode::Enter,
		Ct::Esc => KeyCode::Escape,
		Ct::Backspace => KeyCode::Backspace,
		Ct::Tab => KeyCode::Tab,
		Ct::BackTab => {
			modifiers.shift = true;
			KeyCode::Tab
		}
		Ct::Delete => KeyCode::Delete,
		Ct::Insert => KeyCode::Insert,
		Ct::Home => KeyCode::Home,
		Ct::End => KeyCode::End,
		Ct::PageUp => KeyCode::PageUp,
		Ct::PageDown => KeyCode::PageDown,
		Ct::Up => KeyCode::Up,
		Ct::Down => KeyCode::Down,
		Ct::Left => KeyCode::Left,
		Ct::Right => KeyCode::Right,
		Ct::F(n @ 1..=12) => KeyCode::F(n),
		_ => return None,
	};
	Some(Key::new(code, modifiers))
}
