//! Crossterm implementation of the editor's [`Terminal`] seam.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{self, MoveTo};
use crossterm::style::{self, Attribute, Colors, Print, SetAttribute, SetColors};
use crossterm::terminal::{self, ClearType};
use crossterm::{execute, queue};
use wisp_editor::{Surface, Terminal};
use wisp_primitives::{BorderStyle, CellFormat, Color};

/// The process's controlling terminal in raw mode on the alternate screen.
///
/// The previous terminal state is restored on drop.
pub struct CrosstermTerminal {
	out: Stdout,
	active: bool,
}

impl CrosstermTerminal {
	pub fn enter() -> io::Result<Self> {
		terminal::enable_raw_mode()?;
		let mut out = io::stdout();
		if let Err(error) = execute!(
			out,
			terminal::EnterAlternateScreen,
			cursor::Hide,
			terminal::Clear(ClearType::All)
		) {
			let _ = terminal::disable_raw_mode();
			return Err(error);
		}
		Ok(Self { out, active: true })
	}

	pub fn restore(&mut self) -> io::Result<()> {
		if !self.active {
			return Ok(());
		}
		self.active = false;
		execute!(self.out, style::ResetColor, terminal::LeaveAlternateScreen, cursor::Show)?;
		terminal::disable_raw_mode()
	}
}

impl Drop for CrosstermTerminal {
	fn drop(&mut self) {
		if let Err(error) = self.restore() {
			tracing::warn!(%error, "terminal.restore_failed");
		}
	}
}

impl Terminal for CrosstermTerminal {
	fn size(&self) -> io::Result<(u16, u16)> {
		terminal::size()
	}

	fn draw(&mut self, surfaces: &[Surface]) -> io::Result<()> {
		paint(&mut self.out, surfaces)
	}
}

/// Writes a frame to `out` and flushes it.
pub fn paint<W: Write>(out: &mut W, surfaces: &[Surface]) -> io::Result<()> {
	queue!(out, terminal::BeginSynchronizedUpdate)?;
	let mut current = None;
	for surface in surfaces {
		paint_border(out, surface, &mut current)?;
		paint_client(out, surface, &mut current)?;
	}
	queue!(
		out,
		SetAttribute(Attribute::Reset),
		style::ResetColor,
		terminal::EndSynchronizedUpdate
	)?;
	out.flush()
}

fn paint_client<W: Write>(out: &mut W, surface: &Surface, current: &mut Option<CellFormat>) -> io::Result<()> {
	let client = surface.client_area();
	for (dy, row) in (0..client.height).zip(surface.buffer.rows()) {
		queue!(out, MoveTo(client.x, client.y + dy))?;
		for cell in row.iter().take(usize::from(client.width)) {
			if cell.is_continuation() {
				continue;
			}
			apply_format(out, cell.format, current)?;
			queue!(out, Print(cell.ch))?;
		}
	}
	Ok(())
}

fn paint_border<W: Write>(out: &mut W, surface: &Surface, current: &mut Option<CellFormat>) -> io::Result<()> {
	let Some(glyphs) = BorderGlyphs::for_style(surface.border) else {
		return Ok(());
	};
	let area = surface.area;
	if area.width < 2 || area.height < 2 {
		return Ok(());
	}
	apply_format(out, surface.format, current)?;
	let inner = usize::from(area.width - 2);
	let horizontal = glyphs.horizontal.to_string().repeat(inner);
	let last_row = area.y + area.height - 1;
	let last_col = area.x + area.width - 1;

	queue!(
		out,
		MoveTo(area.x, area.y),
		Print(glyphs.top_left),
		Print(&horizontal),
		Print(glyphs.top_right)
	)?;
	for y in area.y + 1..last_row {
		queue!(
			out,
			MoveTo(area.x, y),
			Print(glyphs.vertical),
			MoveTo(last_col, y),
			Print(glyphs.vertical)
		)?;
	}
	queue!(
		out,
		MoveTo(area.x, last_row),
		Print(glyphs.bottom_left),
		Print(&horizontal),
		Print(glyphs.bottom_right)
	)
}

fn apply_format<W: Write>(out: &mut W, format: CellFormat, current: &mut Option<CellFormat>) -> io::Result<()> {
	if *current == Some(format) {
		return Ok(());
	}
	*current = Some(format);
	queue!(
		out,
		SetAttribute(Attribute::Reset),
		SetColors(Colors::new(map_color(format.fg), map_color(format.bg)))
	)?;
	if format.italic {
		queue!(out, SetAttribute(Attribute::Italic))?;
	}
	if format.underline {
		queue!(out, SetAttribute(Attribute::Underlined))?;
	}
	if format.blink {
		queue!(out, SetAttribute(Attribute::SlowBlink))?;
	}
	Ok(())
}

/// Maps a palette colour to the 16-colour ANSI set.
pub fn map_color(color: Color) -> style::Color {
	match color {
		Color::Default => style::Color::Reset,
		Color::Black => style::Color::Black,
		Color::Red => style::Color::DarkRed,
		Color::Green => style::Color::DarkGreen,
		Color::Yellow => style::Color::DarkYellow,
		Color::Blue => style::Color::DarkBlue,
		Color::Magenta => style::Color::DarkMagenta,
		Color::Cyan => style::Color::DarkCyan,
		Color::LightGray => style::Color::Grey,
		Color::DarkGray => style::Color::DarkGrey,
		Color::White => style::Color::White,
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BorderGlyphs {
	horizontal: char,
	vertical: char,
	top_left: char,
	top_right: char,
	bottom_left: char,
	bottom_right: char,
}

impl BorderGlyphs {
	fn for_style(style: BorderStyle) -> Option<Self> {
		match style {
			BorderStyle::None => None,
			BorderStyle::Single => Some(Self {
				horizontal: '─',
				vertical: '│',
				top_left: '┌',
				top_right: '┐',
				bottom_left: '└',
				bottom_right: '┘',
			}),
			BorderStyle::Double => Some(Self {
				horizontal: '═',
				vertical: '║',
				top_left: '╔',
				top_right: '╗',
				bottom_left: '╚',
				bottom_right: '╝',
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use wisp_primitives::{Buffer, Rect, WindowId};

	use super::*;

	fn surface(area: Rect, border: BorderStyle, text: &str) -> Surface {
		let client = area.inset(border.width());
		let mut buffer = Buffer::new(client.width, client.height);
		buffer.draw_str(0, 0, text, CellFormat::default());
		Surface {
			window: WindowId(1),
			area,
			border,
			format: CellFormat::new(Color::White, Color::Blue),
			buffer,
		}
	}

	fn painted(surfaces: &[Surface]) -> String {
		let mut out = Vec::new();
		paint(&mut out, surfaces).expect("writes to a Vec");
		String::from_utf8(out).expect("utf-8 output")
	}

	#[test]
	fn client_text_is_written() {
		let out = painted(&[surface(Rect::new(0, 0, 10, 1), BorderStyle::None, "hello")]);
		assert!(out.contains("hello"));
		assert!(!out.contains('┌'));
	}

	#[test]
	fn single_border_uses_light_box_drawing() {
		let out = painted(&[surface(Rect::new(2, 2, 6, 3), BorderStyle::Single, "ab")]);
		assert!(out.contains("┌────┐"));
		assert!(out.contains("└────┘"));
		assert!(out.contains('│'));
		assert!(out.contains("ab"));
	}

	#[test]
	fn double_border_uses_double_lines() {
		let out = painted(&[surface(Rect::new(0, 0, 4, 3), BorderStyle::Double, "")]);
		assert!(out.contains("╔══╗"));
		assert!(out.contains("╚══╝"));
	}

	#[test]
	fn borders_on_degenerate_areas_are_skipped() {
		let out = painted(&[surface(Rect::new(0, 0, 1, 5), BorderStyle::Single, "")]);
		assert!(!out.contains('┌'));
	}

	#[test]
	fn wide_characters_are_printed_once() {
		let out = painted(&[surface(Rect::new(0, 0, 4, 1), BorderStyle::None, "日本")]);
		assert_eq!(out.matches('日').count(), 1);
		assert!(!out.contains('\0'));
	}

	#[test]
	fn palette_maps_to_ansi_colours() {
		assert_eq!(map_color(Color::Default), style::Color::Reset);
		assert_eq!(map_color(Color::Red), style::Color::DarkRed);
		assert_eq!(map_color(Color::LightGray), style::Color::Grey);
	}
}
