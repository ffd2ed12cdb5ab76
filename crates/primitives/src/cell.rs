//! Terminal cells and the off-screen buffers views draw into.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// Terminal palette colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
	/// The terminal's own default.
	#[default]
	Default,
	Black,
	Red,
	Green,
	Yellow,
	Blue,
	Magenta,
	Cyan,
	LightGray,
	DarkGray,
	White,
}

/// Visual attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellFormat {
	pub fg: Color,
	pub bg: Color,
	pub italic: bool,
	pub underline: bool,
	pub blink: bool,
}

impl CellFormat {
	pub const fn new(fg: Color, bg: Color) -> Self {
		Self {
			fg,
			bg,
			italic: false,
			underline: false,
			blink: false,
		}
	}

	pub fn italic(self) -> Self {
		Self { italic: true, ..self }
	}

	pub fn underline(self) -> Self {
		Self {
			underline: true,
			..self
		}
	}

	pub fn blink(self) -> Self {
		Self { blink: true, ..self }
	}

	/// True when drawing with this format is indistinguishable from the default.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
	/// `'\0'` marks the trailing half of a double-width character.
	pub ch: char,
	pub format: CellFormat,
}

impl Cell {
	pub const CONTINUATION: char = '\0';

	pub const fn new(ch: char, format: CellFormat) -> Self {
		Self { ch, format }
	}

	pub const fn is_continuation(&self) -> bool {
		self.ch == Self::CONTINUATION
	}
}

impl Default for Cell {
	fn default() -> Self {
		Self::new(' ', CellFormat::default())
	}
}

/// A rectangular grid of cells, addressed relative to its own origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
	width: u16,
	height: u16,
	cells: Vec<Cell>,
}

impl Buffer {
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
		}
	}

	pub fn width(&self) -> u16 {
		self.width
	}

	pub fn height(&self) -> u16 {
		self.height
	}

	fn index(&self, x: u16, y: u16) -> Option<usize> {
		(x < self.width && y < self.height).then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
	}

	pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
		self.index(x, y).map(|i| &self.cells[i])
	}

	/// Writes a cell; out-of-bounds writes are ignored.
	pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
		if let Some(i) = self.index(x, y) {
			self.cells[i] = cell;
		}
	}

	/// Resets every cell to a blank in `format`.
	pub fn fill(&mut self, format: CellFormat) {
		self.cells.fill(Cell::new(' ', format));
	}

	/// Draws `text` on row `y` starting at column `x`, clipped to the buffer.
	///
	/// Returns the number of columns written. Control characters are skipped;
	/// a double-width character that would straddle the right edge is dropped.
	pub fn draw_str(&mut self, x: u16, y: u16, text: &str, format: CellFormat) -> u16 {
		if y >= self.height {
			return 0;
		}
		let mut col = x;
		for ch in text.chars() {
			let Some(w) = ch.width() else { continue };
			if w == 0 {
				continue;
			}
			let w = w as u16;
			if col.saturating_add(w) > self.width {
				break;
			}
			self.set(col, y, Cell::new(ch, format));
			if w == 2 {
				self.set(col + 1, y, Cell::new(Cell::CONTINUATION, format));
			}
			col += w;
		}
		col - x
	}

	/// The text of row `y` with continuation cells removed.
	pub fn row_text(&self, y: u16) -> String {
		(0..self.width)
			.filter_map(|x| self.get(x, y))
			.filter(|c| !c.is_continuation())
			.map(|c| c.ch)
			.collect()
	}

	pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
		self.cells.chunks(usize::from(self.width.max(1)))
	}
}
