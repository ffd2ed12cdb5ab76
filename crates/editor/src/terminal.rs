//! The seam between the scheduler and the physical terminal.

use std::io;

use wisp_primitives::{BorderStyle, Buffer, CellFormat, Key, Rect, WindowId};

/// Input delivered by the terminal backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
	Key(Key),
	/// New terminal size in cells.
	Resize { width: u16, height: u16 },
	/// The backend failed to read input; shown to the user as an alert.
	Error(String),
}

/// One window's contribution to a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
	pub window: WindowId,
	/// Absolute rectangle, border included.
	pub area: Rect,
	pub border: BorderStyle,
	/// Format the border is drawn with.
	pub format: CellFormat,
	/// Client-area contents, sized to `area` minus the border.
	pub buffer: Buffer,
}

impl Surface {
	pub fn client_area(&self) -> Rect {
		self.area.inset(self.border.width())
	}
}

/// A terminal the scheduler can draw frames on.
pub trait Terminal {
	/// Current size in cells.
	fn size(&self) -> io::Result<(u16, u16)>;

	/// Paints `surfaces` in order; later surfaces cover earlier ones.
	fn draw(&mut self, surfaces: &[Surface]) -> io::Result<()>;
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
	fn size(&self) -> io::Result<(u16, u16)> {
		(**self).size()
	}

	fn draw(&mut self, surfaces: &[Surface]) -> io::Result<()> {
		(**self).draw(surfaces)
	}
}
