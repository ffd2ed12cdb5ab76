//! Screen geometry in terminal cells.
//!
//! All rectangles are absolute screen coordinates. Edges follow the usual
//! half-open convention: `left`/`top` are inclusive, `right`/`bottom` are
//! exclusive.

use serde::{Deserialize, Serialize};


/// An axis-aligned rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	pub x: u16,
	pub y: u16,
	pub width: u16,
	pub height: u16,
}

impl Rect {
	/// The empty rectangle at the origin.
	pub const ZERO: Self = Self {
		x: 0,
		y: 0,
		width: 0,
		height: 0,
	};

	/// Creates a rectangle, clamping the size so the far edges never overflow.
	pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
		let max_w = u16::MAX - x;
		let max_h = u16::MAX - y;
		Self {
			x,
			y,
			width: if width > max_w { max_w } else { width },
			height: if height > max_h { max_h } else { height },
		}
	}

	pub const fn left(&self) -> u16 {
		self.x
	}

	pub const fn right(&self) -> u16 {
		self.x + self.width
	}

	pub const fn top(&self) -> u16 {
		self.y
	}

	pub const fn bottom(&self) -> u16 {
		self.y + self.height
	}

	/// Number of cells covered.
	pub const fn area(&self) -> u32 {
		self.width as u32 * self.height as u32
	}

	pub const fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	/// Returns true if `other` lies entirely inside this rectangle.
	///
	/// Empty rectangles positioned on or inside the edges count as contained.
	pub const fn contains_rect(&self, other: &Rect) -> bool {
		other.left() >= self.left() && other.right() <= self.right() && other.top() >= self.top() && other.bottom() <= self.bottom()
	}

	/// Shrinks every edge by `amount`, collapsing to an empty rectangle
	/// anchored inside the original when there is not enough room.
	pub fn inset(&self, amount: u16) -> Rect {
		let dx = amount.min(self.width / 2);
		let dy = amount.min(self.height / 2);
		Rect::new(
			self.x + dx,
			self.y + dy,
			self.width.saturating_sub(amount.saturating_mul(2)),
			self.height.saturating_sub(amount.saturating_mul(2)),
		)
	}

	/// Returns a `width` x `height` rectangle centred in this one, clamped to fit.
	pub fn centered(&self, width: u16, height: u16) -> Rect {
		let width = width.min(self.width);
		let height = height.min(self.height);
		Rect::new(self.x + (self.width - width) / 2, self.y + (self.height - height) / 2, width, height)
	}

	/// Splits off up to `height` rows from the top edge.
	///
	/// Returns `(taken, remaining)`.
	pub fn take_top(&self, height: u16) -> (Rect, Rect) {
		let h = height.min(self.height);
		(
			Rect::new(self.x, self.y, self.width, h),
			Rect::new(self.x, self.y + h, self.width, self.height - h),
		)
	}

	/// Splits off up to `height` rows from the bottom edge.
	pub fn take_bottom(&self, height: u16) -> (Rect, Rect) {
		let h = height.min(self.height);
		(
			Rect::new(self.x, self.bottom() - h, self.width, h),
			Rect::new(self.x, self.y, self.width, self.height - h),
		)
	}

	/// Splits off up to `width` columns from the left edge.
	pub fn take_left(&self, width: u16) -> (Rect, Rect) {
		let w = width.min(self.width);
		(
			Rect::new(self.x, self.y, w, self.height),
			Rect::new(self.x + w, self.y, self.width - w, self.height),
		)
	}

	/// Splits off up to `width` columns from the right edge.
	pub fn take_right(&self, width: u16) -> (Rect, Rect) {
		let w = width.min(self.width);
		(
			Rect::new(self.right() - w, self.y, w, self.height),
			Rect::new(self.x, self.y, self.width - w, self.height),
		)
	}
}

impl std::fmt::Display for Rect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
	}
}
