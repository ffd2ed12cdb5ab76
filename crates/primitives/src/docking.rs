//! Docking slots, borders and natural size hints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseEnumError;

/// Placement of a child window relative to its parent.
///
/// Every slot except `Floating` holds at most one child per parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Docking {
	/// Takes whatever space the side-docked siblings leave.
	Fill,
	/// Not constrained by the parent's layout.
	Floating,
	Left,
	Right,
	Top,
	Bottom,
}

impl Docking {
	/// Side slots in layout order.
	pub const SIDES: [Docking; 4] = [Docking::Top, Docking::Bottom, Docking::Left, Docking::Right];

	/// Returns true if at most one sibling may occupy this slot.
	pub const fn is_exclusive(self) -> bool {
		!matches!(self, Self::Floating)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Fill => "fill",
			Self::Floating => "floating",
			Self::Left => "left",
			Self::Right => "right",
			Self::Top => "top",
			Self::Bottom => "bottom",
		}
	}
}

impl fmt::Display for Docking {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Docking {
	type Err = ParseEnumError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"fill" => Ok(Self::Fill),
			"floating" => Ok(Self::Floating),
			"left" => Ok(Self::Left),
			"right" => Ok(Self::Right),
			"top" => Ok(Self::Top),
			"bottom" => Ok(Self::Bottom),
			_ => Err(ParseEnumError::new("docking", s)),
		}
	}
}

/// Window border decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
	#[default]
	None,
	Single,
	/// Drawn with double lines, still one cell wide.
	Double,
}

impl BorderStyle {
	/// Cells consumed on each edge.
	pub const fn width(self) -> u16 {
		match self {
			Self::None => 0,
			Self::Single | Self::Double => 1,
		}
	}
}

/// Desired size of a view along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extent {
	/// A fixed number of cells.
	Cells(u16),
	/// As large as the parent allows.
	#[default]
	Unbounded,
}

impl Extent {
	/// Resolves the extent against the space actually available.
	pub fn resolve(self, available: u16) -> u16 {
		match self {
			Self::Cells(n) => n.min(available),
			Self::Unbounded => available,
		}
	}
}

/// A view's preferred size; independent of the size it is finally given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NaturalSize {
	pub width: Extent,
	pub height: Extent,
}

impl NaturalSize {
	pub const UNBOUNDED: Self = Self {
		width: Extent::Unbounded,
		height: Extent::Unbounded,
	};

	pub const fn cells(width: u16, height: u16) -> Self {
		Self {
			width: Extent::Cells(width),
			height: Extent::Cells(height),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_floating_is_shared() {
		for docking in [Docking::Fill, Docking::Left, Docking::Right, Docking::Top, Docking::Bottom] {
			assert!(docking.is_exclusive(), "{docking} should be exclusive");
		}
		assert!(!Docking::Floating.is_exclusive());
	}

	#[test]
	fn docking_names_match_command_arguments() {
		assert_eq!("bottom".parse::<Docking>(), Ok(Docking::Bottom));
		assert!("middle".parse::<Docking>().is_err());
		assert_eq!(serde_json::to_string(&Docking::Floating).unwrap(), "\"floating\"");
	}

	#[test]
	fn extent_resolves_against_available_space() {
		assert_eq!(Extent::Cells(15).resolve(80), 15);
		assert_eq!(Extent::Cells(15).resolve(10), 10);
		assert_eq!(Extent::Unbounded.resolve(42), 42);
	}
}
