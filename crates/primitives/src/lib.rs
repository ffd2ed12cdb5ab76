#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Core value types shared by the window tree, the command registry, the
//! event bus and the plugin wire protocol.

/// Display cells, formats and view buffers.
pub mod cell;
/// Docking slots, borders and natural size hints.
pub mod docking;
/// Screen geometry in terminal cells.
pub mod geometry;
/// Identifier types for windows, views and documents.
pub mod ids;
/// Key press types and canonical key names.
pub mod key;
/// Keyboard modes and interface languages.
pub mod mode;

pub use cell::{Buffer, Cell, CellFormat, Color};
pub use docking::{BorderStyle, Docking, Extent, NaturalSize};
pub use geometry::Rect;
pub use ids::{DocumentId, ViewId, WindowId};
pub use key::{Key, KeyCode, KeyParseError, Modifiers};
pub use mode::{KeyboardMode, Language, ParseEnumError};
