//! Identifier types for windows, views and documents.
//!
//! Identifiers are allocated from monotonically increasing counters and are
//! never reused, so a stale id (for example one captured by a delayed
//! `window_close`) can only miss, never hit a different entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
	($(#[$meta:meta])* $name:ident, $kind:literal) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u64);

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = crate::ParseEnumError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.parse::<u64>().map($name).map_err(|_| crate::ParseEnumError::new($kind, s))
			}
		}
	};
}

define_id!(
	/// Unique identifier for a window node.
	WindowId,
	"window id"
);
define_id!(
	/// Unique identifier for a view.
	ViewId,
	"view id"
);
define_id!(
	/// Identifier of a document owned by the text-buffer collaborator.
	DocumentId,
	"document id"
);
