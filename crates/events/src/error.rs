use thiserror::Error;

use crate::ListenerId;

/// Errors reported by the event registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
	/// The listener was already unregistered, or its registry is gone.
	#[error("listener {0} already removed")]
	ListenerAlreadyRemoved(ListenerId),
}

pub type Result<T> = std::result::Result<T, EventError>;
