use thiserror::Error;

/// Errors a command handler can report back to the dispatcher.
///
/// None of these are fatal: the dispatcher turns each into an `alert`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	/// No command resolved after walking every ancestor.
	#[error("command '{0}' not found")]
	NotFound(String),
	/// Wrong argument count or shape; reported with the command's long
	/// description.
	#[error("invalid arguments")]
	InvalidArguments,
	/// The handler ran but its operation was refused.
	#[error("{0}")]
	Failed(String),
}

pub type CommandResult = Result<(), CommandError>;
