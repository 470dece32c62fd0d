use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Faults raised while rendering a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
	/// A `Reflect` impl or special renderer panicked mid-render.
	#[error("panic recovered ({reason}): {partial}")]
	Panicked {
		/// Panic payload text.
		reason: String,
		/// Output written before the fault.
		partial: String,
	},
}

impl RenderError {
	/// Output written before the fault.
	pub fn partial(&self) -> &str {
		match self {
			Self::Panicked { partial, .. } => partial,
		}
	}
}
