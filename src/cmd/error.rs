use prettyval::RenderError;
use thiserror::Error;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors produced while reading and rendering CLI input.
#[derive(Debug, Error)]
pub enum CliError {
	/// Filesystem or stdin failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input was not a valid JSON document.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Decompression output exceeded the safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// `--type-name` was empty or not an identifier.
	#[error("invalid type name: {name:?}")]
	InvalidTypeName {
		/// User-provided name.
		name: String,
	},
	/// Rendering faulted.
	#[error(transparent)]
	Render(#[from] RenderError),
}
