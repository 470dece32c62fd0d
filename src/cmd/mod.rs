mod error;
mod input;

/// CLI error and result aliases.
pub use error::{CliError, Result};

/// JSON document render command.
pub mod render;
/// Special-type registry listing command.
pub mod specials;
