mod error;
mod json;
mod reflect;
mod render;
mod special;
mod type_name;
mod value;

/// Error and result aliases.
pub use error::{RenderError, Result};
/// JSON document reflection.
pub use json::{DEFAULT_OBJECT_NAME, JsonRecord};
/// Introspection capability trait.
pub use reflect::Reflect;
/// Rendering entry points.
pub use render::{Renderer, render, try_render};
/// Special-type payloads, registry, and built-in formatters.
pub use special::{
	DURATION_TYPES, Special, SpecialFn, SpecialRenderers, TIMESTAMP_TYPES, Timestamp, compact_duration, format_duration, format_timestamp,
};
/// Type-name resolution helpers.
pub use type_name::{indirection_prefix, pointer_name, short_type_name};
/// Reflected value tree types.
pub use value::{FieldValue, Kind, MapValue, PtrValue, SeqValue, SpecialValue, StructValue, Value};
