use std::any::Any;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use crate::pretty::{MapValue, Reflect, RenderError, Result, SpecialFn, SpecialRenderers, SpecialValue, StructValue, Value, indirection_prefix};

static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::new);

/// Render any reflectable value with the built-in special renderers.
///
/// Never panics: a fault is returned as `panic recovered (<reason>): <partial>`.
pub fn render<T: Reflect + ?Sized>(value: &T) -> String {
	DEFAULT_RENDERER.render(value)
}

/// Like [`render`], but reports a fault as [`RenderError`].
pub fn try_render<T: Reflect + ?Sized>(value: &T) -> Result<String> {
	DEFAULT_RENDERER.try_render(value)
}

/// Recursive dispatch-by-shape renderer.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
	specials: SpecialRenderers,
}

impl Renderer {
	/// Renderer with the built-in timestamp and duration formatters.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register or replace the formatter for a special type name.
	pub fn register(&mut self, type_name: impl Into<Box<str>>, render: SpecialFn) -> Option<SpecialFn> {
		self.specials.register(type_name, render)
	}

	pub fn specials(&self) -> &SpecialRenderers {
		&self.specials
	}

	pub fn render<T: Reflect + ?Sized>(&self, value: &T) -> String {
		self.try_render(value).unwrap_or_else(|err| err.to_string())
	}

	pub fn try_render<T: Reflect + ?Sized>(&self, value: &T) -> Result<String> {
		self.guarded(|out| {
			let tree = value.reflect();
			self.write_value(out, &tree);
		})
	}

	/// Render an already reflected tree.
	pub fn render_value(&self, value: &Value) -> String {
		self.guarded(|out| self.write_value(out, value))
			.unwrap_or_else(|err| err.to_string())
	}

	/// Single fault boundary; nested calls below it never catch.
	fn guarded(&self, write: impl FnOnce(&mut String)) -> Result<String> {
		let mut out = String::new();
		let outcome = panic::catch_unwind(AssertUnwindSafe(|| write(&mut out)));
		match outcome {
			Ok(()) => Ok(out),
			Err(payload) => {
				let reason = panic_reason(payload.as_ref());
				log::debug!("render fault recovered after {} bytes: {reason}", out.len());
				Err(RenderError::Panicked { reason, partial: out })
			}
		}
	}

	fn write_value(&self, out: &mut String, value: &Value) {
		match value {
			Value::Nil => out.push_str("nil"),
			Value::Ptr(ptr) => {
				let (depth, base) = ptr.resolve();
				out.push_str(&indirection_prefix(depth));
				match base {
					Ok(base) => self.write_value(out, base),
					Err(absent) => {
						let _ = write!(out, "{}{{nil}}", absent.display_name());
					}
				}
			}
			Value::Special(special) => out.push_str(&self.specials.format(special)),
			Value::Struct(item) => {
				self.write_struct(out, item, true);
			}
			Value::Seq(seq) => {
				let _ = write!(out, "{}: [", seq.type_name);
				for (idx, item) in seq.items.iter().enumerate() {
					if idx > 0 {
						out.push_str(", ");
					}
					self.write_value(out, item);
				}
				out.push(']');
			}
			Value::Map(map) => {
				out.push_str("map{");
				self.write_entries(out, map);
				out.push('}');
			}
			primitive => {
				let _ = write!(out, "{}{{", primitive.kind().as_str());
				write_plain(out, primitive);
				out.push('}');
			}
		}
	}

	/// Write `<TypeName>{<fields>}` and report whether anything was written.
	///
	/// A record without visible fields is dropped entirely unless `keep_empty`.
	fn write_struct(&self, out: &mut String, item: &StructValue, keep_empty: bool) -> bool {
		let mark = out.len();
		let _ = write!(out, "{}{{", item.type_name);

		let mut visible = 0_usize;
		for field in &item.fields {
			let field_mark = out.len();
			if visible > 0 {
				out.push_str(", ");
			}
			let _ = write!(out, "{}: ", field.name);
			if self.write_field_value(out, &field.value, false) {
				visible += 1;
			} else {
				out.truncate(field_mark);
			}
		}

		if visible == 0 && !keep_empty {
			out.truncate(mark);
			return false;
		}
		out.push('}');
		true
	}

	/// Field omission policy. Zero values are hidden unless reached through
	/// indirection; `false` counts as zero. A nested record without visible
	/// fields is always dropped.
	fn write_field_value(&self, out: &mut String, value: &Value, indirected: bool) -> bool {
		match value {
			Value::Ptr(ptr) => match ptr.target() {
				Some(target) => self.write_field_value(out, target, true),
				None => false,
			},
			Value::Str(v) if indirected || !v.is_empty() => {
				let _ = write!(out, "'{v}'");
				true
			}
			Value::Char(v) if indirected || *v != '\0' => {
				let _ = write!(out, "'{v}'");
				true
			}
			Value::Bool(_) | Value::Int(..) | Value::Uint(..) | Value::F32(_) | Value::F64(_) if indirected || !value.is_zero() => {
				write_plain(out, value);
				true
			}
			Value::Struct(item) => self.write_struct(out, item, false),
			Value::Special(special) => self.write_special_field(out, special, indirected),
			Value::Nil | Value::Seq(_) | Value::Map(_) => {
				log::trace!("omitting {} field value", value.kind().as_str());
				false
			}
			_ => false,
		}
	}

	/// Zero specials are omitted; through indirection an empty rendering
	/// becomes the `<TypeName>{}` marker.
	fn write_special_field(&self, out: &mut String, special: &SpecialValue, indirected: bool) -> bool {
		if special.payload.is_zero() && !indirected {
			return false;
		}
		let text = self.specials.format(special);
		if text.is_empty() {
			let _ = write!(out, "{}{{}}", special.type_name);
		} else {
			out.push_str(&text);
		}
		true
	}

	/// `k: v` pairs sorted by key text.
	fn write_entries(&self, out: &mut String, map: &MapValue) {
		let mut entries: Vec<(String, String)> = map
			.entries
			.iter()
			.map(|(key, value)| (self.natural(key), self.natural(value)))
			.collect();
		entries.sort();

		for (idx, (key, value)) in entries.iter().enumerate() {
			if idx > 0 {
				out.push_str(", ");
			}
			let _ = write!(out, "{key}: {value}");
		}
	}

	fn natural(&self, value: &Value) -> String {
		let mut out = String::new();
		self.write_natural(&mut out, value);
		out
	}

	/// Unwrapped text used inside map entries.
	fn write_natural(&self, out: &mut String, value: &Value) {
		match value {
			Value::Nil => out.push_str("nil"),
			Value::Ptr(ptr) => match ptr.target() {
				Some(target) => self.write_natural(out, target),
				None => out.push_str("nil"),
			},
			Value::Struct(item) => {
				self.write_struct(out, item, true);
			}
			Value::Seq(seq) => {
				out.push('[');
				for (idx, item) in seq.items.iter().enumerate() {
					if idx > 0 {
						out.push_str(", ");
					}
					self.write_natural(out, item);
				}
				out.push(']');
			}
			Value::Map(map) => {
				out.push('{');
				self.write_entries(out, map);
				out.push('}');
			}
			Value::Special(special) => out.push_str(&self.specials.format(special)),
			primitive => write_plain(out, primitive),
		}
	}
}

fn write_plain(out: &mut String, value: &Value) {
	let _ = match value {
		Value::Bool(v) => write!(out, "{v}"),
		Value::Int(_, v) => write!(out, "{v}"),
		Value::Uint(_, v) => write!(out, "{v}"),
		Value::F32(v) => write!(out, "{v}"),
		Value::F64(v) => write!(out, "{v}"),
		Value::Char(v) => write!(out, "{v}"),
		Value::Str(v) => write!(out, "{v}"),
		other => write!(out, "{}", other.type_name()),
	};
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
	if let Some(text) = payload.downcast_ref::<&str>() {
		(*text).to_owned()
	} else if let Some(text) = payload.downcast_ref::<String>() {
		text.clone()
	} else {
		"unknown panic payload".to_owned()
	}
}
