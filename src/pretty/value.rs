use std::borrow::Cow;

use crate::pretty::{Special, pointer_name};

/// Shape classification of a reflected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Absent value.
	Nil,
	/// `bool`.
	Bool,
	/// `i8`.
	I8,
	/// `i16`.
	I16,
	/// `i32`.
	I32,
	/// `i64`.
	I64,
	/// `isize`.
	Isize,
	/// `u8`.
	U8,
	/// `u16`.
	U16,
	/// `u32`.
	U32,
	/// `u64`.
	U64,
	/// `usize`.
	Usize,
	/// `f32`.
	F32,
	/// `f64`.
	F64,
	/// `char`.
	Char,
	/// Owned or borrowed text.
	Str,
	/// Optional or owning indirection.
	Ptr,
	/// Record with named fields.
	Struct,
	/// Ordered sequence.
	Seq,
	/// Key/value mapping.
	Map,
	/// Opaque value with a registered renderer.
	Special,
}

impl Kind {
	/// Canonical kind name used in primitive wrappers.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Bool => "bool",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::Isize => "isize",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::Usize => "usize",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::Char => "char",
			Self::Str => "String",
			Self::Ptr => "ptr",
			Self::Struct => "struct",
			Self::Seq => "seq",
			Self::Map => "map",
			Self::Special => "special",
		}
	}

	/// Whether this kind is rendered with the `<kind>{<value>}` wrapper.
	pub fn is_primitive(self) -> bool {
		!matches!(self, Self::Nil | Self::Ptr | Self::Struct | Self::Seq | Self::Map | Self::Special)
	}
}

/// Reflected runtime value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Bool(bool),
	/// Signed integer tagged with its declared width.
	Int(Kind, i64),
	/// Unsigned integer tagged with its declared width.
	Uint(Kind, u64),
	F32(f32),
	F64(f64),
	Char(char),
	Str(Box<str>),
	Ptr(PtrValue),
	Struct(StructValue),
	Seq(SeqValue),
	Map(MapValue),
	Special(SpecialValue),
}

impl Value {
	/// Shape of this value.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Nil => Kind::Nil,
			Self::Bool(_) => Kind::Bool,
			Self::Int(kind, _) | Self::Uint(kind, _) => *kind,
			Self::F32(_) => Kind::F32,
			Self::F64(_) => Kind::F64,
			Self::Char(_) => Kind::Char,
			Self::Str(_) => Kind::Str,
			Self::Ptr(_) => Kind::Ptr,
			Self::Struct(_) => Kind::Struct,
			Self::Seq(_) => Kind::Seq,
			Self::Map(_) => Kind::Map,
			Self::Special(_) => Kind::Special,
		}
	}

	/// Whether the value equals the zero value of its type.
	///
	/// Records are zero when every field is zero; indirections are zero only
	/// when absent.
	pub fn is_zero(&self) -> bool {
		match self {
			Self::Nil => true,
			Self::Bool(v) => !v,
			Self::Int(_, v) => *v == 0,
			Self::Uint(_, v) => *v == 0,
			Self::F32(v) => *v == 0.0,
			Self::F64(v) => *v == 0.0,
			Self::Char(v) => *v == '\0',
			Self::Str(v) => v.is_empty(),
			Self::Ptr(ptr) => ptr.target.is_none(),
			Self::Struct(item) => item.fields.iter().all(|field| field.value.is_zero()),
			Self::Seq(seq) => seq.items.is_empty(),
			Self::Map(map) => map.entries.is_empty(),
			Self::Special(special) => special.payload.is_zero(),
		}
	}

	/// Declared type name, with one `*` per indirection layer.
	pub fn type_name(&self) -> Cow<'_, str> {
		match self {
			Self::Ptr(ptr) => Cow::Owned(ptr.display_name()),
			Self::Struct(item) => Cow::Borrowed(&*item.type_name),
			Self::Seq(seq) => Cow::Borrowed(&*seq.type_name),
			Self::Map(map) => Cow::Borrowed(&*map.type_name),
			Self::Special(special) => Cow::Borrowed(&*special.type_name),
			other => Cow::Borrowed(other.kind().as_str()),
		}
	}
}

/// Indirection to another value, possibly absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PtrValue {
	/// Declared type name of the referent.
	pub pointee: Box<str>,
	/// Referent, `None` when the indirection is absent.
	pub target: Option<Box<Value>>,
}

impl PtrValue {
	/// Present indirection to `target`.
	pub fn to(pointee: impl Into<Box<str>>, target: Value) -> Self {
		Self {
			pointee: pointee.into(),
			target: Some(Box::new(target)),
		}
	}

	/// Absent indirection that still remembers its pointee type.
	pub fn absent(pointee: impl Into<Box<str>>) -> Self {
		Self {
			pointee: pointee.into(),
			target: None,
		}
	}

	/// Dereference one layer.
	pub fn target(&self) -> Option<&Value> {
		self.target.as_deref()
	}

	/// Pointer type name with one `*` per layer, e.g. `*i32`, or `**Node` for
	/// a pointee of `Box<Node>`.
	pub fn display_name(&self) -> String {
		pointer_name(&self.pointee)
	}

	/// Follow present layers down to the first non-indirection value.
	///
	/// Returns the number of present layers crossed, and either the base value
	/// or the absent layer the chain stopped at.
	pub fn resolve(&self) -> (usize, Result<&Value, &PtrValue>) {
		let mut depth = 0;
		let mut current = self;
		loop {
			let Some(target) = current.target() else {
				return (depth, Err(current));
			};
			depth += 1;
			match target {
				Value::Ptr(next) => current = next,
				base => return (depth, Ok(base)),
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	pub type_name: Box<str>,
	pub fields: Vec<FieldValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	pub name: Box<str>,
	pub value: Value,
}

impl FieldValue {
	/// Named field in declaration order.
	pub fn new(name: impl Into<Box<str>>, value: Value) -> Self {
		Self { name: name.into(), value }
	}
}

/// Ordered sequence together with its container type name.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqValue {
	pub type_name: Box<str>,
	pub items: Vec<Value>,
}

/// Key/value mapping in the container's own iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
	pub type_name: Box<str>,
	pub entries: Vec<(Value, Value)>,
}

/// Opaque value rendered through the special-type registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialValue {
	/// Registry key and fallback display name.
	pub type_name: Box<str>,
	pub payload: Special,
}

impl SpecialValue {
	pub fn new(type_name: impl Into<Box<str>>, payload: Special) -> Self {
		Self {
			type_name: type_name.into(),
			payload,
		}
	}
}
