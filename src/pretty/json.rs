use serde_json::Value as JsonValue;

use crate::pretty::{FieldValue, Kind, Reflect, SeqValue, StructValue, Value};

/// Record name used for JSON objects without an explicit one.
pub const DEFAULT_OBJECT_NAME: &str = "Object";
const ARRAY_NAME: &str = "Array";

/// JSON document whose root object renders as a record named `type_name`.
///
/// Object keys keep document order; nested objects are named
/// [`DEFAULT_OBJECT_NAME`].
#[derive(Debug, Clone, Copy)]
pub struct JsonRecord<'a> {
	pub value: &'a JsonValue,
	pub type_name: &'a str,
}

impl<'a> JsonRecord<'a> {
	pub fn new(value: &'a JsonValue, type_name: &'a str) -> Self {
		Self { value, type_name }
	}
}

impl Reflect for JsonRecord<'_> {
	fn reflect(&self) -> Value {
		reflect_json(self.value, self.type_name)
	}
}

impl Reflect for JsonValue {
	fn reflect(&self) -> Value {
		reflect_json(self, DEFAULT_OBJECT_NAME)
	}
}

fn reflect_json(value: &JsonValue, object_name: &str) -> Value {
	match value {
		JsonValue::Null => Value::Nil,
		JsonValue::Bool(v) => Value::Bool(*v),
		JsonValue::Number(n) => {
			if let Some(v) = n.as_i64() {
				Value::Int(Kind::I64, v)
			} else if let Some(v) = n.as_u64() {
				Value::Uint(Kind::U64, v)
			} else {
				Value::F64(n.as_f64().unwrap_or(f64::NAN))
			}
		}
		JsonValue::String(v) => Value::Str(v.as_str().into()),
		JsonValue::Array(items) => Value::Seq(SeqValue {
			type_name: ARRAY_NAME.into(),
			items: items.iter().map(|item| reflect_json(item, DEFAULT_OBJECT_NAME)).collect(),
		}),
		JsonValue::Object(map) => Value::Struct(StructValue {
			type_name: object_name.into(),
			fields: map
				.iter()
				.map(|(key, item)| FieldValue::new(key.as_str(), reflect_json(item, DEFAULT_OBJECT_NAME)))
				.collect(),
		}),
	}
}
