use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::pretty::{Kind, MapValue, PtrValue, SeqValue, Special, SpecialValue, Timestamp, Value, short_type_name};

/// Introspection capability: expose a value as a [`Value`] tree.
///
/// Records implement it with [`reflect_struct!`](crate::reflect_struct). `&T`
/// is transparent; `Option`, `Box`, `Rc` and `Arc` each add one indirection
/// layer.
pub trait Reflect {
	/// Snapshot of this value's shape and content.
	fn reflect(&self) -> Value;
}

/// Implement [`Reflect`] for a record, listing fields in declaration order.
///
/// ```
/// struct Point {
/// 	x: i32,
/// 	y: i32,
/// }
/// prettyval::reflect_struct!(Point { x, y });
///
/// assert_eq!(prettyval::render(&Point { x: 1, y: 0 }), "Point{x: 1}");
/// ```
#[macro_export]
macro_rules! reflect_struct {
	($ty:ty { $($field:tt),* $(,)? }) => {
		impl $crate::pretty::Reflect for $ty {
			fn reflect(&self) -> $crate::pretty::Value {
				$crate::pretty::Value::Struct($crate::pretty::StructValue {
					type_name: $crate::pretty::short_type_name::<$ty>().into_boxed_str(),
					fields: ::std::vec![
						$($crate::pretty::FieldValue::new(
							::std::stringify!($field),
							$crate::pretty::Reflect::reflect(&self.$field),
						)),*
					],
				})
			}
		}
	};
}

macro_rules! reflect_int {
	($($ty:ty => $variant:ident($kind:ident, $wide:ty)),* $(,)?) => {
		$(impl Reflect for $ty {
			fn reflect(&self) -> Value {
				Value::$variant(Kind::$kind, *self as $wide)
			}
		})*
	};
}

reflect_int! {
	i8 => Int(I8, i64),
	i16 => Int(I16, i64),
	i32 => Int(I32, i64),
	i64 => Int(I64, i64),
	isize => Int(Isize, i64),
	u8 => Uint(U8, u64),
	u16 => Uint(U16, u64),
	u32 => Uint(U32, u64),
	u64 => Uint(U64, u64),
	usize => Uint(Usize, u64),
}

impl Reflect for bool {
	fn reflect(&self) -> Value {
		Value::Bool(*self)
	}
}

impl Reflect for f32 {
	fn reflect(&self) -> Value {
		Value::F32(*self)
	}
}

impl Reflect for f64 {
	fn reflect(&self) -> Value {
		Value::F64(*self)
	}
}

impl Reflect for char {
	fn reflect(&self) -> Value {
		Value::Char(*self)
	}
}

impl Reflect for str {
	fn reflect(&self) -> Value {
		Value::Str(self.into())
	}
}

impl Reflect for String {
	fn reflect(&self) -> Value {
		Value::Str(self.as_str().into())
	}
}

/// The unit value reflects as absent.
impl Reflect for () {
	fn reflect(&self) -> Value {
		Value::Nil
	}
}

impl Reflect for Value {
	fn reflect(&self) -> Value {
		self.clone()
	}
}

impl<T: Reflect + ?Sized> Reflect for &T {
	fn reflect(&self) -> Value {
		(**self).reflect()
	}
}

impl<T: Reflect + ?Sized> Reflect for &mut T {
	fn reflect(&self) -> Value {
		(**self).reflect()
	}
}

impl<T: Reflect + ToOwned + ?Sized> Reflect for Cow<'_, T> {
	fn reflect(&self) -> Value {
		(**self).reflect()
	}
}

impl<T: Reflect> Reflect for Option<T> {
	fn reflect(&self) -> Value {
		let pointee = short_type_name::<T>();
		Value::Ptr(match self {
			Some(inner) => PtrValue::to(pointee, inner.reflect()),
			None => PtrValue::absent(pointee),
		})
	}
}

macro_rules! reflect_owning_ptr {
	($($ptr:ident),*) => {
		$(impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
			fn reflect(&self) -> Value {
				Value::Ptr(PtrValue::to(short_type_name::<T>(), (**self).reflect()))
			}
		})*
	};
}

reflect_owning_ptr!(Box, Rc, Arc);

fn seq_of<C: ?Sized>(items: Vec<Value>) -> Value {
	Value::Seq(SeqValue {
		type_name: short_type_name::<C>().into_boxed_str(),
		items,
	})
}

impl<T: Reflect> Reflect for [T] {
	fn reflect(&self) -> Value {
		seq_of::<Self>(self.iter().map(Reflect::reflect).collect())
	}
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
	fn reflect(&self) -> Value {
		seq_of::<Self>(self.iter().map(Reflect::reflect).collect())
	}
}

impl<T: Reflect> Reflect for Vec<T> {
	fn reflect(&self) -> Value {
		seq_of::<Self>(self.iter().map(Reflect::reflect).collect())
	}
}

impl<T: Reflect> Reflect for VecDeque<T> {
	fn reflect(&self) -> Value {
		seq_of::<Self>(self.iter().map(Reflect::reflect).collect())
	}
}

fn map_of<C: ?Sized>(entries: Vec<(Value, Value)>) -> Value {
	Value::Map(MapValue {
		type_name: short_type_name::<C>().into_boxed_str(),
		entries,
	})
}

impl<K: Reflect, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
	fn reflect(&self) -> Value {
		map_of::<Self>(self.iter().map(|(key, value)| (key.reflect(), value.reflect())).collect())
	}
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
	fn reflect(&self) -> Value {
		map_of::<Self>(self.iter().map(|(key, value)| (key.reflect(), value.reflect())).collect())
	}
}

impl<Tz: TimeZone> Reflect for DateTime<Tz>
where
	Tz::Offset: fmt::Display,
{
	fn reflect(&self) -> Value {
		Value::Special(SpecialValue::new(short_type_name::<Self>(), Special::Timestamp(Timestamp::new(self))))
	}
}

impl Reflect for SystemTime {
	fn reflect(&self) -> Value {
		let at = DateTime::<Utc>::from(*self);
		Value::Special(SpecialValue::new("SystemTime", Special::Timestamp(Timestamp::new(&at))))
	}
}

impl Reflect for Duration {
	fn reflect(&self) -> Value {
		let delta = TimeDelta::from_std(*self).unwrap_or(TimeDelta::MAX);
		Value::Special(SpecialValue::new("Duration", Special::Duration(delta)))
	}
}

impl Reflect for TimeDelta {
	fn reflect(&self) -> Value {
		Value::Special(SpecialValue::new("TimeDelta", Special::Duration(*self)))
	}
}

#[cfg(test)]
mod tests;
