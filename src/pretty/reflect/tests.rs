use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};

use crate::pretty::{FieldValue, Kind, PtrValue, Reflect, Special, StructValue, Value};
use crate::reflect_struct;

#[test]
fn integers_keep_their_width() {
	assert_eq!(7_i8.reflect(), Value::Int(Kind::I8, 7));
	assert_eq!((-7_isize).reflect(), Value::Int(Kind::Isize, -7));
	assert_eq!(u64::MAX.reflect(), Value::Uint(Kind::U64, u64::MAX));
	assert_eq!(3_u16.reflect().kind().as_str(), "u16");
}

#[test]
fn option_is_one_indirection_layer() {
	assert_eq!(None::<String>.reflect(), Value::Ptr(PtrValue::absent("String")));
	assert_eq!(Some(1_u8).reflect(), Value::Ptr(PtrValue::to("u8", Value::Uint(Kind::U8, 1))));
}

#[test]
fn owning_pointers_nest() {
	let value = Box::new(Rc::new(Arc::new(true))).reflect();
	let Value::Ptr(ptr) = &value else {
		panic!("expected pointer, got {value:?}");
	};
	assert_eq!(&*ptr.pointee, "Rc<Arc<bool>>");

	let (depth, base) = ptr.resolve();
	assert_eq!(depth, 3);
	assert_eq!(base, Ok(&Value::Bool(true)));
	assert_eq!(value.type_name(), "***bool");
}

#[test]
fn resolve_stops_at_absent_layer() {
	let value = Some(None::<i32>).reflect();
	let Value::Ptr(ptr) = &value else {
		panic!("expected pointer, got {value:?}");
	};
	let (depth, base) = ptr.resolve();
	assert_eq!(depth, 1);
	assert_eq!(base.map_err(|absent| absent.display_name()), Err("*i32".to_owned()));
}

#[test]
fn record_fields_keep_declaration_order() {
	struct Node {
		zeta: u8,
		alpha: Option<String>,
	}
	reflect_struct!(Node { zeta, alpha });

	let value = Node { zeta: 0, alpha: None }.reflect();
	assert_eq!(
		value,
		Value::Struct(StructValue {
			type_name: "Node".into(),
			fields: vec![
				FieldValue::new("zeta", Value::Uint(Kind::U8, 0)),
				FieldValue::new("alpha", Value::Ptr(PtrValue::absent("String"))),
			],
		})
	);
	assert!(value.is_zero());
}

#[test]
fn containers_carry_their_type_names() {
	let seq = vec![1_i32, 2].reflect();
	assert_eq!(seq.kind(), Kind::Seq);
	assert_eq!(seq.type_name(), "Vec<i32>");

	let map = HashMap::from([("a", 1_u8)]).reflect();
	assert_eq!(map.kind(), Kind::Map);
	let Value::Map(map) = map else {
		panic!("expected map");
	};
	assert_eq!(map.entries, vec![(Value::Str("a".into()), Value::Uint(Kind::U8, 1))]);
}

#[test]
fn temporal_types_are_special() {
	let zero = DateTime::<Utc>::default().reflect();
	let Value::Special(special) = &zero else {
		panic!("expected special, got {zero:?}");
	};
	assert_eq!(&*special.type_name, "DateTime<Utc>");
	assert!(zero.is_zero());

	let epoch = SystemTime::UNIX_EPOCH.reflect();
	assert_eq!(epoch.type_name(), "SystemTime");
	assert!(epoch.is_zero());

	let Value::Special(duration) = Duration::from_secs(5).reflect() else {
		panic!("expected special");
	};
	assert_eq!(duration.payload, Special::Duration(chrono::TimeDelta::seconds(5)));
}
