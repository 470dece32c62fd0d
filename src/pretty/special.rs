use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Timelike};

use crate::pretty::SpecialValue;

/// Formatter for one special type. Returning empty text marks a zero value.
pub type SpecialFn = fn(&Special) -> String;

/// Payload of an opaque value.
#[derive(Debug, Clone, PartialEq)]
pub enum Special {
	/// Point in time with its zone label.
	Timestamp(Timestamp),
	/// Signed elapsed time.
	Duration(TimeDelta),
	/// Pre-formatted text for caller-defined opaque types.
	Text(Box<str>),
}

impl Special {
	/// Zero test used by field omission.
	pub fn is_zero(&self) -> bool {
		match self {
			Self::Timestamp(ts) => ts.is_zero(),
			Self::Duration(delta) => delta.is_zero(),
			Self::Text(text) => text.is_empty(),
		}
	}
}

impl fmt::Display for Special {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Timestamp(ts) => f.write_str(&ts.canonical()),
			Self::Duration(delta) => f.write_str(&compact_duration(*delta)),
			Self::Text(text) => f.write_str(text),
		}
	}
}

/// Instant normalized to a fixed offset, keeping the source zone label.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
	pub at: DateTime<FixedOffset>,
	/// Zone label, `UTC` or a numeric `±HHMM` offset.
	pub zone: Box<str>,
}

impl Timestamp {
	/// Capture a chrono datetime in any zone.
	pub fn new<Tz: TimeZone>(at: &DateTime<Tz>) -> Self
	where
		Tz::Offset: fmt::Display,
	{
		let label = at.offset().to_string();
		let at = at.fixed_offset();
		let zone = if label.starts_with(['+', '-']) {
			at.format("%z").to_string()
		} else {
			label
		};
		Self {
			at,
			zone: zone.into_boxed_str(),
		}
	}

	/// The Unix epoch at offset zero, chrono's default datetime.
	pub fn is_zero(&self) -> bool {
		self.at.timestamp() == 0 && self.at.timestamp_subsec_nanos() == 0 && self.at.offset().local_minus_utc() == 0
	}

	/// `YYYY-MM-DD HH:MM:SS[.fraction] ±HHMM [ZONE]`, fraction without trailing
	/// zeros. The zone label is left out when it only repeats the offset.
	pub fn canonical(&self) -> String {
		let nanos = self.at.nanosecond() % 1_000_000_000;
		let offset = self.at.format("%z").to_string();
		let mut out = format!(
			"{}{} {offset}",
			self.at.format("%Y-%m-%d %H:%M:%S"),
			trimmed_fraction(u64::from(nanos), 9),
		);
		if *self.zone != *offset {
			out.push(' ');
			out.push_str(&self.zone);
		}
		out.trim().to_owned()
	}
}

/// Lookup table from special type name to its formatter.
#[derive(Debug, Clone)]
pub struct SpecialRenderers {
	by_name: HashMap<Box<str>, SpecialFn>,
}

/// Type names of the built-in timestamp types.
pub const TIMESTAMP_TYPES: [&str; 4] = ["DateTime<Utc>", "DateTime<FixedOffset>", "DateTime<Local>", "SystemTime"];
/// Type names of the built-in duration types.
pub const DURATION_TYPES: [&str; 2] = ["Duration", "TimeDelta"];

impl Default for SpecialRenderers {
	fn default() -> Self {
		let mut out = Self::empty();
		for name in TIMESTAMP_TYPES {
			out.register(name, format_timestamp);
		}
		for name in DURATION_TYPES {
			out.register(name, format_duration);
		}
		out
	}
}

impl SpecialRenderers {
	/// Registry without built-in formatters.
	pub fn empty() -> Self {
		Self { by_name: HashMap::new() }
	}

	/// Register or replace the formatter for `type_name`, returning the previous one.
	pub fn register(&mut self, type_name: impl Into<Box<str>>, render: SpecialFn) -> Option<SpecialFn> {
		self.by_name.insert(type_name.into(), render)
	}

	pub fn get(&self, type_name: &str) -> Option<SpecialFn> {
		self.by_name.get(type_name).copied()
	}

	/// Registered type names in sorted order.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.by_name.keys().map(|name| &**name).collect();
		names.sort_unstable();
		names
	}

	/// Format a special value, trimmed. Unregistered types use `<TypeName>{<text>}`.
	pub(crate) fn format(&self, value: &SpecialValue) -> String {
		match self.get(&value.type_name) {
			Some(render) => render(&value.payload).trim().to_owned(),
			None => {
				log::debug!("no special renderer registered for {}", value.type_name);
				format!("{}{{{}}}", value.type_name, value.payload)
			}
		}
	}
}

/// Built-in timestamp formatter. Zero timestamps format as empty text.
pub fn format_timestamp(value: &Special) -> String {
	match value {
		Special::Timestamp(ts) if ts.is_zero() => String::new(),
		other => other.to_string(),
	}
}

/// Built-in duration formatter.
pub fn format_duration(value: &Special) -> String {
	value.to_string()
}

/// Compact `1h2m3.5s` rendering; sub-second spans use `ms`, `µs` or `ns`.
pub fn compact_duration(delta: TimeDelta) -> String {
	if delta.is_zero() {
		return "0s".to_owned();
	}

	let (sign, delta) = if delta < TimeDelta::zero() { ("-", -delta) } else { ("", delta) };
	let secs = delta.num_seconds().unsigned_abs();
	let nanos = u64::from(delta.subsec_nanos().unsigned_abs());

	if secs == 0 {
		return match nanos {
			0..1_000 => format!("{sign}{nanos}ns"),
			1_000..1_000_000 => format!("{sign}{}{}µs", nanos / 1_000, trimmed_fraction(nanos % 1_000, 3)),
			_ => format!("{sign}{}{}ms", nanos / 1_000_000, trimmed_fraction(nanos % 1_000_000, 6)),
		};
	}

	let hours = secs / 3600;
	let minutes = (secs % 3600) / 60;
	let seconds = secs % 60;

	let mut out = String::from(sign);
	if hours > 0 {
		out.push_str(&format!("{hours}h"));
	}
	if hours > 0 || minutes > 0 {
		out.push_str(&format!("{minutes}m"));
	}
	out.push_str(&format!("{seconds}{}s", trimmed_fraction(nanos, 9)));
	out
}

/// `.ddd` with `digits` places and trailing zeros removed; empty for zero.
fn trimmed_fraction(value: u64, digits: usize) -> String {
	if value == 0 {
		return String::new();
	}
	let padded = format!("{value:0digits$}");
	format!(".{}", padded.trim_end_matches('0'))
}
