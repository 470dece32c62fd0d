/// Declared name of `T` with module paths stripped from every path segment.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name<T: ?Sized>() -> String {
	shorten(std::any::type_name::<T>())
}

/// One `*` per indirection layer.
pub fn indirection_prefix(depth: usize) -> String {
	"*".repeat(depth)
}

/// Pointer type name for `pointee`: one `*` for the pointer itself plus one per
/// `Option`, `Box`, `Rc` or `Arc` wrapper peeled off the pointee. Borrows are
/// transparent, so `&` is dropped.
///
/// `Box<Inner>` becomes `**Inner`.
pub fn pointer_name(pointee: &str) -> String {
	let mut depth = 1;
	let mut name = pointee;
	loop {
		if let Some(rest) = name.strip_prefix("&mut ").or_else(|| name.strip_prefix('&')) {
			name = rest;
			continue;
		}
		match OWNING_WRAPPERS.iter().find_map(|wrapper| unwrap_generic(name, wrapper)) {
			Some(inner) => {
				depth += 1;
				name = inner;
			}
			None => break,
		}
	}
	format!("{}{name}", indirection_prefix(depth))
}

const OWNING_WRAPPERS: [&str; 4] = ["Option", "Box", "Rc", "Arc"];

/// `Wrapper<inner>` to `inner`, only when the opening bracket closes at the end.
fn unwrap_generic<'a>(name: &'a str, wrapper: &str) -> Option<&'a str> {
	let inner = name.strip_prefix(wrapper)?.strip_prefix('<')?.strip_suffix('>')?;
	let mut open = 0_usize;
	for ch in inner.chars() {
		match ch {
			'<' => open += 1,
			'>' => open = open.checked_sub(1)?,
			_ => {}
		}
	}
	(open == 0).then_some(inner)
}

pub(crate) fn shorten(full: &str) -> String {
	let mut out = String::with_capacity(full.len());
	let mut path = String::new();

	for ch in full.chars() {
		if ch.is_alphanumeric() || ch == '_' || ch == ':' {
			path.push(ch);
			continue;
		}
		flush_path(&mut out, &mut path);
		out.push(ch);
	}
	flush_path(&mut out, &mut path);

	out
}

fn flush_path(out: &mut String, path: &mut String) {
	if path.is_empty() {
		return;
	}
	out.push_str(path.rsplit("::").next().unwrap_or(path));
	path.clear();
}

#[cfg(test)]
mod tests {
	use super::{indirection_prefix, pointer_name, short_type_name, shorten};

	#[test]
	fn nested_generic_paths_are_shortened() {
		assert_eq!(shorten("alloc::vec::Vec<alloc::string::String>"), "Vec<String>");
		assert_eq!(
			shorten("std::collections::hash::map::HashMap<alloc::string::String, i32>"),
			"HashMap<String, i32>"
		);
		assert_eq!(shorten("dyn prettyval::pretty::reflect::Reflect"), "dyn Reflect");
	}

	#[test]
	fn builtin_names_are_untouched() {
		assert_eq!(short_type_name::<i32>(), "i32");
		assert_eq!(short_type_name::<&str>(), "&str");
		assert_eq!(short_type_name::<[u8; 4]>(), "[u8; 4]");
		assert_eq!(short_type_name::<(i32, String)>(), "(i32, String)");
	}

	#[test]
	fn pointer_name_peels_owning_wrappers() {
		assert_eq!(pointer_name("i32"), "*i32");
		assert_eq!(pointer_name("Box<Inner>"), "**Inner");
		assert_eq!(pointer_name("Option<Rc<Arc<bool>>>"), "****bool");
		assert_eq!(pointer_name("&Inner"), "*Inner");
		assert_eq!(pointer_name("Vec<Box<u8>>"), "*Vec<Box<u8>>");
		assert_eq!(pointer_name("Box<u8>, Box<u8>"), "*Box<u8>, Box<u8>");
		assert_eq!(pointer_name("Boxed<u8>"), "*Boxed<u8>");
	}

	#[test]
	fn prefix_repeats_per_layer() {
		assert_eq!(indirection_prefix(0), "");
		assert_eq!(indirection_prefix(2), "**");
	}
}
