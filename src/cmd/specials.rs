use prettyval::Renderer;

/// Print the special type names the default renderer formats natively.
pub fn run() -> crate::cmd::Result<()> {
	let renderer = Renderer::new();
	for name in renderer.specials().names() {
		println!("{name}");
	}
	Ok(())
}
