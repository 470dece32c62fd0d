use std::path::PathBuf;

use prettyval::pretty::{DEFAULT_OBJECT_NAME, JsonRecord};
use prettyval::try_render;
use serde::Serialize;

use crate::cmd::input::{Document, Encoding};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// JSON document path, or `-` for stdin.
	pub path: PathBuf,
	/// Record name used for the root object.
	#[arg(long = "type-name", default_value = DEFAULT_OBJECT_NAME)]
	pub type_name: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct RenderReport<'a> {
	path: String,
	compression: Encoding,
	rendered: &'a str,
}

/// Render one JSON document as a single line.
pub fn run(args: Args) -> Result<()> {
	let Args { path, type_name, json } = args;
	validate_type_name(&type_name)?;

	let input = Document::read(&path)?;
	let doc: serde_json::Value = serde_json::from_slice(&input.bytes)?;
	let rendered = try_render(&JsonRecord::new(&doc, &type_name))?;

	if json {
		let report = RenderReport {
			path: path.display().to_string(),
			compression: input.encoding,
			rendered: &rendered,
		};
		println!("{}", serde_json::to_string(&report)?);
	} else {
		println!("{rendered}");
	}

	Ok(())
}

fn validate_type_name(name: &str) -> Result<()> {
	let mut chars = name.chars();
	let valid_head = chars.next().is_some_and(|ch| ch.is_alphabetic() || ch == '_');
	if !valid_head || !chars.all(|ch| ch.is_alphanumeric() || ch == '_') {
		return Err(CliError::InvalidTypeName { name: name.to_owned() });
	}
	Ok(())
}
