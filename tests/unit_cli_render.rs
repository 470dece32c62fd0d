#![allow(missing_docs)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const ORDER_LINE: &str = "Order{id: 1042, customer: Object{name: 'Ada', vip: true}, total: 99.5}";

#[test]
fn render_prints_one_line_record() {
	let fixture = fixture_path("order.json");
	let output = run(&["render", &fixture.display().to_string(), "--type-name", "Order"]);

	assert!(output.status.success(), "render command should succeed");
	let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
	assert_eq!(stdout.trim_end(), ORDER_LINE);
}

#[test]
fn render_json_envelope_reports_compression() {
	let fixture = fixture_path("order.json");
	let output = run(&["render", &fixture.display().to_string(), "--type-name", "Order", "--json"]);

	assert!(output.status.success(), "render command should succeed");
	let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	assert_eq!(json["compression"], "none");
	assert_eq!(json["rendered"], ORDER_LINE);
	assert!(json["path"].as_str().is_some_and(|item| item.ends_with("order.json")));
}

#[test]
fn render_reads_zstd_documents() {
	let raw = std::fs::read(fixture_path("order.json")).expect("fixture reads");
	let packed = zstd::encode_all(raw.as_slice(), 3).expect("zstd encodes");
	let path = Path::new(env!("CARGO_TARGET_TMPDIR")).join("order.json.zst");
	std::fs::write(&path, packed).expect("compressed fixture writes");

	let output = run(&["render", &path.display().to_string(), "--type-name", "Order", "--json"]);

	assert!(output.status.success(), "render command should succeed");
	let json: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
	assert_eq!(json["compression"], "zstd");
	assert_eq!(json["rendered"], ORDER_LINE);
}

#[test]
fn render_reads_stdin() {
	let mut child = Command::new(env!("CARGO_BIN_EXE_prettyval"))
		.args(["render", "-"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("render command spawns");
	child
		.stdin
		.take()
		.expect("stdin is piped")
		.write_all(br#"{"ok": true, "count": 0}"#)
		.expect("stdin accepts document");
	let output = child.wait_with_output().expect("render command finishes");

	assert!(output.status.success(), "render command should succeed");
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "Object{ok: true}");
}

#[test]
fn render_rejects_invalid_type_name() {
	let fixture = fixture_path("order.json");
	let output = run(&["render", &fixture.display().to_string(), "--type-name", "not a name"]);

	assert!(!output.status.success(), "render command should fail");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.starts_with("error: invalid type name"), "unexpected stderr: {stderr}");
}

#[test]
fn render_reports_malformed_json() {
	let path = Path::new(env!("CARGO_TARGET_TMPDIR")).join("broken.json");
	std::fs::write(&path, "{\"id\": ").expect("broken fixture writes");

	let output = run(&["render", &path.display().to_string()]);

	assert!(!output.status.success(), "render command should fail");
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: json:"));
}

#[test]
fn specials_lists_builtin_formatters() {
	let output = run(&["specials"]);

	assert!(output.status.success(), "specials command should succeed");
	let stdout = String::from_utf8(output.stdout).expect("stdout is utf8");
	let names: Vec<&str> = stdout.lines().collect();
	assert!(names.contains(&"DateTime<Utc>"));
	assert!(names.contains(&"Duration"));
	assert!(names.windows(2).all(|pair| pair[0] <= pair[1]), "names should be sorted");
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_prettyval")).args(args).output().expect("command executes")
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}
