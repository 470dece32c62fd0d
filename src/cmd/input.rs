use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;

use crate::cmd::{CliError, Result};

/// Largest document accepted after decompression.
const DOCUMENT_LIMIT: usize = 64 * 1024 * 1024;
const ZSTD_FRAME: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const STDIN_PATH: &str = "-";

/// On-disk encoding of a document, reported in the `--json` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
	#[serde(rename = "none")]
	Plain,
	Zstd,
}

/// Document bytes ready for JSON parsing.
#[derive(Debug)]
pub struct Document {
	pub encoding: Encoding,
	pub bytes: Vec<u8>,
}

impl Document {
	/// Load `path`, or stdin for `-`.
	pub fn read(path: &Path) -> Result<Self> {
		let raw = if path == Path::new(STDIN_PATH) {
			let mut raw = Vec::new();
			io::stdin().lock().read_to_end(&mut raw)?;
			raw
		} else {
			fs::read(path)?
		};
		Self::from_raw(raw)
	}

	/// Unpack a zstd frame when the bytes start with one.
	pub fn from_raw(raw: Vec<u8>) -> Result<Self> {
		if !raw.starts_with(&ZSTD_FRAME) {
			return Ok(Self {
				encoding: Encoding::Plain,
				bytes: raw,
			});
		}

		// One byte past the limit tells an exact fit from an overflow.
		let mut bytes = Vec::new();
		zstd::stream::read::Decoder::new(raw.as_slice())?
			.take(DOCUMENT_LIMIT as u64 + 1)
			.read_to_end(&mut bytes)?;
		if bytes.len() > DOCUMENT_LIMIT {
			return Err(CliError::DecompressedTooLarge { limit: DOCUMENT_LIMIT });
		}

		Ok(Self {
			encoding: Encoding::Zstd,
			bytes,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{Document, Encoding};

	#[test]
	fn plain_json_passes_through() {
		let doc = Document::from_raw(br#"{"a":1}"#.to_vec()).expect("plain input decodes");
		assert_eq!(doc.encoding, Encoding::Plain);
		assert_eq!(doc.bytes, br#"{"a":1}"#);
	}

	#[test]
	fn zstd_frame_is_unpacked() {
		let packed = zstd::encode_all(&br#"{"a":1}"#[..], 3).expect("zstd encodes");
		let doc = Document::from_raw(packed).expect("zstd input decodes");
		assert_eq!(doc.encoding, Encoding::Zstd);
		assert_eq!(doc.bytes, br#"{"a":1}"#);
	}

	#[test]
	fn encoding_labels_are_lowercase() {
		assert_eq!(serde_json::to_string(&Encoding::Plain).expect("serializes"), r#""none""#);
		assert_eq!(serde_json::to_string(&Encoding::Zstd).expect("serializes"), r#""zstd""#);
	}

	#[test]
	fn truncated_zstd_frame_is_an_error() {
		let mut packed = zstd::encode_all(&br#"{"a":1}"#[..], 3).expect("zstd encodes");
		packed.truncate(6);
		assert!(Document::from_raw(packed).is_err());
	}
}
