//! JSON documents written into the output root. Every document is pretty-printed and
//! carries a flat `version` tag.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::ExportError;
use crate::JsonValue;

pub mod archives;
pub mod registries;

pub const documentVersion: u32 = 1;

/// Writes `{ "<key>": entries, "version": 1 }` to `path`, replacing any previous file.
pub fn write_document<T: Serialize + ?Sized>(
	path: &Path,
	key: &str,
	entries: &T,
) -> Result<(), ExportError> {
	let entries = serde_json::to_value(entries).map_err(|source| ExportError::Json {
		path: path.into(),
		source,
	})?;

	let mut document = serde_json::Map::new();
	document.insert(key.into(), entries);
	document.insert("version".into(), documentVersion.into());
	write_json(path, &JsonValue::Object(document))
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
	let ioError = |source| ExportError::Io {
		path: path.into(),
		source,
	};

	let mut writer = BufWriter::new(File::create(path).map_err(ioError)?);
	serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ExportError::Json {
		path: path.into(),
		source,
	})?;
	writer.flush().map_err(ioError)
}

#[test]
fn test_write_document() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("things.json");
	std::fs::write(&path, "stale contents that are longer than the new document").unwrap();

	write_document(&path, "things", &["a", "b"]).unwrap();

	let text = std::fs::read_to_string(&path).unwrap();
	assert!(text.contains('\n'));
	let json: JsonValue = serde_json::from_str(&text).unwrap();
	assert!(json["version"] == 1);
	assert!(json["things"] == serde_json::json!(["a", "b"]));
}

#[test]
fn test_write_document_missing_dir() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing/things.json");
	let err = write_document(&path, "things", &[1, 2]).unwrap_err();
	assert!(matches!(err, ExportError::Io { .. }));
}
