use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::ZipWriter;

/// Builds a zip from `(name, contents)` pairs; names ending in `/` become directory entries.
fn jar_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
	let mut cursor = Cursor::new(Vec::new());
	write_entries(&mut cursor, entries);
	cursor.into_inner()
}

pub fn build_jar(path: &Path, entries: &[(&str, &str)]) {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, jar_bytes(entries)).unwrap();
}

fn write_entries<W: Write + Seek>(dest: &mut W, entries: &[(&str, &str)]) {
	let mut writer = ZipWriter::new(dest);
	let options = FileOptions::default();
	for &(name, contents) in entries {
		if name.ends_with('/') {
			writer.add_directory(name, options).unwrap();
		} else {
			writer.start_file(name, options).unwrap();
			writer.write_all(contents.as_bytes()).unwrap();
		}
	}
	writer.finish().unwrap();
}
