use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::dump::StepReport;

/// Mirrors `source` into `target`, overwriting existing files. A missing source copies
/// nothing. Entries that cannot be read or copied are logged and counted as skipped; the
/// rest of the tree is still copied.
pub fn copy_tree(source: &Path, target: &Path) -> StepReport {
	let mut report = StepReport::default();
	if !source.exists() {
		debug!(source = %source.display(), "nothing to copy");
		return report;
	}

	for entry in WalkDir::new(source) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!(source = %source.display(), "skipping unreadable config entry: {err}");
				report.skipped += 1;
				continue;
			},
		};
		let Ok(relative) = entry.path().strip_prefix(source) else {
			continue;
		};
		let dest = target.join(relative);

		let copied = if entry.file_type().is_dir() {
			fs::create_dir_all(&dest).map(|_| 0)
		} else {
			copy_file(entry.path(), &dest).map(|_| 1)
		};
		match copied {
			Ok(count) => report.written += count,
			Err(err) => {
				warn!(path = %entry.path().display(), "failed to copy config entry: {err}");
				report.skipped += 1;
			},
		}
	}
	report
}

fn copy_file(source: &Path, dest: &Path) -> io::Result<u64> {
	if let Some(parent) = dest.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::copy(source, dest)
}

/// Copies the global config directory to `<configsRoot>/config` and, when a world is
/// loaded, its `serverconfig` directory to `<configsRoot>/serverconfig`.
pub fn copy_configs(configDir: &Path, worldPath: Option<&Path>, configsRoot: &Path) -> StepReport {
	let mut report = copy_tree(configDir, &configsRoot.join("config"));
	if let Some(world) = worldPath {
		let server = copy_tree(&server_config_dir(world), &configsRoot.join("serverconfig"));
		report.written += server.written;
		report.skipped += server.skipped;
	}
	report
}

pub fn server_config_dir(worldPath: &Path) -> PathBuf {
	worldPath.join("serverconfig")
}

#[test]
fn test_copy_tree_nested() {
	let dir = tempfile::tempdir().unwrap();
	let source = dir.path().join("src");
	fs::create_dir_all(source.join("a/b")).unwrap();
	fs::create_dir_all(source.join("empty")).unwrap();
	fs::write(source.join("a/b/c.txt"), b"nested\x00bytes").unwrap();
	fs::write(source.join("top.toml"), "x = 1").unwrap();

	let dest = dir.path().join("dest");
	assert!(copy_tree(&source, &dest) == StepReport { written: 2, skipped: 0 });
	assert!(fs::read(dest.join("a/b/c.txt")).unwrap() == b"nested\x00bytes");
	assert!(fs::read_to_string(dest.join("top.toml")).unwrap() == "x = 1");
	assert!(dest.join("empty").is_dir());
}

#[test]
fn test_copy_tree_overwrites() {
	let dir = tempfile::tempdir().unwrap();
	let source = dir.path().join("src");
	fs::create_dir_all(&source).unwrap();
	fs::write(source.join("forge.toml"), "new").unwrap();

	let dest = dir.path().join("dest");
	fs::create_dir_all(&dest).unwrap();
	fs::write(dest.join("forge.toml"), "old contents").unwrap();

	copy_tree(&source, &dest);
	assert!(fs::read_to_string(dest.join("forge.toml")).unwrap() == "new");
}

#[test]
fn test_copy_configs() {
	let dir = tempfile::tempdir().unwrap();
	let config = dir.path().join("config");
	fs::create_dir_all(&config).unwrap();
	fs::write(config.join("client.toml"), "a").unwrap();
	let world = dir.path().join("saves/New World");
	fs::create_dir_all(server_config_dir(&world)).unwrap();
	fs::write(server_config_dir(&world).join("server.toml"), "b").unwrap();

	let out = dir.path().join("out");
	assert!(copy_configs(&config, Some(&world), &out).written == 2);
	assert!(out.join("config/client.toml").is_file());
	assert!(out.join("serverconfig/server.toml").is_file());

	let out = dir.path().join("out-noworld");
	assert!(copy_configs(&config, None, &out).written == 1);
	assert!(!out.join("serverconfig").exists());

	let missing = dir.path().join("saves/Empty World");
	fs::create_dir_all(&missing).unwrap();
	let out = dir.path().join("out-noserverconfig");
	assert!(copy_configs(&config, Some(&missing), &out).written == 1);
}

#[cfg(unix)]
#[test]
fn test_copy_tree_skips_broken_entries() {
	let dir = tempfile::tempdir().unwrap();
	let source = dir.path().join("src");
	fs::create_dir_all(source.join("nested")).unwrap();
	std::os::unix::fs::symlink(dir.path().join("gone.toml"), source.join("a_link.toml")).unwrap();
	for name in ["b.toml", "c.toml", "nested/d.toml"] {
		fs::write(source.join(name), name).unwrap();
	}

	let dest = dir.path().join("dest");
	let report = copy_tree(&source, &dest);
	assert!(report == StepReport { written: 3, skipped: 1 });
	assert!(fs::read_to_string(dest.join("b.toml")).unwrap() == "b.toml");
	assert!(fs::read_to_string(dest.join("nested/d.toml")).unwrap() == "nested/d.toml");
	assert!(!dest.join("a_link.toml").exists());
}
