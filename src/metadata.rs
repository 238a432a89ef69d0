use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::Serialize;

use crate::error::ExportError;
use crate::export::{documentVersion, write_json};
use crate::host::HostSnapshot;
use crate::world;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metadata {
	pub modCount: usize,
	pub timestamp: i64,
	pub version: u32,
	pub modLoader: String,
	pub minecraftVersion: String,
	pub loaderVersion: String,
	pub exporterVersion: String,
	pub gameDir: PathBuf,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub worldPath: Option<PathBuf>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub levelName: Option<String>,
}

static lastTimestamp: AtomicI64 = AtomicI64::new(i64::MIN);

/// UNIX seconds, clamped so consecutive calls in this process never go backwards.
pub fn timestamp() -> i64 {
	let now = Utc::now().timestamp();
	let previous = lastTimestamp.fetch_max(now, Ordering::SeqCst);
	previous.max(now)
}

impl Metadata {
	pub fn collect(snapshot: &HostSnapshot, gameDir: &Path, worldPath: Option<&Path>) -> Self {
		Self {
			modCount: snapshot.mods.len(),
			timestamp: timestamp(),
			version: documentVersion,
			modLoader: snapshot.modLoader.clone(),
			minecraftVersion: snapshot.minecraftVersion.clone(),
			loaderVersion: snapshot.loaderVersion.clone(),
			exporterVersion: env!("CARGO_PKG_VERSION").into(),
			gameDir: absolute(gameDir),
			worldPath: worldPath.map(absolute),
			levelName: worldPath.and_then(world::level_name),
		}
	}
}

pub fn write_metadata(metadata: &Metadata, path: &Path) -> Result<(), ExportError> {
	write_json(path, metadata)
}

fn absolute(path: &Path) -> PathBuf {
	fs::canonicalize(path).unwrap_or_else(|_| path.to_owned())
}

#[test]
fn test_timestamp_never_decreases() {
	let mut previous = timestamp();
	for _ in 0 .. 100 {
		let next = timestamp();
		assert!(next >= previous);
		previous = next;
	}
	assert!(previous > 1_600_000_000);
}

#[test]
fn test_collect_metadata() {
	let dir = tempfile::tempdir().unwrap();
	let snapshot = HostSnapshot {
		minecraftVersion: "1.20.1".into(),
		modLoader: "forge".into(),
		loaderVersion: "47.2.0".into(),
		mods: vec![crate::host::ModDescriptor {
			id: "minecraft".into(),
			name: "Minecraft".into(),
			archive: "client.jar".into(),
			icon: None,
		}],
		..Default::default()
	};

	let metadata = Metadata::collect(&snapshot, dir.path(), None);
	assert!(metadata.modCount == 1);
	assert!(metadata.version == 1);
	assert!(metadata.gameDir.is_absolute());
	assert!(metadata.worldPath.is_none());

	let path = dir.path().join("metadata.json");
	write_metadata(&metadata, &path).unwrap();
	let json: crate::JsonValue = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
	assert!(json["minecraftVersion"] == "1.20.1");
	assert!(json["modLoader"] == "forge");
	assert!(json.get("worldPath").is_none());

	let world = dir.path().join("world");
	fs::create_dir_all(&world).unwrap();
	let metadata = Metadata::collect(&snapshot, dir.path(), Some(&world));
	assert!(metadata.worldPath.as_deref() == Some(fs::canonicalize(&world).unwrap().as_path()));
	assert!(metadata.levelName.is_none());
}
