use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelDat {
	#[serde(rename = "Data")]
	pub vanillaData: LevelDatVanillaData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LevelDatVanillaData {
	pub levelName: String,

	pub version: Option<LevelDatVersion>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LevelDatVersion {
	pub name: String,
}

/// Reads the gzipped `level.dat` of a world save. Returns `None` if it is missing or
/// cannot be decoded.
pub fn read_level_dat(worldRoot: impl AsRef<Path>) -> Option<LevelDat> {
	let mut levelDat = File::open(worldRoot.as_ref().join("level.dat")).ok()?;
	nbt::from_gzip_reader(&mut levelDat).ok()
}

pub fn level_name(worldRoot: impl AsRef<Path>) -> Option<String> {
	read_level_dat(worldRoot).map(|level| level.vanillaData.levelName)
}

#[test]
fn test_level_name() {
	let dir = tempfile::tempdir().unwrap();
	assert!(level_name(dir.path()).is_none());

	let level = LevelDat {
		vanillaData: LevelDatVanillaData {
			levelName: "My Modded World".into(),
			version: Some(LevelDatVersion {
				name: "1.20.1".into(),
			}),
		},
	};
	let mut file = File::create(dir.path().join("level.dat")).unwrap();
	nbt::to_gzip_writer(&mut file, &level, None).unwrap();
	drop(file);

	assert!(level_name(dir.path()).as_deref() == Some("My Modded World"));
	let read = read_level_dat(dir.path()).unwrap();
	assert!(read.vanillaData.version.unwrap().name == "1.20.1");

	std::fs::write(dir.path().join("level.dat"), b"garbage").unwrap();
	assert!(level_name(dir.path()).is_none());
}
