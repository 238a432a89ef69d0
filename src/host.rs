//! Read-only view of the host's registries, installed mods and runtime paths,
//! handed over as a single JSON document.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SnapshotError;
use crate::types::ResourceLocation;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HostSnapshot {
	pub minecraftVersion: String,
	pub modLoader: String,
	pub loaderVersion: String,

	/// Base runtime archives, scanned before any mod archive.
	pub runtimeArchives: Vec<PathBuf>,

	pub items: Vec<ItemDescriptor>,
	pub blocks: Vec<Descriptor>,
	pub entities: Vec<Descriptor>,
	pub attributes: Vec<Descriptor>,
	pub effects: Vec<Descriptor>,
	pub potions: Vec<PotionDescriptor>,
	pub mods: Vec<ModDescriptor>,

	/// Save directory of the primary world, if one is loaded.
	pub worldPath: Option<PathBuf>,
}

impl HostSnapshot {
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
		let path = path.as_ref();
		let file = File::open(path).map_err(|source| SnapshotError::Read {
			path: path.into(),
			source,
		})?;
		serde_json::from_reader(BufReader::new(file)).map_err(|source| SnapshotError::Parse {
			path: path.into(),
			source,
		})
	}

	/// Runtime archives followed by each distinct mod archive, in host order.
	pub fn archives(&self) -> Vec<PathBuf> {
		let mut archives = self.runtimeArchives.clone();
		for modInfo in &self.mods {
			if !archives.contains(&modInfo.archive) {
				archives.push(modInfo.archive.clone());
			}
		}
		archives
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
	pub id: ResourceLocation,
	pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ItemDescriptor {
	pub id: ResourceLocation,
	pub name: String,

	#[serde(flatten)]
	pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemKind {
	Item,
	Block {
		block: Option<ResourceLocation>,
		blockName: String,
	},
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PotionDescriptor {
	pub id: ResourceLocation,

	#[serde(default)]
	pub effects: Vec<PotionEffect>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PotionEffect {
	/// Effect description id, e.g. `effect.minecraft.speed`.
	pub effect: String,
	pub amplifier: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ModDescriptor {
	pub id: String,
	pub name: String,
	pub archive: PathBuf,

	/// Archive-internal path of the mod's logo.
	pub icon: Option<String>,
}

#[test]
fn test_snapshot_parse() {
	let snapshot: HostSnapshot = serde_json::from_str(
		r#"{
			"minecraftVersion": "1.20.1",
			"modLoader": "forge",
			"loaderVersion": "47.2.0",
			"runtimeArchives": ["/game/client.jar"],
			"items": [
				{"id": "minecraft:stick", "name": "Stick", "kind": "item"},
				{"id": "minecraft:stone", "name": "Stone", "kind": "block", "block": "minecraft:stone", "blockName": "Stone"}
			],
			"potions": [
				{"id": "minecraft:swiftness", "effects": [{"effect": "effect.minecraft.speed", "amplifier": 0}]}
			],
			"mods": [
				{"id": "minecraft", "name": "Minecraft", "archive": "/game/client.jar"},
				{"id": "create", "name": "Create", "archive": "/game/mods/create.jar", "icon": "logo.png"}
			]
		}"#,
	)
	.unwrap();

	assert!(snapshot.items.len() == 2);
	assert!(snapshot.items[0].kind == ItemKind::Item);
	assert!(
		snapshot.items[1].kind ==
			ItemKind::Block {
				block: Some("minecraft:stone".into()),
				blockName: "Stone".into(),
			}
	);
	assert!(snapshot.blocks.is_empty());
	assert!(snapshot.potions[0].effects[0].effect == "effect.minecraft.speed");
	assert!(snapshot.worldPath.is_none());

	let archives = snapshot.archives();
	assert!(archives == vec![PathBuf::from("/game/client.jar"), PathBuf::from("/game/mods/create.jar")]);
}
