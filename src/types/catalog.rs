use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Detail map shared by blocks, entities, attributes and effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
	pub id: String,
	pub name: String,
	#[serde(rename = "mod")]
	pub namespace: String,
	pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemEntry {
	pub id: String,
	pub name: String,
	#[serde(rename = "mod")]
	pub namespace: String,
	pub isBlock: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub blockName: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub blockId: Option<String>,
	pub index: usize,
}

/// Potion effects are flattened into `effect_<descriptionId>` keys next to `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PotionEntry {
	pub id: String,
	pub index: usize,
	#[serde(flatten)]
	pub effects: BTreeMap<String, i32>,
}

impl PotionEntry {
	pub const effectPrefix: &'static str = "effect_";

	pub fn effect_key(effect: &str) -> String {
		format!("{}{effect}", Self::effectPrefix)
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModEntry {
	pub name: String,
	pub id: String,
	pub path: PathBuf,
	pub index: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub iconPath: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TextureRecord {
	pub modId: String,
	pub internalPath: String,
	pub outPath: PathBuf,
	pub id: String,
	pub index: usize,
}

#[test]
fn test_potion_entry_is_flat() {
	let mut effects = BTreeMap::new();
	effects.insert(PotionEntry::effect_key("effect.minecraft.speed"), 1);
	let entry = PotionEntry {
		id: "minecraft:swiftness".into(),
		index: 3,
		effects,
	};

	let json = serde_json::to_value(&entry).unwrap();
	assert!(json["id"] == "minecraft:swiftness");
	assert!(json["index"] == 3);
	assert!(json["effect_effect.minecraft.speed"] == 1);
	assert!(json.get("effects").is_none());
}

#[test]
fn test_item_entry_omits_block_fields() {
	let entry = ItemEntry {
		id: "minecraft:stick".into(),
		name: "Stick".into(),
		namespace: "minecraft".into(),
		isBlock: false,
		blockName: None,
		blockId: None,
		index: 0,
	};

	let json = serde_json::to_value(&entry).unwrap();
	assert!(json["mod"] == "minecraft");
	assert!(json["isBlock"] == false);
	assert!(json.get("blockName").is_none());
	assert!(json.get("blockId").is_none());
}
