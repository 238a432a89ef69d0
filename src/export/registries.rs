//! Exporters for the host registries. Each one turns a snapshot list into detail maps
//! in enumeration order, numbers them from zero and writes a single document.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use super::write_document;
use crate::error::ExportError;
use crate::host::{Descriptor, ItemDescriptor, ItemKind, ModDescriptor, PotionDescriptor};
use crate::jarfs;
use crate::types::{ItemEntry, ModEntry, PotionEntry, RegistryEntry};

pub fn registry_entries(descriptors: &[Descriptor]) -> Vec<RegistryEntry> {
	descriptors
		.iter()
		.enumerate()
		.map(|(index, descriptor)| RegistryEntry {
			id: descriptor.id.to_string(),
			name: descriptor.name.clone(),
			namespace: descriptor.id.namespace().into(),
			index,
		})
		.collect()
}

pub fn item_entries(items: &[ItemDescriptor]) -> Vec<ItemEntry> {
	items
		.iter()
		.enumerate()
		.map(|(index, item)| {
			let (isBlock, blockName, blockId) = match &item.kind {
				ItemKind::Item => (false, None, None),
				ItemKind::Block { block, blockName } => {
					(true, Some(blockName.clone()), block.as_ref().map(ToString::to_string))
				},
			};
			ItemEntry {
				id: item.id.to_string(),
				name: item.name.clone(),
				namespace: item.id.namespace().into(),
				isBlock,
				blockName,
				blockId,
				index,
			}
		})
		.collect()
}

pub fn potion_entries(potions: &[PotionDescriptor]) -> Vec<PotionEntry> {
	potions
		.iter()
		.enumerate()
		.map(|(index, potion)| {
			let effects: BTreeMap<_, _> = potion
				.effects
				.iter()
				.map(|effect| (PotionEntry::effect_key(&effect.effect), effect.amplifier))
				.collect();
			PotionEntry {
				id: potion.id.to_string(),
				index,
				effects,
			}
		})
		.collect()
}

/// Builds mod entries, extracting each declared icon into `iconsDir`. An icon that
/// cannot be extracted is logged and left out of the entry.
pub fn mod_entries(mods: &[ModDescriptor], iconsDir: &Path) -> Vec<ModEntry> {
	mods.iter()
		.enumerate()
		.map(|(index, modInfo)| {
			let iconPath = modInfo.icon.as_deref().and_then(|icon| {
				match jarfs::extract_icon(&modInfo.archive, icon, &modInfo.id, iconsDir) {
					Ok(path) => path,
					Err(err) => {
						warn!(modId = %modInfo.id, "failed to extract icon: {err}");
						None
					},
				}
			});
			ModEntry {
				name: modInfo.name.clone(),
				id: modInfo.id.clone(),
				path: modInfo.archive.clone(),
				index,
				icon: modInfo.icon.clone(),
				iconPath,
			}
		})
		.collect()
}

pub fn export_items(items: &[ItemDescriptor], path: &Path) -> Result<usize, ExportError> {
	write_entries(path, "items", &item_entries(items))
}

pub fn export_registry(
	descriptors: &[Descriptor],
	key: &str,
	path: &Path,
) -> Result<usize, ExportError> {
	write_entries(path, key, &registry_entries(descriptors))
}

pub fn export_potions(potions: &[PotionDescriptor], path: &Path) -> Result<usize, ExportError> {
	write_entries(path, "potions", &potion_entries(potions))
}

pub fn export_mods(
	mods: &[ModDescriptor],
	iconsDir: &Path,
	path: &Path,
) -> Result<usize, ExportError> {
	write_entries(path, "mods", &mod_entries(mods, iconsDir))
}

fn write_entries<T: serde::Serialize>(path: &Path, key: &str, entries: &[T]) -> Result<usize, ExportError> {
	write_document(path, key, entries)?;
	debug!(path = %path.display(), count = entries.len(), "wrote {key}");
	Ok(entries.len())
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::{Path, PathBuf};

	use super::*;
	use crate::host::PotionEffect;
	use crate::testutil::build_jar;
	use crate::JsonValue;

	fn descriptor(id: &str, name: &str) -> Descriptor {
		Descriptor {
			id: id.into(),
			name: name.into(),
		}
	}

	fn read_json(path: &Path) -> JsonValue {
		serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
	}

	#[test]
	fn test_registry_indexes_follow_enumeration_order() {
		let blocks = vec![
			descriptor("minecraft:stone", "Stone"),
			descriptor("minecraft:dirt", "Dirt"),
			descriptor("create:brass_casing", "Brass Casing"),
		];
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("blocks.json");

		assert!(export_registry(&blocks, "blocks", &path).unwrap() == 3);

		let json = read_json(&path);
		assert!(json["version"] == 1);
		let entries = json["blocks"].as_array().unwrap();
		assert!(entries.len() == blocks.len());
		for (index, (entry, block)) in entries.iter().zip(&blocks).enumerate() {
			assert!(entry["index"] == index);
			assert!(entry["id"] == block.id.to_string().as_str());
			assert!(entry["name"] == block.name.as_str());
			assert!(entry["mod"] == block.id.namespace());
		}
	}

	#[test]
	fn test_empty_registry() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("attributes.json");
		assert!(export_registry(&[], "attributes", &path).unwrap() == 0);
		assert!(read_json(&path)["attributes"] == serde_json::json!([]));
	}

	#[test]
	fn test_item_entries() {
		let items = vec![
			ItemDescriptor {
				id: "minecraft:stick".into(),
				name: "Stick".into(),
				kind: ItemKind::Item,
			},
			ItemDescriptor {
				id: "minecraft:stone".into(),
				name: "Stone".into(),
				kind: ItemKind::Block {
					block: Some("minecraft:stone".into()),
					blockName: "Stone Block".into(),
				},
			},
			ItemDescriptor {
				id: "weird:ghost".into(),
				name: "Ghost".into(),
				kind: ItemKind::Block {
					block: None,
					blockName: "Ghost".into(),
				},
			},
		];

		let entries = item_entries(&items);
		assert!(entries.len() == 3);
		assert!(!entries[0].isBlock && entries[0].blockId.is_none());
		assert!(entries[1].isBlock);
		assert!(entries[1].blockName.as_deref() == Some("Stone Block"));
		assert!(entries[1].blockId.as_deref() == Some("minecraft:stone"));
		assert!(entries[2].isBlock && entries[2].blockId.is_none());
		assert!(entries.iter().map(|e| e.index).collect::<Vec<_>>() == vec![0, 1, 2]);
		assert!(entries[2].namespace == "weird");
	}

	#[test]
	fn test_potion_effects_are_flattened() {
		let potions = vec![PotionDescriptor {
			id: "minecraft:mixed".into(),
			effects: vec![
				PotionEffect {
					effect: "A".into(),
					amplifier: 1,
				},
				PotionEffect {
					effect: "B".into(),
					amplifier: 2,
				},
			],
		}];
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("potions.json");
		export_potions(&potions, &path).unwrap();

		let potion = &read_json(&path)["potions"][0];
		assert!(potion["id"] == "minecraft:mixed");
		assert!(potion["index"] == 0);
		assert!(potion["effect_A"] == 1);
		assert!(potion["effect_B"] == 2);
		assert!(potion.as_object().unwrap().len() == 4);
	}

	#[test]
	fn test_mod_entries_extract_icons() {
		let dir = tempfile::tempdir().unwrap();
		let jar = dir.path().join("mods/create.jar");
		build_jar(&jar, &[("logo.png", "create logo")]);
		let icons = dir.path().join("icons");
		fs::create_dir_all(&icons).unwrap();

		let mods = vec![
			ModDescriptor {
				id: "create".into(),
				name: "Create".into(),
				archive: jar.clone(),
				icon: Some("logo.png".into()),
			},
			ModDescriptor {
				id: "forge".into(),
				name: "Forge".into(),
				archive: PathBuf::from("/nonexistent/forge.jar"),
				icon: Some("forge_logo.png".into()),
			},
			ModDescriptor {
				id: "plain".into(),
				name: "Plain".into(),
				archive: jar.clone(),
				icon: None,
			},
		];

		let entries = mod_entries(&mods, &icons);
		assert!(entries[0].iconPath.as_deref() == Some(icons.join("create_logo.png").as_path()));
		assert!(fs::read_to_string(icons.join("create_logo.png")).unwrap() == "create logo");
		assert!(entries[1].icon.as_deref() == Some("forge_logo.png"));
		assert!(entries[1].iconPath.is_none());
		assert!(entries[2].icon.is_none() && entries[2].iconPath.is_none());
		assert!(entries[2].path == jar);
		assert!(entries[2].index == 2);
	}
}
