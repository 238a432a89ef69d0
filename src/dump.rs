//! The `dump` command: runs every export step in a fixed order and reports what failed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::configs;
use crate::error::StepError;
use crate::export::{archives, registries};
use crate::host::HostSnapshot;
use crate::jarfs;
use crate::metadata::{self, Metadata};

/// Host convention for "command handled", returned whatever the outcome.
pub const commandHandled: i32 = 1;

pub const successMessage: &str = "Data dumped successfully! You can now open your project in Minecraft Toolkit";

/// User-facing progress messages (start and completion).
pub trait Notifier {
	fn notify(&self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpConfig {
	pub gameDir: PathBuf,
	pub outputRoot: PathBuf,
	pub configDir: PathBuf,
	pub worldPath: Option<PathBuf>,
}

impl DumpConfig {
	pub const outputDirName: &'static str = "minecraft-toolkit-mod";

	pub fn new(gameDir: impl Into<PathBuf>) -> Self {
		let gameDir = gameDir.into();
		Self {
			outputRoot: gameDir.join(Self::outputDirName),
			configDir: gameDir.join("config"),
			worldPath: None,
			gameDir,
		}
	}

	pub fn document(&self, name: &str) -> PathBuf {
		self.outputRoot.join(name)
	}

	pub fn assets_dir(&self) -> PathBuf {
		self.outputRoot.join("assets")
	}

	pub fn icons_dir(&self) -> PathBuf {
		self.outputRoot.join("icons")
	}

	pub fn configs_dir(&self) -> PathBuf {
		self.outputRoot.join("configs")
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
	Folders,
	Items,
	Blocks,
	Potions,
	Mods,
	Entities,
	Attributes,
	Effects,
	Archives,
	Configs,
	Metadata,
}

impl Step {
	pub const all: [Step; 11] = [
		Step::Folders,
		Step::Items,
		Step::Blocks,
		Step::Potions,
		Step::Mods,
		Step::Entities,
		Step::Attributes,
		Step::Effects,
		Step::Archives,
		Step::Configs,
		Step::Metadata,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Folders => "folders",
			Self::Items => "items",
			Self::Blocks => "blocks",
			Self::Potions => "potions",
			Self::Mods => "mods",
			Self::Entities => "entities",
			Self::Attributes => "attributes",
			Self::Effects => "effects",
			Self::Archives => "archives",
			Self::Configs => "configs",
			Self::Metadata => "metadata",
		}
	}
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Number of entries or files a step produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
	pub written: usize,
	pub skipped: usize,
}

impl From<usize> for StepReport {
	fn from(written: usize) -> Self {
		Self { written, skipped: 0 }
	}
}

#[derive(Debug, Default)]
pub struct DumpSummary {
	pub outcomes: Vec<(Step, Result<StepReport, StepError>)>,
}

impl DumpSummary {
	pub fn outcome(&self, step: Step) -> Option<&Result<StepReport, StepError>> {
		self.outcomes
			.iter()
			.find(|(s, _)| *s == step)
			.map(|(_, outcome)| outcome)
	}

	pub fn failures(&self) -> impl Iterator<Item = (Step, &StepError)> {
		self.outcomes
			.iter()
			.filter_map(|(step, outcome)| outcome.as_ref().err().map(|err| (*step, err)))
	}

	pub fn is_success(&self) -> bool {
		self.failures().next().is_none()
	}

	pub fn completion_message(&self) -> String {
		let failed: Vec<_> = self.failures().map(|(step, _)| step.name()).collect();
		if failed.is_empty() {
			successMessage.into()
		} else {
			format!(
				"Dump finished with {} failed step(s): {}. Check the log for details.",
				failed.len(),
				failed.join(", ")
			)
		}
	}
}

/// Runs every step against `snapshot`. A failing step is logged and recorded; the
/// remaining steps still run and nothing is rolled back.
pub fn run_dump(snapshot: &HostSnapshot, config: &DumpConfig) -> DumpSummary {
	let mut summary = DumpSummary::default();
	for step in Step::all {
		let outcome = run_step(step, snapshot, config);
		match &outcome {
			Ok(report) => info!(step = %step, written = report.written, skipped = report.skipped, "step finished"),
			Err(err) => error!(step = %step, "step failed: {err}"),
		}
		summary.outcomes.push((step, outcome));
	}
	summary
}

/// Entry point for the `dump` subcommand.
pub fn dump_command(
	snapshot: &HostSnapshot,
	config: &DumpConfig,
	notifier: &dyn Notifier,
) -> (i32, DumpSummary) {
	notifier.notify(&format!("Dumping game data to {}", config.outputRoot.display()));
	let summary = run_dump(snapshot, config);
	notifier.notify(&summary.completion_message());
	(commandHandled, summary)
}

fn run_step(step: Step, snapshot: &HostSnapshot, config: &DumpConfig) -> Result<StepReport, StepError> {
	let doc = |name| config.document(name);
	let report = match step {
		Step::Folders => create_folders(config)?,
		Step::Items => registries::export_items(&snapshot.items, &doc("items.json"))?.into(),
		Step::Blocks => {
			registries::export_registry(&snapshot.blocks, "blocks", &doc("blocks.json"))?.into()
		},
		Step::Potions => registries::export_potions(&snapshot.potions, &doc("potions.json"))?.into(),
		Step::Mods => {
			let iconsDir = config.icons_dir();
			create_dir(&iconsDir)?;
			registries::export_mods(&snapshot.mods, &iconsDir, &doc("mods.json"))?.into()
		},
		Step::Entities => {
			registries::export_registry(&snapshot.entities, "entities", &doc("entities.json"))?
				.into()
		},
		Step::Attributes => {
			registries::export_registry(&snapshot.attributes, "attributes", &doc("attributes.json"))?
				.into()
		},
		Step::Effects => {
			// effects.json keys its list as `mods`
			registries::export_registry(&snapshot.effects, "mods", &doc("effects.json"))?.into()
		},
		Step::Archives => {
			let assetsDir = config.assets_dir();
			create_dir(&assetsDir)?;
			let assetsDir = fs::canonicalize(&assetsDir).map_err(|source| StepError::Io {
				path: assetsDir.clone(),
				source,
			})?;

			let scan = jarfs::scan_archives(&snapshot.archives(), &assetsDir)?;
			archives::export_textures(&scan.textures, &doc("textures.json"))?;
			archives::export_recipes(&scan, &doc("recipes.json"))?;
			StepReport {
				written: scan.textures.len() + scan.recipes.len(),
				skipped: scan.skippedRecipes,
			}
		},
		Step::Configs => {
			configs::copy_configs(&config.configDir, config.worldPath.as_deref(), &config.configs_dir())
		},
		Step::Metadata => {
			let collected = Metadata::collect(snapshot, &config.gameDir, config.worldPath.as_deref());
			metadata::write_metadata(&collected, &doc("metadata.json"))?;
			StepReport::from(1)
		},
	};
	Ok(report)
}

fn create_folders(config: &DumpConfig) -> Result<StepReport, StepError> {
	let dirs = [
		config.outputRoot.clone(),
		config.assets_dir(),
		config.icons_dir(),
		config.configs_dir(),
	];
	for dir in &dirs {
		create_dir(dir)?;
	}
	Ok(dirs.len().into())
}

fn create_dir(dir: &Path) -> Result<(), StepError> {
	fs::create_dir_all(dir).map_err(|source| StepError::Io {
		path: dir.into(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::fs;
	use std::path::Path;

	use super::*;
	use crate::host::{Descriptor, ItemDescriptor, ItemKind, ModDescriptor, PotionDescriptor, PotionEffect};
	use crate::testutil::build_jar;
	use crate::JsonValue;

	#[derive(Default)]
	struct RecordingNotifier(RefCell<Vec<String>>);

	impl Notifier for RecordingNotifier {
		fn notify(&self, message: &str) {
			self.0.borrow_mut().push(message.into());
		}
	}

	fn read_json(path: &Path) -> JsonValue {
		serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
	}

	fn game_dir(root: &Path) -> (HostSnapshot, DumpConfig) {
		let client = root.join("versions/client.jar");
		build_jar(&client, &[
			("assets/minecraft/textures/block/stone.png", "stone"),
			("assets/minecraft/lang/en_us.json", "{}"),
			("data/minecraft/recipes/stick.json", r#"{"type": "minecraft:crafting_shaped"}"#),
		]);
		let create = root.join("mods/create.jar");
		build_jar(&create, &[
			("logo.png", "logo"),
			("assets/create/textures/block/casing.png", "casing"),
			("data/create/recipes/bad.json", "not json"),
		]);

		fs::create_dir_all(root.join("config")).unwrap();
		fs::write(root.join("config/forge-client.toml"), "a = 1").unwrap();
		let world = root.join("saves/World");
		fs::create_dir_all(world.join("serverconfig")).unwrap();
		fs::write(world.join("serverconfig/create-server.toml"), "b = 2").unwrap();

		let snapshot = HostSnapshot {
			minecraftVersion: "1.20.1".into(),
			modLoader: "forge".into(),
			loaderVersion: "47.2.0".into(),
			runtimeArchives: vec![client.clone(), root.join("versions/missing.jar")],
			items: vec![ItemDescriptor {
				id: "minecraft:stone".into(),
				name: "Stone".into(),
				kind: ItemKind::Block {
					block: Some("minecraft:stone".into()),
					blockName: "Stone".into(),
				},
			}],
			blocks: vec![Descriptor {
				id: "minecraft:stone".into(),
				name: "Stone".into(),
			}],
			entities: vec![Descriptor {
				id: "minecraft:pig".into(),
				name: "Pig".into(),
			}],
			attributes: vec![Descriptor {
				id: "minecraft:generic.max_health".into(),
				name: "Max Health".into(),
			}],
			effects: vec![Descriptor {
				id: "minecraft:speed".into(),
				name: "Speed".into(),
			}],
			potions: vec![PotionDescriptor {
				id: "minecraft:swiftness".into(),
				effects: vec![PotionEffect {
					effect: "effect.minecraft.speed".into(),
					amplifier: 0,
				}],
			}],
			mods: vec![
				ModDescriptor {
					id: "minecraft".into(),
					name: "Minecraft".into(),
					archive: client,
					icon: None,
				},
				ModDescriptor {
					id: "create".into(),
					name: "Create".into(),
					archive: create,
					icon: Some("logo.png".into()),
				},
			],
			worldPath: Some(world.clone()),
		};

		let mut config = DumpConfig::new(root);
		config.worldPath = Some(world);
		(snapshot, config)
	}

	#[test]
	fn test_dump_writes_everything() {
		let dir = tempfile::tempdir().unwrap();
		let (snapshot, config) = game_dir(dir.path());
		let notifier = RecordingNotifier::default();

		let (status, summary) = dump_command(&snapshot, &config, &notifier);
		assert!(status == commandHandled);
		assert!(summary.is_success());
		assert!(summary.outcomes.len() == Step::all.len());

		let messages = notifier.0.borrow();
		assert!(messages.len() == 2);
		assert!(messages[1] == successMessage);

		let out = &config.outputRoot;
		for name in [
			"items.json",
			"blocks.json",
			"potions.json",
			"mods.json",
			"entities.json",
			"attributes.json",
			"effects.json",
			"recipes.json",
			"textures.json",
			"metadata.json",
		] {
			assert!(read_json(&out.join(name))["version"] == 1, "{name}");
		}

		let textures = read_json(&out.join("textures.json"));
		let ids: Vec<_> = textures["textures"]
			.as_array()
			.unwrap()
			.iter()
			.map(|t| t["id"].as_str().unwrap().to_owned())
			.collect();
		assert!(ids == vec!["minecraft:textures/block/stone.png", "create:textures/block/casing.png"]);
		assert!(fs::read(out.join("assets/create/textures/block/casing.png")).unwrap() == b"casing");
		assert!(!out.join("assets/minecraft/lang").exists());

		let recipes = read_json(&out.join("recipes.json"));
		assert!(recipes["recipes"].as_array().unwrap().len() == 1);
		assert!(summary.outcome(Step::Archives).unwrap().as_ref().unwrap().skipped == 1);

		let mods = read_json(&out.join("mods.json"));
		assert!(mods["mods"][1]["icon"] == "logo.png");
		assert!(fs::read(out.join("icons/create_logo.png")).unwrap() == b"logo");

		assert!(out.join("configs/config/forge-client.toml").is_file());
		assert!(out.join("configs/serverconfig/create-server.toml").is_file());

		let metadata = read_json(&out.join("metadata.json"));
		assert!(metadata["modCount"] == 2);
		assert!(metadata["worldPath"].is_string());

		let effects = read_json(&out.join("effects.json"));
		assert!(effects["mods"][0]["id"] == "minecraft:speed");
		assert!(effects["mods"][0]["index"] == 0);
		assert!(effects.get("effects").is_none());

		let potions = read_json(&out.join("potions.json"));
		assert!(potions["potions"][0]["effect_effect.minecraft.speed"] == 0);
	}

	#[test]
	fn test_dump_is_rerunnable() {
		let dir = tempfile::tempdir().unwrap();
		let (snapshot, config) = game_dir(dir.path());

		assert!(run_dump(&snapshot, &config).is_success());
		let first = fs::read(config.document("textures.json")).unwrap();
		assert!(run_dump(&snapshot, &config).is_success());
		let second = fs::read(config.document("textures.json")).unwrap();
		assert!(first == second);
	}

	#[test]
	fn test_corrupt_archive_fails_only_its_step() {
		let dir = tempfile::tempdir().unwrap();
		let (mut snapshot, config) = game_dir(dir.path());
		let broken = dir.path().join("mods/broken.jar");
		fs::write(&broken, "corrupt").unwrap();
		snapshot.runtimeArchives.push(broken);

		let notifier = RecordingNotifier::default();
		let (status, summary) = dump_command(&snapshot, &config, &notifier);
		assert!(status == commandHandled);
		assert!(!summary.is_success());

		let failed: Vec<_> = summary.failures().map(|(step, _)| step).collect();
		assert!(failed == vec![Step::Archives]);
		assert!(notifier.0.borrow()[1].contains("archives"));
		assert!(!config.document("textures.json").exists());
		assert!(config.document("metadata.json").exists());
		assert!(config.document("items.json").exists());
	}
}
