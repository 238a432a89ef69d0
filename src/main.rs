#![allow(non_snake_case, non_upper_case_globals)]

use std::path::PathBuf;
use std::process::exit;

use anyhow::Context;
use clap::{Parser, Subcommand};
use toolkit_dump::dump::{self, DumpConfig, Notifier};
use toolkit_dump::host::HostSnapshot;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "toolkit-dump", version, about = "Export game registries and assets for Minecraft Toolkit")]
struct Args {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Write registries, textures, recipes, configs and metadata to the output folder
	Dump(DumpArgs),
}

#[derive(clap::Args, Debug)]
struct DumpArgs {
	/// Host snapshot describing registries, mods and runtime archives
	#[arg(short, long)]
	snapshot: PathBuf,

	#[arg(short, long)]
	gameDir: PathBuf,

	/// Defaults to `<game-dir>/minecraft-toolkit-mod`
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Defaults to `<game-dir>/config`
	#[arg(long)]
	configDir: Option<PathBuf>,

	/// Loaded world save; overrides the snapshot's
	#[arg(short, long)]
	world: Option<PathBuf>,
}

impl DumpArgs {
	fn config(&self, snapshot: &HostSnapshot) -> DumpConfig {
		let mut config = DumpConfig::new(&self.gameDir);
		if let Some(output) = &self.output {
			config.outputRoot = output.clone();
		}
		if let Some(configDir) = &self.configDir {
			config.configDir = configDir.clone();
		}
		config.worldPath = self.world.clone().or_else(|| snapshot.worldPath.clone());
		config
	}
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
	fn notify(&self, message: &str) {
		println!("{message}");
	}
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toolkit_dump=info")),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	match args.command {
		Command::Dump(dumpArgs) => {
			let snapshot = HostSnapshot::load(&dumpArgs.snapshot)
				.with_context(|| format!("loading {}", dumpArgs.snapshot.display()))?;
			let config = dumpArgs.config(&snapshot);

			let (status, summary) = dump::dump_command(&snapshot, &config, &ConsoleNotifier);
			tracing::debug!(status, "dump command handled");
			if !summary.is_success() {
				exit(2);
			}
		},
	}
	Ok(())
}

#[test]
fn test_dump_args_defaults() {
	let args = Args::try_parse_from(["toolkit-dump", "dump", "-s", "snapshot.json", "-g", "/game"]).unwrap();
	let Command::Dump(dumpArgs) = args.command;
	assert!(dumpArgs.snapshot == PathBuf::from("snapshot.json"));

	let snapshot = HostSnapshot {
		worldPath: Some("/game/saves/World".into()),
		..Default::default()
	};
	let config = dumpArgs.config(&snapshot);
	assert!(config.gameDir == PathBuf::from("/game"));
	assert!(config.outputRoot == PathBuf::from("/game/minecraft-toolkit-mod"));
	assert!(config.configDir == PathBuf::from("/game/config"));
	assert!(config.worldPath == Some(PathBuf::from("/game/saves/World")));

	let config = dumpArgs.config(&HostSnapshot::default());
	assert!(config.worldPath.is_none());
}

#[test]
fn test_dump_args_overrides() {
	let args = Args::try_parse_from([
		"toolkit-dump",
		"dump",
		"--snapshot",
		"snapshot.json",
		"--game-dir",
		"/game",
		"--output",
		"/export",
		"--config-dir",
		"/etc/game-config",
		"--world",
		"/worlds/Other",
	])
	.unwrap();
	let Command::Dump(dumpArgs) = args.command;

	let snapshot = HostSnapshot {
		worldPath: Some("/game/saves/World".into()),
		..Default::default()
	};
	let config = dumpArgs.config(&snapshot);
	assert!(config.outputRoot == PathBuf::from("/export"));
	assert!(config.configDir == PathBuf::from("/etc/game-config"));
	assert!(config.worldPath == Some(PathBuf::from("/worlds/Other")));
	assert!(config.document("items.json") == PathBuf::from("/export/items.json"));
}
