use std::path::{Path, PathBuf};

/// Archive-internal entry path matched against the two extraction patterns:
/// `assets/{namespace}/textures/{rest}` and `data/{namespace}/recipes/{rest}.json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchivePath<'a> {
	Texture { namespace: &'a str, rest: &'a str },
	Recipe { namespace: &'a str, rest: &'a str },
}

impl<'a> ArchivePath<'a> {
	/// Directory entries and paths with `.` or `..` segments never match.
	pub fn parse(name: &'a str) -> Option<Self> {
		if name.ends_with('/') || name.split('/').any(|s| s == "." || s == "..") {
			return None;
		}

		let segments: Vec<_> = name.splitn(4, '/').collect();
		match segments[..] {
			[_, "", ..] => None,
			["assets", namespace, "textures", rest] => Some(Self::Texture { namespace, rest }),
			["data", namespace, "recipes", rest] if rest.ends_with(".json") => {
				Some(Self::Recipe { namespace, rest })
			},
			_ => None,
		}
	}

	pub fn namespace(&self) -> &'a str {
		match *self {
			Self::Texture { namespace, .. } | Self::Recipe { namespace, .. } => namespace,
		}
	}

	/// `namespace:textures/...`, i.e. the entry path minus `assets/` and the namespace segment.
	pub fn resource_id(&self) -> String {
		match *self {
			Self::Texture { namespace, rest } => format!("{namespace}:textures/{rest}"),
			Self::Recipe { namespace, rest } => format!("{namespace}:recipes/{rest}"),
		}
	}

	/// Where an extracted texture lands: the entry path minus its leading `assets/` segment.
	/// Empty segments from doubled slashes are dropped.
	pub fn output_path(&self, outputRoot: &Path) -> Option<PathBuf> {
		match *self {
			Self::Texture { namespace, rest } => {
				let mut path = outputRoot.join(namespace).join("textures");
				path.extend(rest.split('/').filter(|segment| !segment.is_empty()));
				Some(path)
			},
			Self::Recipe { .. } => None,
		}
	}
}

#[test]
fn test_archive_path_texture() {
	let name = "assets/create/textures/block/brass_casing.png";
	let parsed = ArchivePath::parse(name).unwrap();
	assert!(
		parsed ==
			ArchivePath::Texture {
				namespace: "create",
				rest: "block/brass_casing.png"
			}
	);
	assert!(parsed.namespace() == "create");
	assert!(parsed.resource_id() == "create:textures/block/brass_casing.png");

	let out = parsed.output_path(Path::new("/out/assets")).unwrap();
	assert!(out == Path::new("/out/assets/create/textures/block/brass_casing.png"));
}

#[test]
fn test_archive_path_recipe() {
	let parsed = ArchivePath::parse("data/minecraft/recipes/oak_planks.json").unwrap();
	assert!(
		parsed ==
			ArchivePath::Recipe {
				namespace: "minecraft",
				rest: "oak_planks.json"
			}
	);
	assert!(parsed.output_path(Path::new("out")).is_none());

	assert!(ArchivePath::parse("data/minecraft/recipes/readme.txt").is_none());
	assert!(ArchivePath::parse("data/minecraft/recipes/").is_none());
}

#[test]
fn test_archive_path_doubled_slash() {
	let name = "assets/ns/textures//block/x.png";
	let parsed = ArchivePath::parse(name).unwrap();
	assert!(parsed.namespace() == "ns");
	assert!(parsed.resource_id() == "ns:textures//block/x.png");

	let out = parsed.output_path(Path::new("/out/assets")).unwrap();
	assert!(out == Path::new("/out/assets/ns/textures/block/x.png"));
}

#[test]
fn test_archive_path_rejects() {
	assert!(ArchivePath::parse("assets/minecraft/models/block/stone.json").is_none());
	assert!(ArchivePath::parse("assets/minecraft/other/stone.png").is_none());
	assert!(ArchivePath::parse("assets/minecraft/textures/").is_none());
	assert!(ArchivePath::parse("assets/minecraft/textures/block/").is_none());
	assert!(ArchivePath::parse("assets//textures/stone.png").is_none());
	assert!(ArchivePath::parse("data//recipes/stone.json").is_none());
	assert!(ArchivePath::parse("assets/x/textures/./a.png").is_none());
	assert!(ArchivePath::parse("assets/x/textures/../../../etc/passwd").is_none());
	assert!(ArchivePath::parse("META-INF/MANIFEST.MF").is_none());
	assert!(ArchivePath::parse("pack.png").is_none());
}
