use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ArchiveError;
use crate::types::{ArchivePath, TextureRecord};
use crate::JsonValue;

pub const archiveExtension: &str = "jar";

/// Everything pulled out of a set of archives in one pass.
#[derive(Debug, Default)]
pub struct ScanResult {
	pub textures: Vec<TextureRecord>,
	pub recipes: Vec<JsonValue>,
	pub recipeTypes: BTreeSet<String>,
	/// Recipe entries that were not valid JSON.
	pub skippedRecipes: usize,
}

pub struct JarFile {
	path: PathBuf,
	zipfile: ZipArchive<File>,
}

impl JarFile {
	pub fn open(path: &Path) -> Result<Self, ArchiveError> {
		let open = || -> Result<_, ZipError> { ZipArchive::new(File::open(path)?) };
		Ok(Self {
			path: path.to_owned(),
			zipfile: open().map_err(|source| ArchiveError::Open {
				path: path.into(),
				source,
			})?,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Extracts texture entries below `texturesRoot` and collects recipe documents,
	/// walking entries in archive order.
	pub fn scan(&mut self, texturesRoot: &Path, result: &mut ScanResult) -> Result<(), ArchiveError> {
		let jarPath = self.path.clone();
		let (textureCount, recipeCount) = (result.textures.len(), result.recipes.len());

		for index in 0 .. self.zipfile.len() {
			let mut entry = self.zipfile.by_index(index).map_err(|source| ArchiveError::Entry {
				path: jarPath.clone(),
				entry: format!("#{index}"),
				source,
			})?;
			if entry.is_dir() {
				continue;
			}

			let name = entry.name().to_owned();
			match ArchivePath::parse(&name) {
				Some(matched @ ArchivePath::Texture { .. }) => {
					let Some(outPath) = matched.output_path(texturesRoot) else {
						continue;
					};
					copy_entry(&mut entry, &name, &outPath)?;
					let record = TextureRecord {
						modId: matched.namespace().into(),
						internalPath: name.clone(),
						outPath,
						id: matched.resource_id(),
						index: result.textures.len(),
					};
					result.textures.push(record);
				},
				Some(ArchivePath::Recipe { .. }) => {
					read_recipe(&mut entry, &jarPath, name.clone(), result)?;
				},
				None => {},
			}
		}

		debug!(
			archive = %jarPath.display(),
			textures = result.textures.len() - textureCount,
			recipes = result.recipes.len() - recipeCount,
			"scanned archive"
		);
		Ok(())
	}

	/// Copies a single named entry to `dest`. Returns `None` if the archive has no such entry.
	pub fn extract(&mut self, entryName: &str, dest: &Path) -> Result<Option<PathBuf>, ArchiveError> {
		let mut entry = match self.zipfile.by_name(entryName) {
			Ok(entry) => entry,
			Err(ZipError::FileNotFound) => return Ok(None),
			Err(source) => {
				return Err(ArchiveError::Entry {
					path: self.path.clone(),
					entry: entryName.into(),
					source,
				})
			},
		};
		copy_entry(&mut entry, entryName, dest)?;
		Ok(Some(dest.to_owned()))
	}
}

pub fn is_archive(path: &Path) -> bool {
	path.is_file() && path.extension().map_or(false, |ext| ext == archiveExtension)
}

/// Scans each archive in order. Missing paths and non-archives are skipped; the first
/// archive that cannot be opened or read aborts the scan.
pub fn scan_archives<P: AsRef<Path>>(
	archives: &[P],
	texturesRoot: &Path,
) -> Result<ScanResult, ArchiveError> {
	let mut result = ScanResult::default();
	for path in archives {
		let path = path.as_ref();
		if !is_archive(path) {
			debug!(path = %path.display(), "skipping non-archive");
			continue;
		}
		JarFile::open(path)?.scan(texturesRoot, &mut result)?;
	}

	info!(
		textures = result.textures.len(),
		recipes = result.recipes.len(),
		skipped = result.skippedRecipes,
		"archive scan finished"
	);
	Ok(result)
}

/// Extracts a mod icon to `<iconsDir>/<modId>_<basename>`.
pub fn extract_icon(
	archive: &Path,
	iconPath: &str,
	modId: &str,
	iconsDir: &Path,
) -> Result<Option<PathBuf>, ArchiveError> {
	if !is_archive(archive) {
		return Ok(None);
	}

	let basename = iconPath.rsplit('/').next().unwrap_or(iconPath);
	let dest = iconsDir.join(format!("{modId}_{basename}"));
	JarFile::open(archive)?.extract(iconPath, &dest)
}

fn copy_entry(entry: &mut ZipFile, name: &str, dest: &Path) -> Result<u64, ArchiveError> {
	stream_to_file(entry, dest).map_err(|source| ArchiveError::Extract {
		entry: name.into(),
		dest: dest.into(),
		source,
	})
}

fn stream_to_file(entry: &mut ZipFile, dest: &Path) -> io::Result<u64> {
	if let Some(parent) = dest.parent() {
		fs::create_dir_all(parent)?;
	}
	// io::copy streams through a fixed-size stack buffer
	io::copy(entry, &mut File::create(dest)?)
}

fn read_recipe(
	entry: &mut ZipFile,
	jarPath: &Path,
	name: String,
	result: &mut ScanResult,
) -> Result<(), ArchiveError> {
	let mut recipe: JsonValue = match serde_json::from_reader(entry) {
		Ok(recipe) => recipe,
		Err(err) if err.is_io() => {
			return Err(ArchiveError::Entry {
				path: jarPath.into(),
				entry: name,
				source: ZipError::Io(err.into()),
			})
		},
		Err(err) => {
			warn!(archive = %jarPath.display(), entry = %name, "skipping malformed recipe: {err}");
			result.skippedRecipes += 1;
			return Ok(());
		},
	};

	if let JsonValue::Object(fields) = &mut recipe {
		if let Some(JsonValue::String(kind)) = fields.get("type") {
			result.recipeTypes.insert(kind.clone());
		}
		fields.insert("filePath".into(), JsonValue::String(name));
		result.recipes.push(recipe);
	}
	Ok(())
}
