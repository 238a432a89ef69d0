use std::path::Path;

use serde::Serialize;

use super::{documentVersion, write_json};
use crate::error::ExportError;
use crate::jarfs::ScanResult;
use crate::types::TextureRecord;
use crate::JsonValue;

#[derive(Serialize)]
struct RecipeDocument<'a> {
	recipes: &'a [JsonValue],
	types: Vec<&'a str>,
	version: u32,
}

pub fn export_textures(textures: &[TextureRecord], path: &Path) -> Result<usize, ExportError> {
	super::write_document(path, "textures", textures)?;
	Ok(textures.len())
}

/// Writes every collected recipe plus the sorted set of recipe `type` values.
pub fn export_recipes(scan: &ScanResult, path: &Path) -> Result<usize, ExportError> {
	let document = RecipeDocument {
		recipes: &scan.recipes,
		types: scan.recipeTypes.iter().map(String::as_str).collect(),
		version: documentVersion,
	};
	write_json(path, &document)?;
	Ok(scan.recipes.len())
}

#[test]
fn test_export_recipes() {
	let mut scan = ScanResult::default();
	scan.recipes.push(serde_json::json!({"type": "b", "filePath": "data/x/recipes/one.json"}));
	scan.recipes.push(serde_json::json!({"type": "a", "filePath": "data/x/recipes/two.json"}));
	scan.recipeTypes.insert("b".into());
	scan.recipeTypes.insert("a".into());

	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("recipes.json");
	assert!(export_recipes(&scan, &path).unwrap() == 2);

	let json: JsonValue = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
	assert!(json["version"] == 1);
	assert!(json["types"] == serde_json::json!(["a", "b"]));
	assert!(json["recipes"][1]["filePath"] == "data/x/recipes/two.json");
}
