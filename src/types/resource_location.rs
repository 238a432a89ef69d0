use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// Namespaced identifier (`namespace:path`) as used by host registries.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourceLocation {
	pub modid: String,
	pub name: String,
}

impl ResourceLocation {
	pub const defaultNamespace: &'static str = "minecraft";

	pub fn new(modid: &str, name: &str) -> Self {
		Self {
			modid: modid.to_ascii_lowercase(),
			name: name.to_ascii_lowercase(),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.modid
	}

	pub fn path(&self) -> &str {
		&self.name
	}
}

impl From<&str> for ResourceLocation {
	fn from(combined: &str) -> Self {
		if let Some((modid, name)) = combined.split_once(':') {
			Self::new(modid, name)
		} else {
			Self::new(Self::defaultNamespace, combined)
		}
	}
}

impl From<String> for ResourceLocation {
	fn from(combined: String) -> Self {
		combined.as_str().into()
	}
}

impl From<ResourceLocation> for String {
	fn from(loc: ResourceLocation) -> Self {
		loc.to_string()
	}
}

impl Display for ResourceLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.modid, self.name)
	}
}

impl Debug for ResourceLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<Self as Display>::fmt(self, f)
	}
}

#[test]
fn test_resource_location() {
	let loc = ResourceLocation::from("create:Brass_Ingot");
	assert!(loc.namespace() == "create");
	assert!(loc.path() == "brass_ingot");
	assert!(loc.to_string() == "create:brass_ingot");

	let loc = ResourceLocation::from("stone");
	assert!(loc.namespace() == "minecraft");
	assert!(String::from(loc) == "minecraft:stone");

	let loc: ResourceLocation = serde_json::from_str("\"minecraft:oak_log\"").unwrap();
	assert!(loc == ResourceLocation::new("minecraft", "oak_log"));
	assert!(serde_json::to_string(&loc).unwrap() == "\"minecraft:oak_log\"");
}
