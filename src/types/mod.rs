pub mod archive_path;
pub mod catalog;
pub mod resource_location;

pub use archive_path::ArchivePath;
pub use catalog::{ItemEntry, ModEntry, PotionEntry, RegistryEntry, TextureRecord};
pub use resource_location::ResourceLocation;
