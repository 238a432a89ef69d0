use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum SnapshotError {
	#[error("failed to read host snapshot {}: {source}", path.display())]
	Read { path: PathBuf, source: io::Error },

	#[error("malformed host snapshot {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		source: serde_json::Error,
	},
}

#[derive(Error, Debug)]
pub enum ArchiveError {
	#[error("failed to open archive {}: {source}", path.display())]
	Open { path: PathBuf, source: ZipError },

	#[error("failed to read `{entry}` in {}: {source}", path.display())]
	Entry {
		path: PathBuf,
		entry: String,
		source: ZipError,
	},

	#[error("failed to extract `{entry}` to {}: {source}", dest.display())]
	Extract {
		entry: String,
		dest: PathBuf,
		source: io::Error,
	},
}

#[derive(Error, Debug)]
pub enum ExportError {
	#[error("failed to write {}: {source}", path.display())]
	Io { path: PathBuf, source: io::Error },

	#[error("failed to serialize {}: {source}", path.display())]
	Json {
		path: PathBuf,
		source: serde_json::Error,
	},
}

/// Failure of a single dump step. Sibling steps still run.
#[derive(Error, Debug)]
pub enum StepError {
	#[error(transparent)]
	Archive(#[from] ArchiveError),

	#[error(transparent)]
	Export(#[from] ExportError),

	#[error("{}: {source}", path.display())]
	Io { path: PathBuf, source: io::Error },
}
