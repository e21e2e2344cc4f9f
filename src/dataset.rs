//! Loading the record list the widget searches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roster_core::Record;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DatasetError {
	#[error("failed to read dataset {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("dataset {} is not a JSON array of records", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// Read a JSON array of records. Missing fields are treated as empty.
pub fn load(path: &Path) -> Result<Vec<Record>, DatasetError> {
	let contents = fs::read_to_string(path).map_err(|source| DatasetError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	let records: Vec<Record> =
		serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
	debug!(path = %path.display(), records = records.len(), "dataset parsed");
	Ok(records)
}
