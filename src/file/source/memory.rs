/* src/file/source/memory.rs */

use super::super::Source;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// A simple in-memory source useful for testing and embedded environments.
///
/// Contents can be replaced while a loader holds the source behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemorySource {
	/// Creates a new empty MemorySource.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces the data stored at `path`.
	pub fn insert(&self, path: impl Into<PathBuf>, value: impl Into<Vec<u8>>) {
		self.data
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(path.into(), value.into());
	}

	/// Removes the data stored at `path`.
	pub fn remove(&self, path: impl AsRef<Path>) {
		self.data
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(path.as_ref());
	}
}

#[async_trait]
impl Source for MemorySource {
	async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
		self.data
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(path)
			.cloned()
			.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such entry"))
	}
}
