/* src/file/source/file.rs */

use super::super::Source;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file system source backed by tokio::fs.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
	root: Option<PathBuf>,
}

impl FileSource {
	/// Reads paths as given, relative to the process working directory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Resolves relative paths against `root`; absolute paths are read as given.
	pub fn rooted(root: impl Into<PathBuf>) -> Self {
		Self {
			root: Some(root.into()),
		}
	}

	fn resolve(&self, path: &Path) -> PathBuf {
		match &self.root {
			Some(root) => root.join(path),
			None => path.to_path_buf(),
		}
	}
}

#[async_trait]
impl Source for FileSource {
	async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
		fs::read(self.resolve(path)).await
	}
}
