/* src/file/mod.rs */

//!
//! The file layer: raw bytes from a [`Source`], decoded by a [`Format`]
//! chosen from the file extension, merged over the target structure.

mod error;
pub mod format;
mod overlay;
pub mod source;

pub use error::{FileError, ParseError};
pub use format::AnyFormat;
pub use overlay::apply_file;
pub use source::{FileSource, MemorySource};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Abstract format parser that converts bytes into a structured object.
pub trait Format: Send + Sync {
	/// Lowercase extensions handled by this format, without the dot.
	fn extensions(&self) -> &'static [&'static str];

	/// Parse the raw bytes into the target type.
	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, ParseError>;
}

/// Abstract data source that retrieves raw bytes by path.
#[async_trait]
pub trait Source: Send + Sync {
	/// Read the whole resource.
	async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

#[async_trait]
impl<S> Source for std::sync::Arc<S>
where
	S: Source + ?Sized,
{
	async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
		(**self).read(path).await
	}
}
