/* src/file/error.rs */

use std::path::PathBuf;

/// Decoder failure, carrying the decoder's own message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error: {0}")]
pub struct ParseError(pub String);

/// Errors produced by the file layer.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
	/// The configured file could not be read, including when it does not exist.
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// No registered format handles the file's extension.
	#[error("unsupported file extension {extension:?} for {}", path.display())]
	UnsupportedFormat { path: PathBuf, extension: String },

	/// The content is malformed or does not fit the target structure.
	#[error("failed to decode {}: {source}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: ParseError,
	},
}
