/* src/file/format/mod.rs */

use super::{Format, ParseError};
use serde::de::DeserializeOwned;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::Json;

#[cfg(feature = "yaml")]
mod yaml;
#[cfg(feature = "yaml")]
pub use yaml::Yaml;

/// An enum wrapper for all supported formats, enabling dynamic dispatch-like behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFormat {
	#[cfg(feature = "json")]
	Json,
	#[cfg(feature = "yaml")]
	Yaml,
}

impl AnyFormat {
	/// Every format compiled into this build.
	pub fn all() -> Vec<Self> {
		#[allow(unused_mut)]
		let mut formats = Vec::new();
		#[cfg(feature = "json")]
		formats.push(Self::Json);
		#[cfg(feature = "yaml")]
		formats.push(Self::Yaml);
		formats
	}

	/// Finds the format handling `extension` (compared case-insensitively).
	pub fn for_extension(formats: &[Self], extension: &str) -> Option<Self> {
		let extension = extension.to_ascii_lowercase();
		formats
			.iter()
			.copied()
			.find(|format| format.extensions().contains(&extension.as_str()))
	}

	/// Whether a whitespace-only document is a valid, empty document.
	pub fn accepts_empty(&self) -> bool {
		match self {
			#[cfg(feature = "json")]
			Self::Json => false,
			#[cfg(feature = "yaml")]
			Self::Yaml => true,
			#[cfg(not(any(feature = "json", feature = "yaml")))]
			_ => unreachable!(),
		}
	}
}

impl Format for AnyFormat {
	fn extensions(&self) -> &'static [&'static str] {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
			#[cfg(not(any(feature = "json", feature = "yaml")))]
			_ => unreachable!(),
		}
	}

	fn parse<T: DeserializeOwned>(&self, _input: &[u8]) -> Result<T, ParseError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.parse(_input),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.parse(_input),
			#[cfg(not(any(feature = "json", feature = "yaml")))]
			_ => unreachable!(),
		}
	}
}
