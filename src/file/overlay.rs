/* src/file/overlay.rs */

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{AnyFormat, FileError, Format, ParseError, Source};

/// Reads `path` through `source` and overlays its values onto `target`.
///
/// Only the subset present in the file changes; objects merge key by key and
/// everything else (scalars, lists) replaces the current value. Keys match
/// exactly first, then ASCII case-insensitively.
pub async fn apply_file<T>(
	target: &mut T,
	path: &Path,
	source: &dyn Source,
	formats: &[AnyFormat],
) -> Result<(), FileError>
where
	T: Serialize + DeserializeOwned,
{
	let bytes = source.read(path).await.map_err(|source| FileError::Read {
		path: path.to_path_buf(),
		source,
	})?;

	let extension = path
		.extension()
		.and_then(|ext| ext.to_str())
		.unwrap_or_default();
	let format = AnyFormat::for_extension(formats, extension).ok_or_else(|| {
		FileError::UnsupportedFormat {
			path: path.to_path_buf(),
			extension: extension.to_string(),
		}
	})?;

	let decode_error = |source: ParseError| FileError::Decode {
		path: path.to_path_buf(),
		source,
	};

	// An empty YAML document carries no values; empty JSON is malformed.
	if format.accepts_empty() && bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(());
	}
	let overlay: Value = format.parse(&bytes).map_err(decode_error)?;
	if overlay.is_null() {
		return Ok(());
	}

	let mut merged = serde_json::to_value(&*target).map_err(|e| decode_error(ParseError(e.to_string())))?;
	merge(&mut merged, overlay);
	*target = serde_json::from_value(merged).map_err(|e| decode_error(ParseError(e.to_string())))?;
	Ok(())
}

fn merge(base: &mut Value, overlay: Value) {
	match (base, overlay) {
		(Value::Object(base), Value::Object(overlay)) => {
			for (key, value) in overlay {
				let key = matching_key(base, key);
				match base.get_mut(&key) {
					Some(slot) => merge(slot, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(base, overlay) => *base = overlay,
	}
}

fn matching_key(base: &Map<String, Value>, key: String) -> String {
	if base.contains_key(&key) {
		return key;
	}
	base.keys()
		.find(|existing| existing.eq_ignore_ascii_case(&key))
		.cloned()
		.unwrap_or(key)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_merge_keeps_absent_keys() {
		let mut base = json!({"port": 1, "server": {"host": "a", "port": 2}});
		merge(&mut base, json!({"server": {"port": 3}}));
		assert_eq!(base, json!({"port": 1, "server": {"host": "a", "port": 3}}));
	}

	#[test]
	fn test_merge_replaces_lists() {
		let mut base = json!({"tags": ["a", "b"]});
		merge(&mut base, json!({"tags": ["c"]}));
		assert_eq!(base, json!({"tags": ["c"]}));
	}

	#[test]
	fn test_merge_matches_case_insensitively() {
		let mut base = json!({"max_conns": 1});
		merge(&mut base, json!({"MAX_CONNS": 5}));
		assert_eq!(base, json!({"max_conns": 5}));
	}

	#[test]
	fn test_merge_fills_missing_optional() {
		let mut base = json!({"tls": null});
		merge(&mut base, json!({"tls": {"cert": "x"}}));
		assert_eq!(base, json!({"tls": {"cert": "x"}}));
	}
}
