/* src/schema/error.rs */

use super::CoerceError;

/// A rule could not be applied to a leaf field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to set field {path}{}: {source}", env_suffix(.env))]
pub struct BindError {
	/// Dotted path of the field, e.g. `server.port`.
	pub path: String,
	/// Environment variable that supplied the value, if any.
	pub env: Option<String>,
	#[source]
	pub source: CoerceError,
}

impl BindError {
	pub fn new(path: impl Into<String>, env: Option<&str>, source: CoerceError) -> Self {
		Self {
			path: path.into(),
			env: env.map(str::to_string),
			source,
		}
	}
}

fn env_suffix(env: &Option<String>) -> String {
	env.as_ref()
		.map(|key| format!(" from env {key}"))
		.unwrap_or_default()
}
