/* src/layer/env.rs */

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::schema::{self, BindError, Leaf, Schema, Visit};

/// A lookup of environment variables.
pub trait Environment: Send + Sync {
	/// Returns the variable's value, or `None` when it is unset.
	fn var(&self, key: &str) -> Option<String>;
}

impl<E> Environment for Arc<E>
where
	E: Environment + ?Sized,
{
	fn var(&self, key: &str) -> Option<String> {
		(**self).var(key)
	}
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
	fn var(&self, key: &str) -> Option<String> {
		std::env::var(key).ok()
	}
}

/// An in-memory environment, useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MapEnv {
	vars: RwLock<BTreeMap<String, String>>,
}

impl MapEnv {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
		self.vars
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(key.into(), value.into());
	}

	pub fn remove(&self, key: &str) {
		self.vars
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(key);
	}
}

impl Environment for MapEnv {
	fn var(&self, key: &str) -> Option<String> {
		self.vars
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(key)
			.cloned()
	}
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let vars = iter
			.into_iter()
			.map(|(key, value)| (key.into(), value.into()))
			.collect();
		Self {
			vars: RwLock::new(vars),
		}
	}
}

struct EnvOverlay<'e> {
	env: &'e dyn Environment,
}

impl Visit for EnvOverlay<'_> {
	fn leaf(&mut self, leaf: Leaf<'_>) -> Result<(), BindError> {
		let Some(key) = leaf.rules.env_key().filter(|key| !key.is_empty()) else {
			return Ok(());
		};
		// Empty values count as unset.
		let Some(raw) = self.env.var(key).filter(|raw| !raw.is_empty()) else {
			return Ok(());
		};
		leaf.value
			.assign(&raw)
			.map_err(|source| BindError::new(leaf.path, Some(key), source))
	}
}

/// Overwrites every field whose environment variable is set and non-empty.
pub fn apply_env<S>(target: &mut S, env: &dyn Environment) -> Result<(), BindError>
where
	S: Schema + ?Sized,
{
	schema::walk(target, &mut EnvOverlay { env })
}
