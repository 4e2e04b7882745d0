/* src/layer/mod.rs */

//!
//! The rule-driven layers: compiled-in defaults and environment overrides.
//!
//! The file layer lives in [`crate::file`] because it decodes whole documents
//! instead of applying per-field rules.

mod defaults;
mod env;

pub use defaults::apply_defaults;
pub use env::{Environment, MapEnv, ProcessEnv, apply_env};

use std::fmt;

/// One of the ordered configuration sources, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
	Defaults,
	File,
	Env,
}

impl fmt::Display for Layer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Defaults => "defaults",
			Self::File => "file",
			Self::Env => "env",
		};
		f.write_str(name)
	}
}
