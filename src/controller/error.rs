/* src/controller/error.rs */

use thiserror::Error;

use crate::file::FileError;
use crate::layer::Layer;
use crate::schema::BindError;

/// Errors that abort a load. The target may be left partially bound.
#[derive(Debug, Error)]
pub enum LoadError {
	/// A default literal does not coerce; this is a schema authoring bug.
	#[error("failed to process defaults: {0}")]
	Defaults(#[source] BindError),

	#[error("failed to load config file: {0}")]
	File(#[from] FileError),

	#[error("failed to process env vars: {0}")]
	Env(#[source] BindError),

	/// Returned by `must_load`; the caller decides whether to abort.
	#[error("fatal configuration error: {0}")]
	Fatal(#[source] Box<LoadError>),
}

impl LoadError {
	/// The layer that produced the failure.
	pub fn stage(&self) -> Layer {
		match self {
			Self::Defaults(_) => Layer::Defaults,
			Self::File(_) => Layer::File,
			Self::Env(_) => Layer::Env,
			Self::Fatal(inner) => inner.stage(),
		}
	}
}

/// Errors from starting or stopping the background refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefreshError {
	#[error("auto refresh is already running")]
	AlreadyRunning,

	#[error("auto refresh is not running")]
	NotRunning,

	#[error("auto refresh requires a tokio runtime")]
	NoRuntime,

	#[error("refresh interval must be non-zero")]
	ZeroInterval,
}
