/* src/controller/loader.rs */

//!
//! Layered loading into a caller-owned instance.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::file::{self, AnyFormat, FileSource, Source};
use crate::holder::{Entry, Origin, Slot};
use crate::layer::{self, Environment, ProcessEnv};
use crate::schema::Schema;

#[cfg(feature = "logging")]
use log::{error, info};

use super::LoadError;
use super::refresh::RefreshTask;

/// Everything a configuration type needs to pass through all three layers
/// and be shared with a background refresh.
pub trait Bindable:
	Schema + Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> Bindable for T where
	T: Schema + Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Callback receiving each freshly bound instance.
pub type OnUpdate<T> = Arc<dyn Fn(Arc<T>) + Send + Sync>;

/// State shared between the loader and its refresh task.
pub(crate) struct Shared<T> {
	pub(crate) file: Option<PathBuf>,
	pub(crate) source: Box<dyn Source>,
	pub(crate) env: Box<dyn Environment>,
	pub(crate) formats: Vec<AnyFormat>,
	pub(crate) slot: Slot<T>,
	pub(crate) on_update: RwLock<Option<OnUpdate<T>>>,
}

impl<T> Shared<T>
where
	T: Bindable,
{
	/// Applies defaults, then the file, then the environment.
	pub(crate) async fn apply_layers(&self, target: &mut T) -> Result<(), LoadError> {
		layer::apply_defaults(target).map_err(LoadError::Defaults)?;

		if let Some(path) = &self.file {
			file::apply_file(target, path, self.source.as_ref(), &self.formats).await?;
		}

		layer::apply_env(target, self.env.as_ref()).map_err(LoadError::Env)?;
		Ok(())
	}
}

/// Binds a configuration type from defaults, an optional file and the
/// environment, in that order of increasing precedence.
pub struct Loader<T> {
	pub(crate) shared: Arc<Shared<T>>,
	load_lock: tokio::sync::Mutex<()>,
	pub(crate) refresh: Mutex<Option<RefreshTask>>,
}

/// Builder for Loader.
pub struct LoaderBuilder<T> {
	file: Option<PathBuf>,
	source: Option<Box<dyn Source>>,
	env: Option<Box<dyn Environment>>,
	formats: Vec<AnyFormat>,
	_marker: PhantomData<fn() -> T>,
}

impl<T> LoaderBuilder<T>
where
	T: Bindable,
{
	pub fn new() -> Self {
		Self {
			file: None,
			source: None,
			env: None,
			formats: Vec::new(),
			_marker: PhantomData,
		}
	}

	/// Configures the file layer. Once set, the file is mandatory.
	pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
		self.file = Some(path.into());
		self
	}

	/// Where file bytes come from; defaults to [`FileSource`].
	pub fn source(mut self, source: impl Source + 'static) -> Self {
		self.source = Some(Box::new(source));
		self
	}

	/// Where environment variables come from; defaults to [`ProcessEnv`].
	pub fn env(mut self, env: impl Environment + 'static) -> Self {
		self.env = Some(Box::new(env));
		self
	}

	/// Registers a format. Without any, every compiled-in format is used.
	pub fn format(mut self, format: AnyFormat) -> Self {
		self.formats.push(format);
		self
	}

	pub fn build(self) -> Loader<T> {
		let formats = if self.formats.is_empty() {
			AnyFormat::all()
		} else {
			self.formats
		};

		Loader {
			shared: Arc::new(Shared {
				file: self.file,
				source: self.source.unwrap_or_else(|| Box::new(FileSource::new())),
				env: self.env.unwrap_or_else(|| Box::new(ProcessEnv)),
				formats,
				slot: Slot::new(),
				on_update: RwLock::new(None),
			}),
			load_lock: tokio::sync::Mutex::new(()),
			refresh: Mutex::new(None),
		}
	}
}

impl<T> Default for LoaderBuilder<T>
where
	T: Bindable,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Loader<T>
where
	T: Bindable,
{
	pub fn builder() -> LoaderBuilder<T> {
		LoaderBuilder::new()
	}

	/// A loader without a file layer, reading the process environment.
	pub fn new() -> Self {
		LoaderBuilder::new().build()
	}

	/// A loader reading `path` from the file system and the process environment.
	pub fn with_file(path: impl Into<PathBuf>) -> Self {
		LoaderBuilder::new().file(path).build()
	}

	/// Applies all three layers directly into `target`.
	///
	/// Loads are serialized. The first failing layer aborts the call and
	/// `target` keeps whatever the earlier layers already wrote, so it must
	/// be treated as unreliable. On success a snapshot of `target` becomes
	/// the active instance.
	pub async fn load(&self, target: &mut T) -> Result<(), LoadError> {
		let _guard = self.load_lock.lock().await;

		self.shared.apply_layers(target).await?;
		let _meta = self.shared.slot.replace(Arc::new(target.clone()), Origin::Load);

		#[cfg(feature = "logging")]
		info!(
			"Loaded config (version {}, file {:?})",
			_meta.version, self.shared.file
		);
		Ok(())
	}

	/// Like [`load`](Self::load), but wraps any failure in [`LoadError::Fatal`].
	///
	/// Intended for start-up paths where the caller aborts on error.
	pub async fn must_load(&self, target: &mut T) -> Result<(), LoadError> {
		self.load(target).await.map_err(|e| {
			#[cfg(feature = "logging")]
			error!("Fatal config load failure at {} stage: {}", e.stage(), e);
			LoadError::Fatal(Box::new(e))
		})
	}

	/// Returns the active instance, if any load or refresh has succeeded.
	pub fn current(&self) -> Option<Arc<T>> {
		self.shared.slot.get()
	}

	/// Returns the active instance with its metadata.
	pub fn entry(&self) -> Option<Entry<T>> {
		self.shared.slot.entry()
	}

	/// The configured file path, if the file layer is enabled.
	pub fn file(&self) -> Option<&Path> {
		self.shared.file.as_deref()
	}
}

impl<T> Default for Loader<T>
where
	T: Bindable,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Drop for Loader<T> {
	fn drop(&mut self) {
		let task = self
			.refresh
			.get_mut()
			.unwrap_or_else(std::sync::PoisonError::into_inner)
			.take();
		if let Some(task) = task {
			task.abort();
		}
	}
}

impl<T> std::fmt::Debug for Loader<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Loader");
		s.field("file", &self.shared.file);
		s.field("formats", &self.shared.formats);
		s.field("slot", &self.shared.slot);
		s.field(
			"refreshing",
			&self
				.refresh
				.lock()
				.map(|task| task.is_some())
				.unwrap_or(false),
		);
		s.finish_non_exhaustive()
	}
}
