/* src/holder/slot.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use arc_swap::ArcSwapOption;

use super::{Entry, Meta, Origin};

/// Holds at most one active instance, replaced wholesale.
///
/// Reads are lock-free; a replacement never mutates the instance that
/// earlier readers already hold.
pub struct Slot<T> {
	inner: ArcSwapOption<Entry<T>>,
	version: AtomicU64,
}

impl<T> Slot<T> {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self {
			inner: ArcSwapOption::empty(),
			version: AtomicU64::new(0),
		}
	}

	/// Returns the active instance. This is a wait-free operation.
	pub fn get(&self) -> Option<Arc<T>> {
		self.inner
			.load_full()
			.map(|entry| Arc::clone(&entry.value))
	}

	/// Returns the active instance with its metadata.
	pub fn entry(&self) -> Option<Entry<T>> {
		self.inner.load_full().map(|entry| (*entry).clone())
	}

	/// Makes `value` the active instance and returns its metadata.
	pub fn replace(&self, value: Arc<T>, origin: Origin) -> Meta {
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let meta = Meta {
			loaded_at: Instant::now(),
			version,
			origin,
		};
		self.inner.store(Some(Arc::new(Entry {
			value,
			meta: meta.clone(),
		})));
		meta
	}

	/// Returns true if nothing has been loaded yet.
	pub fn is_empty(&self) -> bool {
		self.inner.load().is_none()
	}
}

impl<T> Default for Slot<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> std::fmt::Debug for Slot<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Slot")
			.field("entry", &self.entry())
			.finish()
	}
}
