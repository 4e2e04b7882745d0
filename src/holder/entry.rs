/* src/holder/entry.rs */

use std::sync::Arc;

use super::Meta;

/// A config instance together with its metadata.
#[derive(Debug)]
pub struct Entry<T> {
	/// The instance, shared with every reader that fetched it.
	pub value: Arc<T>,
	/// Metadata about this entry.
	pub meta: Meta,
}

impl<T> Clone for Entry<T> {
	fn clone(&self) -> Self {
		Self {
			value: Arc::clone(&self.value),
			meta: self.meta.clone(),
		}
	}
}
