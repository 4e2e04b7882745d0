/* src/holder/meta.rs */

use std::time::Instant;

use super::Origin;

/// Metadata associated with an active instance.
#[derive(Debug, Clone)]
pub struct Meta {
	/// Timestamp when the instance became active.
	pub loaded_at: Instant,
	/// Version number, auto-incremented on each replacement.
	pub version: u64,
	/// Which operation produced the instance.
	pub origin: Origin,
}
