/* src/holder/mod.rs */

//!
//! Storage for the active configuration instance.

mod entry;
mod meta;
mod origin;
mod slot;

pub use entry::Entry;
pub use meta::Meta;
pub use origin::Origin;
pub use slot::Slot;
