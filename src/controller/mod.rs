/* src/controller/mod.rs */

//!
//! The loader facade coordinating the layers.
//!
//! - [`Loader`] - one-shot load plus periodic refresh
//! - [`LoaderBuilder`] - file path, source, environment and formats

mod error;
mod loader;
mod refresh;

pub use error::{LoadError, RefreshError};
pub use loader::{Bindable, Loader, LoaderBuilder, OnUpdate};
