/* src/lib.rs */

//!
//! Layered configuration binding with periodic live refresh.
//!
//! A configuration structure is resolved from three sources, each overriding
//! the previous one:
//!
//! 1. **Defaults**: literals registered per field, applied only to zero-valued fields.
//! 2. **File**: an optional JSON or YAML file, merged over the structure.
//! 3. **Env**: environment variables registered per field, applied when non-empty.
//!
//! The crate is split into:
//!
//! - **schema**: field registration ([`Schema`], [`Rules`]) and string coercion.
//! - **layer**: the defaults and environment layers.
//! - **file**: the file layer, with pluggable sources and formats.
//! - **holder**: lock-free storage of the active instance.
//! - **controller**: the [`Loader`] facade (one-shot load, periodic refresh).
//!
//! ## Feature Flags
//!
//! - `full` (default): Enables all features.
//! - `json`, `yaml`: File formats.
//! - `logging`: Lifecycle messages through the `log` facade.
//!
//! ## Basic Usage
//!
//! ```ignore
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct AppConfig {
//! 	port: i64,
//! }
//!
//! impl Schema for AppConfig {
//! 	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
//! 		w.field("port", &mut self.port, Rules::new().default("8080").env("APP_PORT"))
//! 	}
//! }
//!
//! let loader = Loader::<AppConfig>::new();
//! let mut config = AppConfig::default();
//! loader.load(&mut config).await?;
//! ```
//!
//! See `demos/basic.rs` for a complete example.

pub mod controller;
pub mod file;
pub mod holder;
pub mod layer;
pub mod schema;

pub use controller::{Bindable, LoadError, Loader, LoaderBuilder, RefreshError};
pub use layer::Layer;
pub use schema::{BindError, Rules, Schema, Walker};
