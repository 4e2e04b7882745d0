/* src/schema/mod.rs */

//!
//! Field registration and traversal.
//!
//! A configuration type describes its bindable surface once, in
//! [`Schema::walk`]. Each call registers either a leaf field with its
//! [`Rules`], or a nested structure that is recursed into:
//!
//! ```ignore
//! impl Schema for AppConfig {
//! 	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
//! 		w.field("port", &mut self.port, Rules::new().default("8080").env("APP_PORT"))?;
//! 		w.nested("server", &mut self.server)?;
//! 		w.optional("tls", &mut self.tls)
//! 	}
//! }
//! ```
//!
//! Fields that are not registered are never touched by the defaults or
//! environment layers.

pub mod coerce;
pub mod duration;
mod error;
mod value;

pub use coerce::CoerceError;
pub use error::BindError;
pub use value::{Kind, Value};

/// A structure whose fields can be bound by the layers.
pub trait Schema {
	/// Registers every field with the walker, in declaration order.
	fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), BindError>;
}

impl<S> Schema for Box<S>
where
	S: Schema + ?Sized,
{
	fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), BindError> {
		(**self).walk(walker)
	}
}

/// Per-field directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
	default: Option<&'static str>,
	env: Option<&'static str>,
}

impl Rules {
	pub const fn new() -> Self {
		Self {
			default: None,
			env: None,
		}
	}

	/// Literal applied when the field still holds its zero value.
	pub const fn default(mut self, literal: &'static str) -> Self {
		self.default = Some(literal);
		self
	}

	/// Environment variable that overrides the field when set and non-empty.
	pub const fn env(mut self, key: &'static str) -> Self {
		self.env = Some(key);
		self
	}

	pub const fn default_literal(&self) -> Option<&'static str> {
		self.default
	}

	pub const fn env_key(&self) -> Option<&'static str> {
		self.env
	}
}

/// A leaf field handed to a [`Visit`] implementation.
pub struct Leaf<'a> {
	pub path: &'a str,
	pub value: &'a mut dyn Value,
	pub rules: Rules,
}

/// Receives every leaf field during a walk.
pub trait Visit {
	fn leaf(&mut self, leaf: Leaf<'_>) -> Result<(), BindError>;
}

/// Drives a [`Visit`] through a schema, tracking the dotted field path.
pub struct Walker<'v> {
	visitor: &'v mut dyn Visit,
	path: String,
}

impl<'v> Walker<'v> {
	pub fn new(visitor: &'v mut dyn Visit) -> Self {
		Self {
			visitor,
			path: String::new(),
		}
	}

	/// Registers a leaf field.
	pub fn field<V>(&mut self, name: &str, value: &mut V, rules: Rules) -> Result<(), BindError>
	where
		V: Value,
	{
		let mark = self.push(name);
		let result = self.visitor.leaf(Leaf {
			path: &self.path,
			value,
			rules,
		});
		self.path.truncate(mark);
		result
	}

	/// Registers a nested structure; always recursed.
	pub fn nested<S>(&mut self, name: &str, value: &mut S) -> Result<(), BindError>
	where
		S: Schema + ?Sized,
	{
		let mark = self.push(name);
		let result = value.walk(self);
		self.path.truncate(mark);
		result
	}

	/// Registers an optional structure; recursed only when present, never allocated.
	pub fn optional<S>(&mut self, name: &str, value: &mut Option<S>) -> Result<(), BindError>
	where
		S: Schema,
	{
		match value {
			Some(inner) => self.nested(name, inner),
			None => Ok(()),
		}
	}

	fn push(&mut self, name: &str) -> usize {
		let mark = self.path.len();
		if !self.path.is_empty() {
			self.path.push('.');
		}
		self.path.push_str(name);
		mark
	}
}

/// Walks `target`, feeding each registered leaf to `visitor`.
///
/// Stops at the first error returned by the visitor.
pub fn walk<S>(target: &mut S, visitor: &mut dyn Visit) -> Result<(), BindError>
where
	S: Schema + ?Sized,
{
	target.walk(&mut Walker::new(visitor))
}

/// Static description of one leaf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
	pub path: String,
	pub kind: Kind,
	pub default: Option<&'static str>,
	pub env: Option<&'static str>,
}

/// Lists the leaf fields of `S` as registered in its [`Schema`] impl.
///
/// Optional sub-structures that are `None` in `S::default()` are not listed.
/// An error returned by the schema's own `walk` is passed through.
pub fn describe<S>() -> Result<Vec<FieldInfo>, BindError>
where
	S: Schema + Default,
{
	struct Collect(Vec<FieldInfo>);

	impl Visit for Collect {
		fn leaf(&mut self, leaf: Leaf<'_>) -> Result<(), BindError> {
			self.0.push(FieldInfo {
				path: leaf.path.to_string(),
				kind: leaf.value.kind(),
				default: leaf.rules.default_literal(),
				env: leaf.rules.env_key(),
			});
			Ok(())
		}
	}

	let mut target = S::default();
	let mut collect = Collect(Vec::new());
	walk(&mut target, &mut collect)?;
	Ok(collect.0)
}
