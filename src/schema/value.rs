/* src/schema/value.rs */

use std::fmt;
use std::time::Duration;

use super::coerce::{self, CoerceError};

/// The primitive shape of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	String,
	Bool,
	Int,
	Uint,
	Float,
	Duration,
	StringList,
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::String => "string",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Uint => "uint",
			Self::Float => "float",
			Self::Duration => "duration",
			Self::StringList => "string list",
		};
		f.write_str(name)
	}
}

/// A leaf field that can be assigned from a raw string.
pub trait Value {
	/// The shape used to pick a coercion rule.
	fn kind(&self) -> Kind;

	/// Whether the field still holds its type's zero value.
	fn is_zero(&self) -> bool;

	/// Coerces `raw` and overwrites the field.
	fn assign(&mut self, raw: &str) -> Result<(), CoerceError>;
}

impl Value for String {
	fn kind(&self) -> Kind {
		Kind::String
	}

	fn is_zero(&self) -> bool {
		self.is_empty()
	}

	fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
		raw.clone_into(self);
		Ok(())
	}
}

impl Value for bool {
	fn kind(&self) -> Kind {
		Kind::Bool
	}

	fn is_zero(&self) -> bool {
		!*self
	}

	fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
		*self = coerce::parse_bool(raw)?;
		Ok(())
	}
}

macro_rules! impl_integer {
	($kind:ident => $($ty:ty),+) => {
		$(
			impl Value for $ty {
				fn kind(&self) -> Kind {
					Kind::$kind
				}

				fn is_zero(&self) -> bool {
					*self == 0
				}

				fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
					*self = coerce::parse_int(raw)?;
					Ok(())
				}
			}
		)+
	};
}

impl_integer!(Int => i8, i16, i32, i64, isize);
impl_integer!(Uint => u8, u16, u32, u64, usize);

macro_rules! impl_float {
	($($ty:ty),+) => {
		$(
			impl Value for $ty {
				fn kind(&self) -> Kind {
					Kind::Float
				}

				fn is_zero(&self) -> bool {
					*self == 0.0
				}

				fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
					*self = coerce::parse_float(raw)?;
					Ok(())
				}
			}
		)+
	};
}

impl_float!(f32, f64);

impl Value for Duration {
	fn kind(&self) -> Kind {
		Kind::Duration
	}

	fn is_zero(&self) -> bool {
		Duration::is_zero(self)
	}

	fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
		*self = coerce::coerce_duration(raw)?;
		Ok(())
	}
}

impl Value for Vec<String> {
	fn kind(&self) -> Kind {
		Kind::StringList
	}

	fn is_zero(&self) -> bool {
		self.is_empty()
	}

	fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
		*self = coerce::split_list(raw);
		Ok(())
	}
}
