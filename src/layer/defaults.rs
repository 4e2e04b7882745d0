/* src/layer/defaults.rs */

use crate::schema::{self, BindError, Leaf, Schema, Visit};

struct Defaults;

impl Visit for Defaults {
	fn leaf(&mut self, leaf: Leaf<'_>) -> Result<(), BindError> {
		let Some(literal) = leaf.rules.default_literal() else {
			return Ok(());
		};
		if literal.is_empty() || !leaf.value.is_zero() {
			return Ok(());
		}
		leaf.value
			.assign(literal)
			.map_err(|source| BindError::new(leaf.path, None, source))
	}
}

/// Assigns each field's default literal, but only where the field is still zero.
///
/// Aborts on the first literal that does not coerce.
pub fn apply_defaults<S>(target: &mut S) -> Result<(), BindError>
where
	S: Schema + ?Sized,
{
	schema::walk(target, &mut Defaults)
}
