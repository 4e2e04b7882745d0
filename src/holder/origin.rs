/* src/holder/origin.rs */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
	/// Bound by an explicit `load` call.
	Load,
	/// Rebuilt by a background refresh tick.
	Refresh,
}
