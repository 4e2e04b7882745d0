/* src/schema/duration.rs */

//!
//! Serde adapter for [`Duration`] fields that appear in configuration files.
//!
//! Serializes as integer nanoseconds and accepts either integer nanoseconds
//! or a duration literal (`"5s"`, `"1h30m"`) when deserializing.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Http {
//! 	#[serde(with = "stratum::schema::duration")]
//! 	timeout: Duration,
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de, ser};

use super::coerce;

pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let nanos = u64::try_from(value.as_nanos()).map_err(<S::Error as ser::Error>::custom)?;
	serializer.serialize_u64(nanos)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Nanos(u64),
		Literal(String),
	}

	match Raw::deserialize(deserializer)? {
		Raw::Nanos(nanos) => Ok(Duration::from_nanos(nanos)),
		Raw::Literal(literal) => coerce::coerce_duration(&literal).map_err(de::Error::custom),
	}
}
