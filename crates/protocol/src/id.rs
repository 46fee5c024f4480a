use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Remote-assigned identifier.
///
/// Build ids arrive as JSON numbers and session ids as JSON strings, so both
/// are accepted and normalized to their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RemoteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RemoteId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for RemoteId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<u64> for RemoteId {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl<'de> Deserialize<'de> for RemoteId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Number(serde_json::Number),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Text(text) => Self(text),
			Raw::Number(number) => Self(number.to_string()),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn accepts_numeric_and_string_ids() {
		let numeric: RemoteId = serde_json::from_value(json!(4471192)).unwrap();
		let text: RemoteId = serde_json::from_value(json!("PXFKD-QWERT-1234")).unwrap();
		assert_eq!(numeric.as_str(), "4471192");
		assert_eq!(text.to_string(), "PXFKD-QWERT-1234");
	}

	#[test]
	fn rejects_non_scalar_ids() {
		assert!(serde_json::from_value::<RemoteId>(json!({ "id": 1 })).is_err());
		assert!(serde_json::from_value::<RemoteId>(json!(null)).is_err());
	}

	#[test]
	fn serializes_as_plain_string() {
		assert_eq!(serde_json::to_value(RemoteId::from(42u64)).unwrap(), json!("42"));
	}
}
