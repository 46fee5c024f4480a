use serde::{Deserialize, Serialize};

use crate::id::RemoteId;

/// Entry of `GET /sessions?build_id={id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
	pub test_id: RemoteId,
	#[serde(default)]
	pub name: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn decodes_sessions_with_optional_name() {
		let raw = json!([
			{ "test_id": "ABCD-1234", "name": "Sample Test NodeJS", "device": "Galaxy S21 5G" },
			{ "test_id": "EFGH-5678", "name": null }
		]);
		let sessions: Vec<SessionSummary> = serde_json::from_value(raw).unwrap();
		assert_eq!(sessions[0].test_id.as_str(), "ABCD-1234");
		assert_eq!(sessions[0].name.as_deref(), Some("Sample Test NodeJS"));
		assert_eq!(sessions[1].name, None);
	}
}
