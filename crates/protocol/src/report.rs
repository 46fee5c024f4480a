use serde::{Deserialize, Serialize};

/// Payload of `GET /test-issue/{scan_id}`.
///
/// A report that is not ready yet does not carry `test_info`, so decoding
/// fails the same way a transport error does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestIssueResponse {
	pub test_info: TestInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestInfo {
	#[serde(default)]
	pub total_issues: Option<u64>,
}

impl TestIssueResponse {
	/// Issue total, `0` when the service leaves it out.
	pub fn total_issues(&self) -> u64 {
		self.test_info.total_issues.unwrap_or(0)
	}
}
