use gate::RunOutcome;
use serde::Serialize;

/// Result data for a completed gate run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateData<'a> {
	pub passed: bool,
	pub total_issues: u64,
	pub failing_sessions: usize,
	pub unavailable_sessions: usize,
	#[serde(flatten)]
	pub outcome: &'a RunOutcome,
}

impl<'a> From<&'a RunOutcome> for GateData<'a> {
	fn from(outcome: &'a RunOutcome) -> Self {
		Self {
			passed: !outcome.failed(),
			total_issues: outcome.total_issues(),
			failing_sessions: outcome.failing_sessions().count(),
			unavailable_sessions: outcome.unavailable_count(),
			outcome,
		}
	}
}
