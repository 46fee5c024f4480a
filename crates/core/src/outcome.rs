//! Folding per-session results into one verdict.

use serde::Serialize;
use tracing::{error, info};

use crate::model::{Build, BuildStatus, SessionResult};

/// Verdict of one gate run.
///
/// Only built once every session has a terminal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
	pub build: Build,
	/// Status the build finished with.
	pub build_status: BuildStatus,
	pub sessions: Vec<SessionResult>,
}

impl RunOutcome {
	pub fn new(build: Build, build_status: BuildStatus, sessions: Vec<SessionResult>) -> Self {
		Self {
			build,
			build_status,
			sessions,
		}
	}

	/// `true` when any session has issues or no report.
	pub fn failed(&self) -> bool {
		self.sessions.iter().any(SessionResult::is_failing)
	}

	pub fn exit_code(&self) -> i32 {
		if self.failed() { 1 } else { 0 }
	}

	pub fn failing_sessions(&self) -> impl Iterator<Item = &SessionResult> {
		self.sessions.iter().filter(|result| result.is_failing())
	}

	/// Sum of the issue counts that resolved.
	pub fn total_issues(&self) -> u64 {
		self.sessions.iter().filter_map(|result| result.issues.resolved()).sum()
	}

	pub fn unavailable_count(&self) -> usize {
		self.sessions.iter().filter(|result| result.issues.resolved().is_none()).count()
	}

	/// Logs each failing session and the overall verdict.
	pub fn log_verdict(&self) {
		for result in self.failing_sessions() {
			error!(
				target: "gate",
				session_id = %result.session.id,
				session_name = %result.session.name,
				issues = %result.issues,
				"session failed accessibility check"
			);
		}

		if self.failed() {
			error!(
				target: "gate",
				build_id = %self.build.id,
				failing = self.failing_sessions().count(),
				sessions = self.sessions.len(),
				"accessibility violations found; failing run"
			);
		} else {
			info!(
				target: "gate",
				build_id = %self.build.id,
				sessions = self.sessions.len(),
				"no accessibility issues found"
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{IssueCount, ScanId};
	use crate::remote::fake::{build, finished, session};

	fn result(id: &str, issues: IssueCount) -> SessionResult {
		let session = session(id);
		SessionResult {
			scan_id: ScanId::for_session(&session.id),
			session,
			issues,
			attempts: 1,
			links: None,
		}
	}

	fn outcome(results: Vec<SessionResult>) -> RunOutcome {
		RunOutcome::new(build("pr-42 - Sample Test", 1, finished("completed")), finished("completed"), results)
	}

	#[test]
	fn all_clean_sessions_pass() {
		let outcome = outcome(vec![result("S1", IssueCount::Resolved(0)), result("S2", IssueCount::Resolved(0))]);
		assert!(!outcome.failed());
		assert_eq!(outcome.exit_code(), 0);
		assert_eq!(outcome.failing_sessions().count(), 0);
	}

	#[test]
	fn any_issue_fails_the_run() {
		let outcome = outcome(vec![result("S1", IssueCount::Resolved(0)), result("S2", IssueCount::Resolved(3))]);
		assert!(outcome.failed());
		assert_eq!(outcome.exit_code(), 1);
		assert_eq!(outcome.total_issues(), 3);
		let failing: Vec<_> = outcome.failing_sessions().map(|r| r.session.id.as_str()).collect();
		assert_eq!(failing, ["S2"]);
	}

	#[test]
	fn unavailable_report_fails_the_run() {
		let outcome = outcome(vec![
			result("S1", IssueCount::Resolved(0)),
			result("S2", IssueCount::Unavailable { attempts: 12 }),
		]);
		assert!(outcome.failed());
		assert_eq!(outcome.exit_code(), 1);
		assert_eq!(outcome.total_issues(), 0);
		assert_eq!(outcome.unavailable_count(), 1);
	}

	#[test]
	fn verdict_does_not_depend_on_order() {
		let forward = outcome(vec![result("S1", IssueCount::Resolved(2)), result("S2", IssueCount::Resolved(0))]);
		let backward = outcome(vec![result("S2", IssueCount::Resolved(0)), result("S1", IssueCount::Resolved(2))]);
		assert_eq!(forward.failed(), backward.failed());
	}

	#[test]
	fn build_without_sessions_passes() {
		assert!(!outcome(vec![]).failed());
	}
}
