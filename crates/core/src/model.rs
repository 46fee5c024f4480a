//! Domain types observed by the gate.

use std::fmt;

use a11y_gate_protocol::{BuildSummary, SessionSummary};
use serde::Serialize;

pub use a11y_gate_protocol::{BuildStatus, RemoteId};

use crate::config::Endpoints;

/// Prefix the accessibility service puts in front of a session id.
pub const SCAN_ID_PREFIX: &str = "RDAUT_";

/// One remote test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
	pub id: RemoteId,
	pub name: String,
	pub status: BuildStatus,
}

impl Build {
	pub fn name_starts_with(&self, prefix: &str) -> bool {
		self.name.starts_with(prefix)
	}
}

impl From<BuildSummary> for Build {
	fn from(summary: BuildSummary) -> Self {
		Self {
			id: summary.build_id,
			name: summary.name.unwrap_or_default(),
			status: summary.status_ind,
		}
	}
}

/// One device/app execution inside a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
	pub id: RemoteId,
	pub name: String,
}

impl From<SessionSummary> for Session {
	fn from(summary: SessionSummary) -> Self {
		Self {
			id: summary.test_id,
			name: summary.name.unwrap_or_default(),
		}
	}
}

/// Identifier of the accessibility scan attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScanId(String);

impl ScanId {
	pub fn for_session(session_id: &RemoteId) -> Self {
		Self(format!("{SCAN_ID_PREFIX}{session_id}"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ScanId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Ready accessibility report of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessibilityReport {
	pub total_issues: u64,
}

/// Issue count of one session once polling has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCount {
	Resolved(u64),
	/// The report never became available within the retry budget.
	Unavailable { attempts: u32 },
}

impl IssueCount {
	/// Unavailable counts as failing.
	pub fn is_failing(&self) -> bool {
		match self {
			IssueCount::Resolved(total) => *total > 0,
			IssueCount::Unavailable { .. } => true,
		}
	}

	pub fn resolved(&self) -> Option<u64> {
		match self {
			IssueCount::Resolved(total) => Some(*total),
			IssueCount::Unavailable { .. } => None,
		}
	}
}

impl fmt::Display for IssueCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			IssueCount::Resolved(total) => write!(f, "{total}"),
			IssueCount::Unavailable { attempts } => write!(f, "unavailable after {attempts} attempts"),
		}
	}
}

/// Dashboard pages for a session's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLinks {
	pub accessibility_report: String,
	pub automation_dashboard: String,
}

impl ReportLinks {
	pub fn new(endpoints: &Endpoints, session_id: &RemoteId, scan_id: &ScanId) -> Self {
		let mut accessibility_report = endpoints.accessibility_dashboard.clone();
		if let Ok(mut segments) = accessibility_report.path_segments_mut() {
			segments.pop_if_empty().push(scan_id.as_str());
		}

		let mut automation_dashboard = endpoints.automation_dashboard.clone();
		automation_dashboard
			.query_pairs_mut()
			.append_pair("testID", session_id.as_str())
			.append_pair("selectedTab", "accessibility");

		Self {
			accessibility_report: accessibility_report.into(),
			automation_dashboard: automation_dashboard.into(),
		}
	}
}

/// Terminal polling result of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
	pub session: Session,
	pub scan_id: ScanId,
	pub issues: IssueCount,
	pub attempts: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub links: Option<ReportLinks>,
}

impl SessionResult {
	pub fn is_failing(&self) -> bool {
		self.issues.is_failing()
	}
}
