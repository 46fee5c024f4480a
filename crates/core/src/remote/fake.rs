//! Scripted in-memory [`RemoteService`] for testing the polling loops without a network.
//!
//! Each resource replays a queue of replies; the last reply repeats once the
//! queue is down to one entry. Every call is counted so tests can assert how
//! many attempts a loop made.
//!
//! # Example
//!
//! ```ignore
//! let remote = ScriptedRemote::new()
//!     .with_builds([Reply::Ok(vec![build("pr-42 - Sample Test", 7, BuildStatus::Running)])])
//!     .with_statuses([Reply::Ok(BuildStatus::Running), Reply::Ok(finished("completed"))])
//!     .with_sessions(Reply::Ok(vec![session("S1")]))
//!     .with_report("S1", [Reply::Fail(404), Reply::Ok(0)]);
//!
//! let outcome = Gate::new(remote, config).run().await?;
//! ```

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::RemoteService;
use crate::error::{GateError, Result};
use crate::model::{AccessibilityReport, Build, BuildStatus, RemoteId, ScanId, Session};

/// One scripted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
	Ok(T),
	/// Fails the call with this HTTP status.
	Fail(u16),
}

#[derive(Debug)]
struct Script<T> {
	replies: VecDeque<Reply<T>>,
}

impl<T: Clone> Script<T> {
	fn new(replies: impl IntoIterator<Item = Reply<T>>) -> Self {
		Self {
			replies: replies.into_iter().collect(),
		}
	}

	fn next(&mut self) -> Option<Reply<T>> {
		if self.replies.len() > 1 { self.replies.pop_front() } else { self.replies.front().cloned() }
	}
}

impl<T> Default for Script<T> {
	fn default() -> Self {
		Self { replies: VecDeque::new() }
	}
}

/// Number of calls made against each resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
	pub list_builds: usize,
	pub build_status: usize,
	pub list_sessions: usize,
	pub reports: HashMap<ScanId, usize>,
}

impl CallCounts {
	pub fn reports_for(&self, scan_id: &ScanId) -> usize {
		self.reports.get(scan_id).copied().unwrap_or(0)
	}

	pub fn total_reports(&self) -> usize {
		self.reports.values().sum()
	}
}

#[derive(Debug, Default)]
struct State {
	builds: Script<Vec<Build>>,
	statuses: Script<BuildStatus>,
	sessions: Script<Vec<Session>>,
	reports: HashMap<ScanId, Script<u64>>,
	calls: CallCounts,
}

/// [`RemoteService`] that replays scripted replies.
///
/// Resources without a script answer with HTTP 404.
#[derive(Debug, Default)]
pub struct ScriptedRemote {
	state: Mutex<State>,
}

impl ScriptedRemote {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_builds(self, replies: impl IntoIterator<Item = Reply<Vec<Build>>>) -> Self {
		self.state.lock().builds = Script::new(replies);
		self
	}

	pub fn with_statuses(self, replies: impl IntoIterator<Item = Reply<BuildStatus>>) -> Self {
		self.state.lock().statuses = Script::new(replies);
		self
	}

	pub fn with_sessions(self, reply: Reply<Vec<Session>>) -> Self {
		self.state.lock().sessions = Script::new([reply]);
		self
	}

	/// Scripts the report of the scan belonging to `session_id`.
	pub fn with_report(self, session_id: &str, replies: impl IntoIterator<Item = Reply<u64>>) -> Self {
		let scan_id = ScanId::for_session(&RemoteId::from(session_id));
		self.state.lock().reports.insert(scan_id, Script::new(replies));
		self
	}

	pub fn calls(&self) -> CallCounts {
		self.state.lock().calls.clone()
	}
}

fn resolve<T>(reply: Option<Reply<T>>, resource: &str) -> Result<T> {
	match reply {
		Some(Reply::Ok(value)) => Ok(value),
		Some(Reply::Fail(status)) => Err(GateError::Status {
			url: format!("fake://{resource}"),
			status,
		}),
		None => Err(GateError::Status {
			url: format!("fake://{resource}"),
			status: 404,
		}),
	}
}

#[async_trait]
impl RemoteService for ScriptedRemote {
	async fn list_builds(&self, limit: u32) -> Result<Vec<Build>> {
		let mut state = self.state.lock();
		state.calls.list_builds += 1;
		let builds = resolve(state.builds.next(), "builds")?;
		Ok(builds.into_iter().take(limit as usize).collect())
	}

	async fn build_status(&self, build_id: &RemoteId) -> Result<BuildStatus> {
		let mut state = self.state.lock();
		state.calls.build_status += 1;
		resolve(state.statuses.next(), &format!("builds/{build_id}"))
	}

	async fn list_sessions(&self, build_id: &RemoteId) -> Result<Vec<Session>> {
		let mut state = self.state.lock();
		state.calls.list_sessions += 1;
		resolve(state.sessions.next(), &format!("sessions?build_id={build_id}"))
	}

	async fn accessibility_report(&self, scan_id: &ScanId) -> Result<AccessibilityReport> {
		let mut state = self.state.lock();
		*state.calls.reports.entry(scan_id.clone()).or_default() += 1;
		let reply = state.reports.get_mut(scan_id).and_then(Script::next);
		let total_issues = resolve(reply, &format!("test-issue/{scan_id}"))?;
		Ok(AccessibilityReport { total_issues })
	}
}

/// Builds a [`Build`] for scripts.
pub fn build(name: &str, id: u64, status: BuildStatus) -> Build {
	Build {
		id: RemoteId::from(id),
		name: name.to_string(),
		status,
	}
}

/// Builds a [`Session`] named after its id.
pub fn session(id: &str) -> Session {
	Session {
		id: RemoteId::from(id),
		name: format!("session {id}"),
	}
}

/// Terminal [`BuildStatus`] for scripts.
pub fn finished(status: &str) -> BuildStatus {
	BuildStatus::Finished(status.to_string())
}
