//! Per-session accessibility report polling.
//!
//! Reports are produced some time after the build finishes and the service
//! answers "not ready" through the same failure channel as a real error, so
//! every failure is treated as "not ready yet". Running out of attempts
//! yields [`IssueCount::Unavailable`], which fails the run.

use tracing::{error, info};

use crate::config::Endpoints;
use crate::model::{IssueCount, ReportLinks, ScanId, Session, SessionResult};
use crate::remote::RemoteService;
use crate::retry::RetryPolicy;

/// Polls reports for sessions of one build.
pub struct ReportPoller<'a, R: ?Sized> {
	remote: &'a R,
	policy: RetryPolicy,
	endpoints: &'a Endpoints,
}

impl<'a, R> ReportPoller<'a, R>
where
	R: RemoteService + ?Sized,
{
	pub fn new(remote: &'a R, policy: RetryPolicy, endpoints: &'a Endpoints) -> Self {
		Self { remote, policy, endpoints }
	}

	/// Polls until the report for `session` is ready or the budget runs out.
	pub async fn poll(&self, session: &Session) -> SessionResult {
		let scan_id = ScanId::for_session(&session.id);

		let mut attempt = 0;
		loop {
			attempt += 1;

			match self.remote.accessibility_report(&scan_id).await {
				Ok(report) => {
					let links = ReportLinks::new(self.endpoints, &session.id, &scan_id);
					info!(
						target: "gate.report",
						session_id = %session.id,
						session_name = %session.name,
						issues = report.total_issues,
						report = %links.accessibility_report,
						dashboard = %links.automation_dashboard,
						attempt,
						"accessibility report ready"
					);
					return SessionResult {
						session: session.clone(),
						scan_id,
						issues: IssueCount::Resolved(report.total_issues),
						attempts: attempt,
						links: Some(links),
					};
				}
				Err(err) if self.policy.is_last(attempt) => {
					error!(
						target: "gate.report",
						session_id = %session.id,
						session_name = %session.name,
						%scan_id,
						error = %err,
						"accessibility report not available after {attempt} attempts; failing run"
					);
					return SessionResult {
						session: session.clone(),
						scan_id,
						issues: IssueCount::Unavailable { attempts: attempt },
						attempts: attempt,
						links: None,
					};
				}
				Err(err) => {
					info!(
						target: "gate.report",
						session_id = %session.id,
						%scan_id,
						attempt,
						retry_in_ms = self.policy.interval().as_millis() as u64,
						reason = %err,
						"accessibility report not ready; retrying"
					);
				}
			}

			self.policy.pause().await;
		}
	}
}
