//! Waiting for a build to leave the `running` state.

use tracing::{info, warn};

use crate::error::{GateError, Result};
use crate::model::{BuildStatus, RemoteId};
use crate::remote::RemoteService;
use crate::retry::RetryPolicy;

/// Polls `build_id` until its status is anything but `running`.
///
/// Failed polls are logged and retried. With an unbounded `policy` this
/// only returns once the build finishes.
///
/// # Errors
///
/// Returns [`GateError::StuckBuild`] when a bounded `policy` runs out while the
/// build is still running or unreachable.
pub async fn wait_for_completion<R>(remote: &R, build_id: &RemoteId, policy: RetryPolicy) -> Result<BuildStatus>
where
	R: RemoteService + ?Sized,
{
	info!(target: "gate.status", %build_id, "polling build until completion");

	let mut last_seen: Option<BuildStatus> = None;
	let mut polls = 0;
	loop {
		polls += 1;

		match remote.build_status(build_id).await {
			Ok(status) => {
				info!(target: "gate.status", %build_id, %status, poll = polls, "build status");

				if let Some(previous) = last_seen.as_ref().filter(|previous| **previous != status) {
					info!(target: "gate.status", %build_id, from = %previous, to = %status, "build status changed");
				}

				if !status.is_running() {
					info!(target: "gate.status", %build_id, %status, polls, "build completed");
					return Ok(status);
				}
				last_seen = Some(status);
			}
			Err(err) => {
				warn!(target: "gate.status", %build_id, error = %err, poll = polls, "failed to fetch build status");
			}
		}

		if policy.is_last(polls) {
			return Err(GateError::StuckBuild {
				build_id: build_id.clone(),
				polls,
			});
		}
		policy.pause().await;
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;
	use crate::remote::fake::{Reply, ScriptedRemote, finished};

	const EVERY_5S: RetryPolicy = RetryPolicy::unbounded(Duration::from_secs(5));

	#[tokio::test(start_paused = true)]
	async fn returns_on_first_non_running_status() {
		let remote = ScriptedRemote::new().with_statuses([
			Reply::Ok(BuildStatus::Running),
			Reply::Ok(BuildStatus::Running),
			Reply::Ok(finished("passed")),
			Reply::Ok(BuildStatus::Running),
		]);

		let status = wait_for_completion(&remote, &RemoteId::from(7u64), EVERY_5S).await.unwrap();

		assert_eq!(status, finished("passed"));
		assert_eq!(remote.calls().build_status, 3);
	}

	#[tokio::test(start_paused = true)]
	async fn already_finished_build_needs_one_poll() {
		let remote = ScriptedRemote::new().with_statuses([Reply::Ok(finished("failed"))]);

		let start = tokio::time::Instant::now();
		let status = wait_for_completion(&remote, &RemoteId::from(7u64), EVERY_5S).await.unwrap();

		assert_eq!(status, finished("failed"));
		assert_eq!(remote.calls().build_status, 1);
		assert_eq!(start.elapsed(), Duration::ZERO);
	}

	#[tokio::test(start_paused = true)]
	async fn missing_status_counts_as_finished() {
		let remote = ScriptedRemote::new().with_statuses([Reply::Ok(BuildStatus::Unknown)]);
		let status = wait_for_completion(&remote, &RemoteId::from(7u64), EVERY_5S).await.unwrap();
		assert_eq!(status, BuildStatus::Unknown);
	}

	#[tokio::test(start_paused = true)]
	async fn transport_errors_keep_polling() {
		let remote = ScriptedRemote::new().with_statuses([
			Reply::Fail(503),
			Reply::Fail(503),
			Reply::Ok(BuildStatus::Running),
			Reply::Fail(500),
			Reply::Ok(finished("completed")),
		]);

		let status = wait_for_completion(&remote, &RemoteId::from(7u64), EVERY_5S).await.unwrap();

		assert_eq!(status, finished("completed"));
		assert_eq!(remote.calls().build_status, 5);
	}

	#[tokio::test(start_paused = true)]
	async fn unbounded_wait_outlasts_any_attempt_budget() {
		let mut replies = vec![Reply::Ok(BuildStatus::Running); 500];
		replies.push(Reply::Ok(finished("completed")));
		let remote = ScriptedRemote::new().with_statuses(replies);

		wait_for_completion(&remote, &RemoteId::from(7u64), EVERY_5S).await.unwrap();
		assert_eq!(remote.calls().build_status, 501);
	}

	#[tokio::test(start_paused = true)]
	async fn ceiling_reports_stuck_build() {
		let remote = ScriptedRemote::new().with_statuses([Reply::Ok(BuildStatus::Running)]);

		let err = wait_for_completion(&remote, &RemoteId::from(7u64), RetryPolicy::bounded(4, Duration::from_secs(5)))
			.await
			.unwrap_err();

		assert!(matches!(err, GateError::StuckBuild { polls: 4, ref build_id } if build_id.as_str() == "7"));
		assert_eq!(remote.calls().build_status, 4);
	}
}
