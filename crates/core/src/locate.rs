//! Build discovery by name prefix.
//!
//! The remote service can take a while to index a freshly started build, so
//! discovery re-lists recent builds on a fixed budget. A failed listing only
//! costs the attempt it happened on.

use tracing::{debug, info, warn};

use crate::error::{GateError, Result};
use crate::model::Build;
use crate::remote::RemoteService;
use crate::retry::RetryPolicy;

/// First build in listing order whose name starts with `prefix`.
pub fn first_match<'a>(builds: &'a [Build], prefix: &str) -> Option<&'a Build> {
	builds.iter().find(|build| build.name_starts_with(prefix))
}

/// Lists the `limit` most recent builds until one matches `prefix`.
///
/// # Errors
///
/// Returns [`GateError::BuildNotFound`] once `policy` is exhausted without a
/// match.
pub async fn locate_build<R>(remote: &R, prefix: &str, limit: u32, policy: RetryPolicy) -> Result<Build>
where
	R: RemoteService + ?Sized,
{
	info!(target: "gate.locate", %prefix, "searching for build");

	let mut attempt = 0;
	loop {
		attempt += 1;

		match remote.list_builds(limit).await {
			Ok(builds) => {
				if let Some(build) = first_match(&builds, prefix) {
					info!(
						target: "gate.locate",
						build_id = %build.id,
						name = %build.name,
						attempt,
						"build matched"
					);
					return Ok(build.clone());
				}
				debug!(target: "gate.locate", listed = builds.len(), attempt, "no build name matched prefix");
			}
			Err(err) => {
				warn!(target: "gate.locate", error = %err, attempt, "failed to fetch build list");
			}
		}

		if policy.is_last(attempt) {
			break;
		}

		info!(
			target: "gate.locate",
			attempt,
			retry_in_ms = policy.interval().as_millis() as u64,
			"build not found yet; retrying"
		);
		policy.pause().await;
	}

	Err(GateError::BuildNotFound {
		prefix: prefix.to_string(),
		attempts: attempt,
	})
}
