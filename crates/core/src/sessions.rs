//! Session enumeration for a finished build.

use tracing::{info, warn};

use crate::error::{GateError, Result};
use crate::model::{RemoteId, Session};
use crate::remote::RemoteService;

/// Lists every session under `build_id` with a single call.
///
/// Unlike the polling loops this is not retried.
///
/// # Errors
///
/// Returns [`GateError::SessionListing`] wrapping the remote failure.
pub async fn list_sessions<R>(remote: &R, build_id: &RemoteId) -> Result<Vec<Session>>
where
	R: RemoteService + ?Sized,
{
	let sessions = remote.list_sessions(build_id).await.map_err(|source| GateError::SessionListing {
		build_id: build_id.clone(),
		source: Box::new(source),
	})?;

	if sessions.is_empty() {
		warn!(target: "gate.sessions", %build_id, "build has no sessions; nothing to check");
	} else {
		info!(target: "gate.sessions", %build_id, count = sessions.len(), "found sessions under build");
	}

	Ok(sessions)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::remote::fake::{Reply, ScriptedRemote, session};

	#[tokio::test]
	async fn returns_sessions_in_listing_order() {
		let remote = ScriptedRemote::new().with_sessions(Reply::Ok(vec![session("S1"), session("S2")]));

		let sessions = list_sessions(&remote, &RemoteId::from(7u64)).await.unwrap();

		let ids: Vec<_> = sessions.iter().map(|s| s.id.as_str()).collect();
		assert_eq!(ids, ["S1", "S2"]);
	}

	#[tokio::test]
	async fn failure_is_fatal_and_not_retried() {
		let remote = ScriptedRemote::new().with_sessions(Reply::Fail(500));

		let err = list_sessions(&remote, &RemoteId::from(7u64)).await.unwrap_err();

		assert!(matches!(err, GateError::SessionListing { ref build_id, .. } if build_id.as_str() == "7"));
		assert_eq!(remote.calls().list_sessions, 1);
	}

	#[tokio::test]
	async fn empty_build_is_not_an_error() {
		let remote = ScriptedRemote::new().with_sessions(Reply::Ok(vec![]));
		assert!(list_sessions(&remote, &RemoteId::from(7u64)).await.unwrap().is_empty());
	}
}
