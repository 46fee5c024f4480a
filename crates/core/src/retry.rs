//! Fixed-interval retry budgets shared by the polling loops.

use std::time::Duration;

/// Delay between two polls of the same resource.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Build listings tried before giving up on discovery.
pub const DISCOVERY_ATTEMPTS: u32 = 10;
/// Report fetches tried per session before it is marked unavailable.
pub const REPORT_ATTEMPTS: u32 = 12;

/// Attempt ceiling paired with a fixed pause between attempts.
///
/// Attempts are numbered from 1. A policy without a ceiling never reports an
/// attempt as the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	max_attempts: Option<u32>,
	interval: Duration,
}

impl RetryPolicy {
	pub const fn bounded(max_attempts: u32, interval: Duration) -> Self {
		Self {
			max_attempts: Some(max_attempts),
			interval,
		}
	}

	pub const fn unbounded(interval: Duration) -> Self {
		Self { max_attempts: None, interval }
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Returns `true` once `attempt` has used up the budget.
	pub fn is_last(&self, attempt: u32) -> bool {
		self.max_attempts.is_some_and(|max| attempt >= max)
	}

	/// Sleeps for one interval without blocking the runtime.
	pub async fn pause(&self) {
		tokio::time::sleep(self.interval).await;
	}
}
