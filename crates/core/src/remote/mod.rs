//! Typed access to the remote test-automation and accessibility APIs.
//!
//! Implementations perform exactly one request per call and never retry;
//! the polling loops own every retry decision.

pub mod fake;
mod http;

use async_trait::async_trait;

pub use http::HttpRemote;

use crate::error::Result;
use crate::model::{AccessibilityReport, Build, BuildStatus, RemoteId, ScanId, Session};

#[async_trait]
pub trait RemoteService: Send + Sync {
	/// Most recent builds first, at most `limit` of them.
	async fn list_builds(&self, limit: u32) -> Result<Vec<Build>>;

	async fn build_status(&self, build_id: &RemoteId) -> Result<BuildStatus>;

	async fn list_sessions(&self, build_id: &RemoteId) -> Result<Vec<Session>>;

	/// Fails while the report is not ready; callers cannot tell that apart
	/// from any other failure.
	async fn accessibility_report(&self, scan_id: &ScanId) -> Result<AccessibilityReport>;
}
