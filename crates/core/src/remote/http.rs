use a11y_gate_protocol::{BuildDetail, BuildSummary, DataEnvelope, SessionSummary, TestIssueResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::RemoteService;
use crate::config::{Credentials, GateConfig};
use crate::error::{GateError, Result};
use crate::model::{AccessibilityReport, Build, BuildStatus, RemoteId, ScanId, Session};

/// [`RemoteService`] backed by `reqwest`, authenticated with HTTP Basic.
pub struct HttpRemote {
	client: reqwest::Client,
	credentials: Credentials,
	api: Url,
	accessibility_api: Url,
}

impl HttpRemote {
	pub fn new(config: &GateConfig) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(config.request_timeout)
			.user_agent(concat!("a11y-gate/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|e| GateError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

		Ok(Self {
			client,
			credentials: config.credentials.clone(),
			api: config.endpoints.api.clone(),
			accessibility_api: config.endpoints.accessibility_api.clone(),
		})
	}

	async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
		debug!(target: "gate.http", %url, "GET");

		let response = self
			.client
			.get(url.clone())
			.basic_auth(self.credentials.username(), Some(self.credentials.access_key()))
			.send()
			.await
			.map_err(|source| GateError::Http {
				url: url.to_string(),
				source,
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(GateError::Status {
				url: url.to_string(),
				status: status.as_u16(),
			});
		}

		let body = response.bytes().await.map_err(|source| GateError::Http {
			url: url.to_string(),
			source,
		})?;

		serde_json::from_slice(&body).map_err(|e| GateError::Decode {
			url: url.to_string(),
			message: e.to_string(),
		})
	}
}

#[async_trait]
impl RemoteService for HttpRemote {
	async fn list_builds(&self, limit: u32) -> Result<Vec<Build>> {
		let mut url = join(&self.api, &["builds"])?;
		url.query_pairs_mut().append_pair("limit", &limit.to_string());

		let envelope: DataEnvelope<Vec<BuildSummary>> = self.get(url).await?;
		Ok(envelope.into_inner().into_iter().map(Build::from).collect())
	}

	async fn build_status(&self, build_id: &RemoteId) -> Result<BuildStatus> {
		let url = join(&self.api, &["builds", build_id.as_str()])?;
		let envelope: DataEnvelope<BuildDetail> = self.get(url).await?;
		Ok(envelope.into_inner().status_ind)
	}

	async fn list_sessions(&self, build_id: &RemoteId) -> Result<Vec<Session>> {
		let mut url = join(&self.api, &["sessions"])?;
		url.query_pairs_mut().append_pair("build_id", build_id.as_str());

		let envelope: DataEnvelope<Vec<SessionSummary>> = self.get(url).await?;
		Ok(envelope.into_inner().into_iter().map(Session::from).collect())
	}

	async fn accessibility_report(&self, scan_id: &ScanId) -> Result<AccessibilityReport> {
		let url = join(&self.accessibility_api, &["test-issue", scan_id.as_str()])?;
		let response: TestIssueResponse = self.get(url).await?;
		Ok(AccessibilityReport {
			total_issues: response.total_issues(),
		})
	}
}

/// Appends percent-encoded path segments to `base`, tolerating a trailing slash.
fn join(base: &Url, segments: &[&str]) -> Result<Url> {
	let mut url = base.clone();
	url.path_segments_mut()
		.map_err(|()| GateError::InvalidConfig(format!("{base} cannot be used as a base URL")))?
		.pop_if_empty()
		.extend(segments);
	Ok(url)
}
