//! Run configuration resolved once at startup.
//!
//! [`GateSettings`] carries raw, possibly missing values as collected by the
//! caller (flags, environment). [`GateConfig::resolve`] validates them into
//! the value object every component receives by reference; nothing below this
//! module reads the environment.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{GateError, Result};
use crate::retry::{DEFAULT_POLL_INTERVAL, DISCOVERY_ATTEMPTS, REPORT_ATTEMPTS, RetryPolicy};

pub const USERNAME_VAR: &str = "LT_USERNAME";
pub const ACCESS_KEY_VAR: &str = "LT_ACCESS_KEY";
pub const BUILD_PREFIX_VAR: &str = "LT_BUILD_PREFIX";

pub const DEFAULT_API_URL: &str = "https://mobile-api.lambdatest.com/mobile-automation/api/v1";
pub const DEFAULT_ACCESSIBILITY_API_URL: &str = "https://api.lambdatest.com/accessibility/api/v1";
pub const DEFAULT_ACCESSIBILITY_DASHBOARD_URL: &str = "https://accessibility.lambdatest.com/automation/test";
pub const DEFAULT_AUTOMATION_DASHBOARD_URL: &str = "https://appautomation.lambdatest.com/test";

pub const DEFAULT_BUILD_LIST_LIMIT: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Unvalidated configuration values.
#[derive(Debug, Clone, Default)]
pub struct GateSettings {
	pub username: Option<String>,
	pub access_key: Option<String>,
	pub build_prefix: Option<String>,
	pub api_url: Option<String>,
	pub accessibility_api_url: Option<String>,
	pub accessibility_dashboard_url: Option<String>,
	pub automation_dashboard_url: Option<String>,
	pub build_list_limit: Option<u32>,
	pub discovery_attempts: Option<u32>,
	pub report_attempts: Option<u32>,
	/// `None` polls build status until the build leaves `running`.
	pub status_max_polls: Option<u32>,
	pub poll_interval: Option<Duration>,
	pub request_timeout: Option<Duration>,
	pub concurrency: Option<usize>,
}

/// HTTP Basic credentials for both APIs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	username: String,
	access_key: String,
}

impl Credentials {
	pub fn new(username: impl Into<String>, access_key: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			access_key: access_key.into(),
		}
	}

	pub fn username(&self) -> &str {
		&self.username
	}

	pub fn access_key(&self) -> &str {
		&self.access_key
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("access_key", &"<redacted>")
			.finish()
	}
}

/// Base URLs of the remote APIs and dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
	pub api: Url,
	pub accessibility_api: Url,
	pub accessibility_dashboard: Url,
	pub automation_dashboard: Url,
}

/// Validated configuration for one gate run.
#[derive(Debug, Clone)]
pub struct GateConfig {
	pub credentials: Credentials,
	pub build_prefix: String,
	pub endpoints: Endpoints,
	pub build_list_limit: u32,
	pub discovery: RetryPolicy,
	pub status: RetryPolicy,
	pub report: RetryPolicy,
	pub request_timeout: Duration,
	pub concurrency: usize,
}

impl GateConfig {
	/// Validates raw settings.
	///
	/// Missing or empty credentials and prefix are reported together, before
	/// any other check.
	pub fn resolve(settings: GateSettings) -> Result<Self> {
		let username = non_empty(settings.username);
		let access_key = non_empty(settings.access_key);
		let build_prefix = non_empty(settings.build_prefix);

		let (Some(username), Some(access_key), Some(build_prefix)) = (username.clone(), access_key.clone(), build_prefix.clone()) else {
			let missing = [(USERNAME_VAR, username.is_none()), (ACCESS_KEY_VAR, access_key.is_none()), (BUILD_PREFIX_VAR, build_prefix.is_none())]
				.into_iter()
				.filter_map(|(name, absent)| absent.then_some(name))
				.collect();
			return Err(GateError::MissingConfig(missing));
		};

		let endpoints = Endpoints {
			api: parse_base("API URL", settings.api_url.as_deref(), DEFAULT_API_URL)?,
			accessibility_api: parse_base(
				"accessibility API URL",
				settings.accessibility_api_url.as_deref(),
				DEFAULT_ACCESSIBILITY_API_URL,
			)?,
			accessibility_dashboard: parse_base(
				"accessibility dashboard URL",
				settings.accessibility_dashboard_url.as_deref(),
				DEFAULT_ACCESSIBILITY_DASHBOARD_URL,
			)?,
			automation_dashboard: parse_base(
				"automation dashboard URL",
				settings.automation_dashboard_url.as_deref(),
				DEFAULT_AUTOMATION_DASHBOARD_URL,
			)?,
		};

		let interval = settings.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
		let discovery_attempts = positive("discovery attempts", settings.discovery_attempts.unwrap_or(DISCOVERY_ATTEMPTS))?;
		let report_attempts = positive("report attempts", settings.report_attempts.unwrap_or(REPORT_ATTEMPTS))?;
		let status = match settings.status_max_polls {
			Some(polls) => RetryPolicy::bounded(positive("status polls", polls)?, interval),
			None => RetryPolicy::unbounded(interval),
		};

		let concurrency = settings.concurrency.unwrap_or(1);
		if concurrency == 0 {
			return Err(GateError::InvalidConfig("concurrency must be at least 1".into()));
		}

		Ok(Self {
			credentials: Credentials::new(username, access_key),
			build_prefix,
			endpoints,
			build_list_limit: positive("build list limit", settings.build_list_limit.unwrap_or(DEFAULT_BUILD_LIST_LIMIT))?,
			discovery: RetryPolicy::bounded(discovery_attempts, interval),
			status,
			report: RetryPolicy::bounded(report_attempts, interval),
			request_timeout: settings.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
			concurrency,
		})
	}
}

fn non_empty(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

fn positive(what: &str, value: u32) -> Result<u32> {
	if value == 0 {
		return Err(GateError::InvalidConfig(format!("{what} must be at least 1")));
	}
	Ok(value)
}

fn parse_base(what: &str, value: Option<&str>, default: &str) -> Result<Url> {
	let raw = value.unwrap_or(default);
	let url = Url::parse(raw).map_err(|e| GateError::InvalidConfig(format!("{what} '{raw}' is not a valid URL: {e}")))?;
	if url.cannot_be_a_base() {
		return Err(GateError::InvalidConfig(format!("{what} '{raw}' cannot be used as a base URL")));
	}
	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn complete() -> GateSettings {
		GateSettings {
			username: Some("ci-bot".into()),
			access_key: Some("s3cret".into()),
			build_prefix: Some("pr-42".into()),
			..Default::default()
		}
	}

	#[test]
	fn defaults_follow_documented_budgets() {
		let config = GateConfig::resolve(complete()).unwrap();

		assert_eq!(config.build_prefix, "pr-42");
		assert_eq!(config.build_list_limit, 10);
		assert_eq!(config.discovery, RetryPolicy::bounded(10, Duration::from_secs(5)));
		assert_eq!(config.report, RetryPolicy::bounded(12, Duration::from_secs(5)));
		assert_eq!(config.status, RetryPolicy::unbounded(Duration::from_secs(5)));
		assert_eq!(config.concurrency, 1);
		assert_eq!(config.endpoints.api.as_str(), DEFAULT_API_URL);
		assert_eq!(config.endpoints.accessibility_api.as_str(), DEFAULT_ACCESSIBILITY_API_URL);
	}

	#[test]
	fn reports_every_missing_value_at_once() {
		let err = GateConfig::resolve(GateSettings {
			access_key: Some("key".into()),
			..Default::default()
		})
		.unwrap_err();

		match err {
			GateError::MissingConfig(missing) => assert_eq!(missing, vec![USERNAME_VAR, BUILD_PREFIX_VAR]),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn blank_values_count_as_missing() {
		let err = GateConfig::resolve(GateSettings {
			username: Some("  ".into()),
			..complete()
		})
		.unwrap_err();
		assert!(matches!(err, GateError::MissingConfig(ref m) if m == &vec![USERNAME_VAR]));
	}

	#[test]
	fn status_ceiling_is_opt_in() {
		let config = GateConfig::resolve(GateSettings {
			status_max_polls: Some(40),
			poll_interval: Some(Duration::from_millis(10)),
			..complete()
		})
		.unwrap();
		assert_eq!(config.status, RetryPolicy::bounded(40, Duration::from_millis(10)));
		assert_eq!(config.discovery.interval(), Duration::from_millis(10));
	}

	#[test]
	fn rejects_zero_budgets_and_bad_urls() {
		for settings in [
			GateSettings {
				report_attempts: Some(0),
				..complete()
			},
			GateSettings {
				concurrency: Some(0),
				..complete()
			},
			GateSettings {
				api_url: Some("not a url".into()),
				..complete()
			},
			GateSettings {
				accessibility_api_url: Some("mailto:ops@example.com".into()),
				..complete()
			},
		] {
			assert!(matches!(GateConfig::resolve(settings), Err(GateError::InvalidConfig(_))));
		}
	}

	#[test]
	fn debug_output_redacts_access_key() {
		let creds = Credentials::new("ci-bot", "s3cret");
		let rendered = format!("{creds:?}");
		assert!(rendered.contains("ci-bot"));
		assert!(!rendered.contains("s3cret"));
	}
}
