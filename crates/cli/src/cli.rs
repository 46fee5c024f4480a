use std::time::Duration;

use clap::Parser;
use gate::GateSettings;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "a11y-gate")]
#[command(about = "Fail a CI pipeline when remote mobile accessibility scans report issues")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v debug, -vv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format for the final summary
	#[arg(short, long, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// Account user name used for HTTP Basic auth
	#[arg(long, env = "LT_USERNAME", hide_env_values = true)]
	pub username: Option<String>,

	/// Access key used for HTTP Basic auth
	#[arg(long, env = "LT_ACCESS_KEY", hide_env_values = true)]
	pub access_key: Option<String>,

	/// Prefix of the build name to gate on
	#[arg(long, env = "LT_BUILD_PREFIX")]
	pub build_prefix: Option<String>,

	/// Base URL of the test-automation API
	#[arg(long, env = "LT_API_URL", value_name = "URL")]
	pub api_url: Option<String>,

	/// Base URL of the accessibility API
	#[arg(long, env = "LT_ACCESSIBILITY_API_URL", value_name = "URL")]
	pub accessibility_api_url: Option<String>,

	/// Base URL of the accessibility report dashboard
	#[arg(long, env = "LT_ACCESSIBILITY_DASHBOARD_URL", value_name = "URL")]
	pub accessibility_dashboard_url: Option<String>,

	/// Base URL of the app automation dashboard
	#[arg(long, env = "LT_AUTOMATION_DASHBOARD_URL", value_name = "URL")]
	pub automation_dashboard_url: Option<String>,

	/// Number of recent builds searched per discovery attempt [default: 10]
	#[arg(long, env = "LT_BUILD_LIST_LIMIT")]
	pub build_list_limit: Option<u32>,

	/// Build listings tried before giving up [default: 10]
	#[arg(long, env = "LT_DISCOVERY_ATTEMPTS")]
	pub discovery_attempts: Option<u32>,

	/// Report fetches tried per session [default: 12]
	#[arg(long, env = "LT_REPORT_ATTEMPTS")]
	pub report_attempts: Option<u32>,

	/// Give up on a build still running after this many status polls [default: unbounded]
	#[arg(long, env = "LT_STATUS_MAX_POLLS")]
	pub status_max_polls: Option<u32>,

	/// Delay between polls in milliseconds [default: 5000]
	#[arg(long, env = "LT_POLL_INTERVAL_MS", value_name = "MS")]
	pub poll_interval_ms: Option<u64>,

	/// Per-request timeout in seconds [default: 30]
	#[arg(long, env = "LT_REQUEST_TIMEOUT_SECS", value_name = "SECS")]
	pub request_timeout_secs: Option<u64>,

	/// Sessions whose reports are polled at the same time [default: 1]
	#[arg(long, env = "LT_CONCURRENCY")]
	pub concurrency: Option<usize>,
}

impl Cli {
	/// Raw settings for [`gate::GateConfig::resolve`].
	pub fn settings(&self) -> GateSettings {
		GateSettings {
			username: self.username.clone(),
			access_key: self.access_key.clone(),
			build_prefix: self.build_prefix.clone(),
			api_url: self.api_url.clone(),
			accessibility_api_url: self.accessibility_api_url.clone(),
			accessibility_dashboard_url: self.accessibility_dashboard_url.clone(),
			automation_dashboard_url: self.automation_dashboard_url.clone(),
			build_list_limit: self.build_list_limit,
			discovery_attempts: self.discovery_attempts,
			report_attempts: self.report_attempts,
			status_max_polls: self.status_max_polls,
			poll_interval: self.poll_interval_ms.map(Duration::from_millis),
			request_timeout: self.request_timeout_secs.map(Duration::from_secs),
			concurrency: self.concurrency,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_map_onto_settings() {
		let args = vec![
			"a11y-gate",
			"--username",
			"ci-bot",
			"--access-key",
			"s3cret",
			"--build-prefix",
			"pr-42",
			"--poll-interval-ms",
			"250",
			"--status-max-polls",
			"40",
			"--concurrency",
			"4",
		];
		let cli = Cli::try_parse_from(args).unwrap();
		let settings = cli.settings();

		assert_eq!(settings.username.as_deref(), Some("ci-bot"));
		assert_eq!(settings.access_key.as_deref(), Some("s3cret"));
		assert_eq!(settings.build_prefix.as_deref(), Some("pr-42"));
		assert_eq!(settings.poll_interval, Some(Duration::from_millis(250)));
		assert_eq!(settings.status_max_polls, Some(40));
		assert_eq!(settings.concurrency, Some(4));
	}

	#[test]
	fn format_defaults_to_text() {
		let cli = Cli::try_parse_from(["a11y-gate", "--build-prefix", "pr-42"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Text);

		let cli = Cli::try_parse_from(["a11y-gate", "-f", "json"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Json);

		let cli = Cli::try_parse_from(["a11y-gate", "--format", "ndjson"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Ndjson);
	}

	#[test]
	fn unknown_format_is_rejected() {
		assert!(Cli::try_parse_from(["a11y-gate", "-f", "yaml"]).is_err());
	}

	#[test]
	fn verbose_flag_short_and_long() {
		let cli = Cli::try_parse_from(["a11y-gate", "-vv"]).unwrap();
		assert_eq!(cli.verbose, 2);

		let cli = Cli::try_parse_from(["a11y-gate", "--verbose"]).unwrap();
		assert_eq!(cli.verbose, 1);
	}

	#[test]
	fn non_numeric_budget_is_rejected() {
		assert!(Cli::try_parse_from(["a11y-gate", "--report-attempts", "many"]).is_err());
	}
}
