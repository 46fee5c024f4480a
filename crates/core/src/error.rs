use thiserror::Error;

use crate::model::RemoteId;

pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
	#[error("Missing required configuration: {}", .0.join(", "))]
	MissingConfig(Vec<&'static str>),

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("Request to {url} failed: {source}")]
	Http {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("{url} returned HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("Failed to decode response from {url}: {message}")]
	Decode { url: String, message: String },

	#[error("No build found matching prefix '{prefix}' after {attempts} attempts")]
	BuildNotFound { prefix: String, attempts: u32 },

	#[error("Build {build_id} still running after {polls} status polls")]
	StuckBuild { build_id: RemoteId, polls: u32 },

	#[error("Failed to list sessions for build {build_id}: {source}")]
	SessionListing {
		build_id: RemoteId,
		#[source]
		source: Box<GateError>,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_config_names_every_value() {
		let err = GateError::MissingConfig(vec!["LT_USERNAME", "LT_BUILD_PREFIX"]);
		assert_eq!(err.to_string(), "Missing required configuration: LT_USERNAME, LT_BUILD_PREFIX");
	}

	#[test]
	fn session_listing_wraps_remote_cause() {
		let err = GateError::SessionListing {
			build_id: RemoteId::from(77u64),
			source: Box::new(GateError::Status {
				url: "https://api.test/sessions".into(),
				status: 500,
			}),
		};
		assert_eq!(
			err.to_string(),
			"Failed to list sessions for build 77: https://api.test/sessions returned HTTP 500"
		);
		assert!(std::error::Error::source(&err).is_some());
	}
}
