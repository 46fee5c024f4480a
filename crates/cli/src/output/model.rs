use gate::GateError;
use serde::{Deserialize, Serialize};

/// Current schema version for gate output.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the gate command in the result envelope.
pub const GATE_COMMAND: &str = "accessibility-gate";

/// The result envelope printed once per run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,
	/// `true` only when the run completed and every session passed.
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
}

/// Error information for runs that stopped early.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

impl From<&GateError> for CommandError {
	fn from(err: &GateError) -> Self {
		Self {
			code: ErrorCode::from(err),
			message: err.to_string(),
		}
	}
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	ConfigError,
	BuildNotFound,
	StuckBuild,
	SessionListingFailed,
	RemoteError,
}

impl From<&GateError> for ErrorCode {
	fn from(err: &GateError) -> Self {
		match err {
			GateError::MissingConfig(_) | GateError::InvalidConfig(_) => ErrorCode::ConfigError,
			GateError::BuildNotFound { .. } => ErrorCode::BuildNotFound,
			GateError::StuckBuild { .. } => ErrorCode::StuckBuild,
			GateError::SessionListing { .. } => ErrorCode::SessionListingFailed,
			GateError::Http { .. } | GateError::Status { .. } | GateError::Decode { .. } => ErrorCode::RemoteError,
		}
	}
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
			ErrorCode::BuildNotFound => write!(f, "BUILD_NOT_FOUND"),
			ErrorCode::StuckBuild => write!(f, "STUCK_BUILD"),
			ErrorCode::SessionListingFailed => write!(f, "SESSION_LISTING_FAILED"),
			ErrorCode::RemoteError => write!(f, "REMOTE_ERROR"),
		}
	}
}
