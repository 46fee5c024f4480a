use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RemoteId;

/// Wire value of `status_ind` while a build is still executing.
pub const RUNNING_STATUS: &str = "running";

/// Execution state of a remote build.
///
/// Only `running` is meaningful to the gate; every other value is terminal and
/// kept verbatim for logging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum BuildStatus {
	Running,
	Finished(String),
	/// The service omitted `status_ind` or sent `null`.
	#[default]
	Unknown,
}

impl BuildStatus {
	pub fn is_running(&self) -> bool {
		matches!(self, BuildStatus::Running)
	}
}

impl From<String> for BuildStatus {
	fn from(value: String) -> Self {
		if value == RUNNING_STATUS { BuildStatus::Running } else { BuildStatus::Finished(value) }
	}
}

impl From<Option<String>> for BuildStatus {
	fn from(value: Option<String>) -> Self {
		value.map_or(BuildStatus::Unknown, BuildStatus::from)
	}
}

impl From<BuildStatus> for Option<String> {
	fn from(value: BuildStatus) -> Self {
		match value {
			BuildStatus::Running => Some(RUNNING_STATUS.to_string()),
			BuildStatus::Finished(status) => Some(status),
			BuildStatus::Unknown => None,
		}
	}
}

impl fmt::Display for BuildStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BuildStatus::Running => f.write_str(RUNNING_STATUS),
			BuildStatus::Finished(status) => f.write_str(status),
			BuildStatus::Unknown => f.write_str("unknown"),
		}
	}
}

/// Entry of `GET /builds?limit=N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
	pub build_id: RemoteId,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub status_ind: BuildStatus,
}

/// Payload of `GET /builds/{build_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDetail {
	#[serde(default)]
	pub status_ind: BuildStatus,
}
