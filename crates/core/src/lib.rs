//! Accessibility gate for remote mobile test runs.
//!
//! The gate finds a remote build by name prefix, waits for it to finish,
//! enumerates its sessions and polls the accessibility report of each one.
//! The per-session issue counts fold into a single pass/fail [`RunOutcome`].
//!
//! Every remote call goes through [`RemoteService`]; [`HttpRemote`] talks to
//! the real APIs and [`remote::fake::ScriptedRemote`] replays scripted
//! responses in tests.

pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod outcome;
pub mod pipeline;
pub mod remote;
pub mod report;
pub mod retry;
pub mod sessions;
pub mod status;

pub use config::{Credentials, Endpoints, GateConfig, GateSettings};
pub use error::{GateError, Result};
pub use model::{AccessibilityReport, Build, BuildStatus, IssueCount, RemoteId, ReportLinks, ScanId, Session, SessionResult};
pub use outcome::RunOutcome;
pub use pipeline::Gate;
pub use remote::{HttpRemote, RemoteService};
pub use retry::RetryPolicy;
