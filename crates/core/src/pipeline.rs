//! End-to-end gate run: locate, wait, enumerate, poll, aggregate.

use futures_util::stream::{self, StreamExt};
use tracing::info;

use crate::config::GateConfig;
use crate::error::Result;
use crate::locate::locate_build;
use crate::outcome::RunOutcome;
use crate::remote::{HttpRemote, RemoteService};
use crate::report::ReportPoller;
use crate::sessions::list_sessions;
use crate::status::wait_for_completion;

/// One configured gate run against a remote service.
pub struct Gate<R> {
	remote: R,
	config: GateConfig,
}

impl Gate<HttpRemote> {
	/// Gate talking to the real APIs described by `config`.
	pub fn connect(config: GateConfig) -> Result<Self> {
		let remote = HttpRemote::new(&config)?;
		Ok(Self::new(remote, config))
	}
}

impl<R: RemoteService> Gate<R> {
	pub fn new(remote: R, config: GateConfig) -> Self {
		Self { remote, config }
	}

	pub fn remote(&self) -> &R {
		&self.remote
	}

	/// Runs every stage in order.
	///
	/// Session reports are polled with up to `concurrency` sessions in flight;
	/// the verdict is computed only after all of them settle.
	///
	/// # Errors
	///
	/// Fails when the build is never found, the optional status ceiling is hit,
	/// or listing sessions fails. Reports that never become available are part
	/// of the outcome, not errors.
	pub async fn run(&self) -> Result<RunOutcome> {
		let config = &self.config;

		let build = locate_build(&self.remote, &config.build_prefix, config.build_list_limit, config.discovery).await?;
		let build_status = wait_for_completion(&self.remote, &build.id, config.status).await?;
		let sessions = list_sessions(&self.remote, &build.id).await?;

		let poller = ReportPoller::new(&self.remote, config.report, &config.endpoints);
		info!(
			target: "gate",
			build_id = %build.id,
			sessions = sessions.len(),
			concurrency = config.concurrency,
			"checking accessibility reports"
		);
		let results = stream::iter(&sessions)
			.map(|session| poller.poll(session))
			.buffered(config.concurrency)
			.collect::<Vec<_>>()
			.await;

		let outcome = RunOutcome::new(build, build_status, results);
		outcome.log_verdict();
		Ok(outcome)
	}
}
