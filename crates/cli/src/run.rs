//! Runs the gate once and turns the result into output and an exit code.

use std::time::Instant;

use gate::{Gate, GateConfig, RunOutcome};
use tracing::error;

use crate::cli::Cli;
use crate::output::{CommandError, GATE_COMMAND, GateData, ResultBuilder, print_result};

/// Exit status for a failing verdict or any fatal error.
pub const EXIT_FAILURE: i32 = 1;

/// Resolves configuration, runs every stage and prints the summary.
///
/// Returns the process exit code: 0 only when every session passed.
pub async fn execute(cli: &Cli) -> i32 {
	let started = Instant::now();

	match run_gate(cli).await {
		Ok(outcome) => {
			let result = ResultBuilder::new(GATE_COMMAND)
				.started_at(started)
				.data(GateData::from(&outcome))
				.passed(!outcome.failed())
				.build();
			print_result(&result, cli.format);
			outcome.exit_code()
		}
		Err(err) => {
			error!(target: "gate", error = %err, "gate run failed");
			let result = ResultBuilder::<GateData<'_>>::new(GATE_COMMAND)
				.started_at(started)
				.error(CommandError::from(&err))
				.build();
			print_result(&result, cli.format);
			EXIT_FAILURE
		}
	}
}

async fn run_gate(cli: &Cli) -> gate::Result<RunOutcome> {
	let config = GateConfig::resolve(cli.settings())?;
	Gate::connect(config)?.run().await
}
