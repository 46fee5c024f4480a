use a11y_gate_cli::{cli::Cli, logging, run};
use clap::Parser;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let code = run::execute(&cli).await;
	std::process::exit(code);
}
