use clap::ValueEnum;

/// Output format for the final summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// TOON output (token-efficient for LLM tooling)
	Toon,
	/// JSON output
	Json,
	/// Newline-delimited JSON
	Ndjson,
	/// Human-readable summary (default)
	#[default]
	Text,
}
