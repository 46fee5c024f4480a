use std::fmt::Write;

use colored::Colorize;
use gate::{IssueCount, SessionResult};

use crate::output::data::GateData;

/// Human-readable rendering used by the `text` output format.
pub trait TextSummary {
	fn render_text(&self) -> String;
}

impl TextSummary for GateData<'_> {
	fn render_text(&self) -> String {
		let outcome = self.outcome;
		let mut out = String::new();

		let _ = writeln!(
			out,
			"Build {} ({}) finished with status: {}",
			outcome.build.id, outcome.build.name, outcome.build_status
		);

		if outcome.sessions.is_empty() {
			let _ = writeln!(out, "  no sessions found under build");
		}
		for result in &outcome.sessions {
			render_session(&mut out, result);
		}

		let verdict = if self.passed {
			format!("PASS: no accessibility issues across {} session(s)", outcome.sessions.len()).green().bold()
		} else {
			format!(
				"FAIL: {} of {} session(s) failed accessibility checks ({} issue(s), {} unavailable report(s))",
				self.failing_sessions,
				outcome.sessions.len(),
				self.total_issues,
				self.unavailable_sessions
			)
			.red()
			.bold()
		};
		let _ = writeln!(out, "{verdict}");
		out
	}
}

fn render_session(out: &mut String, result: &SessionResult) {
	let marker = if result.is_failing() { "✗".red() } else { "✓".green() };
	let issues = match result.issues {
		IssueCount::Resolved(1) => "1 issue".to_string(),
		IssueCount::Resolved(total) => format!("{total} issues"),
		IssueCount::Unavailable { attempts } => format!("report unavailable after {attempts} attempts"),
	};

	let _ = writeln!(out, "  {marker} {} ({}): {issues}", result.session.name, result.session.id);
	if let Some(links) = &result.links {
		let _ = writeln!(out, "      report:    {}", links.accessibility_report);
		let _ = writeln!(out, "      dashboard: {}", links.automation_dashboard);
	}
}
