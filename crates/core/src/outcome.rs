//! Per-test verdict derivation for status reporting.

use std::fmt;

use farmhand_protocol::SessionStatus;
use serde::{Deserialize, Serialize};

/// Maximum reported reason length, in characters.
pub const REASON_LIMIT: usize = 250;

/// Terminal states the external runner can leave a test in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
	Passed,
	Failed,
	TimedOut,
	Interrupted,
}

impl fmt::Display for TestStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// camelCase, matching the runner's own spelling
		let s = match self {
			TestStatus::Passed => "passed",
			TestStatus::Failed => "failed",
			TestStatus::TimedOut => "timedOut",
			TestStatus::Interrupted => "interrupted",
		};
		f.write_str(s)
	}
}

/// What gets reported for one finished test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
	pub status: SessionStatus,
	/// Human-readable explanation, at most [`REASON_LIMIT`] characters.
	pub reason: String,
}

/// Derives the reported outcome from the runner's view of a test.
///
/// A test counts as passed when it actually passed or when it ended in
/// exactly the status it was declared to expect, so expected failures
/// report `passed`. A non-empty failure message becomes the reason even
/// then, cut to its first [`REASON_LIMIT`] characters; otherwise the
/// reason is a canned line for the computed status.
pub fn resolve_outcome(actual: TestStatus, expected: TestStatus, failure: Option<&str>) -> RunOutcome {
	let passed = actual == TestStatus::Passed || actual == expected;
	let status = if passed { SessionStatus::Passed } else { SessionStatus::Failed };
	let reason = match failure {
		Some(message) if !message.is_empty() => message.chars().take(REASON_LIMIT).collect(),
		_ if passed => "Test passed successfully".to_string(),
		_ => format!("Test {actual}"),
	};
	RunOutcome { status, reason }
}
