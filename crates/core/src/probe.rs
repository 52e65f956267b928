//! Client-version probe.
//!
//! The capability payload carries the version of the automation client that
//! will drive the session. The farm uses it to pick a compatible server, so
//! a wrong or missing version is worse than a failed probe: probe failures
//! are fatal to the test instead of being papered over.

use std::process::Command;

use crate::error::{FarmError, Result};

/// Probe command used when `FARM_CLIENT_PROBE` is not set.
pub const DEFAULT_CLIENT_PROBE: &str = "npx playwright --version";

/// Runs `probe` and extracts the client version from its stdout.
///
/// The output is expected to look like `Version 1.49.1`; the second
/// whitespace-separated token is taken verbatim.
pub fn probe_client_version(probe: &str) -> Result<String> {
	let mut parts = probe.split_whitespace();
	let program = parts
		.next()
		.ok_or_else(|| FarmError::Probe("empty probe command".into()))?;

	let output = Command::new(program)
		.args(parts)
		.output()
		.map_err(|e| FarmError::Probe(format!("{probe}: {e}")))?;

	if !output.status.success() {
		return Err(FarmError::Probe(format!("{probe} exited with {}", output.status)));
	}

	let stdout = String::from_utf8_lossy(&output.stdout);
	parse_version_output(&stdout)
		.ok_or_else(|| FarmError::Probe(format!("unexpected probe output: {:?}", stdout.trim())))
}

/// Second space-separated token of the trimmed output, e.g.
/// `"Version 1.49.1"` yields `"1.49.1"`.
fn parse_version_output(stdout: &str) -> Option<String> {
	stdout.trim().split(' ').nth(1).map(str::to_string)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_the_second_token() {
		assert_eq!(parse_version_output("Version 1.49.1\n"), Some("1.49.1".into()));
		assert_eq!(parse_version_output("Playwright 1.40.0 stable"), Some("1.40.0".into()));
	}

	#[test]
	fn single_token_output_is_rejected() {
		assert_eq!(parse_version_output("1.49.1"), None);
		assert_eq!(parse_version_output(""), None);
	}

	#[test]
	fn empty_probe_command_is_an_error() {
		let err = probe_client_version("   ").unwrap_err();
		assert!(matches!(err, FarmError::Probe(_)));
	}

	#[cfg(unix)]
	#[test]
	fn probe_runs_the_command_and_parses_stdout() {
		let version = probe_client_version("echo Version 9.9.9").unwrap();
		assert_eq!(version, "9.9.9");
	}

	#[cfg(unix)]
	#[test]
	fn missing_executable_is_an_error() {
		let err = probe_client_version("definitely-not-a-real-binary --version").unwrap_err();
		assert!(matches!(err, FarmError::Probe(_)));
	}

	#[cfg(unix)]
	#[test]
	fn nonzero_exit_is_an_error() {
		let err = probe_client_version("false").unwrap_err();
		assert!(matches!(err, FarmError::Probe(_)));
	}
}
