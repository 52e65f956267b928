//! Status delivery with explicit skip accounting.
//!
//! By the time an outcome is reported the test's verdict is already
//! decided, so nothing in here returns an error: every way a report can
//! fail to land is folded into [`ReportOutcome::Skipped`] and logged.
//! Callers that care (the suite's own tests, mostly) can assert on the
//! returned value instead of fishing through logs.

use chrono::{DateTime, Utc};
use farmhand_protocol::StatusUpdate;
use tracing::{debug, info, warn};

use crate::api::FarmApi;
use crate::correlate::SessionCache;
use crate::outcome::RunOutcome;

/// What happened to one status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
	/// The farm acknowledged the update.
	Reported {
		/// Session the update landed on.
		session_id: String,
	},
	/// No update was delivered.
	Skipped(SkipReason),
}

/// Why a status report was not delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
	/// Local mode; there is no remote session to update.
	RemoteDisabled,
	/// No session was created close enough to the test's start time.
	NoMatch,
	/// Transport failed or the farm rejected the update.
	Api(String),
}

impl ReportOutcome {
	/// `true` when the farm acknowledged the update.
	pub fn is_reported(&self) -> bool {
		matches!(self, ReportOutcome::Reported { .. })
	}
}

/// Delivers one test's outcome to the farm session created for it.
///
/// `api` is `None` in local mode, which short-circuits to
/// [`SkipReason::RemoteDisabled`] without any farm traffic. Otherwise the
/// session id is resolved by creation-time proximity to `started_at` and
/// the update names the session after the test.
pub async fn report_outcome(
	api: Option<&FarmApi>,
	label: &str,
	started_at: DateTime<Utc>,
	outcome: &RunOutcome,
) -> ReportOutcome {
	let Some(api) = api else {
		debug!(target: "farm.report", label, "local mode, skipping status update");
		return ReportOutcome::Skipped(SkipReason::RemoteDisabled);
	};

	let cache = SessionCache::fetch(api).await;
	let Some(session) = cache.match_by_start_time(started_at) else {
		warn!(
			target: "farm.report",
			label,
			sessions = cache.len(),
			"no session matched the test start time, skipping status update"
		);
		return ReportOutcome::Skipped(SkipReason::NoMatch);
	};

	let update = StatusUpdate {
		name: Some(label.to_string()),
		status: outcome.status,
		reason: outcome.reason.clone(),
	};

	match api.update_session(&session.id, &update).await {
		Ok(()) => {
			info!(
				target: "farm.report",
				session_id = %session.id,
				status = %outcome.status,
				"session status updated"
			);
			ReportOutcome::Reported {
				session_id: session.id.clone(),
			}
		}
		Err(e) => {
			warn!(
				target: "farm.report",
				session_id = %session.id,
				error = %e,
				"session status update failed"
			);
			ReportOutcome::Skipped(SkipReason::Api(e.to_string()))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::outcome::{TestStatus, resolve_outcome};

	#[tokio::test]
	async fn local_mode_skips_without_any_traffic() {
		let outcome = resolve_outcome(TestStatus::Passed, TestStatus::Passed, None);
		let report = report_outcome(None, "Login › valid credentials", Utc::now(), &outcome).await;
		assert_eq!(report, ReportOutcome::Skipped(SkipReason::RemoteDisabled));
		assert!(!report.is_reported());
	}
}
