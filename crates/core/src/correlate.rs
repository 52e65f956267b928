//! Correlates finished tests with farm sessions by creation time.
//!
//! The capability-bearing connect does not reveal the id of the session it
//! creates, so reporting has to resolve the id after the fact: list recent
//! sessions and take the first one, in server order, whose creation time
//! falls inside a fixed window around the locally recorded test start.
//!
//! The heuristic is knowingly weak: concurrent tests that start inside one
//! window can pick up each other's sessions. There is no stronger key on
//! the wire, so no disambiguation is attempted beyond first-match.

use chrono::{DateTime, TimeDelta, Utc};
use farmhand_protocol::SessionRecord;
use tracing::debug;

use crate::api::FarmApi;

/// Maximum |created_at - test start|, in seconds, for a session to match.
pub const MATCH_WINDOW_SECS: i64 = 60;

/// Session list fetched for one correlation attempt.
///
/// Each reporter call owns its own cache; nothing is shared or kept warm
/// across tests, so one test's stale listing can never bleed into another.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
	records: Vec<SessionRecord>,
}

impl SessionCache {
	/// Fetches the most recent sessions from the farm.
	pub async fn fetch(api: &FarmApi) -> Self {
		Self::from_records(api.list_sessions().await)
	}

	/// Wraps an already-fetched record list.
	pub fn from_records(records: Vec<SessionRecord>) -> Self {
		Self { records }
	}

	/// First session, in server order, created within
	/// [`MATCH_WINDOW_SECS`] of `started_at`. Bounds are inclusive.
	pub fn match_by_start_time(&self, started_at: DateTime<Utc>) -> Option<&SessionRecord> {
		let window = TimeDelta::seconds(MATCH_WINDOW_SECS);
		let matched = self
			.records
			.iter()
			.find(|record| (record.created_at - started_at).abs() <= window);
		if let Some(record) = matched {
			debug!(
				target: "farm.correlate",
				session_id = %record.id,
				created_at = %record.created_at,
				"matched session by start time"
			);
		}
		matched
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	fn record(id: &str, created_at: DateTime<Utc>) -> SessionRecord {
		SessionRecord {
			id: id.into(),
			created_at,
			name: None,
			status: Some("running".into()),
			reason: None,
		}
	}

	fn start() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 1, 5, 14, 30, 0).unwrap()
	}

	#[test]
	fn session_inside_the_window_matches() {
		let start = start();
		let cache = SessionCache::from_records(vec![
			record("far", start + TimeDelta::seconds(90)),
			record("near", start + TimeDelta::seconds(30)),
		]);
		assert_eq!(cache.match_by_start_time(start).unwrap().id, "near");
	}

	#[test]
	fn sessions_outside_the_window_never_match() {
		let start = start();
		let cache = SessionCache::from_records(vec![
			record("after", start + TimeDelta::seconds(61)),
			record("before", start - TimeDelta::seconds(61)),
		]);
		assert!(cache.match_by_start_time(start).is_none());
	}

	#[test]
	fn window_is_inclusive_and_two_sided() {
		let start = start();
		let cache = SessionCache::from_records(vec![record("edge", start + TimeDelta::seconds(60))]);
		assert_eq!(cache.match_by_start_time(start).unwrap().id, "edge");

		let cache = SessionCache::from_records(vec![record("early", start - TimeDelta::seconds(45))]);
		assert_eq!(cache.match_by_start_time(start).unwrap().id, "early");
	}

	#[test]
	fn first_match_in_server_order_wins() {
		let start = start();
		let cache = SessionCache::from_records(vec![
			record("first", start + TimeDelta::seconds(10)),
			record("second", start + TimeDelta::seconds(5)),
		]);
		// "second" is closer, but order decides
		assert_eq!(cache.match_by_start_time(start).unwrap().id, "first");
	}

	#[test]
	fn empty_cache_matches_nothing() {
		let cache = SessionCache::default();
		assert!(cache.is_empty());
		assert!(cache.match_by_start_time(start()).is_none());
	}
}
