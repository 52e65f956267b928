//! Session records exchanged with the farm's REST API.
//!
//! Sessions are remote-owned: the farm creates one when a capability-bearing
//! WebSocket connect lands, and this side only lists recent sessions
//! (`GET /automate/sessions.json`) and pushes status updates
//! (`PUT /automate/sessions/{id}.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One automation session as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
	/// Opaque session identifier.
	pub id: String,
	/// Server-side creation time, RFC 3339.
	pub created_at: DateTime<Utc>,
	/// Display name the session was opened with, when any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Farm-side status, e.g. `"running"`, `"passed"`, `"failed"`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	/// Reason recorded by the last status update, when any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}

/// Terminal verdict accepted by the status-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
	Passed,
	Failed,
}

impl std::fmt::Display for SessionStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SessionStatus::Passed => write!(f, "passed"),
			SessionStatus::Failed => write!(f, "failed"),
		}
	}
}

/// Body for the status-update endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
	/// New display name; omitted to leave the name untouched.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub status: SessionStatus,
	pub reason: String,
}

/// Listing entry. The service wraps each record in an `automation_session`
/// envelope; bare records are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ListEntry {
	Wrapped { automation_session: SessionRecord },
	Bare(SessionRecord),
}

impl ListEntry {
	fn into_record(self) -> SessionRecord {
		match self {
			ListEntry::Wrapped { automation_session } => automation_session,
			ListEntry::Bare(record) => record,
		}
	}
}

/// Parses a session-list response body.
///
/// A body that is not a JSON array yields an empty list, and entries that
/// do not parse as session records are dropped. Correlation treats a
/// malformed listing as "nothing to match against", never as an error.
pub fn parse_session_list(body: &str) -> Vec<SessionRecord> {
	let Ok(entries) = serde_json::from_str::<Vec<serde_json::Value>>(body) else {
		return Vec::new();
	};
	entries
		.into_iter()
		.filter_map(|entry| serde_json::from_value::<ListEntry>(entry).ok())
		.map(ListEntry::into_record)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_enveloped_records() {
		let body = r#"[
			{"automation_session": {"id": "a1", "created_at": "2026-01-05T14:30:00Z", "name": "Login", "status": "passed", "reason": "Test passed successfully"}},
			{"automation_session": {"id": "b2", "created_at": "2026-01-05T14:31:00Z"}}
		]"#;
		let sessions = parse_session_list(body);
		assert_eq!(sessions.len(), 2);
		assert_eq!(sessions[0].id, "a1");
		assert_eq!(sessions[0].name.as_deref(), Some("Login"));
		assert_eq!(sessions[0].reason.as_deref(), Some("Test passed successfully"));
		assert_eq!(sessions[1].name, None);
		assert_eq!(sessions[1].reason, None);
	}

	#[test]
	fn parses_bare_records() {
		let body = r#"[{"id": "a1", "created_at": "2026-01-05T14:30:00Z"}]"#;
		let sessions = parse_session_list(body);
		assert_eq!(sessions.len(), 1);
		assert_eq!(sessions[0].id, "a1");
	}

	#[test]
	fn malformed_body_yields_empty_list() {
		assert!(parse_session_list("<html>502</html>").is_empty());
		assert!(parse_session_list(r#"{"error": "rate limited"}"#).is_empty());
		assert!(parse_session_list("").is_empty());
	}

	#[test]
	fn unparseable_entries_are_dropped() {
		let body = r#"[
			{"id": "a1", "created_at": "2026-01-05T14:30:00Z"},
			{"id": "b2", "created_at": "not a timestamp"},
			42
		]"#;
		let sessions = parse_session_list(body);
		assert_eq!(sessions.len(), 1);
		assert_eq!(sessions[0].id, "a1");
	}

	#[test]
	fn status_update_omits_empty_name() {
		let update = StatusUpdate {
			name: None,
			status: SessionStatus::Failed,
			reason: "Test timedOut".into(),
		};
		let json = serde_json::to_string(&update).unwrap();
		assert_eq!(json, r#"{"status":"failed","reason":"Test timedOut"}"#);
	}

	#[test]
	fn status_update_carries_name_when_set() {
		let update = StatusUpdate {
			name: Some("Login › valid credentials".into()),
			status: SessionStatus::Passed,
			reason: "Test passed successfully".into(),
		};
		let json = serde_json::to_string(&update).unwrap();
		assert!(json.contains(r#""name":"Login › valid credentials""#));
		assert!(json.contains(r#""status":"passed""#));
	}
}
