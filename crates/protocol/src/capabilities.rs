//! Capability descriptor sent when opening a remote session.
//!
//! The farm does not take capabilities in a handshake message. They ride in
//! the WebSocket URL itself: the session request is a connect to
//! `wss://<cdp-host>/playwright?caps=<json>` where `caps` is the
//! percent-encoded JSON serialization of [`CapabilityDescriptor`].

use serde::{Deserialize, Serialize};

/// Capability object the farm reads from the `caps` query parameter.
///
/// Key spellings follow the farm's wire format, including the
/// vendor-prefixed toggles. Vendor toggles are string-valued on the wire
/// (`"true"`, not `true`). One descriptor is built per test and carries
/// that test's display name under `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
	/// Browser family, e.g. `"chrome"`.
	pub browser: String,
	/// Browser release or `"latest"`.
	pub browser_version: String,
	/// Operating system family, e.g. `"Windows"`.
	pub os: String,
	/// Operating system release, e.g. `"11"`.
	pub os_version: String,
	/// Build label grouping one suite run in the farm dashboard.
	pub build: String,
	/// Project label grouping builds.
	pub project: String,
	/// Session display name, unique per test.
	pub name: String,
	/// Farm account name.
	#[serde(rename = "browserstack.username")]
	pub username: String,
	/// Farm account access key.
	#[serde(rename = "browserstack.accessKey")]
	pub access_key: String,
	/// Console capture level, e.g. `"info"`.
	#[serde(rename = "browserstack.console")]
	pub console: String,
	#[serde(rename = "browserstack.networkLogs")]
	pub network_logs: String,
	#[serde(rename = "browserstack.debug")]
	pub debug: String,
	#[serde(rename = "browserstack.video")]
	pub video: String,
	/// City-level timezone name, e.g. `"Paris"`.
	#[serde(rename = "browserstack.timezone")]
	pub timezone: String,
	/// Version of the local automation client, probed at session start.
	#[serde(rename = "client.playwrightVersion")]
	pub client_version: String,
}

impl CapabilityDescriptor {
	/// Formats the WebSocket endpoint that opens a session with these
	/// capabilities: `{cdp_url}?caps=<percent-encoded JSON>`.
	pub fn endpoint(&self, cdp_url: &str) -> serde_json::Result<String> {
		let caps = serde_json::to_string(self)?;
		Ok(format!("{cdp_url}?caps={}", urlencoding::encode(&caps)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn descriptor() -> CapabilityDescriptor {
		CapabilityDescriptor {
			browser: "chrome".into(),
			browser_version: "latest".into(),
			os: "Windows".into(),
			os_version: "11".into(),
			build: "Demo Web Shop Tests - 2026-01-05 14:30".into(),
			project: "Demo Web Shop".into(),
			name: "Login › valid credentials".into(),
			username: "user".into(),
			access_key: "key".into(),
			console: "info".into(),
			network_logs: "true".into(),
			debug: "true".into(),
			video: "true".into(),
			timezone: "Paris".into(),
			client_version: "1.49.1".into(),
		}
	}

	#[test]
	fn serializes_with_vendor_prefixed_keys() {
		let json = serde_json::to_string(&descriptor()).unwrap();
		assert!(json.contains(r#""browserstack.username":"user""#));
		assert!(json.contains(r#""browserstack.accessKey":"key""#));
		assert!(json.contains(r#""client.playwrightVersion":"1.49.1""#));
		assert!(json.contains(r#""browserstack.networkLogs":"true""#));
	}

	#[test]
	fn endpoint_percent_encodes_the_caps_json() {
		let url = descriptor()
			.endpoint("wss://cdp.example.com/playwright")
			.unwrap();
		assert!(url.starts_with("wss://cdp.example.com/playwright?caps=%7B"));
		assert!(!url.contains('{'));
		assert!(!url.contains(' '));
		assert!(!url.contains('+'));
	}

	#[test]
	fn endpoint_round_trips_through_decoding() {
		let original = descriptor();
		let url = original.endpoint("wss://cdp.example.com/playwright").unwrap();
		let encoded = url.split("caps=").nth(1).unwrap();
		let caps = urlencoding::decode(encoded).unwrap();
		let parsed: CapabilityDescriptor = serde_json::from_str(&caps).unwrap();
		assert_eq!(parsed, original);
		assert_eq!(parsed.name, "Login › valid credentials");
	}
}
