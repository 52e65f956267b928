//! REST client for the farm's session-tracking API.

use std::time::Duration;

use farmhand_protocol::{SessionRecord, StatusUpdate, parse_session_list};
use reqwest::StatusCode;
use tracing::debug;

use crate::config::Credentials;
use crate::error::{FarmError, Result};

/// How many sessions the listing endpoint is asked for.
pub const SESSION_LIST_LIMIT: usize = 100;

const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for the farm's REST endpoints.
///
/// One client serves a whole run; it is cheap to clone and holds no
/// per-test state.
#[derive(Debug, Clone)]
pub struct FarmApi {
	client: reqwest::Client,
	base_url: String,
	credentials: Credentials,
}

impl FarmApi {
	/// Creates a client against `base_url`.
	pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Result<Self> {
		let client = reqwest::Client::builder().timeout(API_TIMEOUT).build()?;
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Ok(Self {
			client,
			base_url,
			credentials,
		})
	}

	/// Fetches the most recent sessions, in server order.
	///
	/// Transport failures, rejections and malformed bodies all yield an
	/// empty list. The correlator treats every one of them as "nothing to
	/// match against"; listing never fails a test.
	pub async fn list_sessions(&self) -> Vec<SessionRecord> {
		let url = format!("{}/automate/sessions.json?limit={}", self.base_url, SESSION_LIST_LIMIT);
		let response = match self
			.client
			.get(&url)
			.basic_auth(&self.credentials.username, Some(&self.credentials.access_key))
			.send()
			.await
		{
			Ok(response) => response,
			Err(e) => {
				debug!(target: "farm.api", error = %e, "session listing failed");
				return Vec::new();
			}
		};

		if !response.status().is_success() {
			debug!(target: "farm.api", status = %response.status(), "session listing rejected");
			return Vec::new();
		}

		match response.text().await {
			Ok(body) => parse_session_list(&body),
			Err(e) => {
				debug!(target: "farm.api", error = %e, "session listing body unreadable");
				Vec::new()
			}
		}
	}

	/// Pushes a status update for `session_id`.
	///
	/// The farm acknowledges with exactly 200; anything else is an error
	/// for the caller to downgrade as its policy dictates.
	pub async fn update_session(&self, session_id: &str, update: &StatusUpdate) -> Result<()> {
		let url = format!("{}/automate/sessions/{}.json", self.base_url, session_id);
		let response = self
			.client
			.put(&url)
			.basic_auth(&self.credentials.username, Some(&self.credentials.access_key))
			.json(update)
			.send()
			.await?;

		if response.status() != StatusCode::OK {
			return Err(FarmError::ApiStatus(response.status()));
		}
		Ok(())
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}
}
