//! Run configuration resolved from `FARM_*` environment variables.
//!
//! Everything is read once, before the first test, and handed around as a
//! value from then on. The single routing decision lives here: remote
//! execution is enabled only when both credential variables are present,
//! and their absence is a mode switch, not an error.

use chrono::{DateTime, Local};
use url::Url;

use crate::error::{FarmError, Result};
use crate::probe::DEFAULT_CLIENT_PROBE;

/// REST API base used when `FARM_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.browserstack.com";

/// CDP WebSocket base used when `FARM_CDP_URL` is not set.
pub const DEFAULT_CDP_URL: &str = "wss://cdp.browserstack.com/playwright";

const DEFAULT_OS: &str = "Windows";
const DEFAULT_OS_VERSION: &str = "11";
const DEFAULT_BROWSER: &str = "chrome";
const DEFAULT_BROWSER_VERSION: &str = "latest";
const DEFAULT_PROJECT_NAME: &str = "Demo Web Shop";
const DEFAULT_WORKERS: usize = 5;
const DEFAULT_TIMEZONE: &str = "Paris";

/// Farm account credentials. Remote execution requires both parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub access_key: String,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct FarmConfig {
	/// Present only when `FARM_USERNAME` and `FARM_ACCESS_KEY` are both
	/// non-empty; absence routes every session to a local browser.
	pub credentials: Option<Credentials>,
	pub os: String,
	pub os_version: String,
	pub browser: String,
	pub browser_version: String,
	/// Build label grouping this run in the farm dashboard.
	pub build_name: String,
	pub project_name: String,
	/// Parallel worker count, surfaced for the external test runner.
	pub workers: usize,
	pub timezone: String,
	/// REST API base, no trailing slash.
	pub api_url: String,
	/// CDP WebSocket base the `caps` query parameter is appended to.
	pub cdp_url: String,
	/// Command whose stdout yields the client version.
	pub client_probe: String,
}

impl FarmConfig {
	/// Reads configuration from the process environment.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads configuration through an arbitrary key lookup.
	///
	/// Empty values count as absent, matching how the suite's shell
	/// wrappers export unset variables.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

		let credentials = match (get("FARM_USERNAME"), get("FARM_ACCESS_KEY")) {
			(Some(username), Some(access_key)) => Some(Credentials { username, access_key }),
			_ => None,
		};

		let workers = match get("FARM_WORKERS") {
			Some(raw) => raw
				.parse::<usize>()
				.map_err(|_| FarmError::Config(format!("FARM_WORKERS must be a number, got {raw:?}")))?,
			None => DEFAULT_WORKERS,
		};

		let api_url = normalize_url(get("FARM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()));
		let cdp_url = normalize_url(get("FARM_CDP_URL").unwrap_or_else(|| DEFAULT_CDP_URL.into()));
		validate_url("FARM_API_URL", &api_url, &["http", "https"])?;
		validate_url("FARM_CDP_URL", &cdp_url, &["ws", "wss"])?;

		Ok(Self {
			credentials,
			os: get("FARM_OS").unwrap_or_else(|| DEFAULT_OS.into()),
			os_version: get("FARM_OS_VERSION").unwrap_or_else(|| DEFAULT_OS_VERSION.into()),
			browser: get("FARM_BROWSER").unwrap_or_else(|| DEFAULT_BROWSER.into()),
			browser_version: get("FARM_BROWSER_VERSION").unwrap_or_else(|| DEFAULT_BROWSER_VERSION.into()),
			build_name: get("FARM_BUILD_NAME").unwrap_or_else(|| default_build_name(Local::now())),
			project_name: get("FARM_PROJECT_NAME").unwrap_or_else(|| DEFAULT_PROJECT_NAME.into()),
			workers,
			timezone: get("FARM_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.into()),
			api_url,
			cdp_url,
			client_probe: get("FARM_CLIENT_PROBE").unwrap_or_else(|| DEFAULT_CLIENT_PROBE.into()),
		})
	}

	/// `true` when sessions go to the farm rather than a local browser.
	pub fn is_remote(&self) -> bool {
		self.credentials.is_some()
	}
}

/// Build label stamped with the local date and time, one per run.
fn default_build_name(now: DateTime<Local>) -> String {
	format!("Demo Web Shop Tests - {}", now.format("%Y-%m-%d %H:%M"))
}

fn normalize_url(value: String) -> String {
	value.trim_end_matches('/').to_string()
}

fn validate_url(key: &str, value: &str, schemes: &[&str]) -> Result<()> {
	let parsed =
		Url::parse(value).map_err(|e| FarmError::Config(format!("{key} is not a valid URL ({e}): {value}")))?;
	if !schemes.contains(&parsed.scheme()) {
		return Err(FarmError::Config(format!(
			"{key} must use a {} URL, got {}",
			schemes.join("/"),
			parsed.scheme()
		)));
	}
	Ok(())
}
