//! Per-test session lifecycle: open, run, report, close.

use chrono::{DateTime, Utc};
use farmhand_protocol::CapabilityDescriptor;
use tracing::info;

use crate::api::FarmApi;
use crate::config::{Credentials, FarmConfig};
use crate::connect::{self, LocalBrowser, RemoteBrowser};
use crate::error::Result;
use crate::identity::TestIdentity;
use crate::outcome::{TestStatus, resolve_outcome};
use crate::probe::probe_client_version;
use crate::report::{ReportOutcome, report_outcome};

/// Coordinates per-test browser sessions for one suite run.
///
/// Holds the resolved configuration and, in remote mode, the REST client
/// used for status updates. One manager serves the whole run; every test
/// gets its own [`TestSession`], never a shared one.
pub struct SessionManager {
	config: FarmConfig,
	api: Option<FarmApi>,
}

impl SessionManager {
	/// Builds a manager from an already-resolved configuration.
	pub fn new(config: FarmConfig) -> Result<Self> {
		let api = match &config.credentials {
			Some(credentials) => Some(FarmApi::new(&config.api_url, credentials.clone())?),
			None => None,
		};
		Ok(Self { config, api })
	}

	/// Builds a manager from `FARM_*` environment variables.
	pub fn from_env() -> Result<Self> {
		Self::new(FarmConfig::from_env()?)
	}

	pub fn config(&self) -> &FarmConfig {
		&self.config
	}

	/// REST client, present in remote mode only.
	pub fn api(&self) -> Option<&FarmApi> {
		self.api.as_ref()
	}

	/// `true` when sessions go to the farm rather than a local browser.
	pub fn is_remote(&self) -> bool {
		self.api.is_some()
	}

	/// Opens the browser session for one test.
	///
	/// Remote mode probes the client version, then opens a dedicated farm
	/// session named after the test. Local mode launches a Chromium on a
	/// port derived from the label. Either path failing is fatal: without
	/// a session the test has nothing to run against.
	pub async fn open(&self, identity: &TestIdentity) -> Result<TestSession> {
		let label = identity.label();
		let started_at = Utc::now();

		let browser = match &self.config.credentials {
			Some(credentials) => {
				let client_version = probe_client_version(&self.config.client_probe)?;
				let descriptor = self.capabilities(credentials, &label, &client_version);
				let remote = connect::connect_remote(&descriptor, &self.config.cdp_url).await?;
				info!(target: "farm.session", label, "remote session opened");
				BrowserHandle::Remote(remote)
			}
			None => {
				let port = connect::compute_debug_port(&label);
				let local = connect::launch_local(port).await?;
				info!(target: "farm.session", label, port, "local browser launched");
				BrowserHandle::Local(local)
			}
		};

		Ok(TestSession {
			label,
			started_at,
			browser,
		})
	}

	/// Capability payload for one test: the static run configuration plus
	/// the per-test `name` and the probed client version.
	pub fn capabilities(&self, credentials: &Credentials, label: &str, client_version: &str) -> CapabilityDescriptor {
		CapabilityDescriptor {
			browser: self.config.browser.clone(),
			browser_version: self.config.browser_version.clone(),
			os: self.config.os.clone(),
			os_version: self.config.os_version.clone(),
			build: self.config.build_name.clone(),
			project: self.config.project_name.clone(),
			name: label.to_string(),
			username: credentials.username.clone(),
			access_key: credentials.access_key.clone(),
			console: "info".to_string(),
			network_logs: "true".to_string(),
			debug: "true".to_string(),
			video: "true".to_string(),
			timezone: self.config.timezone.clone(),
			client_version: client_version.to_string(),
		}
	}

	/// Reports the test's outcome, then tears the session down.
	///
	/// Delivery problems come back as [`ReportOutcome::Skipped`], never as
	/// an error; by the time this runs the verdict is already decided and
	/// nothing here may change it.
	pub async fn finish(
		&self,
		session: TestSession,
		actual: TestStatus,
		expected: TestStatus,
		failure: Option<&str>,
	) -> ReportOutcome {
		let outcome = resolve_outcome(actual, expected, failure);
		let report = report_outcome(self.api.as_ref(), &session.label, session.started_at, &outcome).await;
		session.close().await;
		report
	}
}

/// One test's live browser session.
pub struct TestSession {
	label: String,
	started_at: DateTime<Utc>,
	browser: BrowserHandle,
}

enum BrowserHandle {
	Remote(RemoteBrowser),
	Local(LocalBrowser),
}

impl TestSession {
	/// Display name derived from the test's title path.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Wall-clock time recorded just before the session was opened; the
	/// anchor for creation-time correlation.
	pub fn started_at(&self) -> DateTime<Utc> {
		self.started_at
	}

	pub fn is_remote(&self) -> bool {
		matches!(self.browser, BrowserHandle::Remote(_))
	}

	/// Local DevTools WebSocket URL, when running locally.
	pub fn devtools_url(&self) -> Option<&str> {
		match &self.browser {
			BrowserHandle::Local(local) => Some(local.devtools_url()),
			BrowserHandle::Remote(_) => None,
		}
	}

	/// Closes the underlying browser. Best-effort.
	pub async fn close(self) {
		match self.browser {
			BrowserHandle::Remote(remote) => remote.close().await,
			BrowserHandle::Local(local) => local.shutdown(),
		}
	}
}
