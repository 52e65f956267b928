//! Browser connection paths.
//!
//! Remote mode opens a WebSocket to the farm's CDP endpoint with the
//! capability object riding in the `caps` query parameter; the farm creates
//! the automation session the moment the connect lands. Local mode launches
//! a Chromium-family browser with a remote-debugging port and waits for its
//! DevTools endpoint to answer, which involves no farm traffic at all.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use farmhand_protocol::CapabilityDescriptor;
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

use crate::error::{FarmError, Result};

const PROBE_TIMEOUT: Duration = Duration::from_millis(400);
const LAUNCH_ATTEMPTS: usize = 25;
const LAUNCH_POLL: Duration = Duration::from_millis(200);

/// An open WebSocket to the farm's CDP endpoint.
///
/// Held for the duration of one test; closing it ends the remote session.
pub struct RemoteBrowser {
	stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RemoteBrowser {
	/// Closes the WebSocket, ending the remote session. Best-effort.
	pub async fn close(mut self) {
		if let Err(e) = self.stream.close(None).await {
			debug!(target: "farm.session", error = %e, "websocket close failed");
		}
	}
}

/// Opens the remote session described by `descriptor`.
///
/// The endpoint URL embeds the full capability object, credentials
/// included, so it is never logged; only the base is.
pub async fn connect_remote(descriptor: &CapabilityDescriptor, cdp_url: &str) -> Result<RemoteBrowser> {
	let endpoint = descriptor.endpoint(cdp_url)?;
	debug!(target: "farm.session", url = %cdp_url, name = %descriptor.name, "connecting remote session");

	let (stream, response) = connect_async(endpoint.as_str())
		.await
		.map_err(|e| FarmError::Connect(e.to_string()))?;
	debug!(target: "farm.session", status = %response.status(), "remote session connected");

	Ok(RemoteBrowser { stream })
}

/// `/json/version` response subset from the DevTools endpoint.
#[derive(Debug, Deserialize)]
pub struct DevtoolsInfo {
	#[serde(rename = "webSocketDebuggerUrl")]
	pub web_socket_debugger_url: String,
	#[serde(rename = "Browser")]
	pub browser: Option<String>,
}

/// A locally launched browser with remote debugging enabled.
pub struct LocalBrowser {
	child: Child,
	profile_dir: PathBuf,
	ws_url: String,
	port: u16,
}

impl LocalBrowser {
	/// DevTools WebSocket URL for attaching an automation client.
	pub fn devtools_url(&self) -> &str {
		&self.ws_url
	}

	pub fn port(&self) -> u16 {
		self.port
	}

	/// Terminates the browser and removes its throwaway profile.
	/// Best-effort on both counts.
	pub fn shutdown(mut self) {
		if let Err(e) = self.child.kill() {
			debug!(target: "farm.session", error = %e, "browser kill failed");
		}
		let _ = self.child.wait();
		if let Err(e) = std::fs::remove_dir_all(&self.profile_dir) {
			debug!(target: "farm.session", error = %e, "profile cleanup failed");
		}
	}
}

/// Launches a local Chromium-family browser and waits for its DevTools
/// endpoint to answer on `port`.
pub async fn launch_local(port: u16) -> Result<LocalBrowser> {
	let executable = find_chromium_executable()
		.ok_or_else(|| FarmError::Launch("no Chromium-family browser found on this machine".into()))?;

	let profile_dir = std::env::temp_dir().join(format!("farmhand-profile-{port}"));
	std::fs::create_dir_all(&profile_dir)?;

	let mut cmd = Command::new(&executable);
	cmd.args([
		format!("--remote-debugging-port={port}"),
		"--no-first-run".to_string(),
		"--no-default-browser-check".to_string(),
		format!("--user-data-dir={}", profile_dir.display()),
	])
	.stdin(Stdio::null())
	.stdout(Stdio::null())
	.stderr(Stdio::null());

	#[cfg(unix)]
	std::os::unix::process::CommandExt::process_group(&mut cmd, 0);

	let mut child = cmd
		.spawn()
		.map_err(|e| FarmError::Launch(format!("failed to launch {executable}: {e}")))?;
	debug!(target: "farm.session", %executable, port, "local browser launched");

	let mut last_error = "endpoint not reachable".to_string();
	for _ in 0..LAUNCH_ATTEMPTS {
		tokio::time::sleep(LAUNCH_POLL).await;

		if let Ok(Some(status)) = child.try_wait() {
			return Err(FarmError::Launch(format!(
				"{executable} exited before its debugging endpoint became available (status: {status})"
			)));
		}

		match fetch_devtools_info(port).await {
			Ok(info) => {
				debug!(
					target: "farm.session",
					browser = info.browser.as_deref().unwrap_or("unknown"),
					port,
					"devtools endpoint ready"
				);
				return Ok(LocalBrowser {
					child,
					profile_dir,
					ws_url: info.web_socket_debugger_url,
					port,
				});
			}
			Err(e) => {
				last_error = e.to_string();
			}
		}
	}

	let _ = child.kill();
	let _ = child.wait();
	Err(FarmError::Launch(format!(
		"{executable} launched but its debugging endpoint never answered on port {port}: {last_error}"
	)))
}

/// Resolves DevTools metadata from `/json/version` on `port`, trying the
/// loopback addresses in order.
pub async fn fetch_devtools_info(port: u16) -> Result<DevtoolsInfo> {
	let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
	let mut last_error = "no response".to_string();

	for url in [
		format!("http://127.0.0.1:{port}/json/version"),
		format!("http://localhost:{port}/json/version"),
		format!("http://[::1]:{port}/json/version"),
	] {
		let response = match client.get(&url).send().await {
			Ok(r) => r,
			Err(e) => {
				last_error = e.to_string();
				continue;
			}
		};

		if !response.status().is_success() {
			last_error = format!("unexpected status {}", response.status());
			continue;
		}

		let info: DevtoolsInfo = response
			.json()
			.await
			.map_err(|e| FarmError::Launch(format!("unparseable DevTools response: {e}")))?;
		return Ok(info);
	}

	Err(FarmError::Launch(format!("no DevTools endpoint on port {port}: {last_error}")))
}

/// Maps a label to a stable debugging port in 9222-10221 so repeated runs
/// of one test reuse the same port.
pub fn compute_debug_port(seed: &str) -> u16 {
	let mut hasher = DefaultHasher::new();
	seed.hash(&mut hasher);
	9222 + (hasher.finish() % 1000) as u16
}

/// Locates a Chromium-family executable, preferring installed paths and
/// falling back to `PATH` lookups.
pub fn find_chromium_executable() -> Option<String> {
	for candidate in chromium_candidates() {
		if candidate.starts_with('/') || candidate.contains('\\') {
			if Path::new(&candidate).exists() {
				return Some(candidate);
			}
		} else if which::which(&candidate).is_ok() {
			return Some(candidate);
		}
	}
	None
}

fn chromium_candidates() -> Vec<String> {
	if cfg!(target_os = "macos") {
		vec![
			"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
			"/Applications/Chromium.app/Contents/MacOS/Chromium",
			"/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	} else if cfg!(target_os = "windows") {
		let mut candidates = Vec::new();
		for key in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
			if let Ok(root) = std::env::var(key) {
				let root = PathBuf::from(root);
				candidates.push(root.join(r"Google\Chrome\Application\chrome.exe"));
				candidates.push(root.join(r"Microsoft\Edge\Application\msedge.exe"));
				candidates.push(root.join(r"Chromium\Application\chrome.exe"));
			}
		}
		let mut candidates: Vec<String> = candidates
			.into_iter()
			.map(|p| p.to_string_lossy().to_string())
			.collect();
		candidates.extend(["chrome.exe".to_string(), "msedge.exe".to_string(), "chromium.exe".to_string()]);
		candidates
	} else {
		vec![
			"google-chrome-stable",
			"google-chrome",
			"chromium-browser",
			"chromium",
			"/usr/bin/google-chrome-stable",
			"/usr/bin/google-chrome",
			"/usr/bin/chromium-browser",
			"/usr/bin/chromium",
			"/snap/bin/chromium",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_port_is_stable_and_in_range() {
		let a = compute_debug_port("Login › valid credentials");
		let b = compute_debug_port("Login › valid credentials");
		assert_eq!(a, b);
		assert!((9222..=10221).contains(&a));
	}

	#[test]
	fn ports_spread_across_labels() {
		let ports: std::collections::HashSet<u16> =
			(0..20).map(|i| compute_debug_port(&format!("Suite › case {i}"))).collect();
		// collisions are possible pairwise, but not across the board
		assert!(ports.len() > 1);
		assert!(ports.iter().all(|p| (9222..=10221).contains(p)));
	}

	#[test]
	fn candidate_list_is_never_empty() {
		assert!(!chromium_candidates().is_empty());
	}

	#[tokio::test]
	async fn devtools_probe_fails_fast_on_a_dead_port() {
		// nothing listens on this port in the test environment
		let err = fetch_devtools_info(1).await.unwrap_err();
		assert!(matches!(err, FarmError::Launch(_)));
	}
}
