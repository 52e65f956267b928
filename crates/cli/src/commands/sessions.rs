//! Session listing and manual status updates.

use anyhow::{Context, Result};
use colored::Colorize;
use farmhand::{REASON_LIMIT, SessionManager};
use farmhand_protocol::{SessionStatus, StatusUpdate};

use super::require_api;

pub async fn list(manager: &SessionManager, json: bool) -> Result<()> {
	let api = require_api(manager)?;
	let sessions = api.list_sessions().await;

	if json {
		println!("{}", serde_json::to_string_pretty(&sessions)?);
		return Ok(());
	}

	if sessions.is_empty() {
		println!("no sessions");
		return Ok(());
	}
	for session in &sessions {
		let status = match session.status.as_deref() {
			Some(s @ "passed") => s.green(),
			Some(s @ ("failed" | "error")) => s.red(),
			Some(s) => s.normal(),
			None => "-".dimmed(),
		};
		println!(
			"{}  {}  {}  {}",
			session.id.cyan(),
			session.created_at.format("%Y-%m-%d %H:%M:%S"),
			status,
			session.name.as_deref().unwrap_or("-"),
		);
	}

	Ok(())
}

pub async fn update(
	manager: &SessionManager,
	id: &str,
	status: SessionStatus,
	reason: String,
	name: Option<String>,
) -> Result<()> {
	let api = require_api(manager)?;
	let reason: String = reason.chars().take(REASON_LIMIT).collect();
	let update = StatusUpdate { name, status, reason };

	api.update_session(id, &update)
		.await
		.with_context(|| format!("updating session {id}"))?;
	println!("{} session {} marked {}", "✓".green(), id.cyan(), update.status);

	Ok(())
}
