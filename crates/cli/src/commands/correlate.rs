//! Replay start-time correlation against live farm data.
//!
//! Debug aid for the reporter's weak point: when concurrent tests start
//! inside the same window, this shows which session a given start time
//! would claim.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use farmhand::{SessionCache, SessionManager};
use serde_json::json;

use super::require_api;

pub async fn execute(manager: &SessionManager, started_at: &str, json: bool) -> Result<()> {
	let started_at = DateTime::parse_from_rfc3339(started_at)
		.map(|t| t.with_timezone(&Utc))
		.with_context(|| format!("invalid RFC 3339 timestamp `{started_at}`"))?;

	let api = require_api(manager)?;
	let cache = SessionCache::fetch(api).await;
	let matched = cache.match_by_start_time(started_at);

	if json {
		let payload = json!({
			"started_at": started_at.to_rfc3339(),
			"sessions": cache.len(),
			"matched": matched,
		});
		println!("{}", serde_json::to_string_pretty(&payload)?);
		return Ok(());
	}

	// no match is a finding, not a failure
	match matched {
		Some(record) => println!(
			"{} {}  created {}  {}",
			"match:".green().bold(),
			record.id.cyan(),
			record.created_at.format("%Y-%m-%d %H:%M:%S"),
			record.name.as_deref().unwrap_or("-"),
		),
		None => println!("no match among {} sessions", cache.len()),
	}

	Ok(())
}
