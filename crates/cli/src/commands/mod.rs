//! Command implementations for the farmhand binary.

mod check;
mod correlate;
mod sessions;

use anyhow::{Context, Result};
use farmhand::{FarmApi, SessionManager};

use crate::cli::{Cli, Commands, SessionsAction};

pub async fn dispatch(cli: Cli) -> Result<()> {
	// Resolve configuration once; a malformed environment fails every command
	let manager = SessionManager::from_env().context("reading FARM_* configuration")?;

	match cli.command {
		Commands::Check => check::execute(&manager, cli.json),
		Commands::Sessions(args) => match args.action {
			SessionsAction::List => sessions::list(&manager, cli.json).await,
			SessionsAction::Update { id, status, reason, name } => {
				sessions::update(&manager, &id, status, reason, name).await
			}
		},
		Commands::Correlate(args) => correlate::execute(&manager, &args.started_at, cli.json).await,
	}
}

/// Commands that talk to the farm refuse to run in local mode.
fn require_api(manager: &SessionManager) -> Result<&FarmApi> {
	manager
		.api()
		.context("farm credentials are not configured (set FARM_USERNAME and FARM_ACCESS_KEY)")
}
