#[cfg(test)]
mod tests;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Args, Parser, Subcommand};
use farmhand_protocol::SessionStatus;

/// Root CLI for the farmhand binary.
#[derive(Parser, Debug)]
#[command(name = "farmhand")]
#[command(about = "Session coordination for cloud browser farm test runs")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Print machine-readable JSON instead of text
	#[arg(long, global = true)]
	pub json: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show the resolved execution mode and capability summary.
	Check,
	/// Inspect or update sessions on the farm.
	Sessions(SessionsArgs),
	/// Match a test start time against recent sessions.
	Correlate(CorrelateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SessionsArgs {
	#[command(subcommand)]
	pub action: SessionsAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SessionsAction {
	/// List recent sessions in the order the farm returns them.
	List,
	/// Push a status update for one session.
	Update {
		#[arg(value_name = "SESSION_ID")]
		id: String,

		/// Final status: passed or failed.
		#[arg(long, value_parser = parse_status)]
		status: SessionStatus,

		/// Reason attached to the status.
		#[arg(long, value_name = "TEXT", default_value = "")]
		reason: String,

		/// Rename the session while updating it.
		#[arg(long, value_name = "NAME")]
		name: Option<String>,
	},
}

#[derive(Args, Debug, Clone)]
pub struct CorrelateArgs {
	/// Test start time, RFC 3339 (for example 2026-01-05T14:30:00Z).
	#[arg(long, value_name = "TIMESTAMP")]
	pub started_at: String,
}

fn parse_status(raw: &str) -> Result<SessionStatus, String> {
	match raw {
		"passed" => Ok(SessionStatus::Passed),
		"failed" => Ok(SessionStatus::Failed),
		other => Err(format!("unknown status `{other}`, expected passed or failed")),
	}
}

/// Clap styling matched to cargo's help colors.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
		.valid(AnsiColor::Cyan.on_default())
}
