use clap::Parser;

use super::*;

#[test]
fn parse_check_command() {
	let cli = Cli::try_parse_from(["farmhand", "check"]).unwrap();
	assert!(matches!(cli.command, Commands::Check));
	assert_eq!(cli.verbose, 0);
	assert!(!cli.json);
}

#[test]
fn parse_sessions_list() {
	let cli = Cli::try_parse_from(["farmhand", "sessions", "list"]).unwrap();
	match cli.command {
		Commands::Sessions(args) => assert!(matches!(args.action, SessionsAction::List)),
		_ => panic!("Expected Sessions command"),
	}
}

#[test]
fn parse_sessions_update_with_flags() {
	let args = vec![
		"farmhand",
		"sessions",
		"update",
		"abc123",
		"--status",
		"failed",
		"--reason",
		"Test timedOut",
	];
	let cli = Cli::try_parse_from(args).unwrap();

	match cli.command {
		Commands::Sessions(SessionsArgs {
			action: SessionsAction::Update { id, status, reason, name },
		}) => {
			assert_eq!(id, "abc123");
			assert_eq!(status, SessionStatus::Failed);
			assert_eq!(reason, "Test timedOut");
			assert_eq!(name, None);
		}
		_ => panic!("Expected Sessions Update command"),
	}
}

#[test]
fn update_reason_defaults_to_empty() {
	let args = vec!["farmhand", "sessions", "update", "abc123", "--status", "passed"];
	let cli = Cli::try_parse_from(args).unwrap();

	match cli.command {
		Commands::Sessions(SessionsArgs {
			action: SessionsAction::Update { status, reason, .. },
		}) => {
			assert_eq!(status, SessionStatus::Passed);
			assert_eq!(reason, "");
		}
		_ => panic!("Expected Sessions Update command"),
	}
}

#[test]
fn update_rejects_unknown_status() {
	let args = vec!["farmhand", "sessions", "update", "abc123", "--status", "flaky"];
	assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn update_requires_status() {
	let args = vec!["farmhand", "sessions", "update", "abc123"];
	assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn parse_correlate_started_at() {
	let args = vec!["farmhand", "correlate", "--started-at", "2026-01-05T14:30:00Z"];
	let cli = Cli::try_parse_from(args).unwrap();

	match cli.command {
		Commands::Correlate(args) => assert_eq!(args.started_at, "2026-01-05T14:30:00Z"),
		_ => panic!("Expected Correlate command"),
	}
}

#[test]
fn verbose_flag_short_and_long() {
	let short_cli = Cli::try_parse_from(["farmhand", "-v", "check"]).unwrap();
	assert_eq!(short_cli.verbose, 1);

	let long_cli = Cli::try_parse_from(["farmhand", "--verbose", "check"]).unwrap();
	assert_eq!(long_cli.verbose, 1);

	let double_cli = Cli::try_parse_from(["farmhand", "-vv", "check"]).unwrap();
	assert_eq!(double_cli.verbose, 2);
}

#[test]
fn json_flag_is_global() {
	let cli = Cli::try_parse_from(["farmhand", "sessions", "list", "--json"]).unwrap();
	assert!(cli.json);
}

#[test]
fn invalid_command_fails() {
	assert!(Cli::try_parse_from(["farmhand", "unknown-command"]).is_err());
}
