//! Configuration and routing check. Never calls the farm.

use anyhow::Result;
use colored::Colorize;
use farmhand::SessionManager;
use serde_json::json;

pub fn execute(manager: &SessionManager, json: bool) -> Result<()> {
	let config = manager.config();
	let mode = if manager.is_remote() { "remote" } else { "local" };

	if json {
		let payload = json!({
			"mode": mode,
			"build": config.build_name,
			"project": config.project_name,
			"platform": format!("{} {}", config.os, config.os_version),
			"browser": format!("{} {}", config.browser, config.browser_version),
			"workers": config.workers,
			"timezone": config.timezone,
			"api_url": config.api_url,
			"cdp_url": config.cdp_url,
		});
		println!("{}", serde_json::to_string_pretty(&payload)?);
		return Ok(());
	}

	let mode_label = if manager.is_remote() {
		"remote".green().bold()
	} else {
		"local".yellow().bold()
	};
	println!("Mode:      {mode_label}");
	println!("Build:     {}", config.build_name.cyan());
	println!("Project:   {}", config.project_name);
	println!("Platform:  {} {}", config.os, config.os_version);
	println!("Browser:   {} {}", config.browser, config.browser_version);
	println!("Workers:   {}", config.workers);
	println!("Timezone:  {}", config.timezone);
	if manager.is_remote() {
		println!("API:       {}", config.api_url.dimmed());
		println!("CDP:       {}", config.cdp_url.dimmed());
	}

	Ok(())
}
