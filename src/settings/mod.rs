//! Configuration loading and resolution.
//!
//! `load` layers config files, environment variables and CLI flags and returns
//! a validated [`ResolvedConfig`].

mod raw;
mod resolved;
mod sources;

use anyhow::{Result, anyhow};

use resolved::ResolvedConfig;

use crate::cli::CliArgs;
use raw::RawConfig;
use sources::build_config;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::time::Duration;

	use clap::Parser;
	use tempfile::TempDir;

	use super::*;

	fn write_config(dir: &TempDir, contents: &str) -> String {
		let path = dir.path().join("roster.toml");
		fs::write(&path, contents).expect("write config");
		path.display().to_string()
	}

	#[test]
	fn config_file_values_are_resolved() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(
			&dir,
			r#"
[search]
debounce_ms = 120
initial_query = "Ann"

[data]
path = "people.json"

[ui]
no_results_message = "Nobody here"

[logging]
filter = "roster=debug"
file = "roster-test.log"
"#,
		);
		let cli = CliArgs::parse_from(["roster", "--no-config", "--config", &path]);
		let config = load(&cli).expect("load");

		assert_eq!(config.debounce, Duration::from_millis(120));
		assert_eq!(config.initial_query, "Ann");
		assert!(config.data_path.ends_with("people.json"));
		assert_eq!(config.no_results_message, "Nobody here");
		assert_eq!(config.header_height, 1);
		assert_eq!(config.log_filter, "roster=debug");
		assert!(config.log_file.ends_with("roster-test.log"));
	}

	#[test]
	fn cli_flags_override_config_files() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, "[search]\ndebounce_ms = 120\n[data]\npath = \"a.json\"\n");
		let cli = CliArgs::parse_from([
			"roster",
			"--no-config",
			"--config",
			&path,
			"--debounce-ms",
			"40",
			"--data",
			"b.json",
			"-q",
			"Bob",
		]);
		let config = load(&cli).expect("load");

		assert_eq!(config.debounce, Duration::from_millis(40));
		assert!(config.data_path.ends_with("b.json"));
		assert_eq!(config.initial_query, "Bob");
	}

	#[test]
	fn defaults_apply_when_nothing_is_configured() {
		let cli = CliArgs::parse_from(["roster", "--no-config", "--data", "users.json"]);
		let config = load(&cli).expect("load");

		assert_eq!(config.debounce, roster_core::DEFAULT_DEBOUNCE);
		assert_eq!(config.no_results_message, roster_core::DEFAULT_NO_RESULTS_MESSAGE);
		assert_eq!(config.initial_query, "");
		assert_eq!(config.log_filter, "info");
	}

	#[test]
	fn zero_debounce_from_file_names_the_key() {
		let dir = TempDir::new().expect("tempdir");
		let path = write_config(&dir, "[search]\ndebounce_ms = 0\n[data]\npath = \"a.json\"\n");
		let cli = CliArgs::parse_from(["roster", "--no-config", "--config", &path]);
		let message = load(&cli).unwrap_err().to_string();

		assert!(message.contains("search.debounce_ms"), "{message}");
		assert!(message.contains("configuration key"), "{message}");
		assert!(message.contains("value: 0"), "{message}");
	}

	#[test]
	fn oversized_debounce_from_cli_names_the_flag() {
		let cli = CliArgs::parse_from([
			"roster",
			"--no-config",
			"--data",
			"a.json",
			"--debounce-ms",
			"60000",
		]);
		let message = load(&cli).unwrap_err().to_string();

		assert!(message.contains("CLI flag `--debounce-ms`"), "{message}");
	}

	#[test]
	fn missing_dataset_is_reported() {
		let cli = CliArgs::parse_from(["roster", "--no-config"]);
		if cli.data.is_some() {
			// ROSTER_DATA is set in this environment.
			return;
		}
		let message = load(&cli).unwrap_err().to_string();
		assert!(message.contains("--data"), "{message}");
	}

	#[test]
	fn missing_explicit_config_file_fails() {
		let dir = TempDir::new().expect("tempdir");
		let missing = dir.path().join("absent.toml").display().to_string();
		let cli = CliArgs::parse_from(["roster", "--no-config", "--config", &missing]);
		assert!(load(&cli).is_err());
	}
}
