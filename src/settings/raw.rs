use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::resolved::{ResolvedConfig, SettingSource};
use super::sources::env_var_for;
use crate::app_dirs;
use crate::cli::CliArgs;

const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "roster.log";

/// Configuration as read from files and the environment, before CLI overrides
/// and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	data: DataSection,
	ui: UiSection,
	logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	debounce_ms: Option<u64>,
	initial_query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DataSection {
	path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	header_height: Option<u16>,
	no_results_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
	file: Option<PathBuf>,
	filter: Option<String>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(path) = cli.data.clone() {
			self.data.path = Some(path);
		}
		if let Some(value) = cli.debounce_ms {
			self.search.debounce_ms = Some(value);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.search.initial_query = Some(query);
		}
		if let Some(file) = cli.log_file.clone() {
			self.logging.file = Some(file);
		}
	}

	/// Fill defaults and validate, producing a [`ResolvedConfig`].
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let Some(data_path) = self.data.path else {
			bail!("no dataset configured; pass --data <FILE> or set data.path");
		};

		let log_file = match self.logging.file {
			Some(file) => file,
			None => app_dirs::get_data_dir()
				.context("failed to resolve the data directory for the log file")?
				.join(LOG_FILE_NAME),
		};

		let config = ResolvedConfig {
			data_path,
			debounce: self
				.search
				.debounce_ms
				.map_or(roster_core::DEFAULT_DEBOUNCE, Duration::from_millis),
			initial_query: self.search.initial_query.unwrap_or_default(),
			header_height: self.ui.header_height.unwrap_or(1),
			no_results_message: self
				.ui
				.no_results_message
				.unwrap_or_else(|| roster_core::DEFAULT_NO_RESULTS_MESSAGE.to_string()),
			log_file,
			log_filter: self
				.logging
				.filter
				.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
		};

		config.validate(debounce_source(cli))?;
		Ok(config)
	}
}

/// Where the effective `search.debounce_ms` came from.
fn debounce_source(cli: &CliArgs) -> SettingSource {
	const KEY: &str = "search.debounce_ms";
	if cli.debounce_ms.is_some() {
		return SettingSource::CliFlag("--debounce-ms");
	}
	let var = env_var_for(KEY);
	if std::env::var_os(&var).is_some() {
		return SettingSource::Environment(var);
	}
	SettingSource::ConfigKey(KEY)
}
