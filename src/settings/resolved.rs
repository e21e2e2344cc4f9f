use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use roster_core::ControllerOptions;
use roster_tui::AppOptions;
use thiserror::Error;

/// Upper bound for the debounce window.
const MAX_DEBOUNCE: Duration = Duration::from_secs(10);

/// Where a configuration value came from, for error messages.
#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(String),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct SettingsError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl SettingsError {
	pub(crate) fn invalid(
		key: &'static str,
		value: impl Into<String>,
		origin: SettingSource,
		reason: impl Into<String>,
	) -> Self {
		Self {
			key,
			value: value.into(),
			origin,
			reason: reason.into(),
		}
	}
}

/// Application-ready configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub data_path: PathBuf,
	pub debounce: Duration,
	pub initial_query: String,
	pub header_height: u16,
	pub no_results_message: String,
	pub log_file: PathBuf,
	pub log_filter: String,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, debounce_origin: SettingSource) -> Result<(), SettingsError> {
		if self.debounce.is_zero() {
			return Err(SettingsError::invalid(
				"search.debounce_ms",
				"0",
				debounce_origin,
				"must be greater than zero",
			));
		}
		if self.debounce > MAX_DEBOUNCE {
			return Err(SettingsError::invalid(
				"search.debounce_ms",
				self.debounce.as_millis().to_string(),
				debounce_origin,
				format!("must be at most {}", MAX_DEBOUNCE.as_millis()),
			));
		}
		Ok(())
	}

	/// Options for the terminal widget.
	pub fn app_options(&self) -> AppOptions {
		AppOptions {
			controller: ControllerOptions {
				debounce: self.debounce,
				no_results_message: self.no_results_message.clone(),
			},
			initial_query: self.initial_query.clone(),
			header_height: self.header_height,
			..AppOptions::default()
		}
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Dataset: {}", self.data_path.display());
		println!("  Debounce: {} ms", self.debounce.as_millis());
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
		println!("  Header height: {}", self.header_height);
		println!("  No results message: {}", self.no_results_message);
		println!("  Log file: {}", self.log_file.display());
		println!("  Log filter: {}", self.log_filter);
	}
}
