//! File-backed `tracing` subscriber. The terminal is owned by the widget, so
//! log lines never go to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured directives.
fn build_filter(directives: &str) -> Result<EnvFilter> {
	match EnvFilter::try_from_default_env() {
		Ok(filter) => Ok(filter),
		Err(_) => EnvFilter::try_new(directives)
			.with_context(|| format!("invalid log filter `{directives}`")),
	}
}

/// Install the global subscriber, appending to `path`.
pub fn init(path: &Path, directives: &str) -> Result<()> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	tracing_subscriber::fmt()
		.with_env_filter(build_filter(directives)?)
		.with_ansi(false)
		.with_writer(Mutex::new(file))
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn configured_directives_are_accepted() {
		assert!(build_filter("roster=debug,roster_core=trace").is_ok());
	}
}
