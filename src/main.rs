mod app_dirs;
mod cli;
mod dataset;
mod logging;
mod settings;

use anyhow::{Context, Result};
use cli::parse_cli;
use tracing::info;

fn main() -> Result<()> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	logging::init(&resolved.log_file, &resolved.log_filter)?;

	let records = dataset::load(&resolved.data_path)
		.with_context(|| format!("failed to load records for {}", resolved.data_path.display()))?;
	info!(
		records = records.len(),
		path = %resolved.data_path.display(),
		"dataset loaded"
	);

	roster_tui::run(records, resolved.app_options())
}
