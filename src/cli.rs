use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};

use crate::app_dirs;

/// Version banner including the config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("roster {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "roster",
	version,
	long_version = long_version(),
	about = "Incremental search over a list of user records",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `roster` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long,
		value_name = "FILE",
		env = "ROSTER_DATA",
		help = "JSON file holding the records to search (default: data.path from config)"
	)]
	pub(crate) data: Option<PathBuf>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Quiet period before a search runs (default: 250)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Provide an initial search query (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long = "log-file",
		value_name = "FILE",
		help = "Write logs to this file (default: roster.log in the data directory)"
	)]
	pub(crate) log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn command_is_well_formed() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn repeated_config_flags_accumulate() {
		let cli = CliArgs::parse_from([
			"roster",
			"--config",
			"a.toml",
			"-c",
			"b.toml",
			"--debounce-ms",
			"100",
		]);
		assert_eq!(cli.config, [PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
		assert_eq!(cli.debounce_ms, Some(100));
		assert!(!cli.no_config);
	}
}
