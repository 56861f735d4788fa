//! `dtsym` binary.
//!
//! Learns phandle-bearing cells from kernel-tree DTS files and rewrites
//! decompiled DTB dumps with the recovered labels.

mod app;
mod cli;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use error::Exit;

/// Environment variable holding an `EnvFilter` directive.
const LOG_ENV: &str = "DTSYM_LOG";

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => {
			// Help and version requests are not usage errors.
			let exit = if err.use_stderr() { Exit::Usage } else { Exit::Success };
			let _ = err.print();
			return exit.into();
		}
	};

	setup_tracing(cli.verbose);

	match app::run(&cli) {
		Ok(()) => Exit::Success.into(),
		Err(error) => {
			tracing::debug!(?error, "run failed");
			println!("{error}");
			if let Some(tip) = error.tip() {
				println!("Tip: {tip}");
			}
			error.exit().into()
		}
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("dtsym_core=trace,dtsym_cli=debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
