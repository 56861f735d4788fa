//! Drives one invocation: detect the source kind, run a pipeline, persist.

use std::path::Path;

use dtsym_core::{Document, PhandleRegistry, SourceKind, learn_into, replace_document};
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::AppError;

pub fn run(cli: &Cli) -> Result<(), AppError> {
	if !cli.dts.is_file() {
		return Err(AppError::InputNotFound(cli.dts.clone()));
	}

	let config = Config::load(cli)?;
	info!(registry = %config.registry.display(), policy = ?config.duplicate_policy, "resolved config");

	let source = read(&cli.dts)?;
	let doc = Document::parse(&source);

	match SourceKind::detect(&doc) {
		SourceKind::Kernel => learn(&doc, &config)?,
		SourceKind::Decompiled => {
			let output = config.output_path(&cli.dts, cli.output.as_deref());
			replace(&doc, &config, &output)?;
		}
	}

	println!("Done!");
	Ok(())
}

fn learn(doc: &Document<'_>, config: &Config) -> Result<(), AppError> {
	println!("DTS from kernel source detected, exporting phandle variables...");

	let mut registry = PhandleRegistry::load_or_default(&config.registry)?;
	let report = learn_into(&mut registry, doc);
	registry.save(&config.registry)?;

	println!(
		"Added {} phandle entries to '{}', for a total of {}",
		report.added,
		config.registry.display(),
		report.total
	);
	Ok(())
}

fn replace(doc: &Document<'_>, config: &Config, output: &Path) -> Result<(), AppError> {
	println!("DTS from compiled DTB detected, replacing phandles and saving to '{}'...", output.display());

	let registry = PhandleRegistry::load(&config.registry)?;
	let report = replace_document(doc, &registry, config.duplicate_policy)?;

	println!("Registered {} symbols", report.symbols);
	println!("Registered the path of {} phandles", report.phandles);
	for warning in &report.warnings {
		println!("Warning: {warning}");
	}

	std::fs::write(output, &report.text).map_err(|error| AppError::Io {
		path: output.to_path_buf(),
		error,
	})?;
	registry.save(&config.registry)?;

	println!("{} phandle references replaced with their symbol", report.replaced);
	Ok(())
}

fn read(path: &Path) -> Result<String, AppError> {
	std::fs::read_to_string(path).map_err(|error| AppError::Io {
		path: path.to_path_buf(),
		error,
	})
}
