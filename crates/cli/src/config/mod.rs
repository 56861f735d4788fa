//! Run configuration.
//!
//! Resolved in layers, later wins: built-in defaults, `dtsym.toml` in the
//! working directory, the `DTSYM_REGISTRY` environment variable, then
//! command-line flags.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dtsym_core::{DuplicatePolicy, REGISTRY_FILE};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::AppError;


/// Optional config file, relative to the working directory.
pub const CONFIG_FILE: &str = "dtsym.toml";

/// Environment variable overriding the registry path.
pub const REGISTRY_ENV: &str = "DTSYM_REGISTRY";

/// Suffix appended to the input path for the rewritten dump.
pub const OUTPUT_SUFFIX: &str = "_cleaned";

/// Contents of `dtsym.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
	pub registry: Option<PathBuf>,
	pub output_suffix: Option<String>,
	pub strict_phandles: Option<bool>,
}

impl FileConfig {
	pub fn parse(input: &str, path: &Path) -> Result<Self, AppError> {
		toml::from_str(input).map_err(|error| AppError::Config {
			path: path.to_path_buf(),
			error,
		})
	}

	/// Reads `path`, treating a missing file as empty.
	pub fn load(path: &Path) -> Result<Self, AppError> {
		match std::fs::read_to_string(path) {
			Ok(input) => Self::parse(&input, path),
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
			Err(error) => Err(AppError::Io {
				path: path.to_path_buf(),
				error,
			}),
		}
	}
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub registry: PathBuf,
	pub output_suffix: String,
	pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			registry: PathBuf::from(REGISTRY_FILE),
			output_suffix: OUTPUT_SUFFIX.to_string(),
			duplicate_policy: DuplicatePolicy::Warn,
		}
	}
}

impl Config {
	/// Resolves every layer against the process environment.
	pub fn load(cli: &Cli) -> Result<Self, AppError> {
		let file = FileConfig::load(Path::new(CONFIG_FILE))?;
		Ok(Self::layered(file, std::env::var_os(REGISTRY_ENV), cli))
	}

	pub fn layered(file: FileConfig, env_registry: Option<OsString>, cli: &Cli) -> Self {
		let mut config = Self::default();

		if let Some(registry) = file.registry {
			config.registry = registry;
		}
		if let Some(suffix) = file.output_suffix {
			config.output_suffix = suffix;
		}
		if file.strict_phandles == Some(true) {
			config.duplicate_policy = DuplicatePolicy::Fail;
		}

		if let Some(registry) = env_registry.filter(|value| !value.is_empty()) {
			config.registry = PathBuf::from(registry);
		}

		if let Some(registry) = &cli.registry {
			config.registry = registry.clone();
		}
		if cli.strict {
			config.duplicate_policy = DuplicatePolicy::Fail;
		}

		config
	}

	/// Destination of the rewritten dump: `explicit`, or `<input><suffix>`.
	pub fn output_path(&self, input: &Path, explicit: Option<&Path>) -> PathBuf {
		if let Some(path) = explicit {
			return path.to_path_buf();
		}
		let mut name = input.as_os_str().to_owned();
		name.push(&self.output_suffix);
		PathBuf::from(name)
	}
}
