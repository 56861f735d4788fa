//! Process-level errors and exit codes.

use std::path::PathBuf;
use std::process::ExitCode;

use dtsym_core::DtsError;
use thiserror::Error;

/// Documented process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
	Success = 0,
	Usage = 1,
	InputNotFound = 2,
	RegistryMissing = 3,
	SymbolsNotFound = 4,
	Failure = 5,
}

impl From<Exit> for ExitCode {
	fn from(exit: Exit) -> Self {
		ExitCode::from(exit as u8)
	}
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum AppError {
	/// The DTS argument does not name a file.
	#[error("File not found: '{}'", .0.display())]
	InputNotFound(PathBuf),

	/// A pipeline stage failed.
	#[error(transparent)]
	Dts(#[from] DtsError),

	/// Reading the input or writing the output failed.
	#[error("I/O error on {}: {error}", path.display())]
	Io {
		/// File the operation targeted.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// `dtsym.toml` could not be parsed.
	#[error("invalid config file {}: {error}", path.display())]
	Config {
		/// Path of the config file.
		path: PathBuf,
		/// The TOML parse error.
		error: toml::de::Error,
	},
}

impl AppError {
	pub fn exit(&self) -> Exit {
		match self {
			AppError::InputNotFound(_) => Exit::InputNotFound,
			AppError::Dts(DtsError::RegistryMissing { .. }) => Exit::RegistryMissing,
			AppError::Dts(DtsError::SymbolsNotFound) => Exit::SymbolsNotFound,
			AppError::Dts(_) | AppError::Io { .. } | AppError::Config { .. } => Exit::Failure,
		}
	}

	/// Remediation hint printed after the error, if any.
	pub fn tip(&self) -> Option<&'static str> {
		match self {
			AppError::Dts(DtsError::RegistryMissing { .. }) => {
				Some("You need to first run dtsym passing it one or more DTS files from the kernel source code")
			}
			AppError::Dts(DtsError::SymbolsNotFound) => Some("Decompile the DTB with `dtc -@` so the __symbols__ node is emitted"),
			_ => None,
		}
	}
}
