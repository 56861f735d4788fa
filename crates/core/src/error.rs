//! Error and warning types shared by every pipeline stage.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::path::NodePath;

/// Conditions that abort a run.
#[derive(Debug, Error)]
pub enum DtsError {
	/// The source has no `__symbols__` node, so labels cannot be recovered.
	#[error("Error: Couldn't find symbols")]
	SymbolsNotFound,

	/// Replacement needs a registry that was never learned.
	#[error("Couldn't find '{}'", path.display())]
	RegistryMissing {
		/// Where the registry was expected.
		path: PathBuf,
	},

	/// Reading or writing a file failed.
	#[error("I/O error on {}: {error}", path.display())]
	Io {
		/// File the operation targeted.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Two nodes declare the same phandle value under [`DuplicatePolicy::Fail`](crate::DuplicatePolicy::Fail).
	#[error("phandle {value:#x} is declared by both '{first}' and '{second}'")]
	DuplicatePhandle {
		/// The repeated phandle value.
		value: u32,
		/// Path of the first declaring node.
		first: NodePath,
		/// Path of the conflicting node.
		second: NodePath,
	},
}

/// Result type for fallible pipeline operations.
pub type Result<T> = std::result::Result<T, DtsError>;

/// Non-fatal problem found while processing a source.
///
/// Warnings never stop a pipeline; the offending unit is skipped and
/// reported so the caller can display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
	/// A line inside `__symbols__` is not of the form `label = "path";`.
	UnparsableSymbol {
		/// Zero-based line index.
		line: usize,
		/// The offending line, trimmed.
		text: String,
	},
	/// A registered cell holds a value no node declares as its phandle.
	UnresolvedPhandle {
		/// Zero-based line index of the cell.
		line: usize,
		/// Property the cell belongs to.
		property: String,
		/// Literal cell text.
		value: String,
	},
	/// A phandle resolved to a node that has no label in `__symbols__`.
	UnlabeledPath {
		/// Zero-based line index of the cell.
		line: usize,
		/// Path the phandle resolved to.
		path: NodePath,
	},
	/// A registered cell is neither an integer nor a reference.
	NonNumericCell {
		/// Zero-based line index of the cell.
		line: usize,
		/// Property the cell belongs to.
		property: String,
		/// Literal cell text.
		value: String,
	},
	/// Two nodes declare the same phandle value; the value is left unresolved.
	DuplicatePhandle {
		/// The repeated phandle value.
		value: u32,
		/// Path of the first declaring node.
		first: NodePath,
		/// Path of the conflicting node.
		second: NodePath,
	},
	/// Symbol and phandle counts differ.
	CountMismatch {
		/// Entries in the `__symbols__` table.
		symbols: usize,
		/// Nodes declaring a phandle.
		phandles: usize,
	},
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Warning::UnparsableSymbol { line, text } => {
				write!(f, "Couldn't parse symbol {text:?} (line {})", line + 1)
			}
			Warning::UnresolvedPhandle { line, property, value } => {
				write!(f, "No node declares phandle {value} referenced by '{property}' (line {})", line + 1)
			}
			Warning::UnlabeledPath { line, path } => {
				write!(f, "Node '{path}' has no symbol, leaving reference as is (line {})", line + 1)
			}
			Warning::NonNumericCell { line, property, value } => {
				write!(f, "Cell {value:?} of '{property}' is not a phandle value (line {})", line + 1)
			}
			Warning::DuplicatePhandle { value, first, second } => {
				write!(f, "Phandle {value:#x} is declared by both '{first}' and '{second}', leaving it unresolved")
			}
			Warning::CountMismatch { symbols, phandles } => write!(
				f,
				"Amount of symbols ({symbols}) doesn't match amount of phandle paths ({phandles}), something may have gone wrong"
			),
		}
	}
}
