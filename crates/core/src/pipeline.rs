//! Run-level replacement: symbols, phandle paths and cell rewriting in one pass.
//!
//! Reading and writing files stays with the caller; this only transforms text
//! and registry values.

use crate::document::Document;
use crate::error::{Result, Warning};
use crate::locator::{DuplicatePolicy, PhandleLocator};
use crate::registry::PhandleRegistry;
use crate::replace::replace;
use crate::symbols::SymbolTable;

/// Summary of a replacement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceReport {
	/// The rewritten source.
	pub text: String,
	/// Number of cells rewritten.
	pub replaced: usize,
	/// Entries read from `__symbols__`.
	pub symbols: usize,
	/// Nodes with a resolvable phandle.
	pub phandles: usize,
	/// Every non-fatal problem, in discovery order.
	pub warnings: Vec<Warning>,
}

/// Resolves registered phandle cells of a decompiled dump.
///
/// # Errors
///
/// [`DtsError::SymbolsNotFound`](crate::DtsError::SymbolsNotFound) if the dump
/// has no `__symbols__` node, and
/// [`DtsError::DuplicatePhandle`](crate::DtsError::DuplicatePhandle) under
/// [`DuplicatePolicy::Fail`].
pub fn replace_document(doc: &Document<'_>, registry: &PhandleRegistry, policy: DuplicatePolicy) -> Result<ReplaceReport> {
	let symbols = SymbolTable::read(doc)?;
	let locator = PhandleLocator::locate(doc, policy)?;

	let mut warnings = Vec::new();
	warnings.extend_from_slice(symbols.warnings());
	warnings.extend_from_slice(locator.warnings());
	if symbols.len() != locator.len() {
		warnings.push(Warning::CountMismatch {
			symbols: symbols.len(),
			phandles: locator.len(),
		});
	}

	let outcome = replace(doc, registry, &locator, &symbols);
	warnings.extend(outcome.warnings);

	Ok(ReplaceReport {
		text: outcome.text,
		replaced: outcome.replaced,
		symbols: symbols.len(),
		phandles: locator.len(),
		warnings,
	})
}
