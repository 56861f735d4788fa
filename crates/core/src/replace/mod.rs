//! Rewriting of registered phandle cells into `&label` references.
//!
//! Only the bytes of a replaced cell change. Line terminators, spacing,
//! comments and every unregistered cell are copied through untouched, so the
//! output always has the same number of lines as the input.

use std::ops::Range;

use crate::document::Document;
use crate::error::Warning;
use crate::locator::{PhandleLocator, is_definition, parse_cell_value};
use crate::registry::PhandleRegistry;
use crate::scanner::PropertyAssignment;
use crate::symbols::SymbolTable;


/// Result of rewriting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
	/// The rewritten source.
	pub text: String,
	/// Number of cells rewritten.
	pub replaced: usize,
	/// Cells that were left alone and why.
	pub warnings: Vec<Warning>,
}

struct Edit {
	line: usize,
	span: Range<usize>,
	replacement: String,
}

/// Rewrites every registered cell of `doc` whose value resolves to a label.
///
/// A node's own `phandle = <N>;` is a definition, not a reference, and is
/// never rewritten.
pub fn replace(doc: &Document<'_>, registry: &PhandleRegistry, locator: &PhandleLocator, symbols: &SymbolTable) -> ReplaceOutcome {
	let mut edits = Vec::new();
	let mut warnings = Vec::new();

	for assignment in doc.assignments() {
		if is_definition(&assignment) {
			continue;
		}
		if let Some(cells) = registry.cells(&assignment.name) {
			resolve_cells(&assignment, cells.iter().copied(), locator, symbols, &mut edits, &mut warnings);
		}
	}

	let replaced = edits.len();
	tracing::debug!(replaced, warnings = warnings.len(), "resolved phandle cells");

	ReplaceOutcome {
		text: apply(doc, edits),
		replaced,
		warnings,
	}
}

fn resolve_cells(
	assignment: &PropertyAssignment,
	indices: impl Iterator<Item = usize>,
	locator: &PhandleLocator,
	symbols: &SymbolTable,
	edits: &mut Vec<Edit>,
	warnings: &mut Vec<Warning>,
) {
	let cells = assignment.flatten();

	for index in indices {
		let Some(cell) = cells.get(index) else {
			continue;
		};
		if cell.is_reference() {
			continue;
		}

		let Some(value) = parse_cell_value(&cell.text) else {
			warnings.push(Warning::NonNumericCell {
				line: cell.line,
				property: assignment.name.clone(),
				value: cell.text.clone(),
			});
			continue;
		};

		let Some(path) = locator.path(value) else {
			warnings.push(Warning::UnresolvedPhandle {
				line: cell.line,
				property: assignment.name.clone(),
				value: cell.text.clone(),
			});
			continue;
		};

		let Some(label) = symbols.label(path) else {
			warnings.push(Warning::UnlabeledPath {
				line: cell.line,
				path: path.clone(),
			});
			continue;
		};

		tracing::trace!(property = %assignment.name, index, from = %cell.text, to = label, "rewrite cell");
		edits.push(Edit {
			line: cell.line,
			span: cell.span.clone(),
			replacement: format!("&{label}"),
		});
	}
}

/// Reassembles the document with `edits` spliced into their lines.
fn apply(doc: &Document<'_>, mut edits: Vec<Edit>) -> String {
	edits.sort_by(|a, b| (a.line, a.span.start).cmp(&(b.line, b.span.start)));

	let mut out = String::with_capacity(doc.source().len());
	let mut pending = edits.into_iter().peekable();

	for line in doc.lines() {
		let mut cursor = 0;
		while let Some(edit) = pending.next_if(|edit| edit.line == line.index) {
			out.push_str(&line.text[cursor..edit.span.start]);
			out.push_str(&edit.replacement);
			cursor = edit.span.end;
		}
		out.push_str(&line.text[cursor..]);
		out.push_str(line.terminator);
	}

	out
}
