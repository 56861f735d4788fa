//! Parsing of the `__symbols__` node emitted by `dtc -@`.

use rustc_hash::FxHashMap;

use crate::document::Document;
use crate::error::{DtsError, Result, Warning};
use crate::path::NodePath;

#[cfg(test)]
mod tests;

/// Name of the synthetic node mapping labels to paths.
pub const SYMBOLS_NODE: &str = "__symbols__";

/// Mapping from node path to label, read from `__symbols__`.
///
/// When several labels point at the same node the first one listed wins.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
	labels: FxHashMap<NodePath, String>,
	entries: usize,
	warnings: Vec<Warning>,
}

impl SymbolTable {
	/// Reads the first `__symbols__ { ... };` block of `doc`.
	///
	/// # Errors
	///
	/// Returns [`DtsError::SymbolsNotFound`] if the document has no such block.
	/// Lines inside the block that are not `label = "path";` become
	/// [`Warning::UnparsableSymbol`] and are skipped.
	pub fn read(doc: &Document<'_>) -> Result<Self> {
		let lines = doc.lines();
		let open = lines
			.iter()
			.position(|line| line.code.trim_end().ends_with('{') && line.path.leaf() == Some(SYMBOLS_NODE))
			.ok_or(DtsError::SymbolsNotFound)?;
		let block = &lines[open].path;

		let mut table = Self::default();
		for line in lines[open + 1..].iter().take_while(|line| &line.path == block) {
			let code = line.code.trim();
			if code.is_empty() || code == "};" {
				continue;
			}

			match parse_symbol(code) {
				Some((label, path)) => table.insert(label, NodePath::parse(path)),
				None => table.warnings.push(Warning::UnparsableSymbol {
					line: line.index,
					text: line.text.trim().to_string(),
				}),
			}
		}

		tracing::debug!(symbols = table.entries, paths = table.labels.len(), "read symbol table");
		Ok(table)
	}

	fn insert(&mut self, label: &str, path: NodePath) {
		self.entries += 1;
		self.labels.entry(path).or_insert_with(|| label.to_string());
	}

	/// Label of the node at `path`.
	pub fn label(&self, path: &NodePath) -> Option<&str> {
		self.labels.get(path).map(String::as_str)
	}

	/// Number of `label = "path";` entries parsed, including aliases.
	pub fn len(&self) -> usize {
		self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries == 0
	}

	/// Lines that could not be parsed.
	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}
}

/// Splits `label = "path";` into its parts.
fn parse_symbol(code: &str) -> Option<(&str, &str)> {
	let (label, value) = code.strip_suffix(';')?.split_once(" = ")?;
	let path = value.trim().strip_prefix('"')?.strip_suffix('"')?;
	let label = label.trim();
	let valid = !label.is_empty() && !label.contains(char::is_whitespace) && !path.is_empty() && !path.contains('"');
	valid.then_some((label, path))
}
