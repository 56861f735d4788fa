//! Extraction of property assignments from a [`Document`].
//!
//! A statement starts at the first unquoted `=` of a line and runs until the
//! next `;` outside quotes and angle brackets, possibly several lines later.
//! Each `<...>` clause becomes one cell group. Cells are whitespace-separated
//! tokens, except that a parenthesised expression or a `&{/path}` reference
//! is a single cell. The flattened index keeps counting across groups, so in
//! `<&a 1>, <&b 2>` the second reference is cell 2.
//!
//! Every [`Cell`] records its physical line and byte span, which lets a rewrite
//! touch exactly the token and nothing around it.

use std::ops::Range;

use crate::document::Document;
use crate::path::NodePath;

#[cfg(test)]
mod tests;

/// One token inside a `<...>` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
	/// Literal token text.
	pub text: String,
	/// Zero-based line index the token sits on.
	pub line: usize,
	/// Byte range of the token within that line.
	pub span: Range<usize>,
}

impl Cell {
	/// Whether the cell is a `&label` or `&{/path}` reference.
	pub fn is_reference(&self) -> bool {
		self.text.starts_with('&')
	}
}

/// A `name = <cells>, <cells>;` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAssignment {
	/// Node the statement belongs to.
	pub path: NodePath,
	/// Property name.
	pub name: String,
	/// Line the statement starts on.
	pub line: usize,
	/// One entry per `<...>` clause, in declaration order.
	pub groups: Vec<Vec<Cell>>,
}

impl PropertyAssignment {
	/// All cells in flattened index order.
	pub fn cells(&self) -> impl Iterator<Item = &Cell> {
		self.groups.iter().flatten()
	}

	/// Flattened view indexed by cell position.
	pub fn flatten(&self) -> Vec<&Cell> {
		self.cells().collect()
	}

	/// Cell at flattened `index`.
	pub fn cell(&self, index: usize) -> Option<&Cell> {
		self.cells().nth(index)
	}

	pub fn cell_count(&self) -> usize {
		self.groups.iter().map(Vec::len).sum()
	}

	/// Flattened indices of cells holding a reference.
	pub fn reference_indices(&self) -> impl Iterator<Item = usize> {
		self.cells().enumerate().filter(|(_, cell)| cell.is_reference()).map(|(index, _)| index)
	}
}

/// Lazy, restartable iterator over the assignments of a [`Document`].
///
/// Statements without any `<...>` group are consumed but not yielded.
#[derive(Debug, Clone)]
pub struct PropertyScanner<'d, 'a> {
	doc: &'d Document<'a>,
	line: usize,
	column: usize,
}

impl<'d, 'a> PropertyScanner<'d, 'a> {
	pub fn new(doc: &'d Document<'a>) -> Self {
		Self { doc, line: 0, column: 0 }
	}

	fn skip_line(&mut self) {
		self.line += 1;
		self.column = 0;
	}
}

impl Document<'_> {
	/// Scans the document for property assignments.
	pub fn assignments(&self) -> PropertyScanner<'_, '_> {
		PropertyScanner::new(self)
	}
}

impl Iterator for PropertyScanner<'_, '_> {
	type Item = PropertyAssignment;

	fn next(&mut self) -> Option<PropertyAssignment> {
		let doc = self.doc;
		while let Some(line) = doc.line(self.line) {
			let rest = &line.code[self.column..];
			let Some(eq) = find_unquoted(rest, '=') else {
				self.skip_line();
				continue;
			};

			let Some(name) = statement_name(&rest[..eq]) else {
				self.skip_line();
				continue;
			};

			let start = self.line;
			let Some(value) = parse_value(doc, start, self.column + eq + 1) else {
				self.skip_line();
				continue;
			};

			self.line = value.end_line;
			self.column = value.end_column;

			if value.groups.is_empty() {
				continue;
			}

			return Some(PropertyAssignment {
				path: line.path.clone(),
				name: name.to_string(),
				line: start,
				groups: value.groups,
			});
		}

		None
	}
}

/// Byte offset of the first `needle` outside double quotes.
fn find_unquoted(code: &str, needle: char) -> Option<usize> {
	let mut in_string = false;
	let mut escaped = false;
	for (offset, ch) in code.char_indices() {
		if in_string {
			match ch {
				_ if escaped => escaped = false,
				'\\' => escaped = true,
				'"' => in_string = false,
				_ => {}
			}
		} else if ch == '"' {
			in_string = true;
		} else if ch == needle {
			return Some(offset);
		}
	}
	None
}

/// Property name preceding `=`, after the last structural character.
fn statement_name(head: &str) -> Option<&str> {
	let name = head.rsplit(['{', '}', ';']).next().unwrap_or(head).trim();
	let valid = !name.is_empty() && name.chars().all(|ch| ch.is_ascii_alphanumeric() || ",._+?#-".contains(ch));
	valid.then_some(name)
}

struct ParsedValue {
	groups: Vec<Vec<Cell>>,
	end_line: usize,
	/// Byte offset just past the terminating `;`.
	end_column: usize,
}

/// Parses from `(line, column)` up to the statement terminator.
///
/// Returns `None` when the document ends before a `;` is found, or when the
/// value runs into another statement (an unclosed `<` or a missing `;`).
fn parse_value(doc: &Document<'_>, line: usize, column: usize) -> Option<ParsedValue> {
	let mut groups = Vec::new();
	let mut group: Option<Vec<Cell>> = None;
	let mut in_string = false;
	let mut escaped = false;
	let mut depth = 0usize;

	for current in doc.lines().iter().skip(line) {
		let start = if current.index == line { column } else { 0 };
		let code = &current.code;
		let mut token: Option<usize> = None;
		let mut in_path = false;

		for (offset, ch) in code[start..].char_indices().map(|(o, c)| (o + start, c)) {
			if in_string {
				match ch {
					_ if escaped => escaped = false,
					'\\' => escaped = true,
					'"' => in_string = false,
					_ => {}
				}
				continue;
			}

			let Some(cells) = group.as_mut() else {
				match ch {
					'=' => return None,
					'"' => in_string = true,
					'<' => group = Some(Vec::new()),
					';' => {
						return Some(ParsedValue {
							groups,
							end_line: current.index,
							end_column: offset + 1,
						});
					}
					_ => {}
				}
				continue;
			};

			if in_path {
				in_path = ch != '}';
				continue;
			}
			if ch == '{' && token.is_some_and(|begin| &code[begin..offset] == "&") {
				in_path = true;
				continue;
			}

			if depth == 0 && matches!(ch, '<' | '=' | '{' | '}' | ';') {
				return None;
			}

			if depth == 0 && (ch.is_whitespace() || ch == '>') {
				if let Some(begin) = token.take() {
					cells.push(cell(code, current.index, begin..offset));
				}
				if ch == '>' {
					groups.push(std::mem::take(cells));
					group = None;
				}
				continue;
			}

			token.get_or_insert(offset);
			match ch {
				'(' => depth += 1,
				')' => depth = depth.saturating_sub(1),
				_ => {}
			}
		}

		if let (Some(begin), Some(cells)) = (token, group.as_mut()) {
			cells.push(cell(code, current.index, begin..code.len()));
		}
	}

	None
}

fn cell(code: &str, line: usize, span: Range<usize>) -> Cell {
	Cell {
		text: code[span.clone()].to_string(),
		line,
		span,
	}
}
