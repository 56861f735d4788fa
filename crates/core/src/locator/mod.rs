//! Lookup from a node's own `phandle = <N>;` value to its path.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::document::Document;
use crate::error::{DtsError, Result, Warning};
use crate::path::NodePath;
use crate::registry::PHANDLE_PROPERTY;
use crate::scanner::PropertyAssignment;


/// Property older dtc versions emit next to `phandle`.
pub const LEGACY_PHANDLE_PROPERTY: &str = "linux,phandle";

/// What to do when two nodes declare the same phandle value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
	/// Record a warning and leave the value unresolved.
	#[default]
	Warn,
	/// Abort with [`DtsError::DuplicatePhandle`].
	Fail,
}

/// Phandle value to node path mapping for one document.
#[derive(Debug, Clone, Default)]
pub struct PhandleLocator {
	paths: FxHashMap<u32, NodePath>,
	ambiguous: FxHashSet<u32>,
	warnings: Vec<Warning>,
}

impl PhandleLocator {
	/// Collects every `phandle = <N>;` (or `linux,phandle`) definition in `doc`.
	///
	/// # Errors
	///
	/// Under [`DuplicatePolicy::Fail`], returns [`DtsError::DuplicatePhandle`]
	/// for the first value declared by two different nodes.
	pub fn locate(doc: &Document<'_>, policy: DuplicatePolicy) -> Result<Self> {
		let mut locator = Self::default();

		for assignment in doc.assignments() {
			if !is_definition(&assignment) {
				continue;
			}
			let Some(value) = assignment.cell(0).and_then(|cell| parse_cell_value(&cell.text)) else {
				continue;
			};
			locator.record(value, assignment.path, policy)?;
		}

		tracing::debug!(phandles = locator.paths.len(), ambiguous = locator.ambiguous.len(), "located phandles");
		Ok(locator)
	}

	fn record(&mut self, value: u32, path: NodePath, policy: DuplicatePolicy) -> Result<()> {
		if self.ambiguous.contains(&value) {
			return Ok(());
		}

		let first = match self.paths.get(&value) {
			None => {
				self.paths.insert(value, path);
				return Ok(());
			}
			Some(first) if *first == path => return Ok(()),
			Some(first) => first.clone(),
		};

		if policy == DuplicatePolicy::Fail {
			return Err(DtsError::DuplicatePhandle { value, first, second: path });
		}

		self.paths.remove(&value);
		self.ambiguous.insert(value);
		self.warnings.push(Warning::DuplicatePhandle { value, first, second: path });
		Ok(())
	}

	/// Path of the node declaring `value`.
	pub fn path(&self, value: u32) -> Option<&NodePath> {
		self.paths.get(&value)
	}

	/// Number of unambiguous phandle definitions.
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	/// Duplicate definitions found while locating.
	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}
}

/// Whether `name` is a node's own phandle definition.
pub fn is_phandle_property(name: &str) -> bool {
	name == PHANDLE_PROPERTY || name == LEGACY_PHANDLE_PROPERTY
}

/// Whether `assignment` declares its node's phandle (`phandle = <N>;`).
pub fn is_definition(assignment: &PropertyAssignment) -> bool {
	is_phandle_property(&assignment.name) && assignment.cell_count() == 1
}

/// Parses a cell as a 32-bit value, accepting `0x` hexadecimal or decimal.
pub fn parse_cell_value(token: &str) -> Option<u32> {
	match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
		Some(hex) => u32::from_str_radix(hex, 16).ok(),
		None => token.parse().ok(),
	}
}
