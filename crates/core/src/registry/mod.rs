//! Persisted knowledge of which property cells hold phandles.
//!
//! The registry is a union of `(property, cell)` pairs learned from kernel
//! sources. It only ever grows. On disk it is one `name;index` entry per line,
//! written in lexicographic order so repeated runs produce identical files.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{DtsError, Result};


/// Default registry file name, relative to the working directory.
pub const REGISTRY_FILE: &str = "phandles.txt";

/// A node's own phandle property. Its cell 0 is always registered.
pub const PHANDLE_PROPERTY: &str = "phandle";

/// A property cell known to carry a phandle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryEntry {
	pub property: String,
	pub cell: usize,
}

impl RegistryEntry {
	pub fn new(property: impl Into<String>, cell: usize) -> Self {
		Self {
			property: property.into(),
			cell,
		}
	}
}

/// Property name to registered cell indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhandleRegistry {
	entries: BTreeMap<String, BTreeSet<usize>>,
}

impl Default for PhandleRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl PhandleRegistry {
	/// A registry holding only `phandle;0`.
	pub fn new() -> Self {
		let mut entries = BTreeMap::new();
		entries.insert(PHANDLE_PROPERTY.to_string(), BTreeSet::from([0]));
		Self { entries }
	}

	/// Parses `name;index` lines.
	///
	/// Lines that do not have exactly two `;`-separated fields, or whose index
	/// is not an integer, are skipped. Duplicate lines collapse.
	pub fn parse(source: &str) -> Self {
		let mut registry = Self::new();
		registry.merge(source.lines().filter_map(parse_entry));
		registry
	}

	/// Reads the registry file at `path`.
	///
	/// # Errors
	///
	/// [`DtsError::RegistryMissing`] if the file does not exist, [`DtsError::Io`]
	/// for any other read failure.
	pub fn load(path: &Path) -> Result<Self> {
		match std::fs::read_to_string(path) {
			Ok(source) => Ok(Self::parse(&source)),
			Err(error) if error.kind() == ErrorKind::NotFound => Err(DtsError::RegistryMissing { path: path.to_path_buf() }),
			Err(error) => Err(DtsError::Io {
				path: path.to_path_buf(),
				error,
			}),
		}
	}

	/// Like [`load`](Self::load), but a missing file yields a fresh registry.
	pub fn load_or_default(path: &Path) -> Result<Self> {
		match Self::load(path) {
			Err(DtsError::RegistryMissing { .. }) => Ok(Self::new()),
			other => other,
		}
	}

	/// Writes the full registry to `path`, replacing its previous content.
	pub fn save(&self, path: &Path) -> Result<()> {
		std::fs::write(path, self.to_string()).map_err(|error| DtsError::Io {
			path: path.to_path_buf(),
			error,
		})
	}

	/// Adds `entries`, returning how many were not registered before.
	///
	/// Merging is a set union, so repeating a merge adds nothing.
	pub fn merge<I>(&mut self, entries: I) -> usize
	where
		I: IntoIterator<Item = RegistryEntry>,
	{
		let mut added = 0;
		for RegistryEntry { property, cell } in entries {
			if self.entries.entry(property).or_default().insert(cell) {
				added += 1;
			}
		}
		added
	}

	/// Unions another registry into this one.
	pub fn union(&mut self, other: &PhandleRegistry) -> usize {
		self.merge(other.iter())
	}

	/// Registered cell indices of `property`.
	pub fn cells(&self, property: &str) -> Option<&BTreeSet<usize>> {
		self.entries.get(property)
	}

	pub fn contains(&self, property: &str, cell: usize) -> bool {
		self.cells(property).is_some_and(|cells| cells.contains(&cell))
	}

	/// Number of registered properties.
	pub fn property_count(&self) -> usize {
		self.entries.len()
	}

	/// Total number of `(property, cell)` entries.
	pub fn entry_count(&self) -> usize {
		self.entries.values().map(BTreeSet::len).sum()
	}

	/// Entries in serialization order.
	pub fn iter(&self) -> impl Iterator<Item = RegistryEntry> + '_ {
		self.entries
			.iter()
			.flat_map(|(property, cells)| cells.iter().map(move |&cell| RegistryEntry::new(property.as_str(), cell)))
	}
}

impl fmt::Display for PhandleRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (property, cells) in &self.entries {
			for cell in cells {
				writeln!(f, "{property};{cell}")?;
			}
		}
		Ok(())
	}
}

fn parse_entry(line: &str) -> Option<RegistryEntry> {
	let mut fields = line.trim().split(';');
	let (Some(property), Some(cell), None) = (fields.next(), fields.next(), fields.next()) else {
		return None;
	};
	let property = property.trim();
	if property.is_empty() || property.contains(char::is_whitespace) {
		return None;
	}
	let cell = cell.trim().parse().ok()?;
	Some(RegistryEntry::new(property, cell))
}
