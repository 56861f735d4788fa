//! Tells kernel-tree sources apart from decompiled dumps.

use crate::document::Document;
use crate::locator::{LEGACY_PHANDLE_PROPERTY, parse_cell_value};
use crate::registry::PHANDLE_PROPERTY;

/// Origin of a Devicetree source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
	/// Written against kernel headers; references use `&label`.
	Kernel,
	/// Produced by decompiling a DTB; references are raw phandle integers.
	Decompiled,
}

impl SourceKind {
	/// A source is decompiled iff some line is exactly `phandle = <N>;`.
	///
	/// Kernel sources never spell out phandles themselves, dtc assigns them.
	pub fn detect(doc: &Document<'_>) -> Self {
		if doc.lines().iter().any(|line| is_phandle_definition(line.code.trim())) {
			SourceKind::Decompiled
		} else {
			SourceKind::Kernel
		}
	}
}

fn is_phandle_definition(code: &str) -> bool {
	let Some(rest) = code.strip_prefix(PHANDLE_PROPERTY).or_else(|| code.strip_prefix(LEGACY_PHANDLE_PROPERTY)) else {
		return false;
	};
	rest.strip_prefix(" = <")
		.and_then(|value| value.strip_suffix(">;"))
		.is_some_and(|value| parse_cell_value(value).is_some())
}
