//! Discovery of phandle-bearing cells in label-bearing sources.

use std::collections::BTreeSet;

use crate::document::Document;
use crate::registry::{PhandleRegistry, RegistryEntry};


/// Counts from one learning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearnReport {
	/// Assignments with at least one cell.
	pub assignments: usize,
	/// Distinct `(property, cell)` pairs seen in this source.
	pub discovered: usize,
	/// Pairs that were not registered before.
	pub added: usize,
	/// Registry size after merging.
	pub total: usize,
}

/// Every `(property, cell)` pair whose cell is an `&` reference.
pub fn learn(doc: &Document<'_>) -> BTreeSet<RegistryEntry> {
	doc.assignments()
		.flat_map(|assignment| {
			assignment
				.reference_indices()
				.map(|cell| RegistryEntry::new(assignment.name.as_str(), cell))
				.collect::<Vec<_>>()
		})
		.collect()
}

/// Learns from `doc` and merges the result into `registry`.
///
/// The document is never modified.
pub fn learn_into(registry: &mut PhandleRegistry, doc: &Document<'_>) -> LearnReport {
	let discovered = learn(doc);
	let assignments = doc.assignments().count();
	let report = LearnReport {
		assignments,
		discovered: discovered.len(),
		added: registry.merge(discovered),
		total: registry.entry_count(),
	};
	tracing::debug!(
		assignments = report.assignments,
		discovered = report.discovered,
		added = report.added,
		total = report.total,
		"learned phandle cells"
	);
	report
}
