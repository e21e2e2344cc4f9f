//! Multi-field substring matching with results grouped by field.

use std::collections::BTreeMap;

use tracing::debug;

use crate::record::{FieldKey, Record};

/// Matches partitioned by the field that satisfied the substring test.
///
/// Only keys with at least one match are present. Iteration follows
/// [`FieldKey::ORDER`] and each group keeps dataset order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupedResults {
	groups: BTreeMap<FieldKey, Vec<Record>>,
}

impl GroupedResults {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	/// Number of non-empty groups.
	pub fn len(&self) -> usize {
		self.groups.len()
	}

	/// Matches for `key`, or `None` when nothing matched that field.
	pub fn get(&self, key: FieldKey) -> Option<&[Record]> {
		self.groups.get(&key).map(Vec::as_slice)
	}

	/// Groups in display order.
	pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &[Record])> {
		self.groups.iter().map(|(key, records)| (*key, records.as_slice()))
	}

	/// Total number of rows across every group.
	pub fn total(&self) -> usize {
		self.groups.values().map(Vec::len).sum()
	}

	fn push(&mut self, key: FieldKey, record: &Record) {
		self.groups.entry(key).or_default().push(record.clone());
	}
}

/// Match `query` against every field of every record.
///
/// The test is literal, case-sensitive containment. A record lands in each
/// group whose field contains the query, and at most once per group.
pub fn search(records: &[Record], query: &str) -> GroupedResults {
	let mut results = GroupedResults::new();
	if query.is_empty() {
		return results;
	}

	for record in records {
		for key in FieldKey::ORDER {
			if record.field(key).contains(query) {
				results.push(key, record);
			}
		}
	}

	debug!(
		query,
		groups = results.len(),
		rows = results.total(),
		"search completed"
	);
	results
}
