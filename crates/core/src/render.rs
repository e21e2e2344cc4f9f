//! Turn grouped matches into the flat list a view displays.
//!
//! The list is a single sibling sequence of category headers and result items.
//! Only items are navigable; headers exist so a pointer hovering them can
//! resolve to the first item of their category and so scrolling can keep them
//! visible.

use crate::engine::GroupedResults;
use crate::record::{FieldKey, Record};

/// A run of text, optionally marked as a query hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
	pub text: String,
	pub marked: bool,
}

impl Segment {
	pub fn plain(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			marked: false,
		}
	}

	pub fn marked(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			marked: true,
		}
	}
}

/// Wrap every literal occurrence of `needle` in `value`.
///
/// An empty needle cannot split the value, so the value comes back unmodified
/// as a single plain segment.
pub fn highlight(value: &str, needle: &str) -> Vec<Segment> {
	if needle.is_empty() {
		return vec![Segment::plain(value)];
	}

	let mut segments = Vec::new();
	for (idx, piece) in value.split(needle).enumerate() {
		if idx > 0 {
			segments.push(Segment::marked(needle));
		}
		if !piece.is_empty() {
			segments.push(Segment::plain(piece));
		}
	}
	segments
}

/// Flatten segments back to their text.
pub fn plain_text(segments: &[Segment]) -> String {
	segments.iter().map(|segment| segment.text.as_str()).collect()
}

/// Display-ready fields of a record rendered under one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRecord {
	pub id: Vec<Segment>,
	pub name: Vec<Segment>,
	/// One entry per item; empty when the record has no items.
	pub items: Vec<Vec<Segment>>,
	pub address: Vec<Segment>,
	pub pincode: Vec<Segment>,
}

impl RenderedRecord {
	/// Render `record` as it appears under the `group` category.
	///
	/// Highlighting follows the group, not the fields that happen to contain
	/// the query: a name that contains the query stays plain when the row sits
	/// under the address category.
	pub fn new(record: &Record, group: FieldKey, query: &str) -> Self {
		let field = |key: FieldKey, value: &str| {
			if key == group {
				highlight(value, query)
			} else {
				vec![Segment::plain(value)]
			}
		};

		Self {
			id: field(FieldKey::Id, &record.id),
			name: field(FieldKey::Name, &record.name),
			items: record
				.items
				.iter()
				.map(|item| field(FieldKey::Items, item))
				.collect(),
			address: field(FieldKey::Address, &record.address),
			pincode: field(FieldKey::Pincode, &record.pincode),
		}
	}
}

/// One row of the results panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
	Header {
		key: FieldKey,
		label: String,
	},
	Item {
		key: FieldKey,
		/// Position among navigable items.
		index: usize,
		record: RenderedRecord,
	},
}

impl Entry {
	pub fn key(&self) -> FieldKey {
		match self {
			Self::Header { key, .. } | Self::Item { key, .. } => *key,
		}
	}

	pub fn is_header(&self) -> bool {
		matches!(self, Self::Header { .. })
	}
}

/// Header label for a category.
pub fn category_label(query: &str, key: FieldKey) -> String {
	format!("\"{query}\" found in {key}")
}

/// Categorized, highlighted result rows in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultList {
	query: String,
	entries: Vec<Entry>,
	/// Entry position of each navigable item.
	item_positions: Vec<usize>,
}

impl ResultList {
	pub fn build(results: &GroupedResults, query: &str) -> Self {
		let mut entries = Vec::with_capacity(results.total() + results.len());
		let mut item_positions = Vec::with_capacity(results.total());

		for (key, records) in results.iter() {
			if records.is_empty() {
				continue;
			}
			entries.push(Entry::Header {
				key,
				label: category_label(query, key),
			});
			for record in records {
				item_positions.push(entries.len());
				entries.push(Entry::Item {
					key,
					index: item_positions.len() - 1,
					record: RenderedRecord::new(record, key, query),
				});
			}
		}

		Self {
			query: query.to_string(),
			entries,
			item_positions,
		}
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.item_positions.is_empty()
	}

	/// Number of navigable items.
	pub fn item_count(&self) -> usize {
		self.item_positions.len()
	}

	/// Entry position of the navigable item `item`.
	pub fn entry_of_item(&self, item: usize) -> Option<usize> {
		self.item_positions.get(item).copied()
	}

	/// Whether `item` directly follows a category header.
	pub fn is_first_in_category(&self, item: usize) -> bool {
		self.entry_of_item(item)
			.and_then(|position| position.checked_sub(1))
			.and_then(|previous| self.entries.get(previous))
			.is_some_and(Entry::is_header)
	}

	/// First navigable item of the `key` category.
	pub fn first_item_in(&self, key: FieldKey) -> Option<usize> {
		self.entries.iter().find_map(|entry| match entry {
			Entry::Item { key: item_key, index, .. } if *item_key == key => Some(*index),
			_ => None,
		})
	}

	/// Navigable item at entry position `position`, if that entry is an item.
	pub fn item_at_entry(&self, position: usize) -> Option<usize> {
		match self.entries.get(position)? {
			Entry::Item { index, .. } => Some(*index),
			Entry::Header { .. } => None,
		}
	}
}

/// What the results panel currently holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultsContent {
	#[default]
	Empty,
	NoResults(String),
	List(ResultList),
}

impl ResultsContent {
	pub fn list(&self) -> Option<&ResultList> {
		match self {
			Self::List(list) => Some(list),
			_ => None,
		}
	}
}
