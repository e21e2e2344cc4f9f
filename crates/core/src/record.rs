//! Record shape and the searchable field keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single user record supplied by the host.
///
/// Every field defaults to empty when it is missing from the source data, so
/// an absent field simply never matches a non-empty query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
	pub id: String,
	pub name: String,
	pub pincode: String,
	pub items: Vec<String>,
	pub address: String,
}

impl Record {
	/// Convenience constructor used by tests and demos.
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		pincode: impl Into<String>,
		items: impl IntoIterator<Item = impl Into<String>>,
		address: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			pincode: pincode.into(),
			items: items.into_iter().map(Into::into).collect(),
			address: address.into(),
		}
	}

	/// Return the value stored under `key`.
	pub fn field(&self, key: FieldKey) -> FieldValue<'_> {
		match key {
			FieldKey::Id => FieldValue::Scalar(&self.id),
			FieldKey::Name => FieldValue::Scalar(&self.name),
			FieldKey::Pincode => FieldValue::Scalar(&self.pincode),
			FieldKey::Items => FieldValue::List(&self.items),
			FieldKey::Address => FieldValue::Scalar(&self.address),
		}
	}
}

/// Borrowed view of a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
	Scalar(&'a str),
	List(&'a [String]),
}

impl FieldValue<'_> {
	/// Whether `needle` occurs literally in the value, or in any element of a
	/// list value.
	pub fn contains(&self, needle: &str) -> bool {
		match self {
			Self::Scalar(value) => value.contains(needle),
			Self::List(values) => values.iter().any(|value| value.contains(needle)),
		}
	}
}

/// The searchable fields, declared in display order.
///
/// The derived `Ord` follows declaration order, which is what keeps grouped
/// results iterating as id, name, pincode, items, address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
	Id,
	Name,
	Pincode,
	Items,
	Address,
}

impl FieldKey {
	/// Every key in display order.
	pub const ORDER: [FieldKey; 5] = [
		FieldKey::Id,
		FieldKey::Name,
		FieldKey::Pincode,
		FieldKey::Items,
		FieldKey::Address,
	];

	/// Lowercase label used in category headers.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Id => "id",
			Self::Name => "name",
			Self::Pincode => "pincode",
			Self::Items => "items",
			Self::Address => "address",
		}
	}
}

impl fmt::Display for FieldKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}
