//! Heterogeneous detail content and its presentation.
//!
//! Timeline events and selection payloads carry free-form `details`: a string,
//! a list, or a nested object. [`DetailValue`] closes that shape into three
//! variants, and [`format_details`] turns it into a [`DetailBlock`] tree by
//! recursive descent. Presentation (labels, icons) comes only from the field
//! lookup table, never from the traversal.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

/// Free-form content: text, an ordered list, or ordered key/value pairs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum DetailValue {
	Text(String),
	List(Vec<DetailValue>),
	Map(Vec<(String, DetailValue)>),
}

impl From<Value> for DetailValue {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => DetailValue::Text(String::new()),
			Value::String(s) => DetailValue::Text(s),
			Value::Bool(b) => DetailValue::Text(if b { "Yes" } else { "No" }.to_string()),
			Value::Number(n) => DetailValue::Text(n.to_string()),
			Value::Array(items) => DetailValue::List(
				items
					.into_iter()
					.filter(|v| !v.is_null())
					.map(DetailValue::from)
					.collect(),
			),
			Value::Object(fields) => DetailValue::Map(
				fields
					.into_iter()
					.filter(|(_, v)| !v.is_null())
					.map(|(k, v)| (k, DetailValue::from(v)))
					.collect(),
			),
		}
	}
}

impl DetailValue {
	/// Looks up a top-level field of a `Map` value.
	pub fn field(&self, key: &str) -> Option<&DetailValue> {
		match self {
			DetailValue::Map(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
			_ => None,
		}
	}

	/// The text of a `Text` value.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			DetailValue::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Copy of a `Map` without `key`; other variants are returned unchanged.
	pub fn without(&self, key: &str) -> DetailValue {
		match self {
			DetailValue::Map(fields) => DetailValue::Map(
				fields
					.iter()
					.filter(|(k, _)| k != key)
					.cloned()
					.collect(),
			),
			other => other.clone(),
		}
	}

	/// True for blank text and for lists/maps with nothing in them.
	pub fn is_empty(&self) -> bool {
		match self {
			DetailValue::Text(s) => s.trim().is_empty(),
			DetailValue::List(items) => items.iter().all(DetailValue::is_empty),
			DetailValue::Map(fields) => fields.iter().all(|(_, v)| v.is_empty()),
		}
	}
}

/// How a named field is presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldStyle {
	pub label: Cow<'static, str>,
	pub icon: &'static str,
}

/// Known detail fields. Keys are matched case-insensitively, ignoring `_`/`-`.
const FIELD_STYLES: &[(&str, &str, &str)] = &[
	("description", "Description", "📝"),
	("significance", "Significance", "⭐"),
	("importance", "Importance", "⭐"),
	("causes", "Causes", "🔍"),
	("cause", "Cause", "🔍"),
	("effects", "Effects", "➡️"),
	("consequences", "Consequences", "➡️"),
	("impact", "Impact", "💥"),
	("keyfigures", "Key Figures", "👤"),
	("people", "Key People", "👤"),
	("leaders", "Leaders", "👤"),
	("location", "Location", "📍"),
	("places", "Places", "📍"),
	("date", "Date", "📅"),
	("period", "Period", "📅"),
	("facts", "Key Facts", "📌"),
	("keyfacts", "Key Facts", "📌"),
	("features", "Features", "✦"),
	("outcome", "Outcome", "🏁"),
	("result", "Result", "🏁"),
	("examtip", "Exam Tip", "💡"),
	("examples", "Examples", "🧩"),
	("related", "Related", "🔗"),
];

const DEFAULT_ICON: &str = "•";

impl FieldStyle {
	/// Style for `key`: the lookup table entry, or a humanized label with a bullet.
	pub fn for_key(key: &str) -> Self {
		let normalized: String = key
			.chars()
			.filter(|c| *c != '_' && *c != '-' && *c != ' ')
			.map(|c| c.to_ascii_lowercase())
			.collect();
		FIELD_STYLES
			.iter()
			.find(|(k, _, _)| *k == normalized)
			.map(|(_, label, icon)| FieldStyle {
				label: Cow::Borrowed(label),
				icon,
			})
			.unwrap_or_else(|| FieldStyle {
				label: Cow::Owned(humanize(key)),
				icon: DEFAULT_ICON,
			})
	}

	/// Whether this style came from the lookup table.
	pub fn is_known(&self) -> bool {
		self.icon != DEFAULT_ICON
	}
}

/// `keyFigures` / `key_figures` -> `Key Figures`.
fn humanize(key: &str) -> String {
	let mut words: Vec<String> = Vec::new();
	let mut current = String::new();
	for c in key.chars() {
		if c == '_' || c == '-' || c == ' ' {
			if !current.is_empty() {
				words.push(std::mem::take(&mut current));
			}
		} else if c.is_uppercase() && !current.is_empty() {
			words.push(std::mem::take(&mut current));
			current.push(c);
		} else {
			current.push(c);
		}
	}
	if !current.is_empty() {
		words.push(current);
	}
	words
		.into_iter()
		.map(|w| {
			let mut chars = w.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// Presentation tree produced by [`format_details`].
#[derive(Clone, Debug, PartialEq)]
pub enum DetailBlock {
	Paragraph(String),
	Bullets(Vec<DetailBlock>),
	Fields(Vec<DetailField>),
}

/// A labelled entry in a [`DetailBlock::Fields`] section.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailField {
	pub style: FieldStyle,
	pub body: DetailBlock,
}

/// Formats a detail value into a presentation tree, skipping empty entries.
pub fn format_details(value: &DetailValue) -> DetailBlock {
	match value {
		DetailValue::Text(s) => DetailBlock::Paragraph(s.trim().to_string()),
		DetailValue::List(items) => DetailBlock::Bullets(
			items
				.iter()
				.filter(|v| !v.is_empty())
				.map(format_details)
				.collect(),
		),
		DetailValue::Map(fields) => DetailBlock::Fields(
			fields
				.iter()
				.filter(|(_, v)| !v.is_empty())
				.map(|(key, v)| DetailField {
					style: FieldStyle::for_key(key),
					body: format_details(v),
				})
				.collect(),
		),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn converts_json_preserving_key_order() {
		let value: DetailValue = serde_json::from_value(json!({
			"zeta": "last-alphabetically",
			"alpha": [1, true, null],
			"skipped": null
		}))
		.unwrap();

		assert_eq!(
			value,
			DetailValue::Map(vec![
				("zeta".into(), DetailValue::Text("last-alphabetically".into())),
				(
					"alpha".into(),
					DetailValue::List(vec![
						DetailValue::Text("1".into()),
						DetailValue::Text("Yes".into()),
					])
				),
			])
		);
	}

	#[test]
	fn known_keys_use_lookup_table() {
		let style = FieldStyle::for_key("key_figures");
		assert_eq!(style.label, "Key Figures");
		assert_eq!(style.icon, "👤");
		assert!(style.is_known());

		assert_eq!(FieldStyle::for_key("examTip").label, "Exam Tip");
	}

	#[test]
	fn unknown_keys_fall_back_to_default_style() {
		let style = FieldStyle::for_key("treatySignatories");
		assert_eq!(style.label, "Treaty Signatories");
		assert_eq!(style.icon, DEFAULT_ICON);
		assert!(!style.is_known());
	}

	#[test]
	fn formatting_preserves_nesting() {
		let value: DetailValue = serde_json::from_value(json!({
			"causes": ["Doctrine of Lapse", "Greased cartridges"],
			"outcome": { "governance": "Crown rule", "notes": "" }
		}))
		.unwrap();

		let DetailBlock::Fields(fields) = format_details(&value) else {
			panic!("expected fields");
		};
		assert_eq!(fields.len(), 2);
		assert_eq!(fields[0].style.label, "Causes");
		assert_eq!(
			fields[0].body,
			DetailBlock::Bullets(vec![
				DetailBlock::Paragraph("Doctrine of Lapse".into()),
				DetailBlock::Paragraph("Greased cartridges".into()),
			])
		);
		let DetailBlock::Fields(inner) = &fields[1].body else {
			panic!("expected nested fields");
		};
		// blank "notes" is dropped
		assert_eq!(inner.len(), 1);
		assert_eq!(inner[0].style.label, "Governance");
	}

	#[test]
	fn without_removes_single_field() {
		let value: DetailValue =
			serde_json::from_value(json!({"description": "d", "era": "Mughal"})).unwrap();
		assert_eq!(value.field("description").and_then(DetailValue::as_text), Some("d"));
		assert_eq!(
			value.without("description"),
			DetailValue::Map(vec![("era".into(), DetailValue::Text("Mughal".into()))])
		);
	}
}
