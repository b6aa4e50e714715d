use serde_json::{Map, Value};

/// Flattens playlist features into a single `key: value` text for embedding.
///
/// Pairs are sorted by key; null values are skipped and strings are unquoted.
pub fn feature_text(features: &Map<String, Value>) -> String {
	let mut entries: Vec<(&String, &Value)> = features.iter().collect();
	let mut parts = Vec::with_capacity(entries.len());

	entries.sort_by(|(left, _), (right, _)| left.cmp(right));

	for (key, value) in entries {
		let rendered = match value {
			Value::Null => continue,
			Value::String(text) => text.clone(),
			other => other.to_string(),
		};

		parts.push(format!("{key}: {rendered}"));
	}

	parts.join(", ")
}
