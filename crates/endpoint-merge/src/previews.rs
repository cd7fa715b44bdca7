//! `mediaType.previews` union and suffix handling.
//!
//! Previews are additive: a call that asks for one preview keeps the ones
//! its defaults already opted into.

use serde_json::Value;

const PREVIEW_SUFFIX: &str = "-preview";

/// Remove one trailing `-preview` from a preview name.
pub fn strip_preview_suffix(name: &str) -> &str {
    name.strip_suffix(PREVIEW_SUFFIX).unwrap_or(name)
}

fn same_preview(a: &Value, b: &Value) -> bool {
    match (a.as_str(), b.as_str()) {
        (Some(a), Some(b)) => strip_preview_suffix(a) == strip_preview_suffix(b),
        _ => a == b,
    }
}

/// Combine the defaults' previews with the merged list.
///
/// Defaults-only entries come first in their original order, followed by the
/// merged entries in theirs. Every string entry loses its suffix, and
/// duplicates after stripping keep their first position.
pub fn merge_previews(defaults: &[Value], merged: &[Value]) -> Vec<Value> {
    let combined = defaults
        .iter()
        .filter(|d| !merged.iter().any(|m| same_preview(d, m)))
        .chain(merged.iter());

    let mut result: Vec<Value> = Vec::with_capacity(defaults.len() + merged.len());
    for preview in combined {
        let preview = match preview {
            Value::String(name) => Value::String(strip_preview_suffix(name).to_string()),
            other => other.clone(),
        };
        if !result.contains(&preview) {
            result.push(preview);
        }
    }
    result
}
