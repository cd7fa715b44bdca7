//! Header name case folding.

use serde_json::{Map, Value};

/// Return a copy of `headers` with every key lowercased.
///
/// Keys that differ only by case collapse into one entry, and the value of
/// the key inserted last wins: `{"Accept": "a", "accept": "b"}` becomes
/// `{"accept": "b"}`. Absent headers yield an empty map. A `headers` value
/// that is not an object carries no header names and is dropped.
pub fn lowercase_keys(headers: Option<&Value>) -> Map<String, Value> {
    let mut lowered = Map::new();

    match headers {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, value) in map {
                lowered.insert(key.to_lowercase(), value.clone());
            }
        }
        Some(other) => {
            log::warn!("ignoring non-object headers value: {}", other);
        }
    }

    lowered
}
