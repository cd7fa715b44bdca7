//! Deep merge of endpoint defaults and call parameters.
//!
//! Merge semantics:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins), except `mediaType.previews`
//! - Scalars: override (last wins)
//! - Header names: lowercased before merging

use serde_json::{Map, Value};

use crate::headers::lowercase_keys;
use crate::previews::merge_previews;
use crate::route::{normalize_route, Route};
use crate::types::{Defaults, Parameters};

/// Whether a value merges key-wise instead of being replaced.
///
/// Only JSON objects qualify. Arrays, strings, numbers, booleans and null
/// are replaced wholesale by the overlay.
pub fn is_mergeable(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Deep merge two JSON values into a freshly allocated one.
///
/// Neither input is modified. When both sides are mergeable their keys are
/// combined recursively, otherwise `overlay` wins, including `null`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Key-wise merge; base keys keep their order, overlay-only keys follow.
pub fn merge_maps(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = Map::new();

    for (key, base_value) in base {
        let value = match overlay.get(key) {
            Some(overlay_value) if is_mergeable(base_value) && is_mergeable(overlay_value) => {
                deep_merge(base_value, overlay_value)
            }
            Some(overlay_value) => overlay_value.clone(),
            None => base_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    for (key, overlay_value) in overlay {
        if !base.contains_key(key) {
            merged.insert(key.clone(), overlay_value.clone());
        }
    }

    merged
}

/// Merge already-flattened `options` onto `defaults`.
///
/// `defaults` need not be complete, which lets configuration layers go
/// through the same rules as call parameters. Without defaults the result
/// is `options` with its headers and previews normalized.
pub fn merge_parameters(defaults: Option<&Parameters>, mut options: Parameters) -> Parameters {
    let headers = lowercase_keys(options.get("headers"));
    options.insert("headers".to_string(), Value::Object(headers));

    let mut merged = match defaults {
        Some(defaults) => merge_maps(defaults, &options),
        None => options,
    };

    let default_previews = defaults
        .and_then(|d| d.get("mediaType"))
        .and_then(|m| m.get("previews"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if let Some(Value::Object(media_type)) = merged.get_mut("mediaType") {
        if let Some(Value::Array(previews)) = media_type.get_mut("previews") {
            let combined = merge_previews(default_previews, previews);
            *previews = combined;
        }
    }

    log::debug!(
        "merged {} parameter(s) onto {}",
        merged.len(),
        if defaults.is_some() { "defaults" } else { "no defaults" }
    );

    merged
}

/// Merge a route and its parameters onto endpoint defaults.
///
/// `route` is either a `"METHOD URL"` shorthand, in which case `parameters`
/// is folded in, or a complete parameter set. The result has lowercase
/// header names and a deduplicated, suffix-free `mediaType.previews`.
/// Inputs are never modified.
pub fn merge(
    defaults: Option<&Defaults>,
    route: Option<&Route>,
    parameters: Option<&Parameters>,
) -> Parameters {
    let options = normalize_route(route, parameters);
    merge_parameters(defaults.map(Defaults::as_map), options)
}
