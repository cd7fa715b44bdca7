//! Helpers turning command-line arguments into merge inputs.

use endpoint_merge::{merge_parameters, Parameters, Route};
use serde_json::Value;

/// Errors in user-supplied CLI input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid JSON in {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} must be a JSON object")]
    NotAnObject(&'static str),

    #[error("invalid header `{0}` (expected `Name: value`)")]
    Header(String),
}

/// A route argument: a JSON object when it starts with `{`, a shorthand otherwise.
pub fn parse_route(arg: &str) -> Result<Route, InputError> {
    if arg.trim_start().starts_with('{') {
        Ok(Route::Endpoint(parse_object(arg, "route")?))
    } else {
        Ok(Route::Shorthand(arg.to_string()))
    }
}

/// Parse a JSON object argument.
pub fn parse_object(arg: &str, what: &'static str) -> Result<Parameters, InputError> {
    match serde_json::from_str::<Value>(arg).map_err(|source| InputError::Json { what, source })? {
        Value::Object(map) => Ok(map),
        _ => Err(InputError::NotAnObject(what)),
    }
}

/// Split `Name: value` into its parts, trimming whitespace around both.
pub fn parse_header(arg: &str) -> Result<(String, String), InputError> {
    match arg.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(InputError::Header(arg.to_string())),
    }
}

/// Build call parameters from `--params`, `--header` and `--preview` flags.
///
/// Headers and previews are added on top of whatever `--params` set.
pub fn build_parameters(
    params: Option<&str>,
    headers: &[String],
    previews: &[String],
) -> Result<Parameters, InputError> {
    let mut parameters = match params {
        Some(raw) => parse_object(raw, "--params")?,
        None => Parameters::new(),
    };

    if !headers.is_empty() {
        let entry = parameters
            .entry("headers")
            .or_insert_with(|| Value::Object(Parameters::new()));
        if !entry.is_object() {
            *entry = Value::Object(Parameters::new());
        }
        if let Value::Object(map) = entry {
            for header in headers {
                let (name, value) = parse_header(header)?;
                map.insert(name, Value::String(value));
            }
        }
    }

    if !previews.is_empty() {
        let media_type = parameters
            .entry("mediaType")
            .or_insert_with(|| Value::Object(Parameters::new()));
        if !media_type.is_object() {
            *media_type = Value::Object(Parameters::new());
        }
        if let Value::Object(map) = media_type {
            let list = map
                .entry("previews")
                .or_insert_with(|| Value::Array(Vec::new()));
            if !list.is_array() {
                *list = Value::Array(Vec::new());
            }
            if let Value::Array(items) = list {
                items.extend(previews.iter().cloned().map(Value::String));
            }
        }
    }

    Ok(parameters)
}

/// Attach call parameters to a route so none are lost.
///
/// A shorthand route is returned unchanged, since the merge folds
/// parameters into it. An object route does not consult separate
/// parameters, so they are merged into the object itself: headers are
/// combined case-insensitively with the flags winning, and previews
/// accumulate.
pub fn attach_parameters(route: Route, parameters: &Parameters) -> Route {
    match route {
        Route::Endpoint(map) if !parameters.is_empty() => {
            Route::Endpoint(merge_parameters(Some(&map), parameters.clone()))
        }
        other => other,
    }
}
