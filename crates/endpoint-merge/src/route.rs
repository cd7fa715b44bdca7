//! Route shorthand normalization.

use serde_json::Value;

use crate::types::Parameters;

/// First argument of a merge: a `"METHOD URL"` shorthand or a full parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// `"GET /orgs/:org"` or just `"/orgs/:org"`.
    Shorthand(String),
    /// Parameters that already carry `method`/`url`.
    Endpoint(Parameters),
}

impl Route {
    /// Interpret an arbitrary JSON value as a route.
    ///
    /// Strings are shorthands and objects are endpoints; anything else is
    /// treated as an empty endpoint.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Route::Shorthand(s),
            Value::Object(map) => Route::Endpoint(map),
            _ => Route::Endpoint(Parameters::new()),
        }
    }
}

impl From<&str> for Route {
    fn from(s: &str) -> Self {
        Route::Shorthand(s.to_string())
    }
}

impl From<String> for Route {
    fn from(s: String) -> Self {
        Route::Shorthand(s)
    }
}

impl From<Parameters> for Route {
    fn from(map: Parameters) -> Self {
        Route::Endpoint(map)
    }
}

/// Split a shorthand on its first space into `(method, url)`.
///
/// A shorthand without a space, or with nothing after it, is all URL:
/// `"GET "` yields url `GET` and no method. The method token is not checked
/// against the known verbs here.
pub fn parse_shorthand(shorthand: &str) -> (Option<&str>, &str) {
    match shorthand.split_once(' ') {
        Some((method, url)) if !url.is_empty() => (Some(method), url),
        Some((first, _)) => (None, first),
        None => (None, shorthand),
    }
}

/// Flatten `(route, parameters)` into one parameter object.
///
/// For a shorthand, `parameters` is layered over the inferred `method`/`url`
/// and wins on any overlapping key. For an endpoint route, `parameters` is
/// not consulted. An absent route yields an empty object.
pub fn normalize_route(route: Option<&Route>, parameters: Option<&Parameters>) -> Parameters {
    match route {
        None => Parameters::new(),
        Some(Route::Endpoint(map)) => map.clone(),
        Some(Route::Shorthand(shorthand)) => {
            let mut options = Parameters::new();

            if !shorthand.is_empty() {
                let (method, url) = parse_shorthand(shorthand);
                if let Some(method) = method {
                    options.insert("method".to_string(), Value::String(method.to_string()));
                }
                options.insert("url".to_string(), Value::String(url.to_string()));
            }

            if let Some(parameters) = parameters {
                for (key, value) in parameters {
                    options.insert(key.clone(), value.clone());
                }
            }

            options
        }
    }
}
