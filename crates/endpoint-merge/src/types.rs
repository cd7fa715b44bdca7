//! Typed views over endpoint parameter maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Free-form endpoint parameters.
///
/// Keys keep insertion order, which is what decides header case collisions.
pub type Parameters = Map<String, Value>;

/// Recognized request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Delete,
    Get,
    Head,
    Patch,
    Post,
    Put,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Delete,
        Method::Get,
        Method::Head,
        Method::Patch,
        Method::Post,
        Method::Put,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Delete => "DELETE",
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = DefaultsError;

    /// Matching is case-sensitive: `get` is not a method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DefaultsError::InvalidMethod(s.to_string()))
    }
}

/// Media type options: response format plus opted-in previews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub format: String,

    /// Preview names without the `-preview` suffix.
    #[serde(default)]
    pub previews: Vec<String>,
}

/// Reasons a parameter map cannot serve as endpoint defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefaultsError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unsupported method `{0}` (expected one of DELETE, GET, HEAD, PATCH, POST, PUT)")]
    InvalidMethod(String),

    #[error("header `{0}` must be lowercase")]
    UppercaseHeader(String),
}

/// Fully populated baseline configuration for an endpoint.
///
/// Built only through [`Defaults::try_from`], so every instance carries a
/// recognized `method`, a `baseUrl`, lowercase `headers` including `accept`
/// and `user-agent`, and a `mediaType` with `format` and `previews`.
/// Instances are never mutated; deriving new defaults yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Parameters", into = "Parameters")]
pub struct Defaults {
    method: Method,
    media_type: MediaType,
    map: Parameters,
}

impl Defaults {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn base_url(&self) -> &str {
        self.map
            .get("baseUrl")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Look up a header value; `name` is matched lowercased.
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.map
            .get("headers")
            .and_then(Value::as_object)
            .and_then(|headers| headers.get(&name.to_lowercase()))
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// The underlying parameter map, including any extra named parameters.
    pub fn as_map(&self) -> &Parameters {
        &self.map
    }

    pub fn into_map(self) -> Parameters {
        self.map
    }
}

impl TryFrom<Parameters> for Defaults {
    type Error = DefaultsError;

    fn try_from(map: Parameters) -> Result<Self, Self::Error> {
        let method = match map.get("method") {
            None => return Err(DefaultsError::MissingField("method")),
            Some(Value::String(s)) => s.parse::<Method>()?,
            Some(_) => {
                return Err(DefaultsError::InvalidField {
                    field: "method",
                    expected: "a string",
                })
            }
        };

        require_str(&map, "baseUrl")?;

        let headers = match map.get("headers") {
            None => return Err(DefaultsError::MissingField("headers")),
            Some(Value::Object(h)) => h,
            Some(_) => {
                return Err(DefaultsError::InvalidField {
                    field: "headers",
                    expected: "an object",
                })
            }
        };
        if let Some(key) = headers.keys().find(|k| k.chars().any(char::is_uppercase)) {
            return Err(DefaultsError::UppercaseHeader(key.clone()));
        }
        require_str(headers, "accept").map_err(|e| rename_field(e, "headers.accept"))?;
        require_str(headers, "user-agent").map_err(|e| rename_field(e, "headers.user-agent"))?;

        let media_type = parse_media_type(map.get("mediaType"))?;

        Ok(Self {
            method,
            media_type,
            map,
        })
    }
}

impl TryFrom<Value> for Defaults {
    type Error = DefaultsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Defaults::try_from(map),
            _ => Err(DefaultsError::InvalidField {
                field: "defaults",
                expected: "an object",
            }),
        }
    }
}

impl From<Defaults> for Parameters {
    fn from(defaults: Defaults) -> Self {
        defaults.map
    }
}

fn require_str<'a>(map: &'a Parameters, field: &'static str) -> Result<&'a str, DefaultsError> {
    match map.get(field) {
        None => Err(DefaultsError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DefaultsError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn rename_field(err: DefaultsError, field: &'static str) -> DefaultsError {
    match err {
        DefaultsError::MissingField(_) => DefaultsError::MissingField(field),
        DefaultsError::InvalidField { expected, .. } => DefaultsError::InvalidField { field, expected },
        other => other,
    }
}

fn parse_media_type(value: Option<&Value>) -> Result<MediaType, DefaultsError> {
    let map = match value {
        None => return Err(DefaultsError::MissingField("mediaType")),
        Some(Value::Object(m)) => m,
        Some(_) => {
            return Err(DefaultsError::InvalidField {
                field: "mediaType",
                expected: "an object",
            })
        }
    };

    let format = require_str(map, "format")
        .map_err(|e| rename_field(e, "mediaType.format"))?
        .to_string();

    let previews = match map.get("previews") {
        None => return Err(DefaultsError::MissingField("mediaType.previews")),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(DefaultsError::InvalidField {
                        field: "mediaType.previews",
                        expected: "an array of strings",
                    })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(DefaultsError::InvalidField {
                field: "mediaType.previews",
                expected: "an array of strings",
            })
        }
    };

    Ok(MediaType { format, previews })
}
