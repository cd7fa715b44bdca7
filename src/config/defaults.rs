//! Built-in endpoint defaults (layer 1)
//!
//! Hardcoded values every endpoint starts from.

use endpoint_merge::{Defaults, DefaultsError, Method, Parameters};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Request method (default: GET)
    pub method: Method,

    /// Base URL prepended to relative routes (default: "https://api.github.com")
    pub base_url: String,

    /// Accept header (default: "application/vnd.github.v3+json")
    pub accept: String,

    /// User-Agent header (default: "rest-endpoint.rs/<version> (<os>; <arch>)")
    pub user_agent: String,

    /// Media type format (default: "", i.e. plain JSON)
    pub media_type_format: String,

    /// Previews enabled for every request (default: none)
    pub previews: Vec<String>,
}

/// User agent advertised by default.
pub fn default_user_agent() -> String {
    format!(
        "rest-endpoint.rs/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            method: Method::Get,
            base_url: "https://api.github.com".to_string(),
            accept: "application/vnd.github.v3+json".to_string(),
            user_agent: default_user_agent(),
            media_type_format: String::new(),
            previews: Vec::new(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to a parameter map for merging
    pub fn to_value(&self) -> Parameters {
        let value = serde_json::json!({
            "method": self.method,
            "baseUrl": self.base_url,
            "headers": {
                "accept": self.accept,
                "user-agent": self.user_agent
            },
            "mediaType": {
                "format": self.media_type_format,
                "previews": self.previews
            }
        });
        match value {
            Value::Object(map) => map,
            _ => Parameters::new(),
        }
    }

    /// Validated defaults built from these values alone
    pub fn to_defaults(&self) -> Result<Defaults, DefaultsError> {
        Defaults::try_from(self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = BuiltinDefaults::default();
        assert_eq!(defaults.method, Method::Get);
        assert_eq!(defaults.base_url, "https://api.github.com");
        assert_eq!(defaults.accept, "application/vnd.github.v3+json");
        assert!(defaults.user_agent.starts_with("rest-endpoint.rs/"));
        assert!(defaults.previews.is_empty());
    }

    #[test]
    fn test_to_value() {
        let value = BuiltinDefaults::default().to_value();

        assert_eq!(value["method"], "GET");
        assert_eq!(value["headers"]["accept"], "application/vnd.github.v3+json");
        assert_eq!(value["mediaType"]["format"], "");
        assert_eq!(value["mediaType"]["previews"], serde_json::json!([]));
    }

    #[test]
    fn test_to_defaults_is_valid() {
        let defaults = BuiltinDefaults::default().to_defaults().unwrap();
        assert_eq!(defaults.method(), Method::Get);
        assert_eq!(defaults.base_url(), "https://api.github.com");
    }
}
