//! Endpoint handle with chainable defaults.

use endpoint_merge::{merge, merge_parameters, Defaults, DefaultsError, Parameters, Route};

use crate::config::{BuiltinDefaults, ConfigError, EffectiveDefaults};

/// Merges routes and parameters onto a fixed set of defaults.
///
/// Deriving new defaults with [`Endpoint::with_defaults`] returns a new
/// endpoint; the original keeps its defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    defaults: Defaults,
}

impl Endpoint {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults }
    }

    /// Endpoint using only the built-in defaults.
    pub fn builtin() -> Result<Self, EndpointError> {
        Ok(Self::new(BuiltinDefaults::default().to_defaults()?))
    }

    /// Endpoint using layered configuration.
    pub fn from_config(effective: &EffectiveDefaults) -> Self {
        Self::new(effective.defaults.clone())
    }

    /// Current defaults.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// New endpoint whose defaults are these defaults with `parameters` merged on top.
    pub fn with_defaults(&self, parameters: &Parameters) -> Result<Self, EndpointError> {
        let merged = merge_parameters(Some(self.defaults.as_map()), parameters.clone());
        Ok(Self::new(Defaults::try_from(merged)?))
    }

    /// Merge a route (shorthand or full parameters) and extra parameters onto the defaults.
    pub fn merge(&self, route: impl Into<Route>, parameters: Option<&Parameters>) -> Parameters {
        let route = route.into();
        merge(Some(&self.defaults), Some(&route), parameters)
    }

    /// Copy of the current defaults as a parameter map.
    pub fn merge_defaults(&self) -> Parameters {
        merge(Some(&self.defaults), None, None)
    }
}

/// Endpoint errors
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid defaults: {0}")]
    InvalidDefaults(#[from] DefaultsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use endpoint_merge::Method;
    use serde_json::{json, Value};

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_builtin_merge() {
        let endpoint = Endpoint::builtin().unwrap();
        let result = endpoint.merge("GET /orgs/:org", Some(&params(json!({"org": "octokit"}))));

        assert_eq!(result["method"], "GET");
        assert_eq!(result["url"], "/orgs/:org");
        assert_eq!(result["org"], "octokit");
        assert_eq!(result["baseUrl"], "https://api.github.com");
    }

    #[test]
    fn test_merge_full_options() {
        let endpoint = Endpoint::builtin().unwrap();
        let options = params(json!({"method": "POST", "url": "/markdown", "text": "Hello"}));

        let result = endpoint.merge(options, None);

        assert_eq!(result["method"], "POST");
        assert_eq!(result["text"], "Hello");
    }

    #[test]
    fn test_with_defaults_leaves_parent_unchanged() {
        let parent = Endpoint::builtin().unwrap();
        let child = parent
            .with_defaults(&params(json!({
                "baseUrl": "https://ghe.example.com/api/v3",
                "headers": {"Authorization": "token secret"},
                "mediaType": {"previews": ["luke-cage-preview"]}
            })))
            .unwrap();

        assert_eq!(child.defaults().base_url(), "https://ghe.example.com/api/v3");
        assert_eq!(child.defaults().header("authorization"), Some(&json!("token secret")));
        assert_eq!(child.defaults().media_type().previews, vec!["luke-cage"]);

        assert_eq!(parent.defaults().base_url(), "https://api.github.com");
        assert_eq!(parent.defaults().header("authorization"), None);
        assert!(parent.defaults().media_type().previews.is_empty());
    }

    #[test]
    fn test_chained_previews_accumulate() {
        let endpoint = Endpoint::builtin()
            .unwrap()
            .with_defaults(&params(json!({"mediaType": {"previews": ["a"]}})))
            .unwrap()
            .with_defaults(&params(json!({"mediaType": {"previews": ["b"]}})))
            .unwrap();

        let result = endpoint.merge("GET /", Some(&params(json!({"mediaType": {"previews": ["c"]}}))));

        assert_eq!(result["mediaType"]["previews"], json!(["a", "b", "c"]));
    }

    #[test]
    fn test_with_invalid_defaults() {
        let endpoint = Endpoint::builtin().unwrap();
        let err = endpoint
            .with_defaults(&params(json!({"method": "get"})))
            .unwrap_err();

        assert!(matches!(err, EndpointError::InvalidDefaults(DefaultsError::InvalidMethod(_))));
    }

    #[test]
    fn test_merge_defaults_returns_copy() {
        let endpoint = Endpoint::builtin()
            .unwrap()
            .with_defaults(&params(json!({"method": "PUT"})))
            .unwrap();

        let copy = endpoint.merge_defaults();

        assert_eq!(&copy, endpoint.defaults().as_map());
        assert_eq!(endpoint.defaults().method(), Method::Put);
    }
}
