//! Effective endpoint defaults with full provenance
//!
//! The effective defaults capture the merged configuration plus
//! information about where each layer came from.

use chrono::{DateTime, Utc};
use endpoint_merge::{merge_parameters, Defaults, DefaultsError, Parameters};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::BuiltinDefaults;

/// Schema version for effective defaults reports
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "rest-endpoint/effective_defaults@1";

/// Environment variable overriding the host config location
pub const CONFIG_ENV: &str = "REST_ENDPOINT_CONFIG";

/// Origin of a configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    Host,
    File,
    Cli,
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this source
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Effective endpoint defaults with provenance
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When these defaults were computed
    pub created_at: DateTime<Utc>,

    /// The merged, validated defaults
    pub defaults: Defaults,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

/// Header and parameter names whose values are masked in reports
const SECRET_KEYS: &[&str] = &["authorization", "token", "secret", "password", "api_key"];

impl EffectiveDefaults {
    /// Build effective defaults from layers.
    ///
    /// Layers apply in order builtin, host file, explicit file, CLI overrides,
    /// and combine with the same rules as per-call parameters.
    pub fn build(
        host_config_path: Option<&Path>,
        config_path: Option<&Path>,
        cli_overrides: Option<Parameters>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        layers.push(BuiltinDefaults::default().to_value());
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: Host config, skipped when absent
        if let Some(path) = host_config_path {
            if path.exists() {
                let (value, digest) = Self::load_file(path)?;
                layers.push(value);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::Host,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            }
        }

        // Layer 3: Explicit config file, must exist
        if let Some(path) = config_path {
            let (value, digest) = Self::load_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 4: CLI overrides
        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let defaults = Defaults::try_from(merged)?;

        log::debug!("effective defaults built from {} source(s)", sources.len());

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            defaults,
            sources,
        })
    }

    /// Default host config path: `$REST_ENDPOINT_CONFIG`, else
    /// `~/.config/rest-endpoint/defaults.toml`
    pub fn default_host_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config/rest-endpoint/defaults.toml"))
    }

    /// Load and parse a TOML or JSON file, returning the value and digest
    fn load_file(path: &Path) -> Result<(Parameters, String), ConfigError> {
        let bytes = fs::read(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let value = if is_json {
            serde_json::from_str::<Value>(&contents)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?
        } else {
            let toml_value: toml::Value = toml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;
            toml_to_json(toml_value)
        };

        match value {
            Value::Object(map) => Ok((map, digest)),
            _ => Err(ConfigError::ParseError(format!(
                "{}: top level must be a table",
                path.display()
            ))),
        }
    }

    /// Defaults as JSON with secret values masked, plus the masked key paths
    pub fn redacted(&self) -> (Value, Vec<String>) {
        let mut value = Value::Object(self.defaults.as_map().clone());
        let mut redactions = Vec::new();
        redact_recursive(&mut value, String::new(), &mut redactions);
        (value, redactions)
    }

    /// Provenance report: schema, sources and redacted defaults
    pub fn to_report(&self) -> Value {
        let (config, redactions) = self.redacted();
        serde_json::json!({
            "schema_version": self.schema_version,
            "schema_id": self.schema_id,
            "created_at": self.created_at,
            "config": config,
            "sources": self.sources,
            "redactions": redactions,
        })
    }
}

/// Merge configuration layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Parameters>) -> Parameters {
    layers
        .into_iter()
        .fold(None, |acc: Option<Parameters>, layer| {
            Some(merge_parameters(acc.as_ref(), layer))
        })
        .unwrap_or_default()
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

fn redact_recursive(value: &mut Value, path: String, redactions: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (key, val) in map.iter_mut() {
            let key_lower = key.to_lowercase();
            let current_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", path, key)
            };

            let is_secret = SECRET_KEYS.iter().any(|s| key_lower.contains(s));

            if is_secret && !val.is_object() && !val.is_array() {
                *val = Value::String("[REDACTED]".to_string());
                redactions.push(current_path);
            } else {
                redact_recursive(val, current_path, redactions);
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] DefaultsError),
}
