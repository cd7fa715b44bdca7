//! Endpoint defaults configuration
//!
//! Implements the 4-layer defaults merge:
//! 1. Built-in defaults
//! 2. Host/user config (~/.config/rest-endpoint/defaults.toml)
//! 3. Explicit config file (--config, TOML or JSON)
//! 4. CLI flags

mod defaults;
mod effective;

pub use defaults::{default_user_agent, BuiltinDefaults};
pub use effective::{
    merge_layers, ConfigError, ConfigOrigin, ConfigSource, EffectiveDefaults, CONFIG_ENV,
};
