//! REST endpoint defaults and option merging
//!
//! This crate combines endpoint defaults, a route such as
//! `"GET /orgs/:org"` and call parameters into one options object, ready
//! for a downstream step that expands URL templates and builds the request.

pub mod cli;
pub mod config;
pub mod endpoint;

pub use config::{BuiltinDefaults, ConfigError, EffectiveDefaults};
pub use endpoint::{Endpoint, EndpointError};
pub use endpoint_merge::{
    deep_merge, lowercase_keys, merge, merge_parameters, Defaults, DefaultsError, MediaType,
    Method, Parameters, Route,
};
