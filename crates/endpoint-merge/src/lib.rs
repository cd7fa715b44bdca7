//! Endpoint option merging for REST clients.
//!
//! Turns a route shorthand such as `"GET /orgs/:org"` (or a full parameter
//! object) plus call parameters into one options object layered over the
//! endpoint defaults. Header names come out lowercase and
//! `mediaType.previews` accumulates instead of being replaced.

mod headers;
mod merge;
mod previews;
mod route;
mod types;

pub use headers::lowercase_keys;
pub use merge::{deep_merge, is_mergeable, merge, merge_maps, merge_parameters};
pub use previews::{merge_previews, strip_preview_suffix};
pub use route::{normalize_route, parse_shorthand, Route};
pub use types::{Defaults, DefaultsError, MediaType, Method, Parameters};
