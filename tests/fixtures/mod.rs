//! Test fixtures for golden merge assertions
//!
//! The merge corpus pairs (defaults, route, parameters) inputs with the
//! exact options object they must produce.

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Path to the merge corpus fixture
pub fn merge_corpus_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/merge_corpus/corpus.json")
}

/// One merge case from corpus.json
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MergeTestCase {
    pub id: String,
    pub description: String,
    /// Replaces the corpus-wide defaults for this case
    #[serde(default)]
    pub defaults: Option<Value>,
    /// Merge without any defaults
    #[serde(default)]
    pub no_defaults: bool,
    pub route: Value,
    #[serde(default)]
    pub parameters: Option<Value>,
    pub expected: Value,
}

/// Full merge corpus
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MergeCorpus {
    pub defaults: Value,
    pub cases: Vec<MergeTestCase>,
}

/// Load the merge corpus
pub fn load_merge_corpus() -> MergeCorpus {
    let content = std::fs::read_to_string(merge_corpus_path()).expect("read merge corpus");
    serde_json::from_str(&content).expect("parse merge corpus")
}
