//! Error types for document normalization.

use jsonnorm_json_path::{NormalizedPath, ParseError};
use thiserror::Error;

/// Failure reading or writing a single tree node.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("expected a string value, found {found}")]
    NotAString { found: &'static str },
}

/// Failure resolving a path expression against the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed path expression: {0}")]
    Syntax(#[from] ParseError),
    #[error("matched node at {0} is no longer reachable")]
    Dangling(NormalizedPath),
}

/// Failure raised by a rule while rewriting one node.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("cannot get string from node: {0}")]
    Extraction(#[source] NodeError),
    #[error("cannot parse time from node value {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("cannot format time with layout {layout:?}")]
    Format { layout: String },
    #[error("cannot set string to node: {0}")]
    Replacement(#[source] NodeError),
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
    #[error("{0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure of a whole normalization pass.
///
/// The first failure aborts the pass, so at most one of these is produced
/// per call and no partially normalized output is ever returned.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("cannot parse document: {0}")]
    DocumentParse(#[source] serde_json::Error),
    #[error("rule #{rule}: cannot resolve {expression:?}: {source}")]
    PathResolution {
        rule: usize,
        expression: String,
        #[source]
        source: ResolveError,
    },
    #[error("rule #{rule}: {expression:?} at {location}: {source}")]
    Rule {
        rule: usize,
        expression: String,
        location: NormalizedPath,
        #[source]
        source: RuleError,
    },
    #[error("cannot serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}
