//! Path expression resolution.

use jsonnorm_json_path::{JsonPathEval, JsonPathParser, NormalizedPath};
use serde_json::Value;

use crate::error::ResolveError;

/// Resolves a path expression to the ordered locations of its matches.
///
/// Resolution always runs against the tree as it is at call time, so a
/// resolver must not cache results between calls.
pub trait PathResolver: Send + Sync {
    fn resolve(&self, expression: &str, root: &Value) -> Result<Vec<NormalizedPath>, ResolveError>;
}

/// Default resolver backed by the JSONPath crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathResolver;

impl PathResolver for JsonPathResolver {
    fn resolve(&self, expression: &str, root: &Value) -> Result<Vec<NormalizedPath>, ResolveError> {
        let path = JsonPathParser::parse(expression)?;
        Ok(JsonPathEval::locate(&path, root))
    }
}
