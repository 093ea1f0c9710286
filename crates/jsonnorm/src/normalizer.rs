//! Rule application over a whole document.

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{NormalizeError, ResolveError};
use crate::node::ValueNode;
use crate::resolver::{JsonPathResolver, PathResolver};
use crate::rule::Rule;

/// Output options for [`Normalizer::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerOptions {
    /// Pretty-print with two-space indentation. When `false` the output is
    /// compact.
    pub pretty: bool,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Applies an ordered list of rules to a JSON document.
///
/// The document text is fixed at construction and re-parsed on every
/// [`apply`](Self::apply), so repeated calls produce the same output and a
/// normalizer can be shared between threads.
pub struct Normalizer<R = JsonPathResolver> {
    document: String,
    rules: Vec<Box<dyn Rule>>,
    resolver: R,
    options: NormalizerOptions,
}

impl Normalizer {
    pub fn new(document: impl Into<String>) -> Self {
        Self::with_resolver(document, JsonPathResolver)
    }

    pub fn with_rules<I>(document: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Rule>>,
    {
        let mut normalizer = Self::new(document);
        normalizer.rules.extend(rules);
        normalizer
    }
}

impl<R: PathResolver> Normalizer<R> {
    pub fn with_resolver(document: impl Into<String>, resolver: R) -> Self {
        Self {
            document: document.into(),
            rules: Vec::new(),
            resolver,
            options: NormalizerOptions::default(),
        }
    }

    pub fn options(mut self, options: NormalizerOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a rule after the existing ones.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Parse the document, run every rule and serialize the result.
    pub fn apply(&self) -> Result<String, NormalizeError> {
        let mut root: Value =
            serde_json::from_str(&self.document).map_err(NormalizeError::DocumentParse)?;
        self.apply_to_value(&mut root)?;

        let output = if self.options.pretty {
            serde_json::to_string_pretty(&root)
        } else {
            serde_json::to_string(&root)
        };
        output.map_err(NormalizeError::Serialize)
    }

    /// Run every rule against an already parsed tree.
    ///
    /// Rules run in list order and each rule's expressions in their own
    /// order. Every expression is resolved against the tree as left by the
    /// previous step. The first failure aborts the pass; `root` may then hold
    /// a partially normalized tree.
    pub fn apply_to_value(&self, root: &mut Value) -> Result<(), NormalizeError> {
        for (index, rule) in self.rules.iter().enumerate() {
            for expression in rule.paths() {
                let locations = match self.resolver.resolve(expression, root) {
                    Ok(locations) => locations,
                    Err(source) => {
                        debug!(rule = index, %expression, error = %source, "path resolution failed");
                        return Err(NormalizeError::PathResolution {
                            rule: index,
                            expression: expression.clone(),
                            source,
                        });
                    }
                };
                debug!(rule = index, %expression, matches = locations.len(), "resolved");

                for location in locations {
                    let Some(target) = location.get_mut(root) else {
                        return Err(NormalizeError::PathResolution {
                            rule: index,
                            expression: expression.clone(),
                            source: ResolveError::Dangling(location),
                        });
                    };
                    let mut node = ValueNode::new(target);
                    if let Err(source) = rule.apply(&mut node) {
                        debug!(rule = index, %expression, %location, error = %source, "rule failed");
                        return Err(NormalizeError::Rule {
                            rule: index,
                            expression: expression.clone(),
                            location,
                            source,
                        });
                    }
                    trace!(rule = index, %location, value = %node.value(), "applied");
                }
            }
        }
        Ok(())
    }
}
