//! JSONPath (RFC 9535) parsing and evaluation over `serde_json` documents.
//!
//! Supported: the root identifier, member names in dot and bracket form,
//! unions of several selectors in one bracket, wildcards, indices, slices and
//! descendant segments (`..`). Filter selectors are rejected at parse time.
//!
//! Evaluation can return either references to the matched values or their
//! normalized paths. The latter is what lets a caller rewrite matches in
//! place.
//!
//! # Example
//!
//! ```
//! use jsonnorm_json_path::{JsonPathEval, JsonPathParser};
//! use serde_json::json;
//!
//! let path = JsonPathParser::parse("$.store.books[*].['author','title']").unwrap();
//! let mut doc = json!({
//!     "store": {
//!         "books": [
//!             {"author": "Nigel Rees", "title": "Sayings of the Century"},
//!             {"author": "Evelyn Waugh", "title": "Sword of Honour"}
//!         ]
//!     }
//! });
//!
//! assert_eq!(JsonPathEval::eval(&path, &doc).len(), 4);
//!
//! for location in JsonPathEval::locate(&path, &doc) {
//!     if let Some(value) = location.get_mut(&mut doc) {
//!         *value = json!("redacted");
//!     }
//! }
//! assert_eq!(doc["store"]["books"][1]["title"], json!("redacted"));
//! ```

mod types;
pub use types::*;

mod parser;
pub use parser::{JsonPathParser, ParseError};

mod eval;
pub use eval::JsonPathEval;

mod util;
pub use util::format_normalized_path;
