//! Normalization of volatile values in JSON documents.
//!
//! Two JSON documents that differ only in volatile fields (creation times,
//! server-local timezones, ...) can be made comparable by running the same
//! list of rules over both. A [`Rule`] selects nodes with JSONPath
//! expressions and rewrites their values in place; [`TimestampRule`] is the
//! builtin policy for RFC 3339 timestamps.
//!
//! Rules run in order against a single live tree: each path expression is
//! resolved against the values left by everything that ran before it. The
//! first failure aborts the whole pass.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use jsonnorm::{Normalizer, NormalizerOptions, TimestampRule};
//!
//! let doc = r#"{"created": "2012-01-03T00:00:00+02:00", "seen": "2012-01-03T23:59:55+02:00"}"#;
//!
//! let mut normalizer = Normalizer::new(doc).options(NormalizerOptions { pretty: false });
//! normalizer
//!     .add_rule(TimestampRule::new(["$.created"]).timezone(chrono_tz::Tz::UTC))
//!     .add_rule(
//!         TimestampRule::new(["$.seen"])
//!             .anchor(Utc.with_ymd_and_hms(2012, 1, 3, 22, 0, 0).unwrap())
//!             .window_before(Duration::seconds(10)),
//!     );
//!
//! assert_eq!(
//!     normalizer.apply().unwrap(),
//!     r#"{"created":"2012-01-02T22:00:00Z","seen":"2012-01-03T22:00:00Z"}"#,
//! );
//! ```

mod error;
pub use error::{NodeError, NormalizeError, ResolveError, RuleError};

mod node;
pub use node::{Node, ValueNode};

mod resolver;
pub use resolver::{JsonPathResolver, PathResolver};

mod rule;
pub use rule::Rule;

mod timestamp;
pub use timestamp::{OutputLayout, TimestampRule};

mod normalizer;
pub use normalizer::{Normalizer, NormalizerOptions};

pub use jsonnorm_json_path::NormalizedPath;
