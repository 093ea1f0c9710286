//! Timestamp normalization: window snapping and timezone rewriting.

use std::fmt::{Display, Write};

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, TimeZone};
use chrono_tz::Tz;

use crate::error::RuleError;
use crate::node::Node;
use crate::rule::Rule;

/// How a rewritten timestamp is rendered back into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputLayout {
    /// RFC 3339 with whole seconds and a numeric offset, `Z` for UTC:
    /// `2012-01-04T00:00:00+02:00`.
    #[default]
    Rfc3339,
    /// RFC 3339 keeping sub-second precision (0, 3, 6 or 9 digits).
    Rfc3339Fractional,
    /// A chrono `strftime` format string, e.g. `%Y-%m-%d %H:%M:%S %:z`.
    Strftime(String),
}

impl OutputLayout {
    pub fn format<Z>(&self, time: &DateTime<Z>) -> Result<String, RuleError>
    where
        Z: TimeZone,
        Z::Offset: Display,
    {
        match self {
            Self::Rfc3339 => Ok(time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Rfc3339Fractional => Ok(time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Strftime(layout) => {
                let mut out = String::new();
                write!(out, "{}", time.format(layout))
                    .map_err(|_| RuleError::Format { layout: layout.clone() })?;
                Ok(out)
            }
        }
    }
}

/// Rewrites RFC 3339 timestamp strings.
///
/// Two independent steps run on every matched value:
///
/// 1. *Window snap*: when an anchor is configured and the value lies strictly
///    inside `(anchor - window_before, anchor + window_after)`, the value is
///    replaced by the anchor. A value equal to the anchor is left alone.
/// 2. *Timezone rewrite*: when a timezone is configured, the (possibly
///    snapped) instant is converted into it.
///
/// The node is only written when at least one step fired. Without a target
/// timezone a snapped value keeps the offset the anchor was given with.
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use jsonnorm::TimestampRule;
///
/// let rule = TimestampRule::new(["$..['status_modified']"])
///     .timezone(chrono_tz::Europe::Kyiv)
///     .anchor(Utc.with_ymd_and_hms(2012, 1, 3, 22, 0, 0).unwrap())
///     .window_before(Duration::seconds(10));
///
/// assert_eq!(
///     rule.normalize_str("2012-01-03T23:59:55+02:00").unwrap().as_deref(),
///     Some("2012-01-04T00:00:00+02:00"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampRule {
    paths: Vec<String>,
    timezone: Option<Tz>,
    anchor: Option<DateTime<FixedOffset>>,
    window_before: Duration,
    window_after: Duration,
    layout: OutputLayout,
}

impl TimestampRule {
    /// A rule over `paths` that changes nothing until configured.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            timezone: None,
            anchor: None,
            window_before: Duration::zero(),
            window_after: Duration::zero(),
            layout: OutputLayout::default(),
        }
    }

    pub fn timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Set the target timezone by IANA name, e.g. `Europe/Kyiv`.
    pub fn timezone_name(self, name: &str) -> Result<Self, RuleError> {
        let timezone = name
            .parse::<Tz>()
            .map_err(|_| RuleError::UnknownTimezone(name.to_string()))?;
        Ok(self.timezone(timezone))
    }

    pub fn anchor(mut self, anchor: impl Into<DateTime<FixedOffset>>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn window_before(mut self, window: Duration) -> Self {
        self.window_before = window;
        self
    }

    pub fn window_after(mut self, window: Duration) -> Self {
        self.window_after = window;
        self
    }

    pub fn layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn target_timezone(&self) -> Option<Tz> {
        self.timezone
    }

    pub fn anchor_time(&self) -> Option<DateTime<FixedOffset>> {
        self.anchor
    }

    pub fn output_layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Normalize one parsed timestamp.
    ///
    /// Returns the replacement text, or `None` when the value must be left
    /// as it is.
    pub fn normalize(&self, time: DateTime<FixedOffset>) -> Result<Option<String>, RuleError> {
        let mut replace = false;
        let mut result = time;

        if let Some(anchor) = self.anchor {
            if self.in_window(time, anchor) {
                result = anchor;
                replace = true;
            }
        }

        match self.timezone {
            Some(tz) => self.layout.format(&result.with_timezone(&tz)).map(Some),
            None if replace => self.layout.format(&result).map(Some),
            None => Ok(None),
        }
    }

    /// Parse `value` as RFC 3339 and [`normalize`](Self::normalize) it.
    pub fn normalize_str(&self, value: &str) -> Result<Option<String>, RuleError> {
        let time = DateTime::parse_from_rfc3339(value).map_err(|source| RuleError::Parse {
            value: value.to_string(),
            source,
        })?;
        self.normalize(time)
    }

    /// Strict containment in the open window around `anchor`.
    ///
    /// A window bound that falls outside chrono's representable range leaves
    /// that side unbounded.
    fn in_window(&self, time: DateTime<FixedOffset>, anchor: DateTime<FixedOffset>) -> bool {
        if time == anchor {
            return false;
        }
        let after_start = anchor
            .checked_sub_signed(self.window_before)
            .map_or(true, |start| time > start);
        let before_end = anchor
            .checked_add_signed(self.window_after)
            .map_or(true, |end| time < end);
        after_start && before_end
    }
}

impl Rule for TimestampRule {
    fn paths(&self) -> &[String] {
        &self.paths
    }

    fn apply(&self, node: &mut dyn Node) -> Result<(), RuleError> {
        let value = node.get_string().map_err(RuleError::Extraction)?;
        let Some(normalized) = self.normalize_str(value)? else {
            return Ok(());
        };
        node.set_string(normalized).map_err(RuleError::Replacement)
    }
}
