use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use jsonnorm::{
    Node, NodeError, NormalizeError, Normalizer, NormalizerOptions, ResolveError, Rule, RuleError,
    TimestampRule,
};
use serde_json::Value;

const CAMPAIGNS: &str = r#"{
    "campaigns": [
        {
            "status_modified": "2012-01-04T00:00:00+02:00",
            "date_modified": "2012-01-04T00:00:00+02:00",
            "date_created": "2012-01-03T00:00:00+02:00",
            "status": 0,
            "period_end": "2012-01-02T00:00:00+02:00",
            "period_start": "2012-01-01T00:00:00+02:00",
            "campaign_id": 100
        },
        {
            "status_modified": "2012-01-03T23:59:55+02:00",
            "date_modified": "2012-01-04T00:00:00+02:00",
            "date_created": "2012-01-03T00:00:00+02:00",
            "status": 0,
            "period_end": "2012-01-02T00:00:00+02:00",
            "period_start": "2012-01-01T00:00:00+02:00",
            "campaign_id": 100
        }
    ]
}"#;

const CAMPAIGNS_NORMALIZED: &str = r#"{
  "campaigns": [
    {
      "status_modified": "2012-01-04T00:00:00+02:00",
      "date_modified": "2012-01-04T00:00:00+02:00",
      "date_created": "2012-01-02T22:00:00Z",
      "status": 0,
      "period_end": "2012-01-01T22:00:00Z",
      "period_start": "2011-12-31T22:00:00Z",
      "campaign_id": 100
    },
    {
      "status_modified": "2012-01-04T00:00:00+02:00",
      "date_modified": "2012-01-04T00:00:00+02:00",
      "date_created": "2012-01-02T22:00:00Z",
      "status": 0,
      "period_end": "2012-01-01T22:00:00Z",
      "period_start": "2011-12-31T22:00:00Z",
      "campaign_id": 100
    }
  ]
}"#;

fn campaigns_normalizer() -> Normalizer {
    let mut normalizer = Normalizer::new(CAMPAIGNS);
    normalizer
        .add_rule(
            TimestampRule::new([
                "$.campaigns[*].['period_end','period_start']",
                "$.campaigns[*].['date_created']",
            ])
            .timezone(Tz::UTC),
        )
        .add_rule(
            TimestampRule::new(["$..['status_modified']"])
                .timezone(chrono_tz::Europe::Kyiv)
                .anchor(Utc.with_ymd_and_hms(2012, 1, 3, 22, 0, 0).unwrap())
                .window_before(Duration::seconds(10)),
        );
    normalizer
}

/// Appends a marker to every matched string.
struct Mark(Vec<String>);

impl Rule for Mark {
    fn paths(&self) -> &[String] {
        &self.0
    }

    fn apply(&self, node: &mut dyn Node) -> Result<(), RuleError> {
        let marked = format!("{}!", node.get_string().map_err(RuleError::Extraction)?);
        node.set_string(marked).map_err(RuleError::Replacement)
    }
}

/// Rejects every node it is given.
struct Reject(Vec<String>);

impl Rule for Reject {
    fn paths(&self) -> &[String] {
        &self.0
    }

    fn apply(&self, _node: &mut dyn Node) -> Result<(), RuleError> {
        Err(RuleError::Custom("rejected".into()))
    }
}

#[test]
fn recorded_fixture_scenario() {
    let output = campaigns_normalizer().apply().unwrap();
    assert_eq!(output, CAMPAIGNS_NORMALIZED);

    let output: Value = serde_json::from_str(&output).unwrap();
    let expected: Value = serde_json::from_str(CAMPAIGNS_NORMALIZED).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn apply_is_repeatable_and_keeps_document() {
    let normalizer = campaigns_normalizer();
    let first = normalizer.apply().unwrap();
    let second = normalizer.apply().unwrap();
    assert_eq!(first, second);
    assert_eq!(normalizer.document(), CAMPAIGNS);
}

#[test]
fn later_rules_see_earlier_mutations() {
    let doc = r#"{"t":"2012-01-02T00:00:00+02:00"}"#;
    let compact = NormalizerOptions { pretty: false };

    let mut normalizer = Normalizer::new(doc).options(compact);
    normalizer
        .add_rule(TimestampRule::new(["$.t"]).timezone(Tz::UTC))
        .add_rule(Mark(vec!["$.t".into()]));
    assert_eq!(normalizer.apply().unwrap(), r#"{"t":"2012-01-01T22:00:00Z!"}"#);

    // Reversed, the timestamp rule sees the marked value and cannot parse it.
    let mut reversed = Normalizer::new(doc).options(compact);
    reversed
        .add_rule(Mark(vec!["$.t".into()]))
        .add_rule(TimestampRule::new(["$.t"]).timezone(Tz::UTC));
    let err = reversed.apply().unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::Rule { rule: 1, source: RuleError::Parse { ref value, .. }, .. }
            if value == "2012-01-02T00:00:00+02:00!"
    ));
}

#[test]
fn expressions_of_one_rule_apply_in_order() {
    let mut normalizer =
        Normalizer::new(r#"{"a":"x","b":"y"}"#).options(NormalizerOptions { pretty: false });
    normalizer.add_rule(Mark(vec!["$.a".into(), "$.*".into(), "$['a','a']".into()]));
    assert_eq!(normalizer.apply().unwrap(), r#"{"a":"x!!!!","b":"y!"}"#);
}

#[test]
fn untouched_fields_keep_type_and_precision() {
    let doc = r#"{"price":1.50,"big":123456789012345678901234567890,"flag":false,"none":null,"t":"2012-01-02T00:00:00+02:00"}"#;
    let mut normalizer = Normalizer::new(doc).options(NormalizerOptions { pretty: false });
    normalizer.add_rule(TimestampRule::new(["$.t"]).timezone(Tz::UTC));
    assert_eq!(
        normalizer.apply().unwrap(),
        r#"{"price":1.50,"big":123456789012345678901234567890,"flag":false,"none":null,"t":"2012-01-01T22:00:00Z"}"#
    );
}

#[test]
fn exponent_literals_are_canonicalized() {
    let doc = r#"{"exp":1e3,"neg":2.5E-7,"signed":4e+2}"#;
    let mut normalizer = Normalizer::new(doc).options(NormalizerOptions { pretty: false });
    normalizer.add_rule(TimestampRule::new(["$.t"]).timezone(Tz::UTC));
    assert_eq!(
        normalizer.apply().unwrap(),
        r#"{"exp":1e+3,"neg":2.5e-7,"signed":4e+2}"#
    );
}

#[test]
fn extreme_slice_steps_resolve_without_overflow() {
    let doc = r#"{"a":["x","2012-01-02T00:00:00+02:00","y"]}"#;
    let mut normalizer = Normalizer::new(doc).options(NormalizerOptions { pretty: false });
    normalizer
        .add_rule(TimestampRule::new(["$.a[1::9223372036854775807]"]).timezone(Tz::UTC))
        .add_rule(Mark(vec!["$.a[::-9223372036854775808]".into()]));
    assert_eq!(
        normalizer.apply().unwrap(),
        r#"{"a":["x","2012-01-01T22:00:00Z","y!"]}"#
    );
}

#[test]
fn invalid_document_is_rejected() {
    let normalizer = Normalizer::new(r#"{"a": "#);
    assert!(matches!(normalizer.apply(), Err(NormalizeError::DocumentParse(_))));
}

#[test]
fn malformed_expression_aborts() {
    let mut normalizer = Normalizer::new(CAMPAIGNS);
    normalizer
        .add_rule(TimestampRule::new(["$.campaigns[*].date_created"]).timezone(Tz::UTC))
        .add_rule(TimestampRule::new(["campaigns[*]"]).timezone(Tz::UTC));
    let err = normalizer.apply().unwrap_err();
    assert!(matches!(
        err,
        NormalizeError::PathResolution { rule: 1, ref expression, source: ResolveError::Syntax(_) }
            if expression == "campaigns[*]"
    ));
}

#[test]
fn non_string_match_aborts_with_location() {
    let mut normalizer = Normalizer::new(CAMPAIGNS);
    normalizer.add_rule(TimestampRule::new(["$.campaigns[*].status"]).timezone(Tz::UTC));
    let err = normalizer.apply().unwrap_err();
    match err {
        NormalizeError::Rule { rule, expression, location, source } => {
            assert_eq!(rule, 0);
            assert_eq!(expression, "$.campaigns[*].status");
            assert_eq!(location.to_string(), "$['campaigns'][0]['status']");
            assert!(matches!(
                source,
                RuleError::Extraction(NodeError::NotAString { found: "number" })
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unmatched_expressions_are_not_errors() {
    let mut normalizer = Normalizer::new(CAMPAIGNS);
    normalizer.add_rule(TimestampRule::new(["$.nothing[*]", "$..missing"]).timezone(Tz::UTC));
    let output: Value = serde_json::from_str(&normalizer.apply().unwrap()).unwrap();
    let input: Value = serde_json::from_str(CAMPAIGNS).unwrap();
    assert_eq!(output, input);
}

#[test]
fn custom_rules_plug_in_as_trait_objects() {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(TimestampRule::new(["$.t"]).timezone(Tz::UTC)),
        Box::new(Reject(vec!["$.*".into()])),
    ];
    let normalizer = Normalizer::with_rules(r#"{"t":"2012-01-02T00:00:00+02:00"}"#, rules);
    assert_eq!(normalizer.rules().len(), 2);

    let err = normalizer.apply().unwrap_err();
    assert_eq!(err.to_string(), "rule #1: \"$.*\" at $['t']: rejected");
}

#[test]
fn shared_normalizer_applies_from_many_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let normalizer = campaigns_normalizer();
    assert_send_sync(&normalizer);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| normalizer.apply())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), CAMPAIGNS_NORMALIZED);
        }
    });
}
