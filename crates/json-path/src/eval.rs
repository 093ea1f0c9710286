//! JSONPath evaluator.

use crate::types::*;
use serde_json::Value;

/// A matched node together with its location.
type Match<'a> = (NormalizedPath, &'a Value);

/// JSONPath evaluator.
pub struct JsonPathEval;

impl JsonPathEval {
    /// Evaluate a JSONPath against a JSON document.
    ///
    /// Returns references to the matching values, in result order.
    pub fn eval<'a>(path: &JSONPath, doc: &'a Value) -> Vec<&'a Value> {
        Self::matches(path, doc).into_iter().map(|(_, value)| value).collect()
    }

    /// Evaluate a JSONPath and return the normalized path of every match.
    ///
    /// The returned locations can be turned into mutable references one at a
    /// time with [`NormalizedPath::get_mut`], which is how callers rewrite
    /// matched values without holding a borrow over the whole result set.
    pub fn locate(path: &JSONPath, doc: &Value) -> Vec<NormalizedPath> {
        Self::matches(path, doc).into_iter().map(|(location, _)| location).collect()
    }

    fn matches<'a>(path: &JSONPath, doc: &'a Value) -> Vec<Match<'a>> {
        let mut results: Vec<Match<'a>> = vec![(NormalizedPath::default(), doc)];

        for segment in &path.segments {
            let mut next = Vec::new();
            for (location, value) in &results {
                let value = *value;
                if segment.recursive {
                    Self::eval_descendants(value, &segment.selectors, location, &mut next);
                } else {
                    Self::eval_selectors(value, &segment.selectors, location, &mut next);
                }
            }
            results = next;
        }

        results
    }

    fn eval_selectors<'a>(
        value: &'a Value,
        selectors: &[Selector],
        location: &NormalizedPath,
        out: &mut Vec<Match<'a>>,
    ) {
        for selector in selectors {
            Self::eval_selector(value, selector, location, out);
        }
    }

    /// Visits `value` and then every descendant in document order, applying
    /// the segment's selectors at each visited node.
    fn eval_descendants<'a>(
        value: &'a Value,
        selectors: &[Selector],
        location: &NormalizedPath,
        out: &mut Vec<Match<'a>>,
    ) {
        Self::eval_selectors(value, selectors, location, out);

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_location = location.child(PathComponent::Key(key.clone()));
                    Self::eval_descendants(child, selectors, &child_location, out);
                }
            }
            Value::Array(arr) => {
                for (idx, child) in arr.iter().enumerate() {
                    let child_location = location.child(PathComponent::Index(idx));
                    Self::eval_descendants(child, selectors, &child_location, out);
                }
            }
            _ => {}
        }
    }

    fn eval_selector<'a>(
        value: &'a Value,
        selector: &Selector,
        location: &NormalizedPath,
        out: &mut Vec<Match<'a>>,
    ) {
        match selector {
            Selector::Name(name) => {
                if let Some(child) = value.as_object().and_then(|map| map.get(name)) {
                    out.push((location.child(PathComponent::Key(name.clone())), child));
                }
            }
            Selector::Index(index) => {
                if let Value::Array(arr) = value {
                    if let Some(idx) = Self::resolve_index(*index, arr.len()) {
                        out.push((location.child(PathComponent::Index(idx)), &arr[idx]));
                    }
                }
            }
            Selector::Wildcard => match value {
                Value::Object(map) => {
                    for (key, child) in map {
                        out.push((location.child(PathComponent::Key(key.clone())), child));
                    }
                }
                Value::Array(arr) => {
                    for (idx, child) in arr.iter().enumerate() {
                        out.push((location.child(PathComponent::Index(idx)), child));
                    }
                }
                _ => {}
            },
            Selector::Slice { start, end, step } => {
                if let Value::Array(arr) = value {
                    for idx in Self::slice_indices(*start, *end, *step, arr.len()) {
                        out.push((location.child(PathComponent::Index(idx)), &arr[idx]));
                    }
                }
            }
        }
    }

    fn resolve_index(index: isize, len: usize) -> Option<usize> {
        let len = len as isize;
        let idx = if index < 0 { len + index } else { index };
        (0..len).contains(&idx).then_some(idx as usize)
    }

    /// Array indices selected by a slice, per RFC 9535 section 2.3.4.2.
    fn slice_indices(
        start: Option<isize>,
        end: Option<isize>,
        step: Option<isize>,
        len: usize,
    ) -> Vec<usize> {
        let len = len as isize;
        let step = step.unwrap_or(1);
        if step == 0 {
            return Vec::new();
        }

        let normalize = |i: isize| if i >= 0 { i } else { len + i };
        let mut indices = Vec::new();

        if step > 0 {
            let lower = normalize(start.unwrap_or(0)).clamp(0, len);
            let upper = normalize(end.unwrap_or(len)).clamp(0, len);
            let mut i = lower;
            while i < upper {
                indices.push(i as usize);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        } else {
            let upper = start.map_or(len - 1, normalize).clamp(-1, len - 1);
            let lower = end.map_or(-1, normalize).clamp(-1, len - 1);
            let mut i = upper;
            while lower < i {
                indices.push(i as usize);
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        }

        indices
    }
}
