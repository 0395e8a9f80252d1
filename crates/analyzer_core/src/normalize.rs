//! Maps whatever JSON the analysis backend returns onto [`AnalysisResult`].
//!
//! Backend revisions disagree on field names (`HTMLVersion` vs `htmlVersion`,
//! `IsLoginForm` vs `isLogingForm`) and on shapes (link counts vs link lists,
//! heading maps vs parallel arrays vs a summary string). Every field has a
//! default, so normalization cannot fail: a field of the wrong type degrades
//! to its default instead of poisoning the whole result.

use serde_json::{Map, Value};

use crate::{AnalysisResult, HeadingCounts, LinkTally};

const URL_KEYS: &[&str] = &["url", "URL", "sourceUrl", "source_url"];
const TITLE_KEYS: &[&str] = &["title"];
const HTML_VERSION_KEYS: &[&str] = &["htmlVersion", "HTMLVersion", "html_version"];
const LOGIN_FORM_KEYS: &[&str] = &[
    "hasLoginForm",
    "IsLoginForm",
    "isLogingForm",
    "has_login_form",
];
const HEADING_COUNT_KEYS: &[&str] = &["headCount", "headingCounts", "heading_counts"];
const HEADING_LEVEL_KEYS: &[&str] = &["headLevels", "headingLevels"];
const HEADING_SUMMARY_KEYS: &[&str] = &["headingsSummary", "headingSummary"];
const ACCESSIBLE_LINK_KEYS: &[&str] = &["AccessibleLinks", "AccessbleLinks", "accessibleLinks"];
const INACCESSIBLE_LINK_KEYS: &[&str] = &[
    "InAccessibleLinks",
    "InaccessbleLinks",
    "inaccessibleLinks",
];

/// Normalize a raw backend payload. `fallback_url` is used when the backend
/// does not echo the analyzed URL.
pub fn normalize(raw: &Value, fallback_url: &str) -> AnalysisResult {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    AnalysisResult {
        source_url: lookup(fields, URL_KEYS)
            .and_then(non_empty_string)
            .unwrap_or_else(|| fallback_url.to_string()),
        title: lookup(fields, TITLE_KEYS).and_then(non_empty_string),
        html_version: lookup(fields, HTML_VERSION_KEYS).and_then(non_empty_string),
        has_login_form: lookup(fields, LOGIN_FORM_KEYS)
            .map(coerce_bool)
            .unwrap_or(false),
        heading_counts: heading_counts(fields),
        headings_summary: lookup(fields, HEADING_SUMMARY_KEYS).and_then(non_empty_string),
        accessible_links: link_tally(lookup(fields, ACCESSIBLE_LINK_KEYS)),
        inaccessible_links: link_tally(lookup(fields, INACCESSIBLE_LINK_KEYS)),
    }
}

/// First non-null field among `keys`. Exact spellings are tried before
/// case-insensitive ones so a documented key always beats a near miss.
fn lookup<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| fields.get(*key).filter(|value| !value.is_null()))
        .or_else(|| {
            keys.iter().find_map(|key| {
                fields
                    .iter()
                    .find(|(name, value)| name.eq_ignore_ascii_case(key) && !value.is_null())
                    .map(|(_, value)| value)
            })
        })
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn as_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    // Some serializers emit whole numbers as floats (`3.0`).
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => {
            let text = text.trim();
            text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("yes") || text == "1"
        }
        _ => false,
    }
}

fn heading_counts(fields: &Map<String, Value>) -> HeadingCounts {
    match lookup(fields, HEADING_COUNT_KEYS) {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(tag, count)| as_count(count).map(|count| (tag.clone(), count)))
            .collect(),
        Some(Value::Array(counts)) => {
            // Parallel arrays: `headCount[i]` occurrences of `headLevels[i]`.
            let levels: Vec<Option<&str>> = match lookup(fields, HEADING_LEVEL_KEYS) {
                Some(Value::Array(levels)) => levels.iter().map(Value::as_str).collect(),
                _ => Vec::new(),
            };
            let mut headings = HeadingCounts::new();
            for (index, count) in counts.iter().enumerate() {
                let Some(count) = as_count(count) else {
                    continue;
                };
                let tag = levels
                    .get(index)
                    .copied()
                    .flatten()
                    .filter(|tag| !tag.is_empty())
                    .map(ToOwned::to_owned)
                    .unwrap_or_else(|| format!("h{}", index + 1));
                let total = headings.entry(tag).or_insert(0);
                *total = total.saturating_add(count);
            }
            headings
        }
        _ => HeadingCounts::new(),
    }
}

fn link_tally(value: Option<&Value>) -> LinkTally {
    match value {
        Some(Value::Array(items)) => LinkTally::Urls(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect(),
        ),
        Some(other) => as_count(other).map(LinkTally::Count).unwrap_or_default(),
        None => LinkTally::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_key_beats_case_insensitive_match() {
        let raw = json!({ "Title": "shouted", "title": "quiet" });
        assert_eq!(normalize(&raw, "x").title.as_deref(), Some("quiet"));

        let raw = json!({ "TITLE": "shouted" });
        assert_eq!(normalize(&raw, "x").title.as_deref(), Some("shouted"));
    }

    #[test]
    fn null_fields_fall_through_to_the_next_spelling() {
        let raw = json!({ "htmlVersion": null, "HTMLVersion": "HTML 4.01" });
        assert_eq!(
            normalize(&raw, "x").html_version.as_deref(),
            Some("HTML 4.01")
        );
    }

    #[test]
    fn login_flag_coercion() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!(1)));
        assert!(coerce_bool(&json!("Yes")));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!("nope")));
        assert!(!coerce_bool(&json!({ "a": 1 })));
    }

    #[test]
    fn whole_floats_count_but_fractions_and_negatives_do_not() {
        assert_eq!(as_count(&json!(3.0)), Some(3));
        assert_eq!(as_count(&json!(2.5)), None);
        assert_eq!(as_count(&json!(-1)), None);
        assert_eq!(as_count(&json!("4")), None);
    }
}
