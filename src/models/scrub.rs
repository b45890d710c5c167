use regex::Regex;
use std::collections::BTreeMap;

/// Replacement for values whose key matched a filter pattern.
pub const FILTERED: &str = "<filtered>";

/// Redact every top-level entry whose key matches one of the patterns.
///
/// Patterns are regex fragments searched anywhere in the key, so `"pass"`
/// matches `"password"`. A pattern that is not a valid regex falls back to
/// a literal substring match. Nested mappings are not descended into, and
/// redacting twice gives the same result as redacting once.
pub(crate) fn scrub<V>(map: &mut BTreeMap<String, V>, patterns: &[String])
where
    V: for<'a> From<&'a str>,
{
    if patterns.is_empty() || map.is_empty() {
        return;
    }
    let matchers: Vec<Regex> = patterns.iter().map(|pattern| compile(pattern)).collect();
    let matching: Vec<String> = map
        .keys()
        .filter(|key| matchers.iter().any(|matcher| matcher.is_match(key)))
        .cloned()
        .collect();
    for key in matching {
        map.insert(key, V::from(FILTERED));
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| {
        Regex::new(&regex::escape(pattern)).expect("escaped pattern is a valid regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn params(entries: &[(&str, &str)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
            .collect()
    }

    #[test]
    fn matching_keys_are_redacted_and_others_untouched() {
        let mut map = params(&[
            ("password", "12345"),
            ("credit_card", "12345"),
            ("non_sensitive", "Whee!"),
        ]);
        scrub(&mut map, &["password".to_owned(), "credit_card".to_owned()]);
        assert_eq!(
            params(&[
                ("password", FILTERED),
                ("credit_card", FILTERED),
                ("non_sensitive", "Whee!"),
            ]),
            map
        );
    }

    #[test]
    fn patterns_match_substrings_of_keys() {
        let mut map = params(&[("password", "12345"), ("password_confirmation", "12345")]);
        scrub(&mut map, &["pass".to_owned()]);
        assert_eq!(Some(&Value::from(FILTERED)), map.get("password"));
        assert_eq!(Some(&Value::from(FILTERED)), map.get("password_confirmation"));
    }

    #[test]
    fn scrubbing_is_idempotent() {
        let patterns = vec!["password".to_owned()];
        let mut once = params(&[("password", "12345"), ("name", "dave")]);
        scrub(&mut once, &patterns);
        let mut twice = once.clone();
        scrub(&mut twice, &patterns);
        assert_eq!(once, twice);
    }

    #[test]
    fn nested_mappings_are_not_descended_into() {
        let mut map = BTreeMap::from([(
            "account".to_owned(),
            json!({ "password": "12345" }),
        )]);
        scrub(&mut map, &["password".to_owned()]);
        assert_eq!(json!({ "password": "12345" }), map["account"]);
    }

    #[test]
    fn invalid_pattern_falls_back_to_literal_match() {
        let mut map = BTreeMap::from([
            ("a[key".to_owned(), "x".to_owned()),
            ("other".to_owned(), "y".to_owned()),
        ]);
        scrub(&mut map, &["a[key".to_owned()]);
        assert_eq!(FILTERED, map["a[key"]);
        assert_eq!("y", map["other"]);
    }

    #[test]
    fn string_maps_are_supported() {
        let mut map = BTreeMap::from([("DATABASE_URL".to_owned(), "postgres://".to_owned())]);
        scrub(&mut map, &["DATABASE".to_owned()]);
        assert_eq!(FILTERED, map["DATABASE_URL"]);
    }
}
