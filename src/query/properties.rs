//! Property literal parsing: `{ key: value, key: value }`

use super::parser::{ParseError, ParseResult};
use crate::graph::{PropertyMap, PropertyValue};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static FLOAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

/// Parse a brace-delimited property literal.
///
/// Entries without a colon are skipped. Values are coerced in order: quoted
/// string, integer, float, boolean, null, and finally the raw text.
/// Negative numbers are not recognised and stay strings.
pub fn parse_property_literal(literal: &str) -> ParseResult<PropertyMap> {
    let trimmed = literal.trim();
    let content = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(trimmed)
        .trim();

    let mut properties = PropertyMap::new();
    if content.is_empty() {
        return Ok(properties);
    }

    for entry in split_entries(content)? {
        let Some((key, value)) = entry.split_once(':') else {
            warn!(entry = %entry, "skipping property entry without ':'");
            continue;
        };
        let key = unquote(key.trim()).unwrap_or(key.trim());
        if key.is_empty() {
            warn!(entry = %entry, "skipping property entry with empty key");
            continue;
        }
        properties.insert(key.to_string(), coerce_value(value.trim()));
    }

    Ok(properties)
}

/// Split on commas that are outside single or double quotes
fn split_entries(content: &str) -> ParseResult<Vec<&str>> {
    let mut entries = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in content.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, ',') => {
                entries.push(content[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if quote.is_some() {
        return Err(ParseError::UnbalancedQuotes(content.to_string()));
    }

    let last = content[start..].trim();
    if !last.is_empty() {
        entries.push(last);
    }
    Ok(entries)
}

/// Text between matching outer quotes
fn unquote(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find_map(|q| text.strip_prefix(q).and_then(|s| s.strip_suffix(q)))
}

/// JSON has no infinity, so overflowing literals are not numbers here
fn finite_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Coerce one value text into a property value
pub fn coerce_value(text: &str) -> PropertyValue {
    if let Some(inner) = unquote(text) {
        return PropertyValue::String(inner.to_string());
    }
    if INTEGER.is_match(text) {
        // Too large for i64: keep the magnitude as a float, or the text
        // itself once even f64 overflows
        return match text.parse::<i64>() {
            Ok(i) => PropertyValue::Integer(i),
            Err(_) => finite_float(text)
                .map(PropertyValue::Float)
                .unwrap_or_else(|| PropertyValue::String(text.to_string())),
        };
    }
    if FLOAT.is_match(text) {
        return finite_float(text)
            .map(PropertyValue::Float)
            .unwrap_or_else(|| PropertyValue::String(text.to_string()));
    }
    match text {
        "true" => PropertyValue::Boolean(true),
        "false" => PropertyValue::Boolean(false),
        "null" => PropertyValue::Null,
        _ => PropertyValue::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_literal() {
        let props = parse_property_literal(r#"{name: "Alice", age: 30, score: 9.5}"#).unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props["name"], PropertyValue::from("Alice"));
        assert_eq!(props["age"], PropertyValue::Integer(30));
        assert_eq!(props["score"], PropertyValue::Float(9.5));
    }

    #[test]
    fn test_comma_inside_quotes() {
        let props = parse_property_literal(r#"{name: "a, b", age: 5}"#).unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props["name"], PropertyValue::from("a, b"));
        assert_eq!(props["age"], PropertyValue::Integer(5));
    }

    #[test]
    fn test_single_quotes_and_quoted_keys() {
        let props = parse_property_literal(r#"{"age": 30, 'city': 'Paris, FR'}"#).unwrap();
        assert_eq!(props["age"], PropertyValue::Integer(30));
        assert_eq!(props["city"], PropertyValue::from("Paris, FR"));
    }

    #[test]
    fn test_quoted_number_stays_string() {
        let props = parse_property_literal(r#"{zip: "02139"}"#).unwrap();
        assert_eq!(props["zip"], PropertyValue::from("02139"));
    }

    #[test]
    fn test_literals() {
        let props = parse_property_literal("{a: true, b: false, c: null, d: hello world}").unwrap();
        assert_eq!(props["a"], PropertyValue::Boolean(true));
        assert_eq!(props["b"], PropertyValue::Boolean(false));
        assert_eq!(props["c"], PropertyValue::Null);
        assert_eq!(props["d"], PropertyValue::from("hello world"));
    }

    #[test]
    fn test_no_negative_numbers() {
        let props = parse_property_literal("{n: -5, f: -1.5, e: 1e3, dot: .5}").unwrap();
        assert_eq!(props["n"], PropertyValue::from("-5"));
        assert_eq!(props["f"], PropertyValue::from("-1.5"));
        assert_eq!(props["e"], PropertyValue::from("1e3"));
        assert_eq!(props["dot"], PropertyValue::from(".5"));
    }

    #[test]
    fn test_integer_overflow_becomes_float() {
        let props = parse_property_literal("{big: 99999999999999999999}").unwrap();
        assert_eq!(props["big"], PropertyValue::Float(99999999999999999999.0));
    }

    #[test]
    fn test_float_overflow_keeps_text() {
        let huge = "9".repeat(400);
        let huge_frac = format!("{}.5", huge);
        let props = parse_property_literal(&format!("{{v: {}, w: {}}}", huge, huge_frac)).unwrap();
        assert_eq!(props["v"], PropertyValue::String(huge));
        assert_eq!(props["w"], PropertyValue::String(huge_frac));
    }

    #[test]
    fn test_entries_without_colon_are_skipped() {
        let props = parse_property_literal("{name: Bob, oops, age: 4}").unwrap();
        assert_eq!(props.len(), 2);
        assert!(!props.contains_key("oops"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let props = parse_property_literal(r#"{url: "http://x.io", time: 12:30}"#).unwrap();
        assert_eq!(props["url"], PropertyValue::from("http://x.io"));
        assert_eq!(props["time"], PropertyValue::from("12:30"));
    }

    #[test]
    fn test_empty_literal() {
        assert!(parse_property_literal("{}").unwrap().is_empty());
        assert!(parse_property_literal("{   }").unwrap().is_empty());
    }

    #[test]
    fn test_unbalanced_quotes() {
        let err = parse_property_literal(r#"{name: "Alice}"#).unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedQuotes(_)));
    }

    #[test]
    fn test_last_key_wins() {
        let props = parse_property_literal("{a: 1, a: 2}").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props["a"], PropertyValue::Integer(2));
    }
}
