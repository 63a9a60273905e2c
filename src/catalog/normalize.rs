//! Normalization of loosely shaped feed records into [`Product`]s
//!
//! Field fallbacks follow truthiness: `null`, `false`, `0` and empty strings
//! count as missing and fall through to the next candidate field.

use super::{Product, ProductId};
use serde_json::Value;

/// Defaults applied to records that lack a title or category
#[derive(Debug, Clone)]
pub struct RecordDefaults {
    /// Title used when a record has neither `title` nor `name`
    pub unnamed_title: String,

    /// Category used when a record has none
    pub default_category: String,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            unnamed_title: "محصول بدون نام".to_string(),
            default_category: "لوازم جانبی".to_string(),
        }
    }
}

/// Map one raw feed record at position `index` into a [`Product`]
pub fn normalize_record(index: usize, raw: &Value, defaults: &RecordDefaults) -> Product {
    let id = match field(raw, &["id"]) {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(n) => ProductId::Number(n),
            None => ProductId::Text(n.to_string()),
        },
        Some(other) => ProductId::Text(text_of(other)),
        None => ProductId::Number(index as i64),
    };

    Product {
        id,
        title: field(raw, &["title", "name"])
            .map(text_of)
            .unwrap_or_else(|| defaults.unnamed_title.clone()),
        price: raw.get("price").map(parse_price).unwrap_or(0),
        link: field(raw, &["link", "url"])
            .map(text_of)
            .unwrap_or_else(|| "#".to_string()),
        image: field(raw, &["image", "img"]).map(text_of),
        category: field(raw, &["category"])
            .map(text_of)
            .unwrap_or_else(|| defaults.default_category.clone()),
        features: raw.get("features").map(normalize_features).unwrap_or_default(),
        description: field(raw, &["description"]).map(text_of).unwrap_or_default(),
    }
}

/// Normalize a price that may be a number or a formatted string
///
/// Numbers pass through (fractions truncated, negatives become 0). Strings
/// keep only their digits, Persian and Arabic-Indic digits included, so
/// `"۱۲۰,۰۰۰ تومان"` and `"120,000"` both yield `120000`. Anything that does
/// not produce a number silently becomes 0.
pub fn parse_price(raw: &Value) -> u64 {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else {
                match n.as_f64() {
                    Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
                    _ => 0,
                }
            }
        }
        Value::String(s) => parse_price_text(s),
        _ => 0,
    }
}

/// Parse the digits of a price string, ignoring everything else
pub fn parse_price_text(raw: &str) -> u64 {
    let digits: String = raw.chars().filter_map(ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Flatten a feature list into display strings
///
/// Strings pass through, `{label, value}` objects become `"label: value"`,
/// objects with only a value become that value, other objects join their
/// values with `": "`. A non-array yields no features.
pub fn normalize_features(raw: &Value) -> Vec<String> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Object(map) => {
                let label = map.get("label").filter(|v| truthy(v));
                let value = map.get("value").filter(|v| truthy(v));
                match (label, value) {
                    (Some(label), Some(value)) => {
                        format!("{}: {}", text_of(label), text_of(value))
                    }
                    (None, Some(value)) => text_of(value),
                    _ => map.values().map(text_of).collect::<Vec<_>>().join(": "),
                }
            }
            other => text_of(other),
        })
        .collect()
}

fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        // Extended Arabic-Indic (Persian) digits
        '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
        // Arabic-Indic digits
        '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
        _ => None,
    }
}

/// First truthy value among `keys`
fn field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| raw.get(*k)).find(|v| truthy(v))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(text_of).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_price_strings() {
        assert_eq!(parse_price(&json!("120,000")), 120_000);
        assert_eq!(parse_price(&json!("۱۲۰,۰۰۰ تومان")), 120_000);
        assert_eq!(parse_price(&json!("٣٥٠٠")), 3_500);
        assert_eq!(parse_price(&json!("1,500,000 تومان")), 1_500_000);
    }

    #[test]
    fn test_parse_price_malformed_is_zero() {
        assert_eq!(parse_price(&json!("")), 0);
        assert_eq!(parse_price(&json!("abc")), 0);
        assert_eq!(parse_price(&json!(null)), 0);
        assert_eq!(parse_price(&json!({"amount": 5})), 0);
        assert_eq!(parse_price(&json!("99999999999999999999999")), 0);
    }

    #[test]
    fn test_parse_price_numbers_pass_through() {
        assert_eq!(parse_price(&json!(50000)), 50_000);
        assert_eq!(parse_price(&json!(1999.9)), 1_999);
        assert_eq!(parse_price(&json!(-10)), 0);
    }

    #[test]
    fn test_normalize_features_shapes() {
        let raw = json!([
            "Full face",
            {"label": "Size", "value": "XL"},
            {"value": "Red"},
            {"label": "", "value": ""},
            {"a": "x", "b": "y"},
            42
        ]);

        assert_eq!(
            normalize_features(&raw),
            vec!["Full face", "Size: XL", "Red", ": ", "x: y", "42"]
        );
    }

    #[test]
    fn test_normalize_features_non_array() {
        assert!(normalize_features(&json!("Full face")).is_empty());
        assert!(normalize_features(&json!(null)).is_empty());
    }

    #[test]
    fn test_normalize_record_fallbacks() {
        let defaults = RecordDefaults::default();
        let product = normalize_record(
            3,
            &json!({"name": "Visor", "price": "2,000", "url": "https://shop/visor", "img": "v.png"}),
            &defaults,
        );

        assert_eq!(product.id, ProductId::Number(3));
        assert_eq!(product.title, "Visor");
        assert_eq!(product.price, 2_000);
        assert_eq!(product.link, "https://shop/visor");
        assert_eq!(product.image.as_deref(), Some("v.png"));
        assert_eq!(product.category, defaults.default_category);
        assert!(product.features.is_empty());
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_normalize_record_empty_values_fall_through() {
        let defaults = RecordDefaults::default();
        let product = normalize_record(
            0,
            &json!({"id": 0, "title": "", "name": "", "category": "", "link": ""}),
            &defaults,
        );

        assert_eq!(product.id, ProductId::Number(0));
        assert_eq!(product.title, defaults.unnamed_title);
        assert_eq!(product.category, defaults.default_category);
        assert_eq!(product.link, "#");
        assert!(product.image.is_none());
    }

    #[test]
    fn test_normalize_record_keeps_provided_values() {
        let product = normalize_record(
            9,
            &json!({
                "id": "sku-17",
                "title": "Helmet A",
                "price": 1500000,
                "link": "https://shop/helmet-a",
                "category": "helmet",
                "features": [{"label": "Color", "value": "Red"}],
                "description": "Light shell"
            }),
            &RecordDefaults::default(),
        );

        assert_eq!(product.id, ProductId::Text("sku-17".into()));
        assert_eq!(product.title, "Helmet A");
        assert_eq!(product.price, 1_500_000);
        assert_eq!(product.category, "helmet");
        assert_eq!(product.features, vec!["Color: Red"]);
        assert_eq!(product.description, "Light shell");
    }
}
