//! Filter parameters and their normalization
//!
//! [`FilterParams`] is what the LLM tool call carries; [`NormalizedQuery`] is
//! what the ranking stages consume, with every default applied.

use super::config::SearchConfig;
use crate::catalog::parse_price_text;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured product filter extracted from the conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterParams {
    /// Main product category (helmet, gloves, jacket, lock, exhaust, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Lower price bound in toman (0 when unknown)
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<f64>")]
    pub min_price: Option<u64>,

    /// The user's budget ceiling in toman
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<f64>")]
    pub max_price: Option<u64>,

    /// Specific traits such as color, brand, size or motorcycle model (e.g. "Honda red XL")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    /// A specific brand, if the user asked for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl FilterParams {
    /// Create a filter for `category`
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Set the lower price bound
    pub fn with_min_price(mut self, min_price: u64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    /// Set the upper price bound
    pub fn with_max_price(mut self, max_price: u64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Set the keyword string
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set the brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}

/// A filter with all defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Category substring, `None` means unconstrained
    pub category: Option<String>,

    /// Inclusive lower price bound
    pub min_price: u64,

    /// Inclusive upper price bound
    pub max_price: u64,

    /// Keyword tokens; `Some` whenever a non-empty keyword string was given,
    /// even if it is whitespace or every token was too short to keep
    pub keywords: Option<Vec<String>>,

    /// Brand substring, `None` means unconstrained
    pub brand: Option<String>,
}

impl NormalizedQuery {
    /// Apply defaults and tokenize keywords
    pub fn from_params(params: &FilterParams, config: &SearchConfig) -> Self {
        let keywords = params
            .keywords
            .as_deref()
            .filter(|keywords| !keywords.is_empty())
            .map(|keywords| {
                keywords
                    .split_whitespace()
                    .filter(|token| token.chars().count() >= config.min_keyword_len)
                    .map(str::to_string)
                    .collect()
            });

        Self {
            category: non_blank(params.category.as_deref()),
            min_price: params.min_price.unwrap_or(0),
            max_price: params.max_price.unwrap_or(config.default_max_price),
            keywords,
            brand: non_blank(params.brand.as_deref()),
        }
    }

    /// Whether `price` lies in the original window
    pub fn price_in_range(&self, price: u64) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accept prices as numbers or numeric strings; anything else is absent
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => Some(v),
            None => n
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.trunc() as u64),
        },
        Some(Value::String(s)) if s.chars().any(|c| c.is_numeric()) => {
            Some(parse_price_text(&s))
        }
        _ => None,
    })
}
