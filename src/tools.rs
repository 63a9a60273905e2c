//! LLM tool-call boundary for the search engine
//!
//! The chat orchestration layer exposes one tool to the model,
//! `query_knowledge_base`. This module declares it, turns the model's raw
//! call into a closed [`ToolCall`], runs it against a [`SearchEngine`] and
//! builds the context string the model grounds its reply on.

pub mod error;

pub use error::ToolError;

use crate::error::Result;
use crate::search::{FilterParams, ProductMatch, SearchEngine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Wire name of the catalog search tool
pub const QUERY_KNOWLEDGE_BASE: &str = "query_knowledge_base";

/// Context sent back to the model when a search finds nothing
pub const NO_MATCH_CONTEXT: &str =
    "هیچ محصول دقیقی با این فیلترها پیدا نشد. لطفا محصولات مشابه پیشنهاد بده.";

/// Maximum number of products serialized into the grounding context
const CONTEXT_PRODUCT_LIMIT: usize = 10;

/// Function declaration advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool calls the search engine understands
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Search the product catalog
    QueryKnowledgeBase(FilterParams),
}

impl ToolCall {
    /// Parse a call by function name and JSON arguments
    pub fn parse(name: &str, args: Value) -> std::result::Result<Self, ToolError> {
        match name {
            QUERY_KNOWLEDGE_BASE => serde_json::from_value(args)
                .map(ToolCall::QueryKnowledgeBase)
                .map_err(|e| ToolError::InvalidArguments {
                    tool: name.to_string(),
                    message: e.to_string(),
                }),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Wire name of this call
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::QueryKnowledgeBase(_) => QUERY_KNOWLEDGE_BASE,
        }
    }

    /// Declarations for every supported tool
    pub fn declarations() -> Vec<ToolDeclaration> {
        let mut parameters = serde_json::to_value(schemars::schema_for!(FilterParams))
            .unwrap_or_else(|_| json!({"type": "object"}));
        if let Some(schema) = parameters.as_object_mut() {
            schema.remove("$schema");
            schema.remove("title");
            schema.insert("required".to_string(), json!(["category"]));
        }

        vec![ToolDeclaration {
            name: QUERY_KNOWLEDGE_BASE.to_string(),
            description: "Search the motorcycle accessories product database. Use only once the user's need (category and budget) is clear.".to_string(),
            parameters,
        }]
    }
}

/// Result of running a tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    /// Products for the chat layer to render
    pub products: Vec<ProductMatch>,

    /// Text returned to the model as the function response
    pub context: String,
}

/// Run `call` against `engine`, loading the catalog first if needed
pub async fn dispatch(engine: &SearchEngine, call: ToolCall) -> Result<ToolOutcome> {
    match call {
        ToolCall::QueryKnowledgeBase(params) => {
            info!(?params, "Searching product catalog");
            engine.load().await;

            let products = engine.search(&params);
            let context = grounding_context(&products)?;
            Ok(ToolOutcome { products, context })
        }
    }
}

/// JSON of the first matches, or the no-match notice when there are none
pub fn grounding_context(products: &[ProductMatch]) -> Result<String> {
    if products.is_empty() {
        return Ok(NO_MATCH_CONTEXT.to_string());
    }

    let shown = &products[..products.len().min(CONTEXT_PRODUCT_LIMIT)];
    Ok(serde_json::to_string(shown)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalogSource;
    use crate::search::SearchConfig;
    use std::sync::Arc;

    #[test]
    fn test_parse_query_knowledge_base() {
        let call = ToolCall::parse(
            QUERY_KNOWLEDGE_BASE,
            json!({"category": "helmet", "max_price": 2000000, "brand": "Honda"}),
        )
        .unwrap();

        assert_eq!(
            call,
            ToolCall::QueryKnowledgeBase(
                FilterParams::new("helmet")
                    .with_max_price(2_000_000)
                    .with_brand("Honda")
            )
        );
        assert_eq!(call.name(), QUERY_KNOWLEDGE_BASE);
    }

    #[test]
    fn test_parse_unknown_tool() {
        let result = ToolCall::parse("delete_everything", json!({}));
        assert!(matches!(result, Err(ToolError::UnknownTool(name)) if name == "delete_everything"));
    }

    #[test]
    fn test_parse_invalid_arguments() {
        let result = ToolCall::parse(QUERY_KNOWLEDGE_BASE, json!({"category": 12}));
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));
    }

    #[test]
    fn test_declaration_schema() {
        let declarations = ToolCall::declarations();
        assert_eq!(declarations.len(), 1);

        let declaration = &declarations[0];
        assert_eq!(declaration.name, QUERY_KNOWLEDGE_BASE);
        assert_eq!(declaration.parameters["type"], "object");
        assert_eq!(declaration.parameters["required"], json!(["category"]));

        let properties = declaration.parameters["properties"].as_object().unwrap();
        for field in ["category", "min_price", "max_price", "keywords", "brand"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn test_grounding_context_empty() {
        assert_eq!(grounding_context(&[]).unwrap(), NO_MATCH_CONTEXT);
    }

    #[tokio::test]
    async fn test_dispatch_loads_and_searches() {
        let engine = SearchEngine::new(
            Arc::new(StaticCatalogSource::new(vec![
                json!({"title": "Helmet A", "category": "helmet", "price": 1500000}),
                json!({"title": "Helmet B", "category": "helmet", "price": 3000000}),
            ])),
            SearchConfig::default(),
        );
        let call = ToolCall::parse(
            QUERY_KNOWLEDGE_BASE,
            json!({"category": "helmet", "max_price": 2000000}),
        )
        .unwrap();

        let outcome = dispatch(&engine, call).await.unwrap();
        assert!(engine.is_loaded());
        assert_eq!(outcome.products.len(), 2);

        let context: Vec<Value> = serde_json::from_str(&outcome.context).unwrap();
        assert_eq!(context[0]["title"], "Helmet A");
        assert_eq!(context[1]["isCloseMatch"], true);
    }

    #[tokio::test]
    async fn test_dispatch_with_empty_catalog() {
        let engine = SearchEngine::new(
            Arc::new(StaticCatalogSource::default()),
            SearchConfig::default(),
        );

        let outcome = dispatch(&engine, ToolCall::QueryKnowledgeBase(FilterParams::new("helmet")))
            .await
            .unwrap();
        assert!(outcome.products.is_empty());
        assert_eq!(outcome.context, NO_MATCH_CONTEXT);
    }
}
