//! AutoRoute request router
//!
//! Maps raw user text to the downstream component that should answer it.
//! Classification is a pure function over an ordered rule list: the first
//! rule whose keyword appears in the text (case-insensitive) wins, and
//! anything unmatched goes to the chat model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Downstream component chosen for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Semantic lookup in the FAQ vector store
    VectorSearch,
    /// Free-form conversational reply
    LlmChat,
}

impl Route {
    /// Wire name of the route
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VectorSearch => "vector_search",
            Self::LlmChat => "llm_chat",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword rule sending matching text to `route`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    /// Rule name reported in decisions
    pub name: String,

    /// Uppercased keyword searched for in the uppercased input
    keyword: String,

    /// Route taken on match
    pub route: Route,
}

impl RoutingRule {
    pub fn new(name: impl Into<String>, keyword: &str, route: Route) -> Self {
        Self {
            name: name.into(),
            keyword: keyword.to_uppercase(),
            route,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    fn matches(&self, upper_text: &str) -> bool {
        !self.keyword.is_empty() && upper_text.contains(&self.keyword)
    }
}

/// Outcome of routing a single query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    /// Component that should handle the query
    pub component: Route,

    /// Name of the rule that matched, `None` for the fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

/// Stateless keyword router
#[derive(Debug, Clone)]
pub struct Router {
    rules: Vec<RoutingRule>,
    fallback: Route,
}

impl Default for Router {
    /// Single `faq` rule: text mentioning "FAQ" goes to vector search
    fn default() -> Self {
        Self::with_rules(vec![RoutingRule::new("faq", "FAQ", Route::VectorSearch)])
    }
}

impl Router {
    /// Build a router from rules evaluated in order, falling back to `llm_chat`
    pub fn with_rules(rules: Vec<RoutingRule>) -> Self {
        Self {
            rules,
            fallback: Route::LlmChat,
        }
    }

    /// Default router plus one `vector_search` rule per extra keyword
    pub fn with_faq_keywords<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut router = Self::default();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }
            router.rules.push(RoutingRule::new(
                format!("keyword:{}", keyword.to_lowercase()),
                keyword,
                Route::VectorSearch,
            ));
        }
        router
    }

    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    /// Classify text into a route
    pub fn classify(&self, text: &str) -> Route {
        self.route(text).component
    }

    /// Classify text and report which rule decided it
    pub fn route(&self, text: &str) -> RouteDecision {
        let upper = text.to_uppercase();
        let decision = match self.rules.iter().find(|rule| rule.matches(&upper)) {
            Some(rule) => RouteDecision {
                component: rule.route,
                rule: Some(rule.name.clone()),
            },
            None => RouteDecision {
                component: self.fallback,
                rule: None,
            },
        };

        tracing::debug!(
            "Routed query ({} chars) to {} via {:?}",
            text.len(),
            decision.component,
            decision.rule
        );

        decision
    }
}
