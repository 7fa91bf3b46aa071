//! Static website hosting configuration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct RoutingRuleCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_prefix_equals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_error_code_returned_equals: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct RoutingRedirect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_redirect_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_key_prefix_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_key_with: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct RoutingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<RoutingRuleCondition>,
    pub redirect: RoutingRedirect,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct WebsiteConfiguration {
    pub index_document: String,
    pub error_document: String,
    #[serde(rename = "routing_rule", default, skip_serializing_if = "Vec::is_empty")]
    pub routing_rules: Vec<RoutingRule>,
}

impl WebsiteConfiguration {
    /// Both documents fall back to `index.html`, which suits single-page apps.
    pub fn new(
        index_document: Option<String>,
        error_document: Option<String>,
        routing_rules: Vec<RoutingRule>,
    ) -> Self {
        WebsiteConfiguration {
            index_document: index_document.unwrap_or_else(|| DEFAULT_INDEX_DOCUMENT.to_string()),
            error_document: error_document.unwrap_or_else(|| DEFAULT_INDEX_DOCUMENT.to_string()),
            routing_rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_index_html() {
        let website = WebsiteConfiguration::new(None, None, Vec::new());
        assert_eq!(website.index_document, "index.html");
        assert_eq!(website.error_document, "index.html");
        let serialized = serde_json::to_value(&website).unwrap();
        assert!(serialized.get("routing_rule").is_none());
    }

    #[test]
    fn test_routing_rule_deserialization() {
        let rule: RoutingRule = serde_json::from_value(serde_json::json!({
            "condition": { "key_prefix_equals": "docs/" },
            "redirect": { "replace_key_prefix_with": "documents/" }
        }))
        .unwrap();
        assert_eq!(
            rule.condition.and_then(|c| c.key_prefix_equals).as_deref(),
            Some("docs/")
        );
        assert_eq!(rule.redirect.replace_key_prefix_with.as_deref(), Some("documents/"));
        assert_eq!(rule.redirect.host_name, None);
    }
}
