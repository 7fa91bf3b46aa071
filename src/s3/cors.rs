//! CORS rules for buckets serving browsers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Preflight cache lifetime for public asset buckets.
pub const PUBLIC_BUCKET_CORS_MAX_AGE: u32 = 3_600;
/// Preflight cache lifetime for website buckets.
pub const WEBSITE_BUCKET_CORS_MAX_AGE: u32 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct CorsRule {
    #[serde(default)]
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub expose_headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u32>,
}

impl CorsRule {
    /// Read-only access (`GET`, `HEAD`) from any origin with any header.
    pub fn read_only_from_anywhere(max_age_seconds: u32) -> Self {
        CorsRule {
            allowed_headers: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "HEAD".to_string()],
            allowed_origins: vec!["*".to_string()],
            expose_headers: Vec::new(),
            max_age_seconds: Some(max_age_seconds),
        }
    }
}

/// `rules` when non-empty, otherwise the read-only default.
pub fn cors_rules_or_default(rules: &[CorsRule], max_age_seconds: u32) -> Vec<CorsRule> {
    if rules.is_empty() {
        vec![CorsRule::read_only_from_anywhere(max_age_seconds)]
    } else {
        rules.to_vec()
    }
}
