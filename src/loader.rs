use crate::error::{ConstructError, ConstructResult};
use serde::de::DeserializeOwned;

/// Load a construct configuration from JSON text.
///
/// Missing fields take their defaults. Any serde errors are mapped into
/// `ConstructError::InvalidConfig`.
///
/// Example:
/// ```rust
/// use cds_constructs::{PrivateBucketConfig, SseAlgorithm, load_config};
/// let config: PrivateBucketConfig = load_config(r#"
///     { "bucket": "acme-data", "sse_algorithm": "aws:kms", "versioned": true }
/// "#).unwrap();
/// assert_eq!(config.sse_algorithm, SseAlgorithm::AwsKms);
/// assert_eq!(config.partition, "aws");
/// ```
pub fn load_config<T: DeserializeOwned>(text: &str) -> ConstructResult<T> {
    serde_json::from_str(text).map_err(ConstructError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::bucket::{PublicBucketConfig, WebsiteBucketConfig};
    use crate::stacks::terraform::TerraformBackendConfig;

    #[test]
    fn test_load_public_bucket_config() {
        let config: PublicBucketConfig =
            load_config(r#"{ "bucket": "assets", "force_tls": true }"#).unwrap();
        assert_eq!(config.bucket, "assets");
        assert!(config.force_tls);
        assert_eq!(config.force_destroy, None);
        assert!(config.cors.is_empty());
    }

    #[test]
    fn test_load_website_bucket_config() {
        let config: WebsiteBucketConfig = load_config(
            r#"{
                "bucket": "docs",
                "error_index": "404.html",
                "rules": [{ "redirect": { "host_name": "example.com" } }]
            }"#,
        )
        .unwrap();
        assert_eq!(config.index, None);
        assert_eq!(config.error_index.as_deref(), Some("404.html"));
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn test_load_terraform_backend_config() {
        let config: TerraformBackendConfig = load_config(
            r#"{ "bucket": "acme-tfstate", "tags": { "Team": "platform" } }"#,
        )
        .unwrap();
        assert_eq!(config.stack_id, "terraform");
        assert_eq!(config.tags.get("Team").map(String::as_str), Some("platform"));
    }

    #[test]
    fn test_load_config_invalid_json() {
        let err = load_config::<PublicBucketConfig>("{ bucket: ").unwrap_err();
        assert!(matches!(err, ConstructError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_config_wrong_type() {
        let err = load_config::<PublicBucketConfig>(r#"{ "force_tls": "yes" }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration: "));
    }
}
