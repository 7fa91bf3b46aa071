//! Remote state backend for Terraform: a KMS key, its alias and a locked
//! down, versioned private bucket encrypted with that key.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::ConstructResult;
use crate::s3::bucket::{PrivateBucketBlueprint, PrivateBucketConfig, Tags, private_bucket};
use crate::s3::sse::SseAlgorithm;
use crate::traits::DEFAULT_PARTITION;

pub const STACK_NAME: &str = "AwsTerraformStack";
pub const KEY_DELETION_WINDOW_IN_DAYS: u32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct TerraformBackendConfig {
    pub bucket: String,
    pub partition: String,
    pub stack_id: String,
    pub tags: Tags,
}

impl Default for TerraformBackendConfig {
    fn default() -> Self {
        TerraformBackendConfig {
            bucket: String::new(),
            partition: DEFAULT_PARTITION.to_string(),
            stack_id: "terraform".to_string(),
            tags: Tags::new(),
        }
    }
}

impl TerraformBackendConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        TerraformBackendConfig {
            bucket: bucket.into(),
            ..TerraformBackendConfig::default()
        }
    }

    pub fn with_stack_id(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = stack_id.into();
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct KmsKeyBlueprint {
    pub description: String,
    pub deletion_window_in_days: u32,
    pub enable_key_rotation: bool,
    pub tags: Tags,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct KmsAliasBlueprint {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TerraformBackendBlueprint {
    pub key: KmsKeyBlueprint,
    pub key_alias: KmsAliasBlueprint,
    pub bucket: PrivateBucketBlueprint,
}

/// `alias/terraform-key-<account_id>`
pub fn key_alias_name(account_id: &str) -> String {
    format!("alias/terraform-key-{account_id}")
}

/// Synthesize the Terraform state backend for `account_id`.
///
/// Stack tags are `Stack` and `Owner`, overridden by the configured tags. The
/// bucket additionally carries `Area` and `StackId`, which the stack tags
/// override in turn.
pub fn terraform_backend(
    config: &TerraformBackendConfig,
    account_id: &str,
) -> ConstructResult<TerraformBackendBlueprint> {
    let mut tags = Tags::from([
        ("Stack".to_string(), STACK_NAME.to_string()),
        ("Owner".to_string(), account_id.to_string()),
    ]);
    tags.extend(config.tags.clone());

    let key = KmsKeyBlueprint {
        description: format!("Terraform state '{}' bucket master key.", config.bucket),
        deletion_window_in_days: KEY_DELETION_WINDOW_IN_DAYS,
        enable_key_rotation: true,
        tags: tags.clone(),
    };
    let key_alias = KmsAliasBlueprint {
        name: key_alias_name(account_id),
    };

    let mut bucket_tags = Tags::from([
        ("Area".to_string(), "terraform".to_string()),
        ("StackId".to_string(), config.stack_id.clone()),
    ]);
    bucket_tags.extend(tags);

    let bucket = private_bucket(
        &PrivateBucketConfig {
            bucket: config.bucket.clone(),
            partition: config.partition.clone(),
            tags: bucket_tags,
            sse_algorithm: SseAlgorithm::AwsKms,
            kms_master_key_id: Some(key_alias.name.clone()),
            bucket_key_enabled: Some(true),
            versioned: true,
            prevent_destroy: true,
            ..PrivateBucketConfig::default()
        },
        account_id,
    )?;

    debug!(
        event = "Blueprint",
        phase = "TerraformBackend",
        bucket = %config.bucket,
        stack_id = %config.stack_id,
        key_alias = %key_alias.name
    );

    Ok(TerraformBackendBlueprint {
        key,
        key_alias,
        bucket,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::lifecycle::LifecycleRule;

    const ACCOUNT_ID: &str = "123456789012";

    #[test]
    fn test_key_and_alias() {
        let backend =
            terraform_backend(&TerraformBackendConfig::new("acme-tfstate"), ACCOUNT_ID).unwrap();

        insta::assert_json_snapshot!(backend.key, @r#"
        {
          "description": "Terraform state 'acme-tfstate' bucket master key.",
          "deletion_window_in_days": 7,
          "enable_key_rotation": true,
          "tags": {
            "Owner": "123456789012",
            "Stack": "AwsTerraformStack"
          }
        }
        "#);
        assert_eq!(backend.key_alias.name, "alias/terraform-key-123456789012");
    }

    #[test]
    fn test_bucket_is_locked_down() {
        let backend =
            terraform_backend(&TerraformBackendConfig::new("acme-tfstate"), ACCOUNT_ID).unwrap();
        let bucket = &backend.bucket.bucket;

        assert!(bucket.versioned);
        assert!(bucket.prevent_destroy);
        assert!(backend.bucket.log_bucket.prevent_destroy);
        assert_eq!(
            bucket.lifecycle_rules,
            vec![LifecycleRule::auto_archive_versions()]
        );

        let encryption = bucket.encryption.as_ref().unwrap();
        assert_eq!(encryption.algorithm(), SseAlgorithm::AwsKms);
        assert!(encryption.uses_bucket_key());
        assert_eq!(
            encryption
                .apply_server_side_encryption_by_default
                .kms_master_key_id
                .as_deref(),
            Some("alias/terraform-key-123456789012")
        );
        assert_eq!(bucket.policy_sids().len(), 5);
    }

    #[test]
    fn test_tags_merge_order() {
        let config = TerraformBackendConfig::new("acme-tfstate")
            .with_stack_id("backend")
            .with_tag("Owner", "platform")
            .with_tag("Area", "state");
        let backend = terraform_backend(&config, ACCOUNT_ID).unwrap();

        assert_eq!(backend.key.tags.get("Owner").map(String::as_str), Some("platform"));
        assert_eq!(backend.key.tags.get("Area").map(String::as_str), Some("state"));

        let bucket_tags = &backend.bucket.bucket.tags;
        assert_eq!(bucket_tags.get("Area").map(String::as_str), Some("state"));
        assert_eq!(bucket_tags.get("StackId").map(String::as_str), Some("backend"));
        assert_eq!(
            bucket_tags.get("Stack").map(String::as_str),
            Some("AwsTerraformStack")
        );
    }

    #[test]
    fn test_invalid_bucket_name() {
        let err = terraform_backend(&TerraformBackendConfig::new("Bad_Name"), ACCOUNT_ID)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "S3PrivateBucket: 'Bad_Name' bucket name is invalid."
        );
    }
}
