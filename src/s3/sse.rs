//! Server-side encryption settings.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Server-side encryption algorithm, as written in the
/// `x-amz-server-side-encryption` header.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SseAlgorithm {
    #[default]
    #[serde(rename = "AES256")]
    #[strum(serialize = "AES256")]
    Aes256,
    #[serde(rename = "aws:kms")]
    #[strum(serialize = "aws:kms")]
    AwsKms,
}

impl SseAlgorithm {
    pub fn is_kms(self) -> bool {
        self == SseAlgorithm::AwsKms
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct EncryptionByDefault {
    pub sse_algorithm: SseAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_master_key_id: Option<String>,
}

/// A bucket's default encryption rule.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct ServerSideEncryptionRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_key_enabled: Option<bool>,
    pub apply_server_side_encryption_by_default: EncryptionByDefault,
}

impl ServerSideEncryptionRule {
    /// Build the rule for `algorithm`.
    ///
    /// The bucket key and master key id only apply to `aws:kms`, where the
    /// bucket key defaults to enabled (fewer KMS requests). Both are dropped
    /// for `AES256`.
    ///
    /// See <https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucket-key.html>.
    pub fn new(
        algorithm: SseAlgorithm,
        kms_master_key_id: Option<String>,
        bucket_key_enabled: Option<bool>,
    ) -> Self {
        if algorithm.is_kms() {
            ServerSideEncryptionRule {
                bucket_key_enabled: Some(bucket_key_enabled.unwrap_or(true)),
                apply_server_side_encryption_by_default: EncryptionByDefault {
                    sse_algorithm: algorithm,
                    kms_master_key_id,
                },
            }
        } else {
            ServerSideEncryptionRule {
                bucket_key_enabled: None,
                apply_server_side_encryption_by_default: EncryptionByDefault {
                    sse_algorithm: algorithm,
                    kms_master_key_id: None,
                },
            }
        }
    }

    pub fn algorithm(&self) -> SseAlgorithm {
        self.apply_server_side_encryption_by_default.sse_algorithm
    }

    pub fn uses_bucket_key(&self) -> bool {
        self.bucket_key_enabled.unwrap_or(false)
    }
}
