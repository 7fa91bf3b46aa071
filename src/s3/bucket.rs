//! Bucket blueprints.
//!
//! A blueprint lists every resource a bucket construct stands for: the
//! bucket itself, its ownership controls, public access block, encryption,
//! versioning, lifecycle, CORS, website and logging settings, and the bucket
//! policy. Nothing here talks to AWS; the output is meant to be handed to
//! whatever tool renders the actual infrastructure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::debug;
use utoipa::ToSchema;

use crate::arn::Arn;
use crate::error::ConstructResult;
use crate::traits::{BucketConstruct, DEFAULT_PARTITION};
use crate::types::PolicyDocument;

use super::cors::{
    CorsRule, PUBLIC_BUCKET_CORS_MAX_AGE, WEBSITE_BUCKET_CORS_MAX_AGE, cors_rules_or_default,
};
use super::lifecycle::LifecycleRule;
use super::policies::{
    StatementOptions, create_allow_logging_service_statement,
    create_allow_public_get_object_statement, create_deny_bucket_keyless_uploads_statement,
    create_deny_incorrect_encryption_header_statement,
    create_deny_unencrypted_object_uploads_statement, create_enforce_tls_v12_or_higher_statement,
    create_force_tls_requests_only_statement,
};
use super::sse::{ServerSideEncryptionRule, SseAlgorithm};
use super::website::{RoutingRule, WebsiteConfiguration};

pub type Tags = BTreeMap<String, String>;

pub const DEFAULT_LOG_PREFIX: &str = "/logs";
pub const LOG_BUCKET_SUFFIX: &str = "-logs";
pub const PUBLIC_READ_ACL: &str = "public-read";

#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum ObjectOwnership {
    BucketOwnerEnforced,
    BucketOwnerPreferred,
    ObjectWriter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct PublicAccessBlock {
    pub block_public_acls: bool,
    pub block_public_policy: bool,
    pub ignore_public_acls: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    pub fn block_all() -> Self {
        PublicAccessBlock {
            block_public_acls: true,
            block_public_policy: true,
            ignore_public_acls: true,
            restrict_public_buckets: true,
        }
    }
}

/// Where a bucket ships its server access logs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct LoggingTarget {
    pub target_bucket: String,
    pub target_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BucketBlueprint {
    pub bucket: String,
    pub arn: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: Tags,
    pub force_destroy: bool,
    pub prevent_destroy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_ownership: Option<ObjectOwnership>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_access_block: Option<PublicAccessBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<ServerSideEncryptionRule>,
    pub versioned: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lifecycle_rules: Vec<LifecycleRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cors_rules: Vec<CorsRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<WebsiteConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyDocument>,
}

impl BucketBlueprint {
    fn new(bucket: &str, arn: &Arn, tags: &Tags) -> Self {
        BucketBlueprint {
            bucket: bucket.to_string(),
            arn: arn.to_string(),
            tags: tags.clone(),
            force_destroy: false,
            prevent_destroy: false,
            object_ownership: None,
            public_access_block: None,
            acl: None,
            encryption: None,
            versioned: false,
            lifecycle_rules: Vec::new(),
            cors_rules: Vec::new(),
            website: None,
            logging: None,
            policy: None,
        }
    }

    /// Ownership enforced, ACLs disabled, every public access path blocked.
    fn locked_down(mut self) -> Self {
        self.object_ownership = Some(ObjectOwnership::BucketOwnerEnforced);
        self.public_access_block = Some(PublicAccessBlock::block_all());
        self
    }

    /// Bucket policy statement sids, in order.
    pub fn policy_sids(&self) -> Vec<&str> {
        self.policy.as_ref().map(PolicyDocument::sids).unwrap_or_default()
    }

    /// The bucket policy rendered as IAM JSON.
    pub fn policy_json(&self) -> Option<Value> {
        self.policy.as_ref().map(PolicyDocument::to_iam_json)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct PrivateBucketLogConfig {
    pub log_prefix: Option<String>,
}

/// A private, encrypted bucket whose accesses are logged to a companion bucket.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct PrivateBucketConfig {
    pub bucket: String,
    pub partition: String,
    pub tags: Tags,
    pub sse_algorithm: SseAlgorithm,
    pub kms_master_key_id: Option<String>,
    pub bucket_key_enabled: Option<bool>,
    pub log: PrivateBucketLogConfig,
    pub versioned: bool,
    pub lifecycle_rules: Option<Vec<LifecycleRule>>,
    pub prevent_destroy: bool,
}

impl Default for PrivateBucketConfig {
    fn default() -> Self {
        PrivateBucketConfig {
            bucket: String::new(),
            partition: DEFAULT_PARTITION.to_string(),
            tags: Tags::new(),
            sse_algorithm: SseAlgorithm::default(),
            kms_master_key_id: None,
            bucket_key_enabled: None,
            log: PrivateBucketLogConfig::default(),
            versioned: false,
            lifecycle_rules: None,
            prevent_destroy: false,
        }
    }
}

impl PrivateBucketConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        PrivateBucketConfig {
            bucket: bucket.into(),
            ..PrivateBucketConfig::default()
        }
    }
}

impl BucketConstruct for PrivateBucketConfig {
    fn construct_name() -> &'static str {
        "S3PrivateBucket"
    }

    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    fn partition(&self) -> &str {
        &self.partition
    }
}

/// A log bucket that only the S3 logging service may write to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct LogBucketConfig {
    pub bucket: String,
    pub partition: String,
    pub tags: Tags,
    pub log_prefix: String,
    pub sse_algorithm: SseAlgorithm,
    pub kms_master_key_id: Option<String>,
    pub bucket_key_enabled: Option<bool>,
    pub lifecycle_rules: Option<Vec<LifecycleRule>>,
    pub prevent_destroy: bool,
}

impl Default for LogBucketConfig {
    fn default() -> Self {
        LogBucketConfig {
            bucket: String::new(),
            partition: DEFAULT_PARTITION.to_string(),
            tags: Tags::new(),
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
            sse_algorithm: SseAlgorithm::default(),
            kms_master_key_id: None,
            bucket_key_enabled: None,
            lifecycle_rules: None,
            prevent_destroy: false,
        }
    }
}

impl LogBucketConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        LogBucketConfig {
            bucket: bucket.into(),
            ..LogBucketConfig::default()
        }
    }
}

impl BucketConstruct for LogBucketConfig {
    fn construct_name() -> &'static str {
        "S3LogBucket"
    }

    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    fn partition(&self) -> &str {
        &self.partition
    }
}

/// A read-only public, unencrypted bucket for static assets.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct PublicBucketConfig {
    pub bucket: String,
    pub partition: String,
    pub tags: Tags,
    pub force_destroy: Option<bool>,
    pub versioned: bool,
    pub cors: Vec<CorsRule>,
    pub force_tls: bool,
}

impl Default for PublicBucketConfig {
    fn default() -> Self {
        PublicBucketConfig {
            bucket: String::new(),
            partition: DEFAULT_PARTITION.to_string(),
            tags: Tags::new(),
            force_destroy: None,
            versioned: false,
            cors: Vec::new(),
            force_tls: false,
        }
    }
}

impl PublicBucketConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        PublicBucketConfig {
            bucket: bucket.into(),
            ..PublicBucketConfig::default()
        }
    }
}

impl BucketConstruct for PublicBucketConfig {
    fn construct_name() -> &'static str {
        "S3PublicBucket"
    }

    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    fn partition(&self) -> &str {
        &self.partition
    }
}

/// A public-read website bucket, for preview builds or static docs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct WebsiteBucketConfig {
    pub bucket: String,
    pub partition: String,
    pub tags: Tags,
    pub force_destroy: Option<bool>,
    pub versioned: bool,
    pub cors: Vec<CorsRule>,
    pub index: Option<String>,
    pub error_index: Option<String>,
    pub rules: Vec<RoutingRule>,
}

impl Default for WebsiteBucketConfig {
    fn default() -> Self {
        WebsiteBucketConfig {
            bucket: String::new(),
            partition: DEFAULT_PARTITION.to_string(),
            tags: Tags::new(),
            force_destroy: None,
            versioned: false,
            cors: Vec::new(),
            index: None,
            error_index: None,
            rules: Vec::new(),
        }
    }
}

impl WebsiteBucketConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        WebsiteBucketConfig {
            bucket: bucket.into(),
            ..WebsiteBucketConfig::default()
        }
    }
}

impl BucketConstruct for WebsiteBucketConfig {
    fn construct_name() -> &'static str {
        "S3WebsiteBucket"
    }

    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    fn partition(&self) -> &str {
        &self.partition
    }
}

/// A private bucket together with the bucket receiving its access logs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PrivateBucketBlueprint {
    pub bucket: BucketBlueprint,
    pub log_bucket: BucketBlueprint,
}

/// Synthesize a private bucket and its `<bucket>-logs` companion.
///
/// The policy denies plain HTTP, TLS below 1.2, uploads without the
/// configured encryption header and, with a KMS bucket key, uploads that skip
/// the bucket key. Versioned buckets archive old versions unless
/// `lifecycle_rules` is given.
pub fn private_bucket(
    config: &PrivateBucketConfig,
    account_id: &str,
) -> ConstructResult<PrivateBucketBlueprint> {
    let arn = config.bucket_arn()?;
    let bucket_arn = arn.to_string();
    let log_prefix = config
        .log
        .log_prefix
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_PREFIX.to_string());

    let log_bucket = log_bucket(
        &LogBucketConfig {
            bucket: format!("{}{LOG_BUCKET_SUFFIX}", config.bucket),
            partition: config.partition.clone(),
            tags: config.tags.clone(),
            log_prefix: log_prefix.clone(),
            prevent_destroy: config.prevent_destroy,
            ..LogBucketConfig::default()
        },
        account_id,
    )?;

    let encryption = ServerSideEncryptionRule::new(
        config.sse_algorithm,
        config.kms_master_key_id.clone(),
        config.bucket_key_enabled,
    );

    let options = StatementOptions::default();
    let mut statements = vec![
        create_force_tls_requests_only_statement(&bucket_arn, &options)?,
        create_enforce_tls_v12_or_higher_statement(&bucket_arn, &options)?,
        create_deny_incorrect_encryption_header_statement(
            &bucket_arn,
            config.sse_algorithm,
            &options,
        )?,
        create_deny_unencrypted_object_uploads_statement(&bucket_arn, &options)?,
    ];
    if encryption.uses_bucket_key() {
        statements.push(create_deny_bucket_keyless_uploads_statement(
            &bucket_arn,
            &options,
        )?);
    }

    let lifecycle_rules = match &config.lifecycle_rules {
        Some(rules) => rules.clone(),
        None if config.versioned => vec![LifecycleRule::auto_archive_versions()],
        None => Vec::new(),
    };

    let mut bucket = BucketBlueprint::new(&config.bucket, &arn, &config.tags).locked_down();
    bucket.prevent_destroy = config.prevent_destroy;
    bucket.encryption = Some(encryption);
    bucket.versioned = config.versioned;
    bucket.lifecycle_rules = lifecycle_rules;
    bucket.policy = Some(PolicyDocument::new(statements)?);
    bucket.logging = Some(LoggingTarget {
        target_bucket: log_bucket.bucket.clone(),
        target_prefix: log_prefix,
    });

    debug!(
        event = "Blueprint",
        phase = "PrivateBucket",
        bucket = %bucket.bucket,
        log_bucket = %log_bucket.bucket,
        sse = %config.sse_algorithm,
        statements = bucket.policy_sids().len()
    );

    Ok(PrivateBucketBlueprint { bucket, log_bucket })
}

/// Synthesize a log bucket writable by the S3 logging service of `account_id`.
pub fn log_bucket(config: &LogBucketConfig, account_id: &str) -> ConstructResult<BucketBlueprint> {
    let arn = config.bucket_arn()?;
    let statement =
        create_allow_logging_service_statement(&arn.to_string(), account_id, &config.log_prefix)?;

    let mut bucket = BucketBlueprint::new(&config.bucket, &arn, &config.tags).locked_down();
    bucket.prevent_destroy = config.prevent_destroy;
    bucket.encryption = Some(ServerSideEncryptionRule::new(
        config.sse_algorithm,
        config.kms_master_key_id.clone(),
        config.bucket_key_enabled,
    ));
    bucket.lifecycle_rules = config
        .lifecycle_rules
        .clone()
        .unwrap_or_else(|| vec![LifecycleRule::auto_archive_logs()]);
    bucket.policy = Some(PolicyDocument::new(vec![statement])?);

    debug!(
        event = "Blueprint",
        phase = "LogBucket",
        bucket = %bucket.bucket,
        log_prefix = %config.log_prefix
    );

    Ok(bucket)
}

/// Synthesize a public, read-only asset bucket.
pub fn public_bucket(config: &PublicBucketConfig) -> ConstructResult<BucketBlueprint> {
    let arn = config.bucket_arn()?;
    let bucket_arn = arn.to_string();

    let options = StatementOptions::default();
    let mut statements = vec![create_allow_public_get_object_statement(
        &bucket_arn,
        &options,
    )?];
    if config.force_tls {
        statements.push(create_force_tls_requests_only_statement(
            &bucket_arn,
            &options,
        )?);
        statements.push(create_enforce_tls_v12_or_higher_statement(
            &bucket_arn,
            &options,
        )?);
    }

    let mut bucket = BucketBlueprint::new(&config.bucket, &arn, &config.tags);
    bucket.force_destroy = config.force_destroy.unwrap_or(true);
    bucket.versioned = config.versioned;
    bucket.cors_rules = cors_rules_or_default(&config.cors, PUBLIC_BUCKET_CORS_MAX_AGE);
    bucket.policy = Some(PolicyDocument::new(statements)?);

    debug!(
        event = "Blueprint",
        phase = "PublicBucket",
        bucket = %bucket.bucket,
        force_tls = config.force_tls
    );

    Ok(bucket)
}

/// Synthesize a static website bucket.
pub fn website_bucket(config: &WebsiteBucketConfig) -> ConstructResult<BucketBlueprint> {
    let arn = config.bucket_arn()?;

    let mut bucket = BucketBlueprint::new(&config.bucket, &arn, &config.tags);
    bucket.force_destroy = config.force_destroy.unwrap_or(true);
    bucket.acl = Some(PUBLIC_READ_ACL.to_string());
    bucket.versioned = config.versioned;
    bucket.cors_rules = cors_rules_or_default(&config.cors, WEBSITE_BUCKET_CORS_MAX_AGE);
    bucket.website = Some(WebsiteConfiguration::new(
        config.index.clone(),
        config.error_index.clone(),
        config.rules.clone(),
    ));

    debug!(event = "Blueprint", phase = "WebsiteBucket", bucket = %bucket.bucket);

    Ok(bucket)
}
