//! Bucket policy statements enforcing the S3 security defaults.
//!
//! Every statement targets a bucket ARN (`arn:aws:s3:::bucket`), never an
//! object ARN: object-level resources are derived by appending `/*`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::arn::has_arn_service;
use crate::error::{ConstructError, ConstructResult};
use crate::types::{Condition, ConditionTest, Effect, PolicyStatement, Principal};

use super::sse::SseAlgorithm;

const OBJECTS_WILDCARD: &str = "/*";

/// Options shared by the statement builders.
///
/// `principals` replaces the default `{AWS: ["*"]}` principal when set; the
/// two are never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(default)]
pub struct StatementOptions {
    pub principals: Option<Vec<Principal>>,
}

impl StatementOptions {
    pub fn with_principals(principals: Vec<Principal>) -> Self {
        StatementOptions {
            principals: Some(principals),
        }
    }
}

/// The statements this crate knows how to build, keyed by sid.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum S3Statement {
    AllowPublicGetObject,
    ForceTlsRequestsOnly,
    EnforceTlsV12OrHigher,
    DenyIncorrectEncryptionHeader { sse_algorithm: SseAlgorithm },
    DenyUnencryptedObjectUploads,
    DenyBucketKeylessUploads,
    AllowLoggingService { account_id: String, log_prefix: String },
}

impl S3Statement {
    pub fn sid(&self) -> &'static str {
        match self {
            Self::AllowPublicGetObject => "AllowPublicGetObject",
            Self::ForceTlsRequestsOnly => "ForceTLSRequestsOnly",
            Self::EnforceTlsV12OrHigher => "EnforceTLSv12OrHigher",
            Self::DenyIncorrectEncryptionHeader { .. } => "DenyIncorrectEncryptionHeader",
            Self::DenyUnencryptedObjectUploads => "DenyUnencryptedObjectUploads",
            Self::DenyBucketKeylessUploads => "DenyBucketKeylessUploads",
            Self::AllowLoggingService { .. } => "AllowLoggingService",
        }
    }

    /// Build the statement for `bucket_arn`.
    ///
    /// `options` is ignored by `AllowLoggingService`, whose principal is
    /// always the logging service.
    pub fn build(
        &self,
        bucket_arn: &str,
        options: &StatementOptions,
    ) -> ConstructResult<PolicyStatement> {
        let sid = self.sid();
        check_bucket_arn(sid, bucket_arn)?;

        let objects = format!("{bucket_arn}{OBJECTS_WILDCARD}");
        let principals = match self {
            Self::AllowLoggingService { .. } => vec![Principal::logging_service()],
            _ => options
                .principals
                .clone()
                .unwrap_or_else(|| vec![Principal::anyone()]),
        };

        let statement = match self {
            Self::AllowPublicGetObject => PolicyStatement::new(sid, Effect::Allow)
                .with_action("s3:GetObject")
                .with_resource(objects),
            Self::ForceTlsRequestsOnly => PolicyStatement::new(sid, Effect::Deny)
                .with_action("s3:*")
                .with_resource(bucket_arn)
                .with_resource(objects)
                .with_condition(Condition::new(
                    ConditionTest::Bool,
                    "aws:SecureTransport",
                    ["false"],
                )),
            Self::EnforceTlsV12OrHigher => PolicyStatement::new(sid, Effect::Deny)
                .with_action("s3:*")
                .with_resource(bucket_arn)
                .with_resource(objects)
                .with_condition(Condition::new(
                    ConditionTest::NumericLessThan,
                    "s3:TlsVersion",
                    ["1.2"],
                )),
            Self::DenyIncorrectEncryptionHeader { sse_algorithm } => {
                PolicyStatement::new(sid, Effect::Deny)
                    .with_action("s3:PutObject")
                    .with_resource(objects)
                    .with_condition(Condition::new(
                        ConditionTest::StringNotEquals,
                        "s3:x-amz-server-side-encryption",
                        [sse_algorithm.to_string()],
                    ))
            }
            Self::DenyUnencryptedObjectUploads => PolicyStatement::new(sid, Effect::Deny)
                .with_action("s3:PutObject")
                .with_resource(objects)
                .with_condition(Condition::new(
                    ConditionTest::Null,
                    "s3:x-amz-server-side-encryption",
                    ["true"],
                )),
            Self::DenyBucketKeylessUploads => PolicyStatement::new(sid, Effect::Deny)
                .with_action("s3:PutObject")
                .with_resource(objects)
                .with_condition(Condition::new(
                    ConditionTest::Null,
                    "s3:x-amz-server-side-encryption-bucket-key-enabled",
                    ["true"],
                )),
            Self::AllowLoggingService {
                account_id,
                log_prefix,
            } => {
                let prefix = log_prefix.strip_suffix('/').unwrap_or(log_prefix);
                PolicyStatement::new(sid, Effect::Allow)
                    .with_action("s3:PutObject")
                    .with_resource(format!("{bucket_arn}{prefix}{OBJECTS_WILDCARD}"))
                    .with_condition(Condition::new(
                        ConditionTest::ArnLike,
                        "aws:SourceArn",
                        [bucket_arn],
                    ))
                    .with_condition(Condition::new(
                        ConditionTest::StringEquals,
                        "aws:SourceAccount",
                        [account_id.as_str()],
                    ))
            }
        };

        debug!(
            event = "Statement",
            phase = "Built",
            sid,
            bucket_arn,
            principals = principals.len()
        );

        Ok(statement.with_principals(principals))
    }
}

fn check_bucket_arn(sid: &str, bucket_arn: &str) -> ConstructResult<()> {
    if !has_arn_service(bucket_arn, "s3") {
        return Err(ConstructError::InvalidArgument(format!(
            "{sid} requires an ARN for a S3 bucket resource."
        )));
    }
    if bucket_arn.ends_with(OBJECTS_WILDCARD) {
        return Err(ConstructError::InvalidArgument(format!(
            "{sid} ARN must not end with a slash wildcard (`/*`)."
        )));
    }
    Ok(())
}

pub fn create_allow_public_get_object_statement(
    bucket_arn: &str,
    options: &StatementOptions,
) -> ConstructResult<PolicyStatement> {
    S3Statement::AllowPublicGetObject.build(bucket_arn, options)
}

pub fn create_force_tls_requests_only_statement(
    bucket_arn: &str,
    options: &StatementOptions,
) -> ConstructResult<PolicyStatement> {
    S3Statement::ForceTlsRequestsOnly.build(bucket_arn, options)
}

pub fn create_enforce_tls_v12_or_higher_statement(
    bucket_arn: &str,
    options: &StatementOptions,
) -> ConstructResult<PolicyStatement> {
    S3Statement::EnforceTlsV12OrHigher.build(bucket_arn, options)
}

pub fn create_deny_incorrect_encryption_header_statement(
    bucket_arn: &str,
    sse_algorithm: SseAlgorithm,
    options: &StatementOptions,
) -> ConstructResult<PolicyStatement> {
    S3Statement::DenyIncorrectEncryptionHeader { sse_algorithm }.build(bucket_arn, options)
}

pub fn create_deny_unencrypted_object_uploads_statement(
    bucket_arn: &str,
    options: &StatementOptions,
) -> ConstructResult<PolicyStatement> {
    S3Statement::DenyUnencryptedObjectUploads.build(bucket_arn, options)
}

pub fn create_deny_bucket_keyless_uploads_statement(
    bucket_arn: &str,
    options: &StatementOptions,
) -> ConstructResult<PolicyStatement> {
    S3Statement::DenyBucketKeylessUploads.build(bucket_arn, options)
}

/// Let the S3 logging service write under `log_prefix` on behalf of `account_id`.
pub fn create_allow_logging_service_statement(
    bucket_arn: &str,
    account_id: &str,
    log_prefix: &str,
) -> ConstructResult<PolicyStatement> {
    S3Statement::AllowLoggingService {
        account_id: account_id.to_string(),
        log_prefix: log_prefix.to_string(),
    }
    .build(bucket_arn, &StatementOptions::default())
}
