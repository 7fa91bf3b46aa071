//! S3 building blocks: policy statements, encryption, lifecycle, CORS,
//! website settings and the bucket blueprints assembled from them.

pub mod bucket;
pub mod cors;
pub mod lifecycle;
pub mod policies;
pub mod sse;
pub mod website;

pub use bucket::{
    BucketBlueprint, LogBucketConfig, LoggingTarget, ObjectOwnership, PrivateBucketBlueprint,
    PrivateBucketConfig, PrivateBucketLogConfig, PublicAccessBlock, PublicBucketConfig, Tags,
    WebsiteBucketConfig, log_bucket, private_bucket, public_bucket, website_bucket,
};
pub use cors::CorsRule;
pub use lifecycle::{LifecycleRule, RuleStatus, StorageClass};
pub use policies::{
    S3Statement, StatementOptions, create_allow_logging_service_statement,
    create_allow_public_get_object_statement, create_deny_bucket_keyless_uploads_statement,
    create_deny_incorrect_encryption_header_statement,
    create_deny_unencrypted_object_uploads_statement, create_enforce_tls_v12_or_higher_statement,
    create_force_tls_requests_only_statement,
};
pub use sse::{ServerSideEncryptionRule, SseAlgorithm};
pub use website::{RoutingRule, WebsiteConfiguration};
