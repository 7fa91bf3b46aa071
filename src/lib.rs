// src/lib.rs
pub use arn::{Arn, has_arn_service, is_arn, parse as parse_arn};
pub use error::{ConstructError, ConstructResult};
pub use loader::load_config;
pub use s3::{
    BucketBlueprint, LogBucketConfig, PrivateBucketBlueprint, PrivateBucketConfig,
    PublicBucketConfig, S3Statement, SseAlgorithm, StatementOptions, WebsiteBucketConfig,
    log_bucket, private_bucket, public_bucket, website_bucket,
};
pub use stacks::{TerraformBackendConfig, terraform_backend};
pub use traits::BucketConstruct;
pub use types::{Effect, PolicyDocument, PolicyStatement, Principal};
pub use validation::{check_ipv4, check_s3_bucket_name, validate_s3_bucket_name};

pub mod arn;
mod error;
mod loader;
pub mod s3;
pub mod stacks;
mod traits;
pub mod types;
pub mod validation;
