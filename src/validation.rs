//! Naming rules for S3 buckets and IPv4 addresses.
//!
//! See <https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html>.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{ConstructError, ConstructResult};

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]\d|\d)(?:\.(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]\d|\d)){3}$",
    )
    .unwrap_or_else(|e| panic!("invalid IPv4 pattern: {e}"))
});

static S3_BUCKET_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$")
        .unwrap_or_else(|e| panic!("invalid bucket name pattern: {e}"))
});

/// Whether `value` is a dotted-quad IPv4 address with no leading zeros.
pub fn check_ipv4(value: &str) -> bool {
    IPV4.is_match(value)
}

/// Whether `value` is a valid S3 bucket name.
pub fn check_s3_bucket_name(value: &str) -> bool {
    S3_BUCKET_NAME.is_match(value)
        && !value.starts_with("xn--")
        && !value.ends_with("-s3alias")
        && !value.contains("..")
        && !check_ipv4(value)
}

/// Like [`check_s3_bucket_name`], but reports which construct rejected the name.
pub fn validate_s3_bucket_name(owner: &str, value: &str) -> ConstructResult<()> {
    if check_s3_bucket_name(value) {
        return Ok(());
    }
    warn!(event = "Validation", phase = "BucketName", owner, bucket = value);
    Err(ConstructError::InvalidBucketName(format!(
        "{owner}: '{value}' bucket name is invalid."
    )))
}
