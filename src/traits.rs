use crate::arn::Arn;
use crate::error::ConstructResult;
use crate::validation::validate_s3_bucket_name;

pub const DEFAULT_PARTITION: &str = "aws";

/// Anything that describes a single named S3 bucket, e.g. the config of a
/// private, log, public or website bucket.
pub trait BucketConstruct {
    /// The construct name used in error messages ("S3PrivateBucket", ...)
    fn construct_name() -> &'static str;

    /// The explicit bucket name.
    fn bucket_name(&self) -> &str;

    /// The AWS partition the bucket lives in, `aws` by default
    fn partition(&self) -> &str {
        DEFAULT_PARTITION
    }

    /// Validate the bucket name and derive `arn:<partition>:s3:::<bucket>`.
    fn bucket_arn(&self) -> ConstructResult<Arn> {
        validate_s3_bucket_name(Self::construct_name(), self.bucket_name())?;
        Ok(Arn::s3_bucket(self.partition(), self.bucket_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructError;

    struct Named(&'static str);

    impl BucketConstruct for Named {
        fn construct_name() -> &'static str {
            "Named"
        }

        fn bucket_name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_bucket_arn_uses_default_partition() {
        let arn = Named("assets").bucket_arn().unwrap();
        assert_eq!(arn.to_string(), "arn:aws:s3:::assets");
    }

    #[test]
    fn test_bucket_arn_validates_name() {
        let err = Named("Assets").bucket_arn().unwrap_err();
        assert_eq!(
            err,
            ConstructError::InvalidBucketName("Named: 'Assets' bucket name is invalid.".to_string())
        );
    }
}
