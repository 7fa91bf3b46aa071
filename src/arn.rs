//! Amazon Resource Name parsing.
//!
//! An ARN is six colon-delimited sections: `arn:partition:service:region:account-id:resource`.
//! The resource section may itself contain colons (`db:mysql-db`), so everything
//! after the fifth delimiter is kept as a single field, empty when nothing follows.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{ConstructError, ConstructResult};

pub const ARN_PREFIX: &str = "arn:";
pub const ARN_SECTION_DELIMITER: char = ':';

/// A parsed ARN. Omitted sections are kept as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Arn {
    partition: String,
    service: String,
    region: String,
    account_id: String,
    resource: String,
}

impl Arn {
    pub fn new(
        partition: impl Into<String>,
        service: impl Into<String>,
        region: impl Into<String>,
        account_id: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Arn {
            partition: partition.into(),
            service: service.into(),
            region: region.into(),
            account_id: account_id.into(),
            resource: resource.into(),
        }
    }

    /// ARN of an S3 bucket, `arn:<partition>:s3:::<bucket>`.
    pub fn s3_bucket(partition: impl Into<String>, bucket: impl Into<String>) -> Self {
        Arn::new(partition, "s3", "", "", bucket)
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl Display for Arn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

impl FromStr for Arn {
    type Err = ConstructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse `value` into its five named sections.
///
/// Fails with [`ConstructError::InvalidArn`] when the `arn:` prefix is
/// missing or the value has fewer than five sections. A missing resource
/// section parses as an empty resource.
pub fn parse(value: &str) -> ConstructResult<Arn> {
    if !value.starts_with(ARN_PREFIX) {
        debug!(event = "Arn", phase = "Parse", value, reason = "prefix");
        return Err(ConstructError::InvalidArn("Prefix is missing.".to_string()));
    }

    let mut sections = value.split(ARN_SECTION_DELIMITER);
    let (Some(_), Some(partition), Some(service), Some(region), Some(account_id)) = (
        sections.next(),
        sections.next(),
        sections.next(),
        sections.next(),
        sections.next(),
    ) else {
        debug!(event = "Arn", phase = "Parse", value, reason = "sections");
        return Err(ConstructError::InvalidArn(
            "Wrong number of sections.".to_string(),
        ));
    };
    let resource = sections.join(&ARN_SECTION_DELIMITER.to_string());

    Ok(Arn::new(partition, service, region, account_id, resource))
}

/// Whether `value` parses as an ARN.
pub fn is_arn(value: &str) -> bool {
    parse(value).is_ok()
}

/// Whether `value` parses as an ARN whose service section equals `service`.
pub fn has_arn_service(value: &str, service: &str) -> bool {
    parse(value).is_ok_and(|arn| arn.service == service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_parse_missing_prefix() {
        let err = parse("aws:s3:::bucket/picture.jpg").unwrap_err();
        assert_eq!(err, ConstructError::InvalidArn("Prefix is missing.".to_string()));
    }

    #[parameterized(
        three_sections = { "arn:aws:s3" },
        four_sections = { "arn:aws:s3:bucket" },
        prefix_only = { "arn:" },
    )]
    fn test_parse_wrong_number_of_sections(input: &str) {
        let err = parse(input).unwrap_err();
        assert_eq!(
            err,
            ConstructError::InvalidArn("Wrong number of sections.".to_string())
        );
    }

    #[test]
    fn test_parse_partial_arn() {
        let arn = parse("arn:aws:s3:::bucket/picture.jpg").unwrap();
        assert_eq!(arn, Arn::new("aws", "s3", "", "", "bucket/picture.jpg"));
    }

    #[parameterized(
        elasticbeanstalk = {
            "arn:aws:elasticbeanstalk:us-east-1:123456789012:environment/my-app",
            "aws", "elasticbeanstalk", "us-east-1", "123456789012", "environment/my-app"
        },
        iam_without_region = {
            "arn:aws:iam::123456789012:user/User",
            "aws", "iam", "", "123456789012", "user/User"
        },
        rds_resource_with_colon = {
            "arn:aws:rds:eu-west-1:123456789012:db:mysql-db",
            "aws", "rds", "eu-west-1", "123456789012", "db:mysql-db"
        },
        missing_resource = {
            "arn:aws:s3::",
            "aws", "s3", "", "", ""
        },
        iam_account_only = {
            "arn:aws:iam::123456789012",
            "aws", "iam", "", "123456789012", ""
        },
        china_partition = {
            "arn:aws-cn:s3:::my-bucket",
            "aws-cn", "s3", "", "", "my-bucket"
        },
    )]
    fn test_parse_full_arn(
        input: &str,
        partition: &str,
        service: &str,
        region: &str,
        account_id: &str,
        resource: &str,
    ) {
        let arn = parse(input).unwrap();
        assert_eq!(arn.partition(), partition);
        assert_eq!(arn.service(), service);
        assert_eq!(arn.region(), region);
        assert_eq!(arn.account_id(), account_id);
        assert_eq!(arn.resource(), resource);
    }

    #[parameterized(
        s3_object = { "arn:aws:s3:::bucket/picture.jpg" },
        iam_user = { "arn:aws:iam::123456789012:user/User" },
        all_sections = { "arn:aws:elasticbeanstalk:us-east-1:123456789012:environment/my-app" },
        all_empty = { "arn:::::" },
    )]
    fn test_display_reconstructs_input(input: &str) {
        let arn: Arn = input.parse().unwrap();
        assert_eq!(arn.to_string(), input);
    }

    #[test]
    fn test_empty_sections_are_empty_strings() {
        let arn = parse("arn:::::").unwrap();
        assert_eq!(arn, Arn::default());
    }

    #[parameterized(
        valid = { "arn:aws:s3:::bucket", true },
        missing_prefix = { "aws:s3:::bucket", false },
        too_short = { "arn:aws:s3", false },
        no_resource = { "arn:aws:s3::", true },
        empty = { "", false },
        uppercase_prefix = { "ARN:aws:s3:::bucket", false },
    )]
    fn test_is_arn(input: &str, expected: bool) {
        assert_eq!(is_arn(input), expected);
    }

    #[parameterized(
        s3_matches = { "arn:aws:s3:::bucket", "s3", true },
        s3_mismatch = { "arn:aws:iam::123456789012:user/User", "s3", false },
        not_an_arn = { "bucket", "s3", false },
    )]
    fn test_has_arn_service(input: &str, service: &str, expected: bool) {
        assert_eq!(has_arn_service(input, service), expected);
    }

    #[test]
    fn test_s3_bucket_constructor() {
        let arn = Arn::s3_bucket("aws", "tfstate");
        assert_eq!(arn.to_string(), "arn:aws:s3:::tfstate");
    }

    #[test]
    fn test_arn_serialization() {
        let arn = parse("arn:aws:rds:eu-west-1:123456789012:db:mysql-db").unwrap();
        let serialized = serde_json::to_value(&arn).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({
                "partition": "aws",
                "service": "rds",
                "region": "eu-west-1",
                "account_id": "123456789012",
                "resource": "db:mysql-db"
            })
        );
    }
}
