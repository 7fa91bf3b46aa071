use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Help text appended to every ARN format error.
const ARN_FORMAT_HELP: &str = "An ARN string representation must follow the general formats:
  - arn:partition:service:resource-type/resource-id
  - arn:partition:service:region:account-id:resource-id
  - arn:partition:service:region:account-id:resource-type/resource-id
  - arn:partition:service:region:account-id:resource-type:resource-id

More at https://docs.aws.amazon.com/general/latest/gr/aws-arns-and-namespaces.html";

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConstructError {
    #[error("Invalid ARN: {0}\n\n{help}", help = ARN_FORMAT_HELP)]
    InvalidArn(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    InvalidBucketName(String),

    #[error("duplicate statement sid: {0}")]
    DuplicateSid(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConstructError {
    /// The bare message, without the variant prefix or help text.
    pub fn message(&self) -> &str {
        match self {
            ConstructError::InvalidArn(msg)
            | ConstructError::InvalidArgument(msg)
            | ConstructError::InvalidBucketName(msg)
            | ConstructError::DuplicateSid(msg)
            | ConstructError::InvalidConfig(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for ConstructError {
    fn from(err: serde_json::Error) -> Self {
        ConstructError::InvalidConfig(err.to_string())
    }
}

pub type ConstructResult<T> = Result<T, ConstructError>;
