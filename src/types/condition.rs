//! Statement conditions.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// IAM condition operators used by the S3 statements.
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
pub enum ConditionTest {
    Bool,
    Null,
    NumericLessThan,
    StringEquals,
    StringNotEquals,
    ArnLike,
}

/// A `{test, variable, values}` predicate on the request context.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Condition {
    pub test: ConditionTest,
    pub variable: String,
    pub values: Vec<String>,
}

impl Condition {
    pub fn new<I, S>(test: ConditionTest, variable: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition {
            test,
            variable: variable.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}
