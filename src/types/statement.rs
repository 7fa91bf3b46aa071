//! A single access-control statement.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::condition::Condition;
use super::effect::Effect;
use super::principal::Principal;

/// One statement of a policy document, in the shape of the Terraform
/// `aws_iam_policy_document` data source.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct PolicyStatement {
    pub sid: String,
    pub effect: Effect,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub principals: Vec<Principal>,
    pub resources: Vec<String>,
    #[serde(rename = "condition", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl PolicyStatement {
    /// An empty statement; fill it with the `with_*` methods.
    pub fn new(sid: impl Into<String>, effect: Effect) -> Self {
        PolicyStatement {
            sid: sid.into(),
            effect,
            actions: Vec::new(),
            principals: Vec::new(),
            resources: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn with_principals(mut self, principals: Vec<Principal>) -> Self {
        self.principals = principals;
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

impl Display for PolicyStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}({}; {} on {})",
            self.effect,
            self.sid,
            self.actions.join(","),
            self.resources.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConditionTest, PrincipalKind};

    fn sample() -> PolicyStatement {
        PolicyStatement::new("ForceTLSRequestsOnly", Effect::Deny)
            .with_action("s3:*")
            .with_principals(vec![Principal::anyone()])
            .with_resource("arn:aws:s3:::bucket")
            .with_resource("arn:aws:s3:::bucket/*")
            .with_condition(Condition::new(
                ConditionTest::Bool,
                "aws:SecureTransport",
                ["false"],
            ))
    }

    #[test]
    fn test_builder_keeps_order() {
        let statement = sample();
        assert_eq!(statement.sid, "ForceTLSRequestsOnly");
        assert_eq!(statement.effect, Effect::Deny);
        assert_eq!(
            statement.resources,
            vec!["arn:aws:s3:::bucket", "arn:aws:s3:::bucket/*"]
        );
        assert_eq!(statement.principals[0].kind, PrincipalKind::Aws);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "Deny(ForceTLSRequestsOnly; s3:* on arn:aws:s3:::bucket,arn:aws:s3:::bucket/*)"
        );
    }

    #[test]
    fn test_serialization_shape() {
        insta::assert_json_snapshot!(sample(), @r#"
        {
          "sid": "ForceTLSRequestsOnly",
          "effect": "Deny",
          "actions": [
            "s3:*"
          ],
          "principals": [
            {
              "type": "AWS",
              "identifiers": [
                "*"
              ]
            }
          ],
          "resources": [
            "arn:aws:s3:::bucket",
            "arn:aws:s3:::bucket/*"
          ],
          "condition": [
            {
              "test": "Bool",
              "variable": "aws:SecureTransport",
              "values": [
                "false"
              ]
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_empty_collections_are_skipped() {
        let statement = PolicyStatement::new("Bare", Effect::Allow).with_action("s3:GetObject");
        let serialized = serde_json::to_value(&statement).unwrap();
        assert!(serialized.get("principals").is_none());
        assert!(serialized.get("condition").is_none());

        let deserialized: PolicyStatement = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, statement);
    }
}
