//! Policy data model: statements and the documents that hold them.
//!
//! Statements serialize in the Terraform `aws_iam_policy_document` shape
//! (`sid`, `effect`, `actions`, `principals`, `resources`, `condition`);
//! [`PolicyDocument::to_iam_json`] renders the IAM JSON grammar instead.

mod condition;
mod document;
mod effect;
mod principal;
mod statement;

pub use condition::{Condition, ConditionTest};
pub use document::{POLICY_VERSION, PolicyDocument};
pub use effect::Effect;
pub use principal::{LOGGING_SERVICE_PRINCIPAL, Principal, PrincipalKind};
pub use statement::PolicyStatement;
