//! Policy documents and their IAM JSON rendering.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{ConstructError, ConstructResult};

use super::statement::PolicyStatement;

/// The only IAM policy language version in use.
pub const POLICY_VERSION: &str = "2012-10-17";

/// An ordered set of statements with unique sids.
///
/// Deserialization goes through [`PolicyDocument::new`], so a document read
/// from JSON holds the same invariants as one built in code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(try_from = "RawPolicyDocument")]
pub struct PolicyDocument {
    version: String,
    #[serde(rename = "statement")]
    statements: Vec<PolicyStatement>,
}

#[derive(Deserialize)]
struct RawPolicyDocument {
    version: String,
    #[serde(rename = "statement")]
    statements: Vec<PolicyStatement>,
}

impl TryFrom<RawPolicyDocument> for PolicyDocument {
    type Error = ConstructError;

    fn try_from(raw: RawPolicyDocument) -> Result<Self, Self::Error> {
        if raw.version != POLICY_VERSION {
            return Err(ConstructError::InvalidArgument(format!(
                "unsupported policy version: {}",
                raw.version
            )));
        }
        PolicyDocument::new(raw.statements)
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        PolicyDocument {
            version: POLICY_VERSION.to_string(),
            statements: Vec::new(),
        }
    }
}

impl PolicyDocument {
    pub fn new(statements: Vec<PolicyStatement>) -> ConstructResult<Self> {
        if let Some(sid) = statements.iter().map(|s| s.sid.as_str()).duplicates().next() {
            return Err(ConstructError::DuplicateSid(sid.to_string()));
        }
        debug!(
            event = "PolicyDocument",
            phase = "Created",
            statements = statements.len()
        );
        Ok(PolicyDocument {
            statements,
            ..PolicyDocument::default()
        })
    }

    /// Append a statement, rejecting a sid that is already present.
    pub fn push(&mut self, statement: PolicyStatement) -> ConstructResult<()> {
        if self.statements.iter().any(|s| s.sid == statement.sid) {
            return Err(ConstructError::DuplicateSid(statement.sid));
        }
        self.statements.push(statement);
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn statements(&self) -> &[PolicyStatement] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Sids in document order.
    pub fn sids(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.sid.as_str()).collect()
    }

    /// Render in the IAM JSON policy grammar.
    ///
    /// Single-element lists collapse to a plain string, principals are grouped
    /// by type and conditions by operator, then variable. Conditions repeating
    /// an operator and variable have their values merged.
    pub fn to_iam_json(&self) -> Value {
        let statements: Vec<Value> = self.statements.iter().map(statement_to_iam_json).collect();
        json!({
            "Version": self.version,
            "Statement": statements,
        })
    }
}

fn string_or_list(values: &[String]) -> Value {
    match values {
        [single] => Value::String(single.clone()),
        _ => json!(values),
    }
}

fn statement_to_iam_json(statement: &PolicyStatement) -> Value {
    let mut out = Map::new();
    out.insert("Sid".to_string(), json!(statement.sid));
    out.insert("Effect".to_string(), json!(statement.effect.to_string()));

    if !statement.principals.is_empty() {
        let mut principals = Map::new();
        for (kind, group) in &statement
            .principals
            .iter()
            .sorted_by_key(|p| p.kind)
            .chunk_by(|p| p.kind)
        {
            let identifiers: Vec<String> = group
                .flat_map(|p| p.identifiers.iter().cloned())
                .collect();
            principals.insert(kind.to_string(), string_or_list(&identifiers));
        }
        out.insert("Principal".to_string(), Value::Object(principals));
    }

    out.insert("Action".to_string(), string_or_list(&statement.actions));
    out.insert("Resource".to_string(), string_or_list(&statement.resources));

    if !statement.conditions.is_empty() {
        let mut grouped: BTreeMap<String, BTreeMap<&str, Vec<String>>> = BTreeMap::new();
        for condition in &statement.conditions {
            let values = grouped
                .entry(condition.test.to_string())
                .or_default()
                .entry(condition.variable.as_str())
                .or_default();
            for value in &condition.values {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        let conditions: Map<String, Value> = grouped
            .into_iter()
            .map(|(test, variables)| {
                let variables: Map<String, Value> = variables
                    .into_iter()
                    .map(|(variable, values)| (variable.to_string(), string_or_list(&values)))
                    .collect();
                (test, Value::Object(variables))
            })
            .collect();
        out.insert("Condition".to_string(), Value::Object(conditions));
    }

    Value::Object(out)
}
