//! Statement principals.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display as StrumDisplay, EnumString};
use utoipa::ToSchema;

/// Service principal used by S3 server access logging.
pub const LOGGING_SERVICE_PRINCIPAL: &str = "logging.s3.amazonaws.com";

/// The namespace a principal identifier lives in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    StrumDisplay,
    EnumString,
    AsRefStr,
)]
pub enum PrincipalKind {
    #[serde(rename = "AWS")]
    #[strum(serialize = "AWS")]
    Aws,
    Service,
    Federated,
    CanonicalUser,
}

/// A `{type, identifiers}` pair, e.g. `{AWS: ["*"]}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Principal {
    #[serde(rename = "type")]
    pub kind: PrincipalKind,
    pub identifiers: Vec<String>,
}

impl Principal {
    pub fn new<I, S>(kind: PrincipalKind, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal {
            kind,
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Everyone: `{AWS: ["*"]}`.
    pub fn anyone() -> Self {
        Principal::new(PrincipalKind::Aws, ["*"])
    }

    pub fn aws<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal::new(PrincipalKind::Aws, identifiers)
    }

    pub fn service<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal::new(PrincipalKind::Service, identifiers)
    }

    /// The S3 server access logging service.
    pub fn logging_service() -> Self {
        Principal::service([LOGGING_SERVICE_PRINCIPAL])
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:[{}]", self.kind, self.identifiers.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use yare::parameterized;

    #[parameterized(
        aws = { PrincipalKind::Aws, "AWS" },
        service = { PrincipalKind::Service, "Service" },
        federated = { PrincipalKind::Federated, "Federated" },
        canonical_user = { PrincipalKind::CanonicalUser, "CanonicalUser" },
    )]
    fn test_principal_kind_names(kind: PrincipalKind, name: &str) {
        assert_eq!(kind.as_ref(), name);
        assert_eq!(PrincipalKind::from_str(name).unwrap(), kind);
        assert_eq!(serde_json::to_value(kind).unwrap(), name);
    }

    #[test]
    fn test_anyone() {
        let principal = Principal::anyone();
        assert_eq!(principal.kind, PrincipalKind::Aws);
        assert_eq!(principal.identifiers, vec!["*".to_string()]);
        assert_eq!(principal.to_string(), "AWS:[*]");
    }

    #[test]
    fn test_logging_service() {
        let principal = Principal::logging_service();
        assert_eq!(principal.kind, PrincipalKind::Service);
        assert_eq!(principal.identifiers, vec![LOGGING_SERVICE_PRINCIPAL.to_string()]);
    }

    #[test]
    fn test_principal_serialization_uses_type_key() {
        let principal = Principal::aws(["arn:aws:iam::123456789012:root"]);
        let serialized = serde_json::to_value(&principal).unwrap();
        assert_eq!(
            serialized,
            serde_json::json!({
                "type": "AWS",
                "identifiers": ["arn:aws:iam::123456789012:root"]
            })
        );
        let deserialized: Principal = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, principal);
    }
}
