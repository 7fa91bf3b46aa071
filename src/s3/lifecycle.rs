//! Lifecycle rules and the default rule sets.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum RuleStatus {
    #[default]
    Enabled,
    Disabled,
}

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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageClass {
    StandardIa,
    OnezoneIa,
    IntelligentTiering,
    Glacier,
    GlacierIr,
    DeepArchive,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Transition {
    pub days: u32,
    pub storage_class: StorageClass,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct NoncurrentVersionTransition {
    pub noncurrent_days: u32,
    pub storage_class: StorageClass,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Expiration {
    pub days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct NoncurrentVersionExpiration {
    pub noncurrent_days: u32,
}

/// One rule of a bucket lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct LifecycleRule {
    pub id: String,
    #[serde(default)]
    pub status: RuleStatus,
    #[serde(rename = "transition", default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Expiration>,
    #[serde(
        rename = "noncurrent_version_transition",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub noncurrent_version_transitions: Vec<NoncurrentVersionTransition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,
}

impl LifecycleRule {
    pub fn new(id: impl Into<String>) -> Self {
        LifecycleRule {
            id: id.into(),
            status: RuleStatus::Enabled,
            transitions: Vec::new(),
            expiration: None,
            noncurrent_version_transitions: Vec::new(),
            noncurrent_version_expiration: None,
        }
    }

    pub fn with_transition(mut self, days: u32, storage_class: StorageClass) -> Self {
        self.transitions.push(Transition {
            days,
            storage_class,
        });
        self
    }

    pub fn with_expiration(mut self, days: u32) -> Self {
        self.expiration = Some(Expiration { days });
        self
    }

    pub fn with_noncurrent_version_transition(
        mut self,
        noncurrent_days: u32,
        storage_class: StorageClass,
    ) -> Self {
        self.noncurrent_version_transitions
            .push(NoncurrentVersionTransition {
                noncurrent_days,
                storage_class,
            });
        self
    }

    pub fn with_noncurrent_version_expiration(mut self, noncurrent_days: u32) -> Self {
        self.noncurrent_version_expiration = Some(NoncurrentVersionExpiration { noncurrent_days });
        self
    }

    /// Old object versions go to Glacier after a week and are dropped after a year.
    pub fn auto_archive_versions() -> Self {
        LifecycleRule::new("AutoArchiveVersions")
            .with_noncurrent_version_transition(7, StorageClass::Glacier)
            .with_noncurrent_version_expiration(365)
    }

    /// Log retention: infrequent access after 30 days, Glacier after 90, gone after a year.
    pub fn auto_archive_logs() -> Self {
        LifecycleRule::new("AutoArchive")
            .with_transition(30, StorageClass::StandardIa)
            .with_transition(90, StorageClass::Glacier)
            .with_expiration(365)
    }
}
