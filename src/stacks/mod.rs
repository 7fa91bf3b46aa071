//! Ready-made stacks composed from the S3 constructs.

pub mod terraform;

pub use terraform::{
    KmsAliasBlueprint, KmsKeyBlueprint, TerraformBackendBlueprint, TerraformBackendConfig,
    terraform_backend,
};
