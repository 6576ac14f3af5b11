//! Registry errors.
//!
//! Name collisions are not errors: they are logged and resolved at
//! registration. What remains is fatal for the document build.

use crate::DescribeError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No describer in the chain supports a registered model.
    #[error("Schema of type \"{ty}\" can't be generated, no describer supports it.")]
    UnsupportedType { ty: String },

    /// The supporting describer failed.
    #[error("failed to describe schema \"{name}\": {source}")]
    Describe {
        name: String,
        #[source]
        source: DescribeError,
    },

    #[error("invalid registry configuration: {0}")]
    Config(#[from] serde_json::Error),
}
