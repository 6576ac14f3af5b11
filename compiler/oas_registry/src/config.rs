//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::{AliasTable, NamingStrategyKind, RegistryError};

/// Naming strategy and alias table for one document build.
///
/// ```json
/// {
///     "naming": "discard_namespace",
///     "aliases": { "UserPublic": { "type": "App\\User", "groups": ["public"] } }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub naming: NamingStrategyKind,
    pub aliases: AliasTable,
}

impl RegistryConfig {
    pub fn from_json(source: &str) -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(source)?)
    }
}
