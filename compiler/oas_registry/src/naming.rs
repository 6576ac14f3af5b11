//! Schema naming strategies.
//!
//! A naming strategy turns an object descriptor into a candidate schema
//! name. Strategies are only consulted for plain object kinds; everything
//! else is named after its builtin literal by the registry.

use oas_ir::{BuiltinType, TypeDescriptor};
use serde::{Deserialize, Serialize};

/// Derives a candidate schema name from an object descriptor.
pub trait NamingStrategy {
    fn type_name(&self, ty: &TypeDescriptor) -> String;
}

impl<F> NamingStrategy for F
where
    F: Fn(&TypeDescriptor) -> String,
{
    fn type_name(&self, ty: &TypeDescriptor) -> String {
        self(ty)
    }
}

/// Namespace/module qualifier separators: `\`, `::`, `.` and `/`.
fn is_separator(c: char) -> bool {
    matches!(c, '\\' | ':' | '.' | '/')
}

/// Keeps only the bare identifier: `App\Model\User` becomes `User`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DiscardNamespace;

impl NamingStrategy for DiscardNamespace {
    fn type_name(&self, ty: &TypeDescriptor) -> String {
        let Some(class) = ty.class() else {
            return BuiltinType::Object.as_str().to_owned();
        };
        class
            .rsplit(is_separator)
            .find(|segment| !segment.is_empty())
            .unwrap_or(class)
            .to_owned()
    }
}

/// Keeps the whole qualified path, dot-separated: `App\Model\User` becomes
/// `App.Model.User`.
///
/// Distinct classes never share a name under this strategy.
#[derive(Copy, Clone, Debug, Default)]
pub struct FullyQualified;

impl NamingStrategy for FullyQualified {
    fn type_name(&self, ty: &TypeDescriptor) -> String {
        let segments: Vec<&str> = ty
            .class()
            .unwrap_or_default()
            .split(is_separator)
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.is_empty() {
            BuiltinType::Object.as_str().to_owned()
        } else {
            segments.join(".")
        }
    }
}

/// Configuration-level choice of naming strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategyKind {
    #[default]
    DiscardNamespace,
    FullyQualified,
}

impl NamingStrategyKind {
    pub fn build(self) -> Box<dyn NamingStrategy> {
        match self {
            Self::DiscardNamespace => Box::new(DiscardNamespace),
            Self::FullyQualified => Box::new(FullyQualified),
        }
    }
}

#[cfg(test)]
mod tests;
