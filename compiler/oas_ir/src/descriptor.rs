//! Type descriptors.
//!
//! A `TypeDescriptor` is the shape of a value as seen by the schema
//! generator: a builtin kind tag, nullability, an optional class identifier
//! and, for collections, the nested key/value descriptors.
//!
//! # Kinds
//!
//! ```text
//! scalar      int, float, string, bool, null, resource, callable
//! object      object + class identifier (e.g. `App\Model\User`)
//! collection  array/iterable (or a traversable object) with key/value types
//! ```
//!
//! Descriptors are immutable once built and compared structurally, so two
//! independently constructed descriptors of the same shape are equal and
//! hash identically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Builtin kind of a described value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinType {
    /// Integer number.
    Int,
    /// Floating point number.
    Float,
    /// UTF-8 string.
    String,
    /// Boolean.
    Bool,
    /// Opaque runtime handle.
    Resource,
    /// Class instance, identified by its class identifier.
    Object,
    /// Array (list or map).
    Array,
    /// The null value.
    Null,
    /// Callable value.
    Callable,
    /// Any traversable value.
    Iterable,
}

impl BuiltinType {
    /// Every builtin kind, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Int,
        Self::Float,
        Self::String,
        Self::Bool,
        Self::Resource,
        Self::Object,
        Self::Array,
        Self::Null,
        Self::Callable,
        Self::Iterable,
    ];

    /// The lowercase literal for this kind.
    ///
    /// Doubles as the fixed schema name of non-object models.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Resource => "resource",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Callable => "callable",
            Self::Iterable => "iterable",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown builtin literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown builtin type `{0}`")]
pub struct ParseBuiltinTypeError(String);

impl FromStr for BuiltinType {
    type Err = ParseBuiltinTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|builtin| builtin.as_str() == s)
            .ok_or_else(|| ParseBuiltinTypeError(s.to_owned()))
    }
}

/// Shape of a value: builtin kind, nullability, class and collection types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    builtin: BuiltinType,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    collection: bool,
    #[serde(default)]
    key_types: Vec<TypeDescriptor>,
    #[serde(default)]
    value_types: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Build a descriptor from all of its parts.
    pub fn new(
        builtin: BuiltinType,
        nullable: bool,
        class: Option<String>,
        collection: bool,
        key_types: Vec<TypeDescriptor>,
        value_types: Vec<TypeDescriptor>,
    ) -> Self {
        Self {
            builtin,
            nullable,
            class,
            collection,
            key_types,
            value_types,
        }
    }

    /// A non-collection value of the given kind (no class).
    pub fn scalar(builtin: BuiltinType) -> Self {
        Self::new(builtin, false, None, false, Vec::new(), Vec::new())
    }

    /// An instance of the given class.
    pub fn object(class: impl Into<String>) -> Self {
        Self::new(
            BuiltinType::Object,
            false,
            Some(class.into()),
            false,
            Vec::new(),
            Vec::new(),
        )
    }

    /// An untyped collection (`mixed[]`) of the given kind.
    pub fn collection(builtin: BuiltinType) -> Self {
        Self::new(builtin, false, None, true, Vec::new(), Vec::new())
    }

    /// An integer-keyed array of `value`.
    pub fn list_of(value: TypeDescriptor) -> Self {
        Self::new(
            BuiltinType::Array,
            false,
            None,
            true,
            vec![Self::scalar(BuiltinType::Int)],
            vec![value],
        )
    }

    /// An array mapping `key` to `value`.
    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::new(BuiltinType::Array, false, None, true, vec![key], vec![value])
    }

    /// Copy of this descriptor with the given nullability.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[inline]
    pub fn builtin(&self) -> BuiltinType {
        self.builtin
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Class identifier, for object kinds.
    #[inline]
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    #[inline]
    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Whether this is a plain (non-collection) object kind.
    #[inline]
    pub fn is_object(&self) -> bool {
        self.builtin == BuiltinType::Object && !self.collection
    }

    pub fn key_types(&self) -> &[TypeDescriptor] {
        &self.key_types
    }

    pub fn value_types(&self) -> &[TypeDescriptor] {
        &self.value_types
    }

    /// The element type of a collection declaring exactly one value type.
    ///
    /// Returns `None` for non-collections, untyped collections and unions.
    pub fn collection_value_type(&self) -> Option<&TypeDescriptor> {
        match (self.collection, self.value_types.as_slice()) {
            (true, [value]) => Some(value),
            _ => None,
        }
    }

    /// Flattened diagnostic form, used in collision reports.
    ///
    /// Empty key/value type lists are rendered as `null`.
    pub fn to_record(&self) -> Value {
        json!({
            "class": self.class,
            "built_in_type": self.builtin.as_str(),
            "nullable": self.nullable,
            "collection": self.collection,
            "collection_key_types": records(&self.key_types),
            "collection_value_types": records(&self.value_types),
        })
    }
}

fn records(types: &[TypeDescriptor]) -> Value {
    if types.is_empty() {
        Value::Null
    } else {
        Value::Array(types.iter().map(TypeDescriptor::to_record).collect())
    }
}

/// Human-readable form used in error messages.
///
/// Objects print their class identifier, collections print their element
/// type followed by `[]` (`mixed[]` when untyped), everything else prints
/// its builtin literal.
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.builtin == BuiltinType::Object {
            return f.write_str(self.class().unwrap_or(BuiltinType::Object.as_str()));
        }
        if self.collection {
            return match self.collection_value_type() {
                Some(value) => write!(f, "{value}[]"),
                None => f.write_str("mixed[]"),
            };
        }
        f.write_str(self.builtin.as_str())
    }
}
