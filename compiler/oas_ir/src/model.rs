//! The unit of registration.
//!
//! A `Model` pairs a `TypeDescriptor` with the serialization groups and the
//! free-form options a schema was requested with. Two models are the same
//! model when their `ModelKey`s are equal: group order and option insertion
//! order never matter for identity, but groups keep the caller's order for
//! display.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{ModelKey, TypeDescriptor};

/// Order-independent option bag attached to a model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert an option, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Compact JSON with every object's keys sorted, at any depth.
    ///
    /// Equal option bags always produce the same string.
    pub fn canonical(&self) -> String {
        let mut buf = String::new();
        write_object(self.0.iter(), &mut buf);
        buf
    }

    /// The options as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

// Sorts explicitly: `serde_json::Map` keeps insertion order once any crate in
// the build enables `preserve_order`.
fn write_object<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>, buf: &mut String) {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    buf.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        // Value's Display emits escaped, compact JSON.
        let _ = write!(buf, "{}:", Value::from(key.as_str()));
        write_canonical(value, buf);
    }
    buf.push('}');
}

fn write_canonical(value: &Value, buf: &mut String) {
    match value {
        Value::Object(map) => write_object(map.iter(), buf),
        Value::Array(items) => {
            buf.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(',');
                }
                write_canonical(item, buf);
            }
            buf.push(']');
        }
        scalar => {
            let _ = write!(buf, "{scalar}");
        }
    }
}

/// A type requested for schema generation, with its groups and options.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "type")]
    ty: TypeDescriptor,
    #[serde(default)]
    groups: Option<Vec<String>>,
    #[serde(default)]
    options: Option<Options>,
}

impl Model {
    /// A model with unset groups and options.
    pub fn new(ty: TypeDescriptor) -> Self {
        Self {
            ty,
            groups: None,
            options: None,
        }
    }

    /// Set the serialization groups.
    ///
    /// An empty iterator yields `Some([])`, which is distinct from unset.
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Groups in the order they were given, or `None` when unset.
    pub fn groups(&self) -> Option<&[String]> {
        self.groups.as_deref()
    }

    pub fn options(&self) -> Option<&Options> {
        self.options.as_ref()
    }

    /// Identity of this model for deduplication.
    pub fn key(&self) -> ModelKey {
        ModelKey::new(self)
    }

    /// Flattened diagnostic form: type record, options and groups.
    pub fn to_record(&self) -> Value {
        json!({
            "type": self.ty.to_record(),
            "options": self.options.as_ref().map(Options::to_value),
            "groups": self.groups,
        })
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Model {}
