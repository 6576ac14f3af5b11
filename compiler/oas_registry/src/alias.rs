//! Declared schema name aliases.
//!
//! An alias lets a model register under a caller-chosen name instead of the
//! one its naming strategy derives. It applies to exactly one model: the
//! object of the declared class with exactly the declared groups and no
//! options.
//!
//! ```json
//! { "UserPublic": { "type": "App\\Model\\User", "groups": ["public"] } }
//! ```

use std::fmt;

use oas_ir::{Model, TypeDescriptor};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Target of an alias: a class identifier and the required groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasDef {
    #[serde(rename = "type")]
    pub class: String,
    #[serde(default)]
    pub groups: Option<Vec<String>>,
}

impl AliasDef {
    /// Alias for `class` with unset groups.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            groups: None,
        }
    }

    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// The model this alias names.
    pub fn model(&self) -> Model {
        let model = Model::new(TypeDescriptor::object(self.class.clone()));
        match &self.groups {
            Some(groups) => model.with_groups(groups.iter().cloned()),
            None => model,
        }
    }
}

/// Aliases in declaration order, keyed by declared name.
///
/// When two aliases describe the same model, the first declared wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, AliasDef)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an alias. Redeclaring a name replaces its target in place.
    pub fn insert(&mut self, name: impl Into<String>, def: AliasDef) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = def,
            None => self.entries.push((name, def)),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, def: AliasDef) -> Self {
        self.insert(name, def);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AliasDef> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, def)| def)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AliasDef)> {
        self.entries.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AliasDef)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (S, AliasDef)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, def) in iter {
            table.insert(name, def);
        }
        table
    }
}

impl Serialize for AliasTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, def) in &self.entries {
            map.serialize_entry(name, def)?;
        }
        map.end()
    }
}

// Maps are visited in document order, which a derived `BTreeMap` would lose.
impl<'de> Deserialize<'de> for AliasTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = AliasTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of alias names to { type, groups }")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<AliasTable, A::Error> {
                let mut table = AliasTable::new();
                while let Some((name, def)) = access.next_entry::<String, AliasDef>()? {
                    if table.get(&name).is_some() {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate alias `{name}`"
                        )));
                    }
                    table.entries.push((name, def));
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
