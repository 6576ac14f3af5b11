//! Model table: registration and schema name resolution.
//!
//! The table assigns every registered model a unique, stable schema name the
//! moment it is registered. Schema bodies are produced later by the
//! registry (see `ModelRegistry::finalize`).
//!
//! # Design
//!
//! - Entries live in a `Vec` in registration order, addressed by `EntryId`
//! - `by_key` maps a model's identity to its entry for idempotent registration
//! - `names` maps every claimed schema name to whoever holds it (an entry, a
//!   declared alias or a builtin literal), so a collision report can describe
//!   the holder
//!
//! # Naming rules
//!
//! ```text
//! collection / scalar  -> builtin literal ("array", "string"); shared, never collides
//! classless object     -> builtin literal "object"
//! object               -> alias name if an alias declares exactly this model,
//!                         else the naming strategy's name
//! ```
//!
//! Every builtin literal is claimed up front, so an object never takes one
//! regardless of registration order. An object candidate held by a different
//! model is logged once and the model falls back to the first free
//! `<candidate>2`, `<candidate>3`, ...
//!
//! Names the document already defines are reserved. Objects skip them, and
//! aliases declaring one are dropped at construction. A literal the document
//! defines keeps pointing at the document's schema.

use oas_ir::{BuiltinType, Model, ModelKey};
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::json;

use crate::document::schema_ref;
use crate::{AliasTable, Logger, NamingStrategy, NullLogger};

/// Index of an entry in a `ModelTable`, in registration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntryId(u32);

impl EntryId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a document never holds more than u32::MAX models"
    )]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// Materialization state of an entry.
///
/// `Pending -> Materialized`, or `Pending -> Unsupported` when no describer
/// accepts the model. No entry ever returns to `Pending`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryState {
    Pending,
    Materialized,
    Unsupported,
}

/// A registered model and the name it was assigned.
#[derive(Clone, Debug)]
pub struct ModelEntry {
    model: Model,
    key: ModelKey,
    name: String,
    state: EntryState,
}

impl ModelEntry {
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn key(&self) -> &ModelKey {
        &self.key
    }

    /// The assigned schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `#/components/schemas/<name>`.
    pub fn reference(&self) -> String {
        schema_ref(&self.name)
    }

    pub fn state(&self) -> EntryState {
        self.state
    }
}

/// A declared alias, resolved to the model it names.
#[derive(Clone, Debug)]
struct Alias {
    name: String,
    model: Model,
    key: ModelKey,
}

/// Holder of a claimed schema name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NameHolder {
    Entry(EntryId),
    /// Index into `ModelTable::aliases`; claimed before any registration.
    Alias(usize),
    /// Shared by every non-object model of this kind.
    Builtin(BuiltinType),
}

/// Registered models, their identities and the schema names they hold.
pub struct ModelTable {
    entries: Vec<ModelEntry>,
    by_key: FxHashMap<ModelKey, EntryId>,
    names: FxHashMap<String, NameHolder>,
    /// Names present in the document before registration began.
    reserved: FxHashSet<String>,
    aliases: Vec<Alias>,
    /// First entry registered under each builtin literal.
    literal_holders: FxHashMap<BuiltinType, EntryId>,
    naming: Box<dyn NamingStrategy>,
    logger: Box<dyn Logger>,
}

impl ModelTable {
    /// Create a table with every alias name and builtin literal claimed up
    /// front.
    ///
    /// `reserved` are schema names the output document already defines;
    /// objects never take them. An alias declaring a reserved name or a
    /// builtin literal is dropped.
    pub fn new<'a>(
        naming: Box<dyn NamingStrategy>,
        aliases: &AliasTable,
        reserved: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let reserved: FxHashSet<String> = reserved.into_iter().map(str::to_owned).collect();

        let aliases: Vec<Alias> = aliases
            .iter()
            .filter(|(name, _)| {
                let usable = !reserved.contains(*name) && name.parse::<BuiltinType>().is_err();
                if !usable {
                    tracing::warn!(alias = %name, "alias name is already defined, alias ignored");
                }
                usable
            })
            .map(|(name, def)| {
                let model = def.model();
                Alias {
                    name: name.to_owned(),
                    key: model.key(),
                    model,
                }
            })
            .collect();

        let names = BuiltinType::ALL
            .into_iter()
            .map(|builtin| (builtin.as_str().to_owned(), NameHolder::Builtin(builtin)))
            .chain(
                aliases
                    .iter()
                    .enumerate()
                    .map(|(i, alias)| (alias.name.clone(), NameHolder::Alias(i))),
            )
            .collect();

        Self {
            entries: Vec::new(),
            by_key: FxHashMap::default(),
            names,
            reserved,
            aliases,
            literal_holders: FxHashMap::default(),
            naming,
            logger: Box::new(NullLogger),
        }
    }

    pub fn set_logger(&mut self, logger: impl Logger + 'static) {
        self.logger = Box::new(logger);
    }

    /// Register a model and return its schema reference.
    ///
    /// Registering a model equal to one already registered returns the same
    /// reference and changes nothing.
    pub fn register(&mut self, model: Model) -> String {
        let key = model.key();
        if let Some(&id) = self.by_key.get(&key) {
            return self.entries[id.index()].reference();
        }

        let id = EntryId::from_index(self.entries.len());
        let name = if model.ty().is_object() && model.ty().class().is_some() {
            self.claim_object_name(&model, &key, id)
        } else {
            let builtin = model.ty().builtin();
            self.literal_holders.entry(builtin).or_insert(id);
            builtin.as_str().to_owned()
        };

        tracing::trace!(%key, name = %name, "registered model");

        let reference = schema_ref(&name);
        self.entries.push(ModelEntry {
            model,
            key: key.clone(),
            name,
            state: EntryState::Pending,
        });
        self.by_key.insert(key, id);
        reference
    }

    fn claim_object_name(&mut self, model: &Model, key: &ModelKey, id: EntryId) -> String {
        let candidate = match self.aliases.iter().find(|alias| alias.key == *key) {
            Some(alias) => alias.name.clone(),
            None => self.naming.type_name(model.ty()),
        };

        let name = if self.is_free(&candidate, key) {
            candidate
        } else {
            let holder = self
                .names
                .get(&candidate)
                .and_then(|&holder| self.holder_model(holder));
            if let Some(holder) = holder {
                let context = json!({
                    "model": model.to_record(),
                    "taken_by": holder.to_record(),
                });
                self.logger.info(
                    &format!(
                        "Can not assign a name for the model, the name \"{candidate}\" has already been taken."
                    ),
                    &context,
                );
            } else {
                tracing::debug!(name = %candidate, "schema name reserved");
            }
            self.next_free_name(&candidate, key)
        };

        self.names.insert(name.clone(), NameHolder::Entry(id));
        name
    }

    /// First of `<base>2`, `<base>3`, ... nobody else holds.
    fn next_free_name(&self, base: &str, key: &ModelKey) -> String {
        let mut suffix = 2u32;
        loop {
            let name = format!("{base}{suffix}");
            if self.is_free(&name, key) {
                return name;
            }
            suffix += 1;
        }
    }

    /// Whether `key` may take `name`: unclaimed and not reserved, or claimed
    /// on its behalf (its alias).
    fn is_free(&self, name: &str, key: &ModelKey) -> bool {
        if self.reserved.contains(name) {
            return false;
        }
        match self.names.get(name) {
            Some(&holder) => self.holder_key(holder) == Some(key),
            None => true,
        }
    }

    /// `None` for a builtin literal nobody has registered under yet.
    fn holder_model(&self, holder: NameHolder) -> Option<&Model> {
        match holder {
            NameHolder::Entry(id) => Some(&self.entries[id.index()].model),
            NameHolder::Alias(i) => Some(&self.aliases[i].model),
            NameHolder::Builtin(builtin) => self
                .literal_holders
                .get(&builtin)
                .map(|id| &self.entries[id.index()].model),
        }
    }

    fn holder_key(&self, holder: NameHolder) -> Option<&ModelKey> {
        match holder {
            NameHolder::Entry(id) => Some(&self.entries[id.index()].key),
            NameHolder::Alias(i) => Some(&self.aliases[i].key),
            NameHolder::Builtin(_) => None,
        }
    }

    /// Whether the document defined `name` before registration began.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn get(&self, id: EntryId) -> Option<&ModelEntry> {
        self.entries.get(id.index())
    }

    /// Entry of a model equal to `model`, if registered.
    pub fn find(&self, model: &Model) -> Option<&ModelEntry> {
        self.by_key
            .get(&model.key())
            .map(|id| &self.entries[id.index()])
    }

    /// Assigned schema name of a model equal to `model`, if registered.
    pub fn name_of(&self, model: &Model) -> Option<&str> {
        self.find(model).map(ModelEntry::name)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &ModelEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId::from_index(i), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Models named by the declared aliases, in declaration order.
    pub(crate) fn alias_models(&self) -> Vec<Model> {
        self.aliases.iter().map(|alias| alias.model.clone()).collect()
    }

    pub(crate) fn set_state(&mut self, id: EntryId, state: EntryState) {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            entry.state = state;
        }
    }
}

impl std::fmt::Debug for ModelTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelTable")
            .field("entries", &self.entries)
            .field("aliases", &self.aliases)
            .field("reserved", &self.reserved)
            .finish_non_exhaustive()
    }
}
