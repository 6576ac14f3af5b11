//! Model identity.
//!
//! `ModelKey` is the normalized form of a `Model`'s defining fields. Groups
//! are collected into a sorted set and options into their canonical JSON, so
//! models built in any order produce equal keys.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::{Model, TypeDescriptor};

/// Deduplication key of a model: descriptor, group set and canonical options.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelKey {
    ty: TypeDescriptor,
    groups: Option<BTreeSet<String>>,
    options: Option<String>,
}

impl ModelKey {
    pub fn new(model: &Model) -> Self {
        Self {
            ty: model.ty().clone(),
            groups: model
                .groups()
                .map(|groups| groups.iter().cloned().collect()),
            options: model.options().map(crate::Options::canonical),
        }
    }

    #[inline]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Deterministic 64-bit digest of this key.
    ///
    /// Stable within a build; used for tracing output only. Equality always
    /// compares the full key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl From<&Model> for ModelKey {
    fn from(model: &Model) -> Self {
        Self::new(model)
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{:016x}", self.ty, self.fingerprint())
    }
}
