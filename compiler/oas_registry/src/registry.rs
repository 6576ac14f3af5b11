//! Model registry: one document build's names and schemas.
//!
//! Registration (`register`) resolves names immediately; materialization
//! (`finalize`) runs the describer chain once every name is known.
//!
//! # Finalize
//!
//! Entries are visited in registration order with a cursor over the
//! append-only entry list. Describers may register further models while
//! describing; those land behind the cursor's end and are visited in the
//! same pass. Once the list drains, the declared aliases are registered and
//! the list drained again, so every alias ends up in the document.

use oas_ir::Model;

use crate::table::{EntryId, EntryState};
use crate::{
    AliasTable, Document, Logger, ModelDescriber, ModelTable, NamingStrategy, RegistryConfig,
    RegistryError,
};

/// Names and materializes the models of one document build.
///
/// Construct a fresh registry per build; nothing is shared between builds.
pub struct ModelRegistry {
    describers: Vec<Box<dyn ModelDescriber>>,
    document: Document,
    models: ModelTable,
    /// Entries before the cursor are materialized.
    cursor: usize,
    aliases_registered: bool,
}

impl ModelRegistry {
    /// Create a registry writing into `document`.
    ///
    /// Schema names `document` already defines are never assigned to
    /// models.
    pub fn new(
        describers: Vec<Box<dyn ModelDescriber>>,
        document: Document,
        naming: Box<dyn NamingStrategy>,
        aliases: &AliasTable,
    ) -> Self {
        let models = ModelTable::new(naming, aliases, document.schema_names());
        Self {
            describers,
            document,
            models,
            cursor: 0,
            aliases_registered: false,
        }
    }

    pub fn from_config(
        describers: Vec<Box<dyn ModelDescriber>>,
        document: Document,
        config: &RegistryConfig,
    ) -> Self {
        Self::new(describers, document, config.naming.build(), &config.aliases)
    }

    #[must_use]
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.set_logger(logger);
        self
    }

    pub fn set_logger(&mut self, logger: impl Logger + 'static) {
        self.models.set_logger(logger);
    }

    /// Register a model and return its `#/components/schemas/<name>`
    /// reference. See `ModelTable::register`.
    pub fn register(&mut self, model: Model) -> String {
        self.models.register(model)
    }

    /// Write a schema for every registered model into the document.
    ///
    /// Fails with `UnsupportedType` when no describer supports a model;
    /// calling again after such a failure reports the same error. Calling
    /// again after success only materializes models registered since.
    #[tracing::instrument(level = "debug", skip_all, fields(count = self.models.len()))]
    pub fn finalize(&mut self) -> Result<(), RegistryError> {
        self.drain()?;

        if !self.aliases_registered {
            self.aliases_registered = true;
            for model in self.models.alias_models() {
                self.models.register(model);
            }
            self.drain()?;
        }

        tracing::debug!(schemas = self.document.schema_count(), "model schemas finalized");
        Ok(())
    }

    fn drain(&mut self) -> Result<(), RegistryError> {
        while self.cursor < self.models.len() {
            self.materialize(EntryId::from_index(self.cursor))?;
            self.cursor += 1;
        }
        Ok(())
    }

    fn materialize(&mut self, id: EntryId) -> Result<(), RegistryError> {
        let Some(entry) = self.models.get(id) else {
            return Ok(());
        };
        match entry.state() {
            EntryState::Materialized => return Ok(()),
            EntryState::Unsupported => {
                return Err(RegistryError::UnsupportedType {
                    ty: entry.model().ty().to_string(),
                })
            }
            EntryState::Pending => {}
        }

        // A literal the document already defines keeps that schema.
        if self.models.is_reserved(entry.name()) {
            tracing::debug!(name = entry.name(), "schema defined by the document");
            self.models.set_state(id, EntryState::Materialized);
            return Ok(());
        }

        // Cloned: describers receive the table mutably.
        let model = entry.model().clone();
        let name = entry.name().to_owned();

        let Some(describer) = self.describers.iter().find(|d| d.supports(&model)) else {
            self.models.set_state(id, EntryState::Unsupported);
            return Err(RegistryError::UnsupportedType {
                ty: model.ty().to_string(),
            });
        };

        let schema = describer
            .describe(&model, &mut self.models)
            .map_err(|source| RegistryError::Describe {
                name: name.clone(),
                source,
            })?;

        tracing::debug!(name = %name, "materialized schema");
        self.document.insert_schema(name, schema);
        self.models.set_state(id, EntryState::Materialized);
        Ok(())
    }

    pub fn models(&self) -> &ModelTable {
        &self.models
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
