//! Schema name registry for OpenAPI document generation.
//!
//! Every type discovered while generating a document is registered as a
//! `Model` and receives a unique, stable `#/components/schemas/<name>`
//! reference immediately. Schema bodies are produced afterwards, in one
//! `finalize` pass, by a chain of describers.
//!
//! # Architecture
//!
//! ```text
//! ModelRegistry (document + describer chain)
//!     └── ModelTable (entries, identities, claimed names)
//!         ├── NamingStrategy (object descriptor -> candidate name)
//!         ├── AliasTable (declared names for exact models)
//!         └── Logger (collision reports)
//! ```
//!
//! Name collisions are recoverable: the losing model is reported once and
//! gets a suffixed name. A model no describer supports is fatal at
//! `finalize`.

mod alias;
mod config;
mod describe;
mod document;
mod error;
mod log;
mod naming;
mod registry;
mod table;

pub use alias::{AliasDef, AliasTable};
pub use config::RegistryConfig;
pub use describe::{DescribeError, ModelDescriber};
pub use document::{schema_ref, Components, Document, SCHEMA_REF_PREFIX};
pub use error::RegistryError;
pub use log::{init_tracing, Logger, NullLogger, TracingLogger};
pub use naming::{DiscardNamespace, FullyQualified, NamingStrategy, NamingStrategyKind};
pub use registry::ModelRegistry;
pub use table::{EntryId, EntryState, ModelEntry, ModelTable};

pub use oas_ir::{BuiltinType, Model, ModelKey, Options, TypeDescriptor};
