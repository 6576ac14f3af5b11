//! Value layer for OpenAPI schema generation.
//!
//! Types flowing into the schema generator are described by plain values,
//! compared structurally:
//!
//! ```text
//! TypeDescriptor   shape of a value (builtin kind, class, collection types)
//!     └── Model    descriptor + serialization groups + options
//!         └── ModelKey   normalized identity used for deduplication
//! ```
//!
//! Nothing here holds registry state; naming and materialization live in
//! `oas_registry`.

mod descriptor;
mod key;
mod model;

pub use descriptor::{BuiltinType, ParseBuiltinTypeError, TypeDescriptor};
pub use key::ModelKey;
pub use model::{Model, Options};
