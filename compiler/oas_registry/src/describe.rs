//! Describer capability.
//!
//! Describers turn a registered model into a schema body. The registry asks
//! each describer in order whether it supports a model; the first one that
//! does writes the body. Describers may register the models their schema
//! references through the `ModelTable` they are handed, and those models are
//! materialized within the same `finalize` pass.

use oas_ir::Model;
use serde_json::Value;

use crate::ModelTable;

pub trait ModelDescriber {
    fn supports(&self, model: &Model) -> bool;

    fn describe(&self, model: &Model, models: &mut ModelTable) -> Result<Value, DescribeError>;
}

/// A describer could not produce a schema for a model it supports.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DescribeError {
    message: String,
}

impl DescribeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
