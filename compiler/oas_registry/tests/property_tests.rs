//! Property-based tests for model registration.
//!
//! These tests use proptest to generate models and verify:
//! 1. Idempotence: re-registering an equal model (groups shuffled, options
//!    inserted in another order) returns the same reference and logs nothing
//! 2. Uniqueness: distinct object models never share a reference
//! 3. Collision accounting: exactly one report per model that lost its name

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use oas_registry::{
    AliasTable, DiscardNamespace, Document, Logger, Model, ModelRegistry, Options, TypeDescriptor,
};
use proptest::prelude::*;
use serde_json::Value;

#[derive(Default)]
struct Counter {
    reports: Cell<usize>,
}

impl Logger for Counter {
    fn info(&self, _message: &str, _context: &Value) {
        self.reports.set(self.reports.get() + 1);
    }
}

fn registry(counter: &Rc<Counter>) -> ModelRegistry {
    ModelRegistry::new(
        Vec::new(),
        Document::new(),
        Box::new(DiscardNamespace),
        &AliasTable::new(),
    )
    .with_logger(Rc::clone(counter))
}

/// Qualified class names drawn from a small pool so collisions are common.
fn class_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["App", "Vendor", "Lib\\Sub"]),
        prop::sample::select(vec!["User", "Order", "Item"]),
    )
        .prop_map(|(namespace, name)| format!("{namespace}\\{name}"))
}

fn groups_strategy() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(prop::collection::vec("[a-c]", 0..3))
}

fn options_strategy() -> impl Strategy<Value = Option<Vec<(String, i64)>>> {
    prop::option::of(prop::collection::vec(("[a-d]", 0i64..3), 0..4))
}

fn build(class: &str, groups: Option<&[String]>, options: Option<&[(String, i64)]>) -> Model {
    let mut model = Model::new(TypeDescriptor::object(class));
    if let Some(groups) = groups {
        model = model.with_groups(groups.iter().cloned());
    }
    if let Some(options) = options {
        // Later duplicates overwrite earlier ones, like any map insert.
        let mut bag = Options::new();
        for (key, value) in options {
            bag.insert(key.clone(), Value::from(*value));
        }
        model = model.with_options(bag);
    }
    model
}

/// Same bag, built by inserting its final entries in reverse order.
fn reversed(options: &[(String, i64)]) -> Vec<(String, i64)> {
    let mut seen = BTreeSet::new();
    options
        .iter()
        .rev()
        .filter(|(key, _)| seen.insert(key.clone()))
        .cloned()
        .collect()
}

fn short_name(model: &Model) -> String {
    let class = model.ty().class().unwrap_or_default();
    class.rsplit('\\').next().unwrap_or(class).to_owned()
}

proptest! {
    #[test]
    fn reregistering_equal_model_is_idempotent(
        class in class_strategy(),
        groups in groups_strategy(),
        options in options_strategy(),
    ) {
        let counter = Rc::new(Counter::default());
        let mut registry = registry(&counter);

        let first = registry.register(build(&class, groups.as_deref(), options.as_deref()));
        let reports = counter.reports.get();

        let shuffled: Option<Vec<String>> = groups.map(|mut groups| {
            groups.reverse();
            groups
        });
        let reordered = options.as_deref().map(reversed);
        let second = registry.register(build(&class, shuffled.as_deref(), reordered.as_deref()));

        prop_assert_eq!(first, second);
        prop_assert_eq!(counter.reports.get(), reports);
        prop_assert_eq!(registry.models().len(), 1);
    }

    #[test]
    fn distinct_models_get_distinct_references(
        models in prop::collection::vec((class_strategy(), groups_strategy()), 1..12),
    ) {
        let counter = Rc::new(Counter::default());
        let mut registry = registry(&counter);

        let mut references = Vec::new();
        for (class, groups) in &models {
            references.push(registry.register(build(class, groups.as_deref(), None)));
        }

        let distinct_models = registry.models().len();
        let distinct_references: BTreeSet<&String> = references.iter().collect();
        prop_assert_eq!(distinct_references.len(), distinct_models);

        // Every model beyond the first per derived name lost its candidate.
        let derived: BTreeSet<String> = registry
            .models()
            .iter()
            .map(|(_, entry)| short_name(entry.model()))
            .collect();
        prop_assert_eq!(counter.reports.get(), distinct_models - derived.len());
    }
}
