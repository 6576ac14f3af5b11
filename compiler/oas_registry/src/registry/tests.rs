use std::cell::Cell;

use super::*;
use crate::{AliasDef, DescribeError, DiscardNamespace};
use oas_ir::{BuiltinType, TypeDescriptor};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Describes objects; `Order` references `Customer`, which references `Address`.
struct Objects;

impl ModelDescriber for Objects {
    fn supports(&self, model: &Model) -> bool {
        model.ty().is_object()
    }

    fn describe(&self, model: &Model, models: &mut ModelTable) -> Result<Value, DescribeError> {
        let nested = match model.ty().class() {
            Some("Order") => Some("Customer"),
            Some("Customer") => Some("Address"),
            _ => None,
        };
        let mut schema = json!({ "type": "object" });
        if let Some(class) = nested {
            let reference = models.register(Model::new(TypeDescriptor::object(class)));
            schema["properties"] = json!({ "ref": { "$ref": reference } });
        }
        Ok(schema)
    }
}

/// Describes every model as its builtin literal, counting calls.
#[derive(Default)]
struct Everything {
    calls: Cell<usize>,
}

impl ModelDescriber for Everything {
    fn supports(&self, _model: &Model) -> bool {
        true
    }

    fn describe(&self, model: &Model, _models: &mut ModelTable) -> Result<Value, DescribeError> {
        self.calls.set(self.calls.get() + 1);
        Ok(json!({ "type": model.ty().builtin().as_str() }))
    }
}

struct Failing;

impl ModelDescriber for Failing {
    fn supports(&self, _model: &Model) -> bool {
        true
    }

    fn describe(&self, _model: &Model, _models: &mut ModelTable) -> Result<Value, DescribeError> {
        Err(DescribeError::new("property `x` has no type"))
    }
}

fn registry(describers: Vec<Box<dyn ModelDescriber>>, aliases: &AliasTable) -> ModelRegistry {
    ModelRegistry::new(describers, Document::new(), Box::new(DiscardNamespace), aliases)
}

#[test]
fn nested_registrations_are_materialized_in_the_same_pass() {
    let mut registry = registry(vec![Box::new(Objects)], &AliasTable::new());
    registry.register(Model::new(TypeDescriptor::object("App\\Order")));
    registry.register(Model::new(TypeDescriptor::object("Order")));
    registry.finalize().unwrap();

    let document = registry.document();
    let names: Vec<&str> = document.schema_names().collect();
    assert_eq!(names, ["Address", "Customer", "Order", "Order2"]);
    assert_eq!(
        document.schema("Order2").unwrap()["properties"]["ref"]["$ref"],
        "#/components/schemas/Customer"
    );
    assert!(registry
        .models()
        .iter()
        .all(|(_, entry)| entry.state() == EntryState::Materialized));
}

#[test]
fn first_supporting_describer_wins() {
    let mut registry = registry(
        vec![Box::new(Objects), Box::new(Everything::default())],
        &AliasTable::new(),
    );
    registry.register(Model::new(TypeDescriptor::object("Plain")));
    registry.register(Model::new(TypeDescriptor::list_of(TypeDescriptor::object("Plain"))));
    registry.finalize().unwrap();

    assert_eq!(registry.document().schema("Plain"), Some(&json!({ "type": "object" })));
    assert_eq!(registry.document().schema("array"), Some(&json!({ "type": "array" })));
}

#[test]
fn finalize_twice_does_not_describe_again() {
    let everything = std::rc::Rc::new(Everything::default());

    struct Shared(std::rc::Rc<Everything>);
    impl ModelDescriber for Shared {
        fn supports(&self, model: &Model) -> bool {
            self.0.supports(model)
        }
        fn describe(&self, model: &Model, models: &mut ModelTable) -> Result<Value, DescribeError> {
            self.0.describe(model, models)
        }
    }

    let mut registry = registry(
        vec![Box::new(Shared(std::rc::Rc::clone(&everything)))],
        &AliasTable::new(),
    );
    registry.register(Model::new(TypeDescriptor::object("A")));
    registry.finalize().unwrap();
    registry.finalize().unwrap();
    assert_eq!(everything.calls.get(), 1);

    registry.register(Model::new(TypeDescriptor::object("B")));
    registry.finalize().unwrap();
    assert_eq!(everything.calls.get(), 2);
}

#[test]
fn aliases_are_materialized_even_when_unreferenced() {
    let aliases = AliasTable::new().with("UserPublic", AliasDef::new("App\\User").with_groups(["public"]));
    let mut registry = registry(vec![Box::new(Everything::default())], &aliases);
    registry.finalize().unwrap();

    assert!(registry.document().has_schema("UserPublic"));
    assert_eq!(registry.models().len(), 1);
}

#[test]
fn unsupported_type_is_fatal_and_sticky() {
    let mut registry = registry(vec![Box::new(Objects)], &AliasTable::new());
    registry.register(Model::new(TypeDescriptor::object("Fine")));
    registry.register(Model::new(TypeDescriptor::list_of(TypeDescriptor::scalar(
        BuiltinType::Int,
    ))));

    let err = registry.finalize().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema of type \"int[]\" can't be generated, no describer supports it."
    );
    let again = registry.finalize().unwrap_err();
    assert!(matches!(again, RegistryError::UnsupportedType { ty } if ty == "int[]"));

    let states: Vec<EntryState> = registry.models().iter().map(|(_, e)| e.state()).collect();
    assert_eq!(states, [EntryState::Materialized, EntryState::Unsupported]);
}

#[test]
fn describer_failure_names_the_schema() {
    let mut registry = registry(vec![Box::new(Failing)], &AliasTable::new());
    registry.register(Model::new(TypeDescriptor::object("App\\Broken")));

    let err = registry.finalize().unwrap_err();
    match &err {
        RegistryError::Describe { name, source } => {
            assert_eq!(name, "Broken");
            assert_eq!(source.message(), "property `x` has no type");
        }
        other => panic!("expected describe error, got {other:?}"),
    }
    assert_eq!(
        registry.models().iter().next().unwrap().1.state(),
        EntryState::Pending
    );
}

#[test]
fn existing_document_schemas_are_kept() {
    let mut document = Document::new();
    document.insert_schema("Error", json!({ "type": "object", "title": "handwritten" }));

    let mut registry = ModelRegistry::new(
        vec![Box::new(Everything::default())],
        document,
        Box::new(DiscardNamespace),
        &AliasTable::new(),
    );
    let reference = registry.register(Model::new(TypeDescriptor::object("App\\Error")));
    registry.finalize().unwrap();

    assert_eq!(reference, "#/components/schemas/Error2");
    let document = registry.into_document();
    assert_eq!(document.schema("Error").unwrap()["title"], "handwritten");
    assert!(document.has_schema("Error2"));
}

#[test]
fn document_literal_schema_is_not_overwritten() {
    let mut document = Document::new();
    document.insert_schema("array", json!({ "title": "handwritten" }));

    let mut registry = ModelRegistry::new(
        vec![Box::new(Everything::default())],
        document,
        Box::new(DiscardNamespace),
        &AliasTable::new(),
    );
    let reference = registry.register(Model::new(TypeDescriptor::collection(BuiltinType::Array)));
    registry.finalize().unwrap();

    assert_eq!(reference, "#/components/schemas/array");
    assert_eq!(
        registry.models().iter().next().unwrap().1.state(),
        EntryState::Materialized
    );
    assert_eq!(
        registry.document().schema("array"),
        Some(&json!({ "title": "handwritten" }))
    );
}

#[test]
fn document_schema_wins_over_alias_of_the_same_name() {
    let mut document = Document::new();
    document.insert_schema("User", json!({ "title": "handwritten" }));
    let aliases = AliasTable::new().with("User", AliasDef::new("App\\User").with_groups(["public"]));

    let mut registry = ModelRegistry::new(
        vec![Box::new(Everything::default())],
        document,
        Box::new(DiscardNamespace),
        &aliases,
    );
    let reference =
        registry.register(Model::new(TypeDescriptor::object("App\\User")).with_groups(["public"]));
    registry.finalize().unwrap();

    assert_eq!(reference, "#/components/schemas/User2");
    let document = registry.into_document();
    assert_eq!(document.schema("User"), Some(&json!({ "title": "handwritten" })));
    assert_eq!(document.schema("User2"), Some(&json!({ "type": "object" })));
}

#[test]
fn object_and_collection_sharing_a_literal_get_separate_schemas() {
    let mut registry = registry(vec![Box::new(Everything::default())], &AliasTable::new());
    let object = registry.register(Model::new(TypeDescriptor::object("Vendor\\array")));
    let list = registry.register(Model::new(TypeDescriptor::list_of(TypeDescriptor::scalar(
        BuiltinType::Int,
    ))));
    registry.finalize().unwrap();

    assert_ne!(object, list);
    let document = registry.document();
    assert_eq!(document.schema("array2"), Some(&json!({ "type": "object" })));
    assert_eq!(document.schema("array"), Some(&json!({ "type": "array" })));
}

#[test]
fn from_config_uses_configured_strategy() {
    let config = RegistryConfig::from_json(r#"{ "naming": "fully_qualified" }"#).unwrap();
    let mut registry =
        ModelRegistry::from_config(vec![Box::new(Everything::default())], Document::new(), &config);
    assert_eq!(
        registry.register(Model::new(TypeDescriptor::object("App\\Model\\User"))),
        "#/components/schemas/App.Model.User"
    );
}
