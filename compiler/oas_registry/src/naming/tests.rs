use super::*;

fn object(class: &str) -> TypeDescriptor {
    TypeDescriptor::object(class)
}

#[test]
fn discard_namespace_strips_backslash_qualifier() {
    assert_eq!(
        DiscardNamespace.type_name(&object("App\\Model\\ExampleModel")),
        "ExampleModel"
    );
}

#[test]
fn discard_namespace_strips_path_qualifier() {
    assert_eq!(DiscardNamespace.type_name(&object("crate::model::User")), "User");
    assert_eq!(DiscardNamespace.type_name(&object("com.example.Order")), "Order");
}

#[test]
fn discard_namespace_keeps_bare_identifier() {
    assert_eq!(DiscardNamespace.type_name(&object("Foo")), "Foo");
}

#[test]
fn unnamed_object_falls_back_to_builtin() {
    let ty = TypeDescriptor::scalar(BuiltinType::Object);
    assert_eq!(DiscardNamespace.type_name(&ty), "object");
    assert_eq!(FullyQualified.type_name(&ty), "object");
}

#[test]
fn fully_qualified_joins_segments() {
    assert_eq!(
        FullyQualified.type_name(&object("\\App\\Model\\User")),
        "App.Model.User"
    );
    assert_eq!(FullyQualified.type_name(&object("crate::model::User")), "crate.model.User");
}

#[test]
fn closures_are_strategies() {
    let upper = |ty: &TypeDescriptor| ty.class().unwrap_or_default().to_uppercase();
    assert_eq!(upper.type_name(&object("foo")), "FOO");
}

#[test]
fn kind_builds_matching_strategy() {
    let ty = object("App\\User");
    assert_eq!(NamingStrategyKind::default().build().type_name(&ty), "User");
    assert_eq!(NamingStrategyKind::FullyQualified.build().type_name(&ty), "App.User");
}
