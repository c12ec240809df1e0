mod support;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use rigging_core::markup::{BindingMode, SetterValue};
use rigging_core::resolve::{PropertyResolving, PropertyUsage, TypeRef};
use rigging_core::{
    ConstructNode, LoaderRegistry, ResolvingResult, TextNode, ValueNode, lower_instance_graph,
};

use support::*;

fn window_registry(loader: StubLoader) -> LoaderRegistry {
    let mut registry = LoaderRegistry::new();
    registry.register_loader(Arc::new(loader), None);
    registry.bind_type("Window", "window_loader");
    registry.set_text_parser(Arc::new(LiteralTextParser));
    registry
}

fn resolving_for_root(root: &ConstructNode) -> ResolvingResult {
    let mut resolving = ResolvingResult::new();
    resolving.root_id = root.id();
    resolving.root_type = Some(TypeRef::reference("Window"));
    resolving
        .type_infos
        .insert("root".to_string(), TypeRef::reference("Window"));
    resolving
}

#[test]
fn named_binder_produces_constructor_argument() {
    // The binder bypasses the argument resolver and works directly on the
    // setter's raw text.
    let mut registry = window_registry(StubLoader::new("window_loader").creates("Window").property(
        "Source",
        single(PropertyUsage::ConstructorArgument, TypeRef::value("Str")),
    ));
    registry.register_binder(Arc::new(ReferenceBinder));

    let source = ValueNode::Text(TextNode::new("shared_model", at(2)));
    let root = ConstructNode::new("Window", Some("root".to_string()), at(1)).with_setter(
        "Source",
        SetterValue::new(BindingMode::Named("ref".to_string()), vec![source], at(2)),
    );

    let resolving = resolving_for_root(&root);

    let (block, errors) = lower_instance_graph(&registry, &resolving, &ValueNode::Construct(root));

    assert!(errors.is_empty(), "unexpected reports: {:?}", errors.reports);
    assert_eq!(
        rendered(&block),
        vec![
            "root = <self>;".to_string(),
            "root.Initialize(shared_model);".to_string(),
        ]
    );
}

#[test]
fn deserializer_wraps_parsed_text() {
    // "red" parses as the deserializer's substitute type and comes back
    // wrapped in a Color construction.
    let mut registry = window_registry(StubLoader::new("window_loader").creates("Window").property(
        "Background",
        single(PropertyUsage::ConstructorArgument, TypeRef::value("Color")),
    ));
    registry.register_deserializer("Color", Arc::new(ConstructDeserializer));

    let background = ValueNode::Text(TextNode::new("red", at(2)));
    let background_id = background.id();
    let root = ConstructNode::new("Window", Some("root".to_string()), at(1)).with_setter(
        "Background",
        SetterValue::new(BindingMode::Default, vec![background], at(2)),
    );

    let mut resolving = resolving_for_root(&root);
    resolving.property_resolvings.insert(
        background_id,
        PropertyResolving::new(
            "window_loader",
            single(PropertyUsage::ConstructorArgument, TypeRef::value("Color")),
        ),
    );

    let (block, errors) = lower_instance_graph(&registry, &resolving, &ValueNode::Construct(root));

    assert!(errors.is_empty(), "unexpected reports: {:?}", errors.reports);
    assert_eq!(
        rendered(&block),
        vec![
            "root = <self>;".to_string(),
            "root.Initialize(new Color(\"red\"));".to_string(),
        ]
    );
}

#[test]
fn anonymous_value_constructor_is_treated_as_literal() {
    // An anonymous constructor of a value-kind type collapses to its single
    // literal value; no instance is created for it.
    let registry = window_registry(StubLoader::new("window_loader").creates("Window").property(
        "Width",
        single(PropertyUsage::ConstructorArgument, TypeRef::value("Int")),
    ));

    let literal = ValueNode::Text(TextNode::new("42", at(3)));
    let shorthand = ConstructNode::new("Int", None, at(2)).with_setter(
        "Value",
        SetterValue::new(BindingMode::Default, vec![literal], at(3)),
    );
    let shorthand_value = ValueNode::Construct(shorthand);
    let shorthand_id = shorthand_value.id();

    let root = ConstructNode::new("Window", Some("root".to_string()), at(1)).with_setter(
        "Width",
        SetterValue::new(BindingMode::Default, vec![shorthand_value], at(2)),
    );

    let mut resolving = resolving_for_root(&root);
    resolving.property_resolvings.insert(
        shorthand_id,
        PropertyResolving::new(
            "window_loader",
            single(PropertyUsage::ConstructorArgument, TypeRef::value("Int")),
        ),
    );

    let (block, errors) = lower_instance_graph(&registry, &resolving, &ValueNode::Construct(root));

    assert!(errors.is_empty(), "unexpected reports: {:?}", errors.reports);
    assert_eq!(
        rendered(&block),
        vec![
            "root = <self>;".to_string(),
            "root.Initialize(42);".to_string(),
        ]
    );
}

#[test]
fn statements_carry_source_positions() {
    let registry = window_registry(StubLoader::new("window_loader").creates("Window").property(
        "Title",
        single(PropertyUsage::Property, TypeRef::value("Str")),
    ));

    let title = ValueNode::Text(TextNode::new("Hi", at(7)));
    let title_id = title.id();
    let root = ConstructNode::new("Window", Some("root".to_string()), at(1)).with_setter(
        "Title",
        SetterValue::new(BindingMode::Default, vec![title], at(7)),
    );

    let mut resolving = resolving_for_root(&root);
    resolving.property_resolvings.insert(
        title_id,
        PropertyResolving::new(
            "window_loader",
            single(PropertyUsage::Property, TypeRef::value("Str")),
        ),
    );

    let (block, errors) = lower_instance_graph(&registry, &resolving, &ValueNode::Construct(root));

    assert!(errors.is_empty(), "unexpected reports: {:?}", errors.reports);
    // the assignment produced for Title points back at line 7
    let assignment = block
        .statements
        .iter()
        .find(|statement| statement.to_string().contains("Title"))
        .expect("missing Title assignment");
    assert_eq!(assignment.position.as_ref().map(|p| p.line), Some(7));
}
