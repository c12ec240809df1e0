//! file: core/src/lower/construct.rs
//! description: constructor-node emission.
//!
//! Determines the loader that owns a constructor node's resolved type,
//! gathers its constructor arguments, and emits either the root wiring
//! (self-binding, root initialization, parameter copies) or a nested
//! instance-creation statement. Afterwards the node's remaining declared
//! properties are dispatched exactly like any attribute node's.

use super::GraphLowering;
use super::SELF_REFERENCE;
use super::arguments::tag_expression;
use super::properties::tag_statement;
use crate::ir::{Expression, Statement};
use crate::loader::{ArgumentInfo, ArgumentMap, InstanceLoader};
use crate::markup::{BindingMode, ConstructNode, ValueNode};
use crate::reports::{E_INTERNAL, E_MISSING_COLLABORATOR, Report};
use crate::resolve::{PropertyKey, PropertyUsage, TypeRef};

impl<'a> GraphLowering<'a> {
    pub(crate) fn visit_construct(&mut self, node: &ConstructNode) {
        if self.halted {
            return;
        }
        let is_root = node.id() == self.resolving.root_id;

        let type_info = if is_root {
            self.resolving.root_type.clone()
        } else {
            node.attributes
                .instance_name
                .as_ref()
                .and_then(|name| self.resolving.instance_type(name).cloned())
        };
        let Some(type_info) = type_info else {
            self.fatal(
                format!(
                    "no resolved type for constructor node \"{}\"",
                    node.type_name
                ),
                node.attributes.position.clone(),
            );
            return;
        };

        let Some(loader) = self.registry.resolve_owning_loader(&type_info) else {
            self.fatal(
                format!(
                    "no loader in the chain can create instances of type \"{}\"",
                    type_info.name
                ),
                node.attributes.position.clone(),
            );
            return;
        };

        let instance_name = node.attributes.instance_name.clone().unwrap_or_default();

        let mut arguments = ArgumentMap::new();
        self.fill_constructor_arguments(node, loader.as_ref(), &type_info, &mut arguments);

        if is_root {
            // bind the root slot to the execution context's own instance so
            // later statements can reference it by name
            self.block.push(Statement::assign(
                Expression::reference(instance_name.as_str()),
                Expression::reference(SELF_REFERENCE),
            ));

            if !arguments.is_empty() {
                if let Some(statement) = loader.initialize_root_instance(
                    &type_info,
                    &instance_name,
                    &arguments,
                    &mut self.errors,
                ) {
                    self.block
                        .push(tag_statement(statement, &node.attributes.position));
                }
            }

            let resolving = self.resolving;
            for parameter in &resolving.parameters {
                let statement = Statement::assign(
                    Expression::reference(parameter.name.as_str()),
                    Expression::member(
                        Expression::reference(SELF_REFERENCE),
                        parameter.name.as_str(),
                    ),
                )
                .with_position(parameter.position.clone());
                self.block.push(statement);
            }
        } else {
            let error_count = self.errors.len();
            if let Some(statement) = loader.create_instance(
                &type_info,
                &instance_name,
                &arguments,
                &node.attributes.position,
                &mut self.errors,
            ) {
                self.block
                    .push(tag_statement(statement, &node.attributes.position));
            } else if error_count == self.errors.len() {
                self.errors.push(Report::error(
                    &format!(
                        "something is wrong when creating an instance of type \"{}\"",
                        type_info.name
                    ),
                    Some(node.attributes.position.clone()),
                    Some(E_INTERNAL),
                ));
            }
        }

        self.visit_attributes(&node.attributes);
    }

    /// Gather the constructor-argument properties the owning loader
    /// declares for this type, in the loader's own enumeration order.
    /// Unset properties are skipped; partially resolved default-bound
    /// arguments are dropped without a report.
    fn fill_constructor_arguments(
        &mut self,
        node: &ConstructNode,
        loader: &dyn InstanceLoader,
        type_info: &TypeRef,
        arguments: &mut ArgumentMap,
    ) {
        let scope_name = node
            .attributes
            .instance_name
            .clone()
            .unwrap_or_else(|| "<anonymous>".to_string());
        self.scopes.push(scope_name);

        for property in loader.property_names(type_info) {
            let key = PropertyKey::new(type_info.clone(), property.clone());
            let Some(descriptor) = loader.property_type(&key) else {
                continue;
            };
            if descriptor.usage != PropertyUsage::ConstructorArgument {
                continue;
            }
            let Some(setter) = node.attributes.setter(&property) else {
                continue;
            };
            let setter = setter.clone();

            match &setter.binding {
                BindingMode::Default => {
                    for value in &setter.values {
                        let argument = self.argument_info(&setter.position, value);
                        if argument.is_complete() {
                            arguments.add(property.as_str(), argument);
                        }
                    }
                }
                BindingMode::Named(binding) => {
                    let Some(binder) = self.registry.binder(binding) else {
                        self.errors.push(Report::error(
                            &format!(
                                "no instance binder is registered for binding \"-{}\"",
                                binding
                            ),
                            Some(setter.position.clone()),
                            Some(E_MISSING_COLLABORATOR),
                        ));
                        continue;
                    };
                    let Some(ValueNode::Text(text)) = setter.values.first() else {
                        self.internal_error(
                            format!(
                                "binding \"-{}\" on property \"{}\" carries no raw text value",
                                binding, property
                            ),
                            setter.position.clone(),
                        );
                        continue;
                    };
                    if let Some(expression) = binder.generate_constructor_argument(
                        loader,
                        &key,
                        &descriptor,
                        &text.text,
                        &text.position,
                        &mut self.errors,
                    ) {
                        let mut argument = ArgumentInfo::new(setter.position.clone());
                        argument.type_info = descriptor.primary_type().cloned();
                        argument.expression = Some(tag_expression(expression, &text.position));
                        arguments.add(property.as_str(), argument);
                    }
                }
                BindingMode::Rebind => {
                    // rebinding never names a registered binder; same
                    // failure path as an unknown binding mode
                    self.errors.push(Report::error(
                        "no instance binder is registered for binding \"-set\"",
                        Some(setter.position.clone()),
                        Some(E_MISSING_COLLABORATOR),
                    ));
                }
            }
        }

        self.scopes.pop();
    }
}
