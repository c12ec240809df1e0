//! file: core/src/lower/properties.rs
//! description: per-node property dispatch.
//!
//! For each declared property of an instance node, picks among the
//! rebinding, collection-append and grouped-assignment strategies and
//! emits the resulting statement(s). Declared properties are processed in
//! the reverse of their declaration order; combined with the traversal
//! order of the emitted statements this makes a single node's property
//! assignments execute in original declaration order.

use std::collections::HashSet;

use itertools::Itertools;

use super::GraphLowering;
use crate::ir::{Expression, Statement};
use crate::loader::ArgumentMap;
use crate::location::Location;
use crate::markup::{AttributeNode, BindingMode, SetterValue, ValueNode};
use crate::reports::{E_INTERNAL, Report};
use crate::resolve::{PropertyKey, PropertyResolving, PropertySupport, PropertyUsage};

/// Bookkeeping for one node's dispatch: (property name, loader name) pairs
/// already fully handled by the grouped or collection strategies.
type UsedProperties = HashSet<(String, String)>;

impl<'a> GraphLowering<'a> {
    pub(crate) fn visit_attributes(&mut self, node: &AttributeNode) {
        if self.halted {
            return;
        }
        // anonymous nodes are consumed as literals elsewhere and carry no
        // property statements of their own
        let Some(instance_name) = node.instance_name.clone() else {
            return;
        };
        let Some(type_info) = self.resolving.instance_type(&instance_name).cloned() else {
            self.fatal(
                format!("no resolved type for instance \"{}\"", instance_name),
                node.position.clone(),
            );
            return;
        };
        // value types are fully described by their constructor arguments
        if type_info.is_value_kind() {
            return;
        }

        self.scopes.push(instance_name.as_str());
        let mut used_props = UsedProperties::new();

        // Property statements for each setter are collected per setter and
        // flushed in declaration order afterwards, so the reversed dispatch
        // walk still yields a statement sequence executing in the original
        // declaration order. Nested constructions and rebinding assignments
        // stream into the block directly.
        let mut deferred: Vec<Vec<Statement>> = Vec::new();

        for (property, setter) in node.setters.iter().rev() {
            if self.halted {
                break;
            }
            let key = PropertyKey::new(type_info.clone(), property.clone());
            match &setter.binding {
                BindingMode::Rebind => self.process_rebind(&key, node, setter),
                BindingMode::Default => {
                    let mut group = Vec::new();
                    self.process_default(&key, node, &mut used_props, setter, &mut group);
                    deferred.push(group);
                }
                // named bindings are generated by a later pass
                BindingMode::Named(_) => {}
            }
        }

        for group in deferred.into_iter().rev() {
            for statement in group {
                self.block.push(statement);
            }
        }

        self.scopes.pop();
    }

    fn process_default(
        &mut self,
        key: &PropertyKey,
        node: &AttributeNode,
        used_props: &mut UsedProperties,
        setter: &SetterValue,
        group: &mut Vec<Statement>,
    ) {
        for value in &setter.values {
            if self.halted {
                return;
            }
            let Some(resolving) = self.resolving.property_resolving(value.id()).cloned() else {
                self.fatal(
                    format!(
                        "no property resolution for value of \"{}\" on type \"{}\"",
                        key.property, key.type_info.name
                    ),
                    value.position().clone(),
                );
                return;
            };
            if resolving.info.usage != PropertyUsage::Property {
                // constructor arguments were consumed during construction
                continue;
            }
            match resolving.info.support {
                PropertySupport::Collection => {
                    if let Some(statement) =
                        self.process_collection_value(key, node, used_props, setter, &resolving, value)
                    {
                        group.push(statement);
                    }
                }
                PropertySupport::Single => {
                    let seen = (key.property.clone(), resolving.loader.clone());
                    if !used_props.contains(&seen) {
                        if let Some(statement) =
                            self.process_grouped(key, node, used_props, setter, &resolving, value)
                        {
                            group.push(statement);
                        }
                    }
                }
            }
        }
    }

    /// Rebind the property's existing named instance: assign the owning
    /// loader's parameter expression into the target slot, then fill the
    /// target's own properties without constructing anything.
    fn process_rebind(&mut self, key: &PropertyKey, node: &AttributeNode, setter: &SetterValue) {
        let Some(target) = setter.values.first() else {
            return;
        };
        let Some(target_name) = target.instance_name().map(str::to_string) else {
            self.internal_error(
                format!(
                    "rebinding value for property \"{}\" does not name an instance",
                    key.property
                ),
                target.position().clone(),
            );
            return;
        };
        let Some(resolving) = self.resolving.property_resolving(target.id()).cloned() else {
            self.fatal(
                format!(
                    "no property resolution for rebinding target \"{}\"",
                    target_name
                ),
                target.position().clone(),
            );
            return;
        };
        let Some(loader) = self.resolved_loader(&resolving.loader, &setter.position) else {
            return;
        };

        let parent_name = node.instance_name.clone().unwrap_or_default();
        let error_count = self.errors.len();
        if let Some(expression) =
            loader.get_parameter(key, &parent_name, &setter.position, &mut self.errors)
        {
            let statement = Statement::assign(Expression::reference(target_name.as_str()), expression)
                .with_position(target.position().clone());
            self.block.push(statement);
        } else if error_count == self.errors.len() {
            self.errors.push(Report::error(
                &format!(
                    "something is wrong when retrieving property \"{}\" from an instance of type \"{}\"",
                    key.property, key.type_info.name
                ),
                Some(target.position().clone()),
                Some(E_INTERNAL),
            ));
        }

        self.visit_node(target);
    }

    /// Append one collection value: every value of the setter yields its
    /// own assign/append call on the owning loader.
    fn process_collection_value(
        &mut self,
        key: &PropertyKey,
        node: &AttributeNode,
        used_props: &mut UsedProperties,
        setter: &SetterValue,
        resolving: &PropertyResolving,
        value: &ValueNode,
    ) -> Option<Statement> {
        used_props.insert((key.property.clone(), resolving.loader.clone()));

        let loader = self.resolved_loader(&resolving.loader, &setter.position)?;
        let error_count = self.errors.len();

        let mut arguments = ArgumentMap::new();
        arguments.add(key.property.as_str(), self.argument_info(&setter.position, value));

        let instance_name = node.instance_name.clone().unwrap_or_default();
        if let Some(statement) = loader.assign_parameters(
            &key.type_info,
            &instance_name,
            &arguments,
            &setter.position,
            &mut self.errors,
        ) {
            Some(tag_statement(statement, value.position()))
        } else {
            if error_count == self.errors.len() {
                self.errors.push(Report::error(
                    &format!(
                        "something is wrong when assigning to property \"{}\" of an instance of type \"{}\"",
                        key.property, key.type_info.name
                    ),
                    Some(value.position().clone()),
                    Some(E_INTERNAL),
                ));
            }
            None
        }
    }

    /// Assign a single-support property together with every property the
    /// loader pairs with it, in one atomic call. Splitting the pair into
    /// independent calls could leave the instance observably invalid.
    fn process_grouped(
        &mut self,
        key: &PropertyKey,
        node: &AttributeNode,
        used_props: &mut UsedProperties,
        setter: &SetterValue,
        resolving: &PropertyResolving,
        value: &ValueNode,
    ) -> Option<Statement> {
        let loader = self.resolved_loader(&resolving.loader, &setter.position)?;

        let mut paired = loader.paired_properties(key);
        if paired.is_empty() {
            paired.push(key.property.clone());
        }

        let error_count = self.errors.len();
        let mut arguments = ArgumentMap::new();
        for paired_property in &paired {
            used_props.insert((paired_property.clone(), resolving.loader.clone()));
            let Some(paired_setter) = node.setter(paired_property) else {
                self.internal_error(
                    format!(
                        "paired property \"{}\" of type \"{}\" has no declared setter",
                        paired_property, key.type_info.name
                    ),
                    setter.position.clone(),
                );
                continue;
            };
            let paired_setter = paired_setter.clone();
            for paired_value in &paired_setter.values {
                let Some(paired_resolving) =
                    self.resolving.property_resolving(paired_value.id()).cloned()
                else {
                    self.fatal(
                        format!(
                            "no property resolution for value of \"{}\" on type \"{}\"",
                            paired_property, key.type_info.name
                        ),
                        paired_value.position().clone(),
                    );
                    return None;
                };
                // only values owned by the current loader join this call
                if paired_resolving.loader == resolving.loader {
                    arguments.add(
                        paired_property.as_str(),
                        self.argument_info(&paired_setter.position, paired_value),
                    );
                }
            }
        }

        let instance_name = node.instance_name.clone().unwrap_or_default();
        if let Some(statement) = loader.assign_parameters(
            &key.type_info,
            &instance_name,
            &arguments,
            &setter.position,
            &mut self.errors,
        ) {
            Some(tag_statement(statement, value.position()))
        } else {
            if error_count == self.errors.len() {
                let names = paired
                    .iter()
                    .map(|name| format!("\"{}\"", name))
                    .join(", ");
                self.errors.push(Report::error(
                    &format!(
                        "something is wrong when assigning to properties {} of an instance of type \"{}\"",
                        names, key.type_info.name
                    ),
                    Some(value.position().clone()),
                    Some(E_INTERNAL),
                ));
            }
            None
        }
    }
}

/// Tag a statement with its originating markup position unless the
/// producing strategy already tagged it.
pub(crate) fn tag_statement(mut statement: Statement, position: &Location) -> Statement {
    if statement.position.is_none() {
        statement.position = Some(position.clone());
    }
    statement
}
