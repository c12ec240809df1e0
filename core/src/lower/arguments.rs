//! file: core/src/lower/arguments.rs
//! description: value-node to typed-argument resolution.
//!
//! Turns one markup value node into an `ArgumentInfo` usable as a
//! constructor argument or property value. Text values go through the
//! registered deserializer/text parser; nested instances are lowered in
//! place and referenced by name. When nothing can be produced the argument
//! comes back with both fields absent and no report is recorded here: the
//! caller decides whether the absence is fatal to its own operation.

use log::warn;

use super::GraphLowering;
use crate::ir::Expression;
use crate::loader::ArgumentInfo;
use crate::location::Location;
use crate::markup::ValueNode;
use crate::resolve::TypeRef;

impl<'a> GraphLowering<'a> {
    pub(crate) fn argument_info(
        &mut self,
        att_position: &Location,
        node: &ValueNode,
    ) -> ArgumentInfo {
        let mut serializable = false;
        let mut serial_text: Option<(String, Location)> = None;

        let type_info: Option<TypeRef> = match node {
            ValueNode::Text(text) => {
                serializable = true;
                serial_text = Some((text.text.clone(), text.position.clone()));
                self.resolving
                    .property_resolving(node.id())
                    .and_then(|resolving| resolving.info.primary_type().cloned())
            }
            ValueNode::Construct(construct) => {
                let resolved = match &construct.attributes.instance_name {
                    // anonymous: fall back to the property's primary acceptable type
                    None => self
                        .resolving
                        .property_resolving(node.id())
                        .and_then(|resolving| resolving.info.primary_type().cloned()),
                    Some(name) => self.resolving.instance_type(name).cloned(),
                };
                if let Some(type_info) = &resolved {
                    if type_info.is_value_kind() {
                        // serializable literal shorthand: the single declared
                        // setter carries one raw text value
                        serializable = true;
                        if let Some((_, setter)) = construct.attributes.setters.first() {
                            if let Some(ValueNode::Text(text)) = setter.values.first() {
                                serial_text = Some((text.text.clone(), text.position.clone()));
                            }
                        }
                    }
                }
                resolved
            }
            ValueNode::Attributes(_) => None,
        };

        let mut argument = ArgumentInfo::new(att_position.clone());
        argument.type_info = type_info;

        if serializable {
            if let (Some(type_info), Some((text, text_position))) =
                (argument.type_info.clone(), serial_text)
            {
                argument.expression = self.parse_serial_value(&type_info, &text, &text_position);
            }
        } else {
            // a genuinely named nested instance: lower it in place, then
            // reference the resulting slot by name
            self.visit_node(node);
            if let Some(name) = node.instance_name() {
                argument.expression = Some(Expression::reference(name));
            }
        }

        if let Some(expression) = argument.expression.take() {
            argument.expression = Some(tag_expression(expression, node.position()));
        }
        argument
    }

    /// Parse raw text into a typed expression, going through the type's
    /// registered deserializer when one exists.
    fn parse_serial_value(
        &mut self,
        type_info: &TypeRef,
        text: &str,
        position: &Location,
    ) -> Option<Expression> {
        if let Some(deserializer) = self.registry.deserializer_for(type_info) {
            let parse_as = deserializer.deserialize_as(type_info);
            let parsed = self.parse_text_value(&parse_as, text, position)?;
            deserializer.deserialize(type_info, parsed, position, &mut self.errors)
        } else {
            self.parse_text_value(type_info, text, position)
        }
    }

    fn parse_text_value(
        &mut self,
        target: &TypeRef,
        text: &str,
        position: &Location,
    ) -> Option<Expression> {
        match self.registry.text_parser() {
            Some(parser) => parser.parse(target, text, position, &mut self.errors),
            None => {
                warn!("no text-value parser registered; cannot parse \"{}\"", text);
                None
            }
        }
    }
}

/// Tag an expression with its originating markup position unless the
/// producing strategy already tagged it.
pub(crate) fn tag_expression(mut expression: Expression, position: &Location) -> Expression {
    if expression.position.is_none() {
        expression.position = Some(position.clone());
    }
    expression
}
