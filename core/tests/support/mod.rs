#![allow(dead_code)]

use std::collections::HashMap;

use rigging_core::ir::{Expression, Statement, Value};
use rigging_core::loader::{ArgumentInfo, ArgumentMap, InstanceBinder, InstanceDeserializer, InstanceLoader, ValueTextParser};
use rigging_core::location::Location;
use rigging_core::reports::{Report, ReportCollector};
use rigging_core::resolve::{PropertyDescriptor, PropertyKey, PropertySupport, PropertyUsage, TypeRef};
use rigging_core::StatementBlock;

pub fn at(line: usize) -> Location {
    Location::new("view.rig", line, 1)
}

pub fn single(usage: PropertyUsage, type_info: TypeRef) -> PropertyDescriptor {
    PropertyDescriptor::new(usage, PropertySupport::Single, vec![type_info])
}

pub fn collection(type_info: TypeRef) -> PropertyDescriptor {
    PropertyDescriptor::new(PropertyUsage::Property, PropertySupport::Collection, vec![type_info])
}

/// Render each top-level statement on its own trimmed line.
pub fn rendered(block: &StatementBlock) -> Vec<String> {
    block
        .statements
        .iter()
        .map(|statement| statement.to_string().trim_end().to_string())
        .collect()
}

/// Text parser used by the tests: understands Int, Float and Bool targets
/// and treats everything else as a string literal.
pub struct LiteralTextParser;

impl ValueTextParser for LiteralTextParser {
    fn parse(
        &self,
        target: &TypeRef,
        text: &str,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Expression> {
        let value = match target.name.as_str() {
            "Int" => match text.parse::<i64>() {
                Ok(v) => Value::Int(v),
                Err(_) => {
                    errors.push(Report::error(
                        &format!("\"{}\" is not a valid Int", text),
                        Some(position.clone()),
                        None,
                    ));
                    return None;
                }
            },
            "Float" => match text.parse::<f64>() {
                Ok(v) => Value::Float(v),
                Err(_) => {
                    errors.push(Report::error(
                        &format!("\"{}\" is not a valid Float", text),
                        Some(position.clone()),
                        None,
                    ));
                    return None;
                }
            },
            "Bool" => match text.parse::<bool>() {
                Ok(v) => Value::Bool(v),
                Err(_) => {
                    errors.push(Report::error(
                        &format!("\"{}\" is not a valid Bool", text),
                        Some(position.clone()),
                        None,
                    ));
                    return None;
                }
            },
            _ => Value::Str(text.to_string()),
        };
        Some(Expression::literal(value))
    }
}

/// Loader stub driven by a static property table.
pub struct StubLoader {
    name: String,
    creatable: Vec<String>,
    properties: Vec<(String, PropertyDescriptor)>,
    paired: HashMap<String, Vec<String>>,
    /// When set, creation and assignment return nothing without reporting.
    fail_silently: bool,
}

impl StubLoader {
    pub fn new(name: &str) -> Self {
        StubLoader {
            name: name.to_string(),
            creatable: Vec::new(),
            properties: Vec::new(),
            paired: HashMap::new(),
            fail_silently: false,
        }
    }

    pub fn creates(mut self, type_name: &str) -> Self {
        self.creatable.push(type_name.to_string());
        self
    }

    pub fn property(mut self, name: &str, descriptor: PropertyDescriptor) -> Self {
        self.properties.push((name.to_string(), descriptor));
        self
    }

    pub fn paired_group(mut self, property: &str, group: &[&str]) -> Self {
        self.paired.insert(
            property.to_string(),
            group.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_silently = true;
        self
    }

    fn support_of(&self, property: &str) -> PropertySupport {
        self.properties
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, descriptor)| descriptor.support)
            .unwrap_or(PropertySupport::Single)
    }
}

impl InstanceLoader for StubLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_create(&self, type_info: &TypeRef) -> bool {
        self.creatable.iter().any(|name| name == &type_info.name)
    }

    fn property_names(&self, _type_info: &TypeRef) -> Vec<String> {
        self.properties.iter().map(|(name, _)| name.clone()).collect()
    }

    fn property_type(&self, property: &PropertyKey) -> Option<PropertyDescriptor> {
        self.properties
            .iter()
            .find(|(name, _)| *name == property.property)
            .map(|(_, descriptor)| descriptor.clone())
    }

    fn paired_properties(&self, property: &PropertyKey) -> Vec<String> {
        self.paired
            .get(&property.property)
            .cloned()
            .unwrap_or_default()
    }

    fn create_instance(
        &self,
        type_info: &TypeRef,
        name: &str,
        arguments: &ArgumentMap,
        _position: &Location,
        _errors: &mut ReportCollector,
    ) -> Option<Statement> {
        if self.fail_silently {
            return None;
        }
        let ctor_args: Vec<Expression> = arguments
            .iter()
            .filter_map(|(_, argument)| argument.expression.clone())
            .collect();
        Some(Statement::assign(
            Expression::reference(name),
            Expression::construct(type_info.name.as_str(), ctor_args),
        ))
    }

    fn initialize_root_instance(
        &self,
        _type_info: &TypeRef,
        name: &str,
        arguments: &ArgumentMap,
        _errors: &mut ReportCollector,
    ) -> Option<Statement> {
        if self.fail_silently {
            return None;
        }
        let call_args: Vec<Expression> = arguments
            .iter()
            .filter_map(|(_, argument)| argument.expression.clone())
            .collect();
        Some(Statement::eval(Expression::invoke(
            Expression::reference(name),
            "Initialize",
            call_args,
        )))
    }

    fn assign_parameters(
        &self,
        _type_info: &TypeRef,
        name: &str,
        arguments: &ArgumentMap,
        _position: &Location,
        _errors: &mut ReportCollector,
    ) -> Option<Statement> {
        if self.fail_silently {
            return None;
        }
        let entries: Vec<(&str, &ArgumentInfo)> = arguments.iter().collect();
        if entries.len() == 1 {
            let (property, argument) = entries[0];
            let expression = argument.expression.clone()?;
            return Some(match self.support_of(property) {
                PropertySupport::Collection => Statement::eval(Expression::invoke(
                    Expression::member(Expression::reference(name), property),
                    "Add",
                    vec![expression],
                )),
                PropertySupport::Single => Statement::assign(
                    Expression::member(Expression::reference(name), property),
                    expression,
                ),
            });
        }
        let mut call_args = Vec::new();
        for (_, argument) in entries {
            call_args.push(argument.expression.clone()?);
        }
        Some(Statement::eval(Expression::invoke(
            Expression::reference(name),
            "SetGroup",
            call_args,
        )))
    }

    fn get_parameter(
        &self,
        property: &PropertyKey,
        name: &str,
        _position: &Location,
        _errors: &mut ReportCollector,
    ) -> Option<Expression> {
        Some(Expression::member(
            Expression::reference(name),
            property.property.as_str(),
        ))
    }
}

/// Binder that resolves its raw text as a reference to a named slot.
pub struct ReferenceBinder;

impl InstanceBinder for ReferenceBinder {
    fn name(&self) -> &str {
        "ref"
    }

    fn generate_constructor_argument(
        &self,
        _loader: &dyn InstanceLoader,
        _property: &PropertyKey,
        _resolved: &PropertyDescriptor,
        text: &str,
        _position: &Location,
        _errors: &mut ReportCollector,
    ) -> Option<Expression> {
        Some(Expression::reference(text))
    }
}

/// Deserializer that parses the raw text as a string and wraps it in a
/// construction of the target type.
pub struct ConstructDeserializer;

impl InstanceDeserializer for ConstructDeserializer {
    fn deserialize_as(&self, _type_info: &TypeRef) -> TypeRef {
        TypeRef::value("Str")
    }

    fn deserialize(
        &self,
        type_info: &TypeRef,
        parsed: Expression,
        _position: &Location,
        _errors: &mut ReportCollector,
    ) -> Option<Expression> {
        Some(Expression::construct(type_info.name.as_str(), vec![parsed]))
    }
}
