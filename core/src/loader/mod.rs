//! file: core/src/loader/mod.rs
//! description: strategy traits & their runtime registry.
//!
//! Defines the `InstanceLoader`, `InstanceBinder`, `InstanceDeserializer`
//! and `ValueTextParser` traits implemented by external strategy objects,
//! as well as `LoaderRegistry` used to look them up by name and type while
//! lowering. All contracts are synchronous: the lowering pass is a
//! single-threaded depth-first traversal and registries are shared
//! read-only between independent passes.

pub mod arguments;
pub mod registry;

pub use arguments::{ArgumentInfo, ArgumentMap};
pub use registry::LoaderRegistry;

use crate::ir::{Expression, Statement};
use crate::location::Location;
use crate::reports::ReportCollector;
use crate::resolve::{PropertyDescriptor, PropertyKey, TypeRef};

/// Strategy object that knows how to construct and configure instances of
/// one type family.
pub trait InstanceLoader: Send + Sync {
    /// Registered name of the loader. Loader identity throughout the
    /// lowering (used-property bookkeeping, paired-value filtering) is
    /// this name.
    fn name(&self) -> &str;

    /// Whether this loader can construct instances of the given type.
    fn can_create(&self, type_info: &TypeRef) -> bool;

    /// Property names this loader declares for the type, in the loader's
    /// own enumeration order.
    fn property_names(&self, type_info: &TypeRef) -> Vec<String>;

    /// Descriptor for one property of the type, or `None` when the loader
    /// does not know the property.
    fn property_type(&self, property: &PropertyKey) -> Option<PropertyDescriptor>;

    /// Property names that must be assigned atomically together with the
    /// given one. An empty list means the property stands alone.
    fn paired_properties(&self, property: &PropertyKey) -> Vec<String> {
        let _ = property;
        Vec::new()
    }

    /// Emit statement(s) constructing an instance and binding it to the
    /// given name. Returning `None` without appending to `errors` is an
    /// internal inconsistency the caller reports.
    fn create_instance(
        &self,
        type_info: &TypeRef,
        name: &str,
        arguments: &ArgumentMap,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Statement>;

    /// Emit a statement initializing the already-bound root instance from
    /// the gathered constructor arguments.
    fn initialize_root_instance(
        &self,
        type_info: &TypeRef,
        name: &str,
        arguments: &ArgumentMap,
        errors: &mut ReportCollector,
    ) -> Option<Statement> {
        let _ = (type_info, name, arguments, errors);
        None
    }

    /// Emit a statement assigning the given arguments to properties of the
    /// named instance. Used for both single/grouped assignment and
    /// per-value collection appends.
    fn assign_parameters(
        &self,
        type_info: &TypeRef,
        name: &str,
        arguments: &ArgumentMap,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Statement>;

    /// Produce the expression a rebinding setter assigns from: the current
    /// value of the given property on the named instance.
    fn get_parameter(
        &self,
        property: &PropertyKey,
        name: &str,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Expression> {
        let _ = (property, name, position, errors);
        None
    }
}

/// Strategy object that turns a named binding mode's raw text into a
/// constructor-argument expression.
pub trait InstanceBinder: Send + Sync {
    /// Binding-mode name this binder handles.
    fn name(&self) -> &str;

    fn generate_constructor_argument(
        &self,
        loader: &dyn InstanceLoader,
        property: &PropertyKey,
        resolved: &PropertyDescriptor,
        text: &str,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Expression>;
}

/// Strategy object that turns literal text into a constructed non-primitive
/// value of the type it is registered for.
pub trait InstanceDeserializer: Send + Sync {
    /// The substitute type the raw text should be parsed as.
    fn deserialize_as(&self, type_info: &TypeRef) -> TypeRef;

    /// Wrap the parsed expression into the final value expression.
    fn deserialize(
        &self,
        type_info: &TypeRef,
        parsed: Expression,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Expression>;
}

/// External text-value parser turning raw markup text into a typed literal
/// expression.
pub trait ValueTextParser: Send + Sync {
    fn parse(
        &self,
        target: &TypeRef,
        text: &str,
        position: &Location,
        errors: &mut ReportCollector,
    ) -> Option<Expression>;
}
