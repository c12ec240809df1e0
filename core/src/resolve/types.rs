//! file: core/src/resolve/types.rs
//! description: resolved type and property descriptors.
//!
//! These descriptors are produced by the resolution phase and by loaders.
//! They classify each resolved type and each property use so the lowering
//! pass can pick an assignment strategy without re-deriving anything.

/// How instances of a type behave at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Heap-identity type; instances are constructed once and then have
    /// their properties filled by statements.
    Reference,
    /// Struct-like value type; instances are fully described by their
    /// constructor arguments and never receive property statements.
    Value,
}

/// A resolved reference to a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub kind: TypeKind,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeRef {
            name: name.into(),
            kind,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeRef::new(name, TypeKind::Reference)
    }

    pub fn value(name: impl Into<String>) -> Self {
        TypeRef::new(name, TypeKind::Value)
    }

    pub fn is_value_kind(&self) -> bool {
        self.kind == TypeKind::Value
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// How a property receives its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyUsage {
    /// Consumed while constructing the instance; never dispatched as a
    /// property statement.
    ConstructorArgument,
    /// Assigned after construction.
    Property,
}

/// How many values a property accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySupport {
    /// Exactly one value per assignment call.
    Single,
    /// Values are appended one by one.
    Collection,
}

/// A (type, property-name) pair identifying one property of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKey {
    pub type_info: TypeRef,
    pub property: String,
}

impl PropertyKey {
    pub fn new(type_info: TypeRef, property: impl Into<String>) -> Self {
        PropertyKey {
            type_info,
            property: property.into(),
        }
    }
}

/// Descriptor for one property use, as reported by its owning loader.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub usage: PropertyUsage,
    pub support: PropertySupport,
    /// Acceptable value types; the first entry is the primary type used
    /// when parsing text values.
    pub acceptable_types: Vec<TypeRef>,
}

impl PropertyDescriptor {
    pub fn new(usage: PropertyUsage, support: PropertySupport, acceptable_types: Vec<TypeRef>) -> Self {
        PropertyDescriptor {
            usage,
            support,
            acceptable_types,
        }
    }

    pub fn primary_type(&self) -> Option<&TypeRef> {
        self.acceptable_types.first()
    }
}
