//! Resolution table consumed by the lowering pass.
//!
//! This module defines `ResolvingResult` and related structs conveying the
//! per-node annotations the semantic resolution phase computed: resolved
//! instance types, per-property-use resolutions and the root designation.
//! The table is read-only for the whole lowering pass.

pub mod types;

pub use types::{
    PropertyDescriptor, PropertyKey, PropertySupport, PropertyUsage, TypeKind, TypeRef,
};

use std::collections::HashMap;

use crate::location::Location;
use crate::markup::NodeId;

/// Resolution of one property use: the loader that owns the property and
/// the descriptor it reported for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyResolving {
    /// Registered name of the owning loader.
    pub loader: String,
    pub info: PropertyDescriptor,
}

impl PropertyResolving {
    pub fn new(loader: impl Into<String>, info: PropertyDescriptor) -> Self {
        PropertyResolving {
            loader: loader.into(),
            info,
        }
    }
}

/// An externally supplied root parameter, copied onto the constructed root
/// instance by the lowering.
#[derive(Debug, Clone, PartialEq)]
pub struct RootParameter {
    pub name: String,
    pub position: Location,
}

impl RootParameter {
    pub fn new(name: impl Into<String>, position: Location) -> Self {
        RootParameter {
            name: name.into(),
            position,
        }
    }
}

/// Output of the resolution phase, keyed the way the lowering consumes it.
#[derive(Debug, Clone, Default)]
pub struct ResolvingResult {
    /// Node id of the designated root constructor.
    pub root_id: NodeId,
    /// Resolved type of the root constructor.
    pub root_type: Option<TypeRef>,
    /// Resolved type per declared instance name.
    pub type_infos: HashMap<String, TypeRef>,
    /// Resolution per value node id.
    pub property_resolvings: HashMap<NodeId, PropertyResolving>,
    /// Root parameters in declaration order.
    pub parameters: Vec<RootParameter>,
}

impl ResolvingResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_type(&self, name: &str) -> Option<&TypeRef> {
        self.type_infos.get(name)
    }

    pub fn property_resolving(&self, id: NodeId) -> Option<&PropertyResolving> {
        self.property_resolvings.get(&id)
    }
}
