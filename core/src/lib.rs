pub mod ir;
pub mod loader;
pub mod location;
pub mod lower;
pub mod markup;
pub mod reports;
pub mod resolve;

pub use ir::{Expression, Statement, StatementBlock, Value};
pub use loader::{
    ArgumentInfo, ArgumentMap, InstanceBinder, InstanceDeserializer, InstanceLoader,
    LoaderRegistry, ValueTextParser,
};
pub use location::Location;
pub use lower::{GraphLowering, SELF_REFERENCE, lower_instance_graph};
pub use markup::{AttributeNode, BindingMode, ConstructNode, SetterValue, TextNode, ValueNode};
pub use reports::{Report, ReportCollector, Severity};
pub use resolve::{
    PropertyDescriptor, PropertyKey, PropertyResolving, PropertySupport, PropertyUsage,
    ResolvingResult, RootParameter, TypeKind, TypeRef,
};
