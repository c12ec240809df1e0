//! file: core/src/loader/registry.rs
//! description: runtime registry for loaders, binders and deserializers.
//!
//! The registry is populated once at startup and treated as read-only by
//! the lowering pass. Loaders are keyed by name with a precomputed parent
//! chain; binders are keyed by binding-mode name; deserializers by the
//! type name they produce.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};

use super::{InstanceBinder, InstanceDeserializer, InstanceLoader, ValueTextParser};
use crate::resolve::TypeRef;

#[derive(Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn InstanceLoader>>,
    /// loader name -> parent loader name
    parent_loaders: HashMap<String, String>,
    /// type name -> loader name
    type_bindings: HashMap<String, String>,
    binders: HashMap<String, Arc<dyn InstanceBinder>>,
    /// type name -> deserializer
    deserializers: HashMap<String, Arc<dyn InstanceDeserializer>>,
    text_parser: Option<Arc<dyn ValueTextParser>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// ------- Registration -------

    /// Register a loader, optionally naming its parent in the loader chain.
    pub fn register_loader(&mut self, loader: Arc<dyn InstanceLoader>, parent: Option<&str>) {
        let name = loader.name().to_string();
        if let Some(parent) = parent {
            if !self.loaders.contains_key(parent) {
                warn!("parent loader {} not registered yet for {}", parent, name);
            }
            self.parent_loaders.insert(name.clone(), parent.to_string());
        }
        info!("registered instance loader {}", name);
        self.loaders.insert(name, loader);
    }

    /// Bind a type name to the loader that declares it.
    pub fn bind_type(&mut self, type_name: &str, loader_name: &str) {
        self.type_bindings
            .insert(type_name.to_string(), loader_name.to_string());
    }

    pub fn register_binder(&mut self, binder: Arc<dyn InstanceBinder>) {
        info!("registered instance binder {}", binder.name());
        self.binders.insert(binder.name().to_string(), binder);
    }

    pub fn register_deserializer(
        &mut self,
        type_name: &str,
        deserializer: Arc<dyn InstanceDeserializer>,
    ) {
        self.deserializers
            .insert(type_name.to_string(), deserializer);
    }

    pub fn set_text_parser(&mut self, parser: Arc<dyn ValueTextParser>) {
        self.text_parser = Some(parser);
    }

    /// ------- Lookup -------

    pub fn loader(&self, name: &str) -> Option<Arc<dyn InstanceLoader>> {
        self.loaders.get(name).cloned()
    }

    pub fn parent_loader(&self, name: &str) -> Option<Arc<dyn InstanceLoader>> {
        self.parent_loaders
            .get(name)
            .and_then(|parent| self.loaders.get(parent))
            .cloned()
    }

    pub fn loader_for_type(&self, type_name: &str) -> Option<Arc<dyn InstanceLoader>> {
        self.type_bindings
            .get(type_name)
            .and_then(|name| self.loaders.get(name))
            .cloned()
    }

    pub fn binder(&self, name: &str) -> Option<Arc<dyn InstanceBinder>> {
        self.binders.get(name).cloned()
    }

    pub fn deserializer_for(&self, type_info: &TypeRef) -> Option<Arc<dyn InstanceDeserializer>> {
        self.deserializers.get(&type_info.name).cloned()
    }

    pub fn text_parser(&self) -> Option<Arc<dyn ValueTextParser>> {
        self.text_parser.clone()
    }

    /// Walk from the type's declaring loader up the parent chain until one
    /// reports it can construct the type.
    pub fn resolve_owning_loader(&self, type_info: &TypeRef) -> Option<Arc<dyn InstanceLoader>> {
        let mut current = self.loader_for_type(&type_info.name);
        while let Some(loader) = current {
            if loader.can_create(type_info) {
                return Some(loader);
            }
            current = self.parent_loader(loader.name());
        }
        None
    }

    /// ------- Introspection -------

    /// Return the list of currently registered loader names.
    pub fn registered_loader_names(&self) -> Vec<String> {
        self.loaders.keys().cloned().collect()
    }

    /// Return the list of currently registered binding-mode names.
    pub fn registered_binder_names(&self) -> Vec<String> {
        self.binders.keys().cloned().collect()
    }
}
