//! Registry of concrete resource schemas.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::TemplateResult;
use crate::resource::{AnyResource, Resource, ResourceProperties, TypedResource};
use crate::template::Template;

/// Decodes a stored entry into a boxed typed resource.
pub type DecodeFn = fn(&str, &Resource) -> TemplateResult<Box<dyn AnyResource>>;

fn decode_boxed<P: ResourceProperties>(
    logical_id: &str,
    resource: &Resource,
) -> TemplateResult<Box<dyn AnyResource>> {
    let typed = TypedResource::<P>::from_resource(logical_id, resource)?;
    Ok(Box::new(typed))
}

/// A registry of resource schemas.
///
/// The registry maps type discriminators to decoders, allowing typed
/// resolution of resources whose schema is only known at runtime.
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    decoders: BTreeMap<&'static str, DecodeFn>,
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}

impl ResourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the schema `P` under its discriminator.
    ///
    /// A schema already registered for the same discriminator is replaced.
    pub fn register<P: ResourceProperties>(&mut self) {
        debug!("Registering resource schema: {}", P::RESOURCE_TYPE);
        self.decoders.insert(P::RESOURCE_TYPE, decode_boxed::<P>);
    }

    /// Builder form of [`ResourceRegistry::register`].
    pub fn with<P: ResourceProperties>(mut self) -> Self {
        self.register::<P>();
        self
    }

    /// Check if a schema is registered for `resource_type`.
    pub fn contains(&self, resource_type: &str) -> bool {
        self.decoders.contains_key(resource_type)
    }

    /// Registered discriminators, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.decoders.keys().copied().collect()
    }

    /// Decode one entry with the schema registered for its `Type`.
    ///
    /// Returns `None` when no schema is registered.
    pub fn resolve(
        &self,
        logical_id: &str,
        resource: &Resource,
    ) -> Option<TemplateResult<Box<dyn AnyResource>>> {
        self.decoders
            .get(resource.resource_type())
            .map(|decode| decode(logical_id, resource))
    }

    /// Decode every entry of `template` that has a registered schema.
    pub fn resolve_template(
        &self,
        template: &Template,
    ) -> BTreeMap<String, TemplateResult<Box<dyn AnyResource>>> {
        template
            .resources
            .iter()
            .filter_map(|(logical_id, resource)| {
                self.resolve(logical_id, resource)
                    .map(|result| (logical_id.clone(), result))
            })
            .collect()
    }

    /// Discriminators used in `template` that have no registered schema.
    pub fn unknown_types(&self, template: &Template) -> BTreeSet<String> {
        template
            .resources
            .values()
            .map(Resource::resource_type)
            .filter(|resource_type| !self.contains(resource_type))
            .map(str::to_string)
            .collect()
    }

    /// Get the number of registered schemas.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}
