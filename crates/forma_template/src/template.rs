//! The template document root.

use std::collections::BTreeMap;

use forma_value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::config::WriteOptions;
use crate::error::{TemplateError, TemplateResult};
use crate::reader::TemplateReader;
use crate::resource::{Resource, ResourceProperties, TypedResource};
use crate::writer::TemplateWriter;

/// Format version written by [`Template::new`].
pub const DEFAULT_FORMAT_VERSION: &str = "2010-09-09";

/// An infrastructure template.
///
/// Every section other than `Resources` is carried through unchanged.
/// `Resources` is the single source of truth: typed views returned by
/// [`Template::resolve_all`] and [`Template::resolve_one`] are copies.
/// A document without a `Resources` section is written back without one.
#[derive(Debug, Clone, Default)]
pub struct Template {
    pub format_version: Option<String>,
    pub transform: Option<Value>,
    pub description: Option<String>,
    pub metadata: Option<BTreeMap<String, Value>>,
    pub parameters: Option<BTreeMap<String, Value>>,
    pub mappings: Option<BTreeMap<String, Value>>,
    pub conditions: Option<BTreeMap<String, Value>>,
    pub resources: BTreeMap<String, Resource>,
    pub outputs: Option<BTreeMap<String, Value>>,
    /// Top-level sections without a dedicated field, such as `Globals` or `Rules`.
    pub extra: BTreeMap<String, Value>,
    /// Set when the section was present, so an empty `Resources` survives a round trip.
    resources_declared: bool,
}

#[derive(Serialize)]
struct TemplateBodyRef<'a> {
    #[serde(rename = "AWSTemplateFormatVersion", skip_serializing_if = "Option::is_none")]
    format_version: Option<&'a String>,
    #[serde(rename = "Transform", skip_serializing_if = "Option::is_none")]
    transform: Option<&'a Value>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<&'a String>,
    #[serde(rename = "Metadata", skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a BTreeMap<String, Value>>,
    #[serde(rename = "Parameters", skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a BTreeMap<String, Value>>,
    #[serde(rename = "Mappings", skip_serializing_if = "Option::is_none")]
    mappings: Option<&'a BTreeMap<String, Value>>,
    #[serde(rename = "Conditions", skip_serializing_if = "Option::is_none")]
    conditions: Option<&'a BTreeMap<String, Value>>,
    #[serde(rename = "Resources", skip_serializing_if = "Option::is_none")]
    resources: Option<&'a BTreeMap<String, Resource>>,
    #[serde(rename = "Outputs", skip_serializing_if = "Option::is_none")]
    outputs: Option<&'a BTreeMap<String, Value>>,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct TemplateBody {
    #[serde(rename = "AWSTemplateFormatVersion", default)]
    format_version: Option<String>,
    #[serde(rename = "Transform", default)]
    transform: Option<Value>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Metadata", default)]
    metadata: Option<BTreeMap<String, Value>>,
    #[serde(rename = "Parameters", default)]
    parameters: Option<BTreeMap<String, Value>>,
    #[serde(rename = "Mappings", default)]
    mappings: Option<BTreeMap<String, Value>>,
    #[serde(rename = "Conditions", default)]
    conditions: Option<BTreeMap<String, Value>>,
    #[serde(rename = "Resources", default)]
    resources: Option<BTreeMap<String, Resource>>,
    #[serde(rename = "Outputs", default)]
    outputs: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TemplateBodyRef {
            format_version: self.format_version.as_ref(),
            transform: self.transform.as_ref(),
            description: self.description.as_ref(),
            metadata: self.metadata.as_ref(),
            parameters: self.parameters.as_ref(),
            mappings: self.mappings.as_ref(),
            conditions: self.conditions.as_ref(),
            resources: self.declares_resources().then_some(&self.resources),
            outputs: self.outputs.as_ref(),
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = TemplateBody::deserialize(deserializer)?;
        Ok(Self {
            format_version: body.format_version,
            transform: body.transform,
            description: body.description,
            metadata: body.metadata,
            parameters: body.parameters,
            mappings: body.mappings,
            conditions: body.conditions,
            resources_declared: body.resources.is_some(),
            resources: body.resources.unwrap_or_default(),
            outputs: body.outputs,
            extra: body.extra,
        })
    }
}

/// Equal when both encode to the same document.
impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.format_version == other.format_version
            && self.transform == other.transform
            && self.description == other.description
            && self.metadata == other.metadata
            && self.parameters == other.parameters
            && self.mappings == other.mappings
            && self.conditions == other.conditions
            && self.resources == other.resources
            && self.declares_resources() == other.declares_resources()
            && self.outputs == other.outputs
            && self.extra == other.extra
    }
}

impl Template {
    /// An empty template with the default format version.
    pub fn new() -> Self {
        Self {
            format_version: Some(DEFAULT_FORMAT_VERSION.to_string()),
            resources_declared: true,
            ..Default::default()
        }
    }

    /// Whether encoding writes a `Resources` section.
    pub fn declares_resources(&self) -> bool {
        self.resources_declared || !self.resources.is_empty()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn from_json(content: &str) -> TemplateResult<Self> {
        TemplateReader::from_json_str(content)
    }

    pub fn from_yaml(content: &str) -> TemplateResult<Self> {
        TemplateReader::from_yaml_str(content)
    }

    pub fn to_json(&self) -> TemplateResult<String> {
        TemplateWriter::to_json_string(self, true)
    }

    pub fn to_yaml(&self) -> TemplateResult<String> {
        TemplateWriter::to_yaml_string(self)
    }

    pub fn to_string_with(&self, options: &WriteOptions) -> TemplateResult<String> {
        TemplateWriter::to_string(self, options)
    }

    /// Insert or replace a resource, returning the previous entry.
    pub fn insert(&mut self, logical_id: impl Into<String>, resource: impl Into<Resource>) -> Option<Resource> {
        let logical_id = logical_id.into();
        let resource = resource.into();
        debug!(
            "Inserting {} resource {} ({})",
            if resource.is_typed() { "typed" } else { "generic" },
            logical_id,
            resource.resource_type()
        );
        self.resources.insert(logical_id, resource)
    }

    /// Insert a typed resource. It stays typed and is returned as-is by resolution.
    pub fn insert_typed<P: ResourceProperties>(
        &mut self,
        logical_id: impl Into<String>,
        resource: TypedResource<P>,
    ) -> Option<Resource> {
        self.insert(logical_id, resource)
    }

    pub fn get(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn get_mut(&mut self, logical_id: &str) -> Option<&mut Resource> {
        self.resources.get_mut(logical_id)
    }

    pub fn remove(&mut self, logical_id: &str) -> Option<Resource> {
        self.resources.remove(logical_id)
    }

    pub fn contains(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id)
    }

    pub fn logical_ids(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Every resource whose `Type` is `P::RESOURCE_TYPE`, decoded as `P`.
    ///
    /// Other types are skipped. A matching entry that does not fit the schema
    /// is skipped with a warning; use [`Template::resolve_one`] to see the
    /// error.
    pub fn resolve_all<P: ResourceProperties>(&self) -> BTreeMap<String, TypedResource<P>> {
        let mut resolved = BTreeMap::new();
        for (logical_id, resource) in &self.resources {
            if resource.resource_type() != P::RESOURCE_TYPE {
                continue;
            }
            match TypedResource::<P>::from_resource(logical_id, resource) {
                Ok(typed) => {
                    resolved.insert(logical_id.clone(), typed);
                }
                Err(e) => warn!("Skipping {}: {}", logical_id, e),
            }
        }
        debug!("Resolved {} {} resources", resolved.len(), P::RESOURCE_TYPE);
        resolved
    }

    /// The resource `logical_id` decoded as `P`.
    ///
    /// A missing ID and an ID of another type both return
    /// [`TemplateError::NotFound`].
    pub fn resolve_one<P: ResourceProperties>(&self, logical_id: &str) -> TemplateResult<TypedResource<P>> {
        let resource = self
            .resources
            .get(logical_id)
            .filter(|resource| resource.resource_type() == P::RESOURCE_TYPE)
            .ok_or_else(|| TemplateError::NotFound {
                logical_id: logical_id.to_string(),
                resource_type: P::RESOURCE_TYPE.to_string(),
            })?;
        TypedResource::from_resource(logical_id, resource)
    }

    /// Resources with the given `Type`, in logical ID order.
    pub fn resources_of_type<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = (&'a str, &'a Resource)> {
        self.resources
            .iter()
            .filter(move |(_, resource)| resource.resource_type() == resource_type)
            .map(|(logical_id, resource)| (logical_id.as_str(), resource))
    }

    /// Number of resources per `Type`.
    pub fn resource_types(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for resource in self.resources.values() {
            *counts.entry(resource.resource_type().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// The resource named by a `Ref` or `Fn::GetAtt` value.
    pub fn lookup_reference(&self, value: &Value) -> Option<(&str, &Resource)> {
        let target = value.as_intrinsic()?.target()?;
        self.resources
            .get_key_value(target)
            .map(|(logical_id, resource)| (logical_id.as_str(), resource))
    }
}
