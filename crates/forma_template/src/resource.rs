//! Generic and strongly-typed resources.
//!
//! A template stores each resource as a [`Resource`]: either the
//! [`GenericResource`] body produced by decoding, or a concrete
//! [`TypedResource`] inserted by calling code. Concrete schemas implement
//! [`ResourceProperties`], which ties a properties struct to its type
//! discriminator.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;

use forma_value::Value;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attributes::ResourceAttributes;
use crate::error::{TemplateError, TemplateResult};

/// A concrete resource schema: the `Properties` struct of one resource type.
pub trait ResourceProperties:
    Serialize + DeserializeOwned + Clone + Debug + PartialEq + Default + Send + Sync + 'static
{
    /// The type discriminator, e.g. `AWS::S3::Bucket`.
    const RESOURCE_TYPE: &'static str;
}

/// A resource body as decoded, before any schema has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(rename = "Properties", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub attributes: ResourceAttributes,
    /// Body keys that are neither `Type`, `Properties` nor a known attribute.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GenericResource {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties: None,
            attributes: ResourceAttributes::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: ResourceAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }
}

/// A resource decoded against a concrete schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedResource<P: ResourceProperties> {
    pub properties: P,
    pub attributes: ResourceAttributes,
}

impl<P: ResourceProperties> TypedResource<P> {
    pub fn new(properties: P) -> Self {
        Self {
            properties,
            attributes: ResourceAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: ResourceAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn resource_type(&self) -> &'static str {
        P::RESOURCE_TYPE
    }

    /// Decode a stored entry against this schema.
    ///
    /// Entries already stored as `TypedResource<P>` are cloned. Anything else
    /// is re-encoded and decoded again, so a generic body that does not fit
    /// the schema fails with [`TemplateError::Schema`]. The caller checks the
    /// discriminator.
    pub fn from_resource(logical_id: &str, resource: &Resource) -> TemplateResult<Self> {
        if let Some(typed) = resource.as_typed::<P>() {
            return Ok(typed.clone());
        }
        let schema_error = |source| TemplateError::Schema {
            logical_id: logical_id.to_string(),
            resource_type: P::RESOURCE_TYPE.to_string(),
            source,
        };
        let raw = match resource {
            Resource::Generic(generic) => serde_json::to_value(generic).map_err(schema_error)?,
            Resource::Typed(typed) => typed.to_json().map_err(schema_error)?,
        };
        serde_json::from_value(raw).map_err(schema_error)
    }
}

#[derive(Serialize)]
struct TypedBodyRef<'a, P> {
    #[serde(rename = "Type")]
    resource_type: &'static str,
    #[serde(rename = "Properties")]
    properties: &'a P,
    #[serde(flatten)]
    attributes: &'a ResourceAttributes,
}

#[derive(Deserialize)]
#[serde(bound = "P: DeserializeOwned")]
struct TypedBody<P> {
    #[serde(rename = "Type")]
    resource_type: String,
    #[serde(rename = "Properties", default)]
    properties: Option<P>,
    #[serde(flatten)]
    attributes: ResourceAttributes,
}

impl<P: ResourceProperties> Serialize for TypedResource<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TypedBodyRef {
            resource_type: P::RESOURCE_TYPE,
            properties: &self.properties,
            attributes: &self.attributes,
        }
        .serialize(serializer)
    }
}

impl<'de, P: ResourceProperties> Deserialize<'de> for TypedResource<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = TypedBody::<P>::deserialize(deserializer)?;
        if body.resource_type != P::RESOURCE_TYPE {
            return Err(serde::de::Error::custom(format!(
                "expected resource type {}, found {}",
                P::RESOURCE_TYPE,
                body.resource_type
            )));
        }
        // An absent `Properties` block is checked like an empty one.
        let properties = match body.properties {
            Some(properties) => properties,
            None => serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
                .map_err(serde::de::Error::custom)?,
        };
        Ok(Self {
            properties,
            attributes: body.attributes,
        })
    }
}

/// Object-safe view of a typed resource of any schema.
pub trait AnyResource: Debug + Send + Sync {
    fn resource_type(&self) -> &str;

    fn attributes(&self) -> &ResourceAttributes;

    /// Encode into the wire form `{ "Type": ..., "Properties": ..., ... }`.
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;

    fn clone_box(&self) -> Box<dyn AnyResource>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<P: ResourceProperties> AnyResource for TypedResource<P> {
    fn resource_type(&self) -> &str {
        P::RESOURCE_TYPE
    }

    fn attributes(&self) -> &ResourceAttributes {
        &self.attributes
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn clone_box(&self) -> Box<dyn AnyResource> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn AnyResource> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl dyn AnyResource {
    /// Downcast to a concrete typed resource.
    pub fn downcast_ref<P: ResourceProperties>(&self) -> Option<&TypedResource<P>> {
        self.as_any().downcast_ref::<TypedResource<P>>()
    }

    pub fn downcast_mut<P: ResourceProperties>(&mut self) -> Option<&mut TypedResource<P>> {
        self.as_any_mut().downcast_mut::<TypedResource<P>>()
    }
}

/// One entry of a template's `Resources` section.
///
/// Documents always decode to [`Resource::Generic`]. [`Resource::Typed`]
/// entries only appear when calling code inserts them. Both encode to the
/// same wire shape, and equality compares that wire shape.
#[derive(Debug, Clone)]
pub enum Resource {
    Generic(GenericResource),
    Typed(Box<dyn AnyResource>),
}

impl Resource {
    pub fn resource_type(&self) -> &str {
        match self {
            Resource::Generic(generic) => &generic.resource_type,
            Resource::Typed(typed) => typed.resource_type(),
        }
    }

    pub fn attributes(&self) -> &ResourceAttributes {
        match self {
            Resource::Generic(generic) => &generic.attributes,
            Resource::Typed(typed) => typed.attributes(),
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Resource::Generic(_))
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Resource::Typed(_))
    }

    pub fn as_generic(&self) -> Option<&GenericResource> {
        match self {
            Resource::Generic(generic) => Some(generic),
            Resource::Typed(_) => None,
        }
    }

    /// The stored typed value, if this entry was inserted as `TypedResource<P>`.
    pub fn as_typed<P: ResourceProperties>(&self) -> Option<&TypedResource<P>> {
        match self {
            Resource::Typed(typed) => typed.downcast_ref::<P>(),
            Resource::Generic(_) => None,
        }
    }

    /// Encode into the wire form.
    pub fn to_json(&self) -> TemplateResult<serde_json::Value> {
        match self {
            Resource::Generic(generic) => Ok(serde_json::to_value(generic)?),
            Resource::Typed(typed) => Ok(typed.to_json()?),
        }
    }

    /// The generic body of this entry, re-decoding typed entries.
    pub fn to_generic(&self) -> TemplateResult<GenericResource> {
        match self {
            Resource::Generic(generic) => Ok(generic.clone()),
            Resource::Typed(typed) => Ok(serde_json::from_value(typed.to_json()?)?),
        }
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Resource::Generic(a), Resource::Generic(b)) => a == b,
            _ => match (self.to_json(), other.to_json()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Resource::Generic(generic) => generic.serialize(serializer),
            Resource::Typed(typed) => typed
                .to_json()
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        GenericResource::deserialize(deserializer).map(Resource::Generic)
    }
}

impl From<GenericResource> for Resource {
    fn from(generic: GenericResource) -> Self {
        Resource::Generic(generic)
    }
}

impl<P: ResourceProperties> From<TypedResource<P>> for Resource {
    fn from(typed: TypedResource<P>) -> Self {
        Resource::Typed(Box::new(typed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::DeletionPolicy;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase", deny_unknown_fields)]
    struct Queue {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        queue_name: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay_seconds: Option<Value>,
    }

    impl ResourceProperties for Queue {
        const RESOURCE_TYPE: &'static str = "AWS::SQS::Queue";
    }

    #[test]
    fn test_generic_round_trip_preserves_everything() {
        let raw = json!({
            "Type": "Custom::Thing",
            "Properties": {"Size": 3, "Target": {"Fn::GetAtt": ["Fn", "Arn"]}},
            "Condition": "IsProd",
            "DependsOn": "Other",
            "Version": "1.0"
        });
        let generic: GenericResource = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(generic.resource_type, "Custom::Thing");
        assert_eq!(generic.attributes.condition.as_deref(), Some("IsProd"));
        assert_eq!(generic.extra.get("Version"), Some(&Value::string("1.0")));
        assert!(generic.property("Target").unwrap().is_intrinsic());
        assert_eq!(serde_json::to_value(&generic).unwrap(), raw);
    }

    #[test]
    fn test_absent_and_empty_properties_differ() {
        let absent: GenericResource =
            serde_json::from_value(json!({"Type": "AWS::CloudFormation::WaitConditionHandle"})).unwrap();
        assert!(absent.properties.is_none());
        assert_eq!(
            serde_json::to_value(&absent).unwrap(),
            json!({"Type": "AWS::CloudFormation::WaitConditionHandle"})
        );

        let empty: GenericResource =
            serde_json::from_value(json!({"Type": "AWS::SNS::Topic", "Properties": {}})).unwrap();
        assert_eq!(empty.properties, Some(BTreeMap::new()));
    }

    #[test]
    fn test_missing_type_is_an_error() {
        let result: Result<GenericResource, _> =
            serde_json::from_value(json!({"Properties": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_typed_serializes_with_type_and_attributes() {
        let typed = TypedResource::new(Queue {
            queue_name: Some("jobs".into()),
            ..Default::default()
        })
        .with_attributes(ResourceAttributes::new().with_deletion_policy(DeletionPolicy::Retain));

        assert_eq!(
            serde_json::to_value(&typed).unwrap(),
            json!({
                "Type": "AWS::SQS::Queue",
                "Properties": {"QueueName": "jobs"},
                "DeletionPolicy": "Retain"
            })
        );
    }

    #[test]
    fn test_typed_rejects_other_type() {
        let result: Result<TypedResource<Queue>, _> =
            serde_json::from_value(json!({"Type": "AWS::SNS::Topic", "Properties": {}}));
        assert!(result.is_err());
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase", deny_unknown_fields)]
    struct Subscription {
        endpoint: Value,
        protocol: Value,
    }

    impl ResourceProperties for Subscription {
        const RESOURCE_TYPE: &'static str = "AWS::SNS::Subscription";
    }

    #[test]
    fn test_typed_without_properties_defaults() {
        let typed: TypedResource<Queue> =
            serde_json::from_value(json!({"Type": "AWS::SQS::Queue"})).unwrap();
        assert_eq!(typed.properties, Queue::default());
    }

    #[test]
    fn test_absent_properties_checked_like_empty() {
        let absent = serde_json::from_value::<TypedResource<Subscription>>(
            json!({"Type": "AWS::SNS::Subscription"}),
        )
        .unwrap_err();
        let empty = serde_json::from_value::<TypedResource<Subscription>>(
            json!({"Type": "AWS::SNS::Subscription", "Properties": {}}),
        )
        .unwrap_err();
        assert!(absent.to_string().contains("missing field `Endpoint`"));
        assert!(empty.to_string().contains("missing field `Endpoint`"));

        let generic: Resource = GenericResource::new("AWS::SNS::Subscription").into();
        assert!(matches!(
            TypedResource::<Subscription>::from_resource("Alerts", &generic),
            Err(TemplateError::Schema { .. })
        ));
    }

    #[test]
    fn test_resource_equality_uses_wire_form() {
        let typed: Resource = TypedResource::new(Queue {
            delay_seconds: Some(5i64.into()),
            ..Default::default()
        })
        .into();
        let generic: Resource = GenericResource::new("AWS::SQS::Queue")
            .with_property("DelaySeconds", 5i64)
            .into();
        assert_eq!(typed, generic);
        assert_eq!(typed.to_generic().unwrap(), generic.as_generic().unwrap().clone());
    }

    #[test]
    fn test_downcast() {
        let resource: Resource = TypedResource::new(Queue::default()).into();
        assert!(resource.is_typed());
        assert_eq!(resource.resource_type(), "AWS::SQS::Queue");
        assert!(resource.as_typed::<Queue>().is_some());
        assert!(resource.as_generic().is_none());

        let mut boxed: Box<dyn AnyResource> = Box::new(TypedResource::new(Queue::default()));
        boxed.downcast_mut::<Queue>().unwrap().properties.queue_name = Some("renamed".into());
        assert_eq!(
            boxed.downcast_ref::<Queue>().unwrap().properties.queue_name,
            Some(Value::string("renamed"))
        );
    }
}
