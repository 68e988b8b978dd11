//! Resource attributes shared by every resource regardless of type.

use std::collections::BTreeMap;

use forma_value::Value;
use serde::{Deserialize, Serialize};

use crate::error::{TemplateError, TemplateResult};
use crate::policies::{CreationPolicy, UpdatePolicy};

/// `DependsOn` accepts a single logical ID or a list; the form is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependsOn {
    One(String),
    Many(Vec<String>),
}

impl DependsOn {
    pub fn ids(&self) -> Vec<&str> {
        match self {
            DependsOn::One(id) => vec![id.as_str()],
            DependsOn::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    /// Append a logical ID, widening a single entry into a list.
    pub fn push(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            DependsOn::One(existing) => {
                *self = DependsOn::Many(vec![std::mem::take(existing), id]);
            }
            DependsOn::Many(ids) => ids.push(id),
        }
    }
}

/// What happens to a resource when it is deleted or replaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeletionPolicy {
    Delete,
    Retain,
    RetainExceptOnCreate,
    Snapshot,
    /// A value this crate does not know, kept verbatim.
    Other(String),
}

impl DeletionPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            DeletionPolicy::Delete => "Delete",
            DeletionPolicy::Retain => "Retain",
            DeletionPolicy::RetainExceptOnCreate => "RetainExceptOnCreate",
            DeletionPolicy::Snapshot => "Snapshot",
            DeletionPolicy::Other(s) => s,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Delete" => DeletionPolicy::Delete,
            "Retain" => DeletionPolicy::Retain,
            "RetainExceptOnCreate" => DeletionPolicy::RetainExceptOnCreate,
            "Snapshot" => DeletionPolicy::Snapshot,
            other => DeletionPolicy::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for DeletionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<DeletionPolicy> for Value {
    fn from(policy: DeletionPolicy) -> Self {
        Value::string(policy.as_str())
    }
}

/// Cross-cutting attributes of a resource body.
///
/// Policies are stored as raw values so that any shape in the source
/// document, including intrinsic calls, survives decoding. Typed views are
/// decoded on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<DependsOn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_policy: Option<Value>,
}

impl ResourceAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_depends_on(mut self, id: impl Into<String>) -> Self {
        match self.depends_on.as_mut() {
            Some(depends_on) => depends_on.push(id),
            None => self.depends_on = Some(DependsOn::One(id.into())),
        }
        self
    }

    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy.into());
        self
    }

    pub fn with_update_replace_policy(mut self, policy: DeletionPolicy) -> Self {
        self.update_replace_policy = Some(policy.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_update_policy(mut self, policy: &UpdatePolicy) -> Self {
        self.update_policy = Some(to_value(policy));
        self
    }

    pub fn with_creation_policy(mut self, policy: &CreationPolicy) -> Self {
        self.creation_policy = Some(to_value(policy));
        self
    }

    /// Logical IDs listed in `DependsOn`, empty when absent.
    pub fn depends_on_ids(&self) -> Vec<&str> {
        self.depends_on.as_ref().map(DependsOn::ids).unwrap_or_default()
    }

    /// `DeletionPolicy` as a typed value, when it is a literal string.
    pub fn deletion_policy(&self) -> Option<DeletionPolicy> {
        self.deletion_policy
            .as_ref()
            .and_then(Value::as_str)
            .map(DeletionPolicy::from_str)
    }

    /// `UpdateReplacePolicy` as a typed value, when it is a literal string.
    pub fn update_replace_policy(&self) -> Option<DeletionPolicy> {
        self.update_replace_policy
            .as_ref()
            .and_then(Value::as_str)
            .map(DeletionPolicy::from_str)
    }

    /// Decode `UpdatePolicy` into its typed form.
    pub fn update_policy(&self) -> TemplateResult<Option<UpdatePolicy>> {
        decode_policy(self.update_policy.as_ref(), "UpdatePolicy")
    }

    /// Decode `CreationPolicy` into its typed form.
    pub fn creation_policy(&self) -> TemplateResult<Option<CreationPolicy>> {
        decode_policy(self.creation_policy.as_ref(), "CreationPolicy")
    }
}

fn to_value<T: Serialize>(policy: &T) -> Value {
    serde_json::to_value(policy).map_or(Value::Null, Value::decode)
}

fn decode_policy<T: serde::de::DeserializeOwned>(
    raw: Option<&Value>,
    policy: &'static str,
) -> TemplateResult<Option<T>> {
    raw.map(|value| {
        serde_json::from_value(value.to_json())
            .map_err(|source| TemplateError::Policy { policy, source })
    })
    .transpose()
}
